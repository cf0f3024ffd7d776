// Syntax tree for chart expressions

/// A parsed `kind(role: column, ...)` expression, before validation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartExpr {
    /// Chart kind as written
    pub kind: String,
    /// `(role, column)` pairs in source order
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub role: String,
    pub column: String,
}
