// Chart expression parser module

pub mod ast;
pub mod chart_expr;
pub mod lexer;

use std::collections::HashSet;

use nom::combinator::all_consuming;

use crate::chart::{AxisRole, AxisSelection, ChartKind};
use crate::error::{ChartError, Result};

pub use ast::{Binding, ChartExpr};
pub use chart_expr::parse_chart_expr;

/// A validated chart expression
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    /// Roles named in the expression; roles left out are filled by the caller
    pub selection: AxisSelection,
}

/// Parse and validate a complete chart expression such as
/// `scatter(x: height, y: weight)`.
pub fn parse_chart_request(input: &str) -> Result<ChartRequest> {
    let (_, expr) = all_consuming(parse_chart_expr)(input)
        .map_err(|e| {
            ChartError::InvalidExpression(format!("could not parse '{}': {}", input.trim(), e))
        })?;
    resolve(expr)
}

fn resolve(expr: ChartExpr) -> Result<ChartRequest> {
    let kind: ChartKind = expr.kind.parse()?;

    let mut seen = HashSet::new();
    let mut selection = AxisSelection::new();
    for binding in expr.bindings {
        let role = AxisRole::from_name(&binding.role)
            .filter(|r| kind.uses_role(*r))
            .ok_or_else(|| {
                let expected: Vec<&str> = kind.roles().map(AxisRole::name).collect();
                ChartError::InvalidExpression(format!(
                    "'{}' is not an axis of a {} chart (expected {})",
                    binding.role,
                    kind,
                    expected.join(", ")
                ))
            })?;
        if !seen.insert(role) {
            return Err(ChartError::InvalidExpression(format!(
                "axis '{}' given more than once",
                role
            )));
        }
        selection.set(role, binding.column);
    }

    Ok(ChartRequest { kind, selection })
}
