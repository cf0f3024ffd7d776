// Parser for chart expressions: kind(role: column, ...)

use super::ast::{Binding, ChartExpr};
use super::lexer::{column_name, identifier, ws};
use nom::{
    character::complete::char,
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, separated_pair},
    IResult,
};

/// Parse `role: column`
pub fn parse_binding(input: &str) -> IResult<&str, Binding> {
    map(
        separated_pair(ws(identifier), char(':'), ws(column_name)),
        |(role, column)| Binding { role, column },
    )(input)
}

/// Parse a chart expression
/// Format: kind, kind() or kind(role: column, role: "quoted column")
pub fn parse_chart_expr(input: &str) -> IResult<&str, ChartExpr> {
    let (input, kind) = ws(identifier)(input)?;
    let (input, bindings) = opt(delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), parse_binding),
        ws(char(')')),
    ))(input)?;

    Ok((
        input,
        ChartExpr {
            kind,
            bindings: bindings.unwrap_or_default(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(role: &str, column: &str) -> Binding {
        Binding {
            role: role.to_string(),
            column: column.to_string(),
        }
    }

    #[test]
    fn test_parse_bar() {
        let (rest, expr) = parse_chart_expr("bar(x: region, y: sales)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(expr.kind, "bar");
        assert_eq!(expr.bindings, vec![binding("x", "region"), binding("y", "sales")]);
    }

    #[test]
    fn test_parse_with_whitespace_and_quotes() {
        let input = r#"  pie( label : "Product Line" ,value: units )  "#;
        let (rest, expr) = parse_chart_expr(input).unwrap();
        assert_eq!(rest, "");
        assert_eq!(expr.kind, "pie");
        assert_eq!(
            expr.bindings,
            vec![binding("label", "Product Line"), binding("value", "units")]
        );
    }

    #[test]
    fn test_parse_bare_kind() {
        let (rest, expr) = parse_chart_expr("histogram").unwrap();
        assert_eq!(rest, "");
        assert_eq!(expr.kind, "histogram");
        assert!(expr.bindings.is_empty());

        let (_, expr) = parse_chart_expr("line()").unwrap();
        assert!(expr.bindings.is_empty());
    }

    #[test]
    fn test_parse_leaves_garbage() {
        // Missing comma: the binding list stops, the closing paren is missing
        let result = parse_chart_expr("bar(x: a y: b)");
        assert!(result.is_err() || !result.unwrap().0.is_empty());
    }

    #[test]
    fn test_parse_unclosed_paren() {
        let result = parse_chart_expr("bar(x: a, y: b");
        assert!(result.is_err() || !result.unwrap().0.is_empty());
    }
}
