// Lexical helpers shared by the chart expression parsers

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, opt, recognize, value},
    multi::many0_count,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Identifier: letter or underscore followed by letters, digits or underscores
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0_count(alt((alphanumeric1, tag("_")))),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// Double-quoted string with `\"` and `\\` escapes
pub fn string_literal(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((value("\\", tag("\\")), value("\"", tag("\"")))),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

/// Unquoted column name: anything that cannot be confused with punctuation
pub fn bare_word(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| {
            c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '%' | '#')
        }),
        |s: &str| s.to_string(),
    )(input)
}

/// A column reference, quoted or bare
pub fn column_name(input: &str) -> IResult<&str, String> {
    alt((string_literal, bare_word))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("bar(x"), Ok(("(x", "bar".to_string())));
        assert_eq!(identifier("_a1 "), Ok((" ", "_a1".to_string())));
        assert!(identifier("1abc").is_err());
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            string_literal(r#""Total Sales" rest"#),
            Ok((" rest", "Total Sales".to_string()))
        );
        assert_eq!(
            string_literal(r#""say \"hi\"""#),
            Ok(("", "say \"hi\"".to_string()))
        );
        assert_eq!(string_literal(r#""""#), Ok(("", String::new())));
        assert!(string_literal(r#""unterminated"#).is_err());
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name("price_usd)"), Ok((")", "price_usd".to_string())));
        assert_eq!(column_name("2023-q1,"), Ok((",", "2023-q1".to_string())));
        assert_eq!(column_name(r#""a, b""#), Ok(("", "a, b".to_string())));
    }
}
