//! Expression parser using pest

mod ast;

pub use ast::{Ast, BinaryOp, Expr, UnitExpr};

use pest::error::InputLocation;
use pest::Parser;
use pest_derive::Parser;

use crate::catalog::catalog;
use crate::error::{Error, Result};
use crate::types::Quantity;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct DimenParser;

fn syntax_error(e: pest::error::Error<Rule>) -> Error {
    let pos = match e.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    Error::Syntax {
        pos,
        message: e.variant.message().into_owned(),
    }
}

/// Parse a single line of input
pub fn parse_line(input: &str) -> Result<Ast> {
    let pairs = DimenParser::parse(Rule::line, input).map_err(syntax_error)?;
    ast::build_ast(pairs)
}

/// Parses exactly one unit literal (`3_km`) against the built-in catalog.
pub(crate) fn parse_literal(input: &str) -> Result<Quantity> {
    let pair = DimenParser::parse(Rule::single_literal, input)
        .map_err(syntax_error)?
        .next()
        .and_then(|p| p.into_inner().find(|p| p.as_rule() == Rule::literal))
        .ok_or_else(|| Error::Syntax {
            pos: 0,
            message: "expected a unit literal".into(),
        })?;
    let (magnitude, suffix) = ast::literal_parts(pair)?;
    catalog().quantity(magnitude, &suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expr(input: &str) -> Expr {
        match parse_line(input).unwrap() {
            Ast::Expression(e) => e,
            other => panic!("expected expression, got {other:?}"),
        }
    }

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(expr("42"), Expr::Number(42.0));
        assert_eq!(expr("1.5e3"), Expr::Number(1500.0));
    }

    #[test]
    fn test_parse_literal_expr() {
        assert_eq!(
            expr("2.5_mile"),
            Expr::Literal {
                magnitude: 2.5,
                suffix: "mile".into()
            }
        );
        assert_eq!(
            expr("1e3_m"),
            Expr::Literal {
                magnitude: 1000.0,
                suffix: "m".into()
            }
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("1 + 2 * 3 ^ 2"),
            Expr::BinaryOp {
                op: BinaryOp::Add,
                left: num(1.0),
                right: Box::new(Expr::BinaryOp {
                    op: BinaryOp::Multiply,
                    left: num(2.0),
                    right: Box::new(Expr::BinaryOp {
                        op: BinaryOp::Power,
                        left: num(3.0),
                        right: num(2.0),
                    }),
                }),
            }
        );
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            expr("8 / 4 / 2"),
            Expr::BinaryOp {
                op: BinaryOp::Divide,
                left: Box::new(Expr::BinaryOp {
                    op: BinaryOp::Divide,
                    left: num(8.0),
                    right: num(4.0),
                }),
                right: num(2.0),
            }
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(expr("-3"), Expr::Negate(num(3.0)));
        assert_eq!(
            expr("2 - -3"),
            Expr::BinaryOp {
                op: BinaryOp::Subtract,
                left: num(2.0),
                right: Box::new(Expr::Negate(num(3.0))),
            }
        );
        assert_eq!(
            expr("-2 ^ 2"),
            Expr::BinaryOp {
                op: BinaryOp::Power,
                left: Box::new(Expr::Negate(num(2.0))),
                right: num(2.0),
            }
        );
    }

    #[test]
    fn test_parse_assignment() {
        let ast = parse_line("speed = 60_mph").unwrap();
        assert!(matches!(ast, Ast::Assignment { ref name, .. } if name == "speed"));
    }

    #[test]
    fn test_parse_conversion() {
        match expr("60_mph to m/s") {
            Expr::Conversion { target, .. } => {
                assert_eq!(
                    target.factors,
                    vec![("m".to_string(), 1), ("s".to_string(), -1)]
                );
            }
            other => panic!("expected conversion, got {other:?}"),
        }
        match expr("x in km*h^-1") {
            Expr::Conversion { target, .. } => {
                assert_eq!(
                    target.factors,
                    vec![("km".to_string(), 1), ("h".to_string(), -1)]
                );
            }
            other => panic!("expected conversion, got {other:?}"),
        }
    }

    #[test]
    fn test_divided_lowest_exponent_overflows() {
        assert_eq!(
            parse_line("1_m to s/m^-2147483648"),
            Err(Error::Overflow)
        );
        assert!(matches!(
            parse_line("1_m to m^99999999999"),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn test_keyword_prefix_is_a_variable() {
        assert_eq!(expr("inch"), Expr::Variable("inch".into()));
        assert_eq!(expr("total"), Expr::Variable("total".into()));
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            expr("fmod(7, 2)"),
            Expr::FunctionCall {
                name: "fmod".into(),
                args: vec![Expr::Number(7.0), Expr::Number(2.0)],
            }
        );
    }

    #[test]
    fn test_empty_and_comment_lines() {
        assert_eq!(parse_line("").unwrap(), Ast::Empty);
        assert_eq!(parse_line("   # just a note").unwrap(), Ast::Empty);
        assert_eq!(expr("3 # trailing"), Expr::Number(3.0));
    }

    #[test]
    fn test_syntax_error_has_position() {
        match parse_line("3 + * 4") {
            Err(Error::Syntax { pos, .. }) => assert!(pos > 0),
            other => panic!("expected syntax error, got {other:?}"),
        }
        assert!(parse_line("5_km to").is_err());
    }

    #[test]
    fn test_parse_literal() {
        let q = parse_literal("3_km").unwrap();
        assert_eq!(q.magnitude(), 3.0);
        assert_eq!(q.unit().to_string(), "km");
        assert!(matches!(parse_literal("3 km"), Err(Error::Syntax { .. })));
        assert_eq!(
            parse_literal("3_furlong"),
            Err(Error::UnknownUnit("furlong".into()))
        );
    }
}
