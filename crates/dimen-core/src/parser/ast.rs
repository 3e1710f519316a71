//! Abstract Syntax Tree definitions

use pest::iterators::{Pair, Pairs};

use super::Rule;
use crate::error::{Error, Result};

/// Top-level AST node for a line
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// Empty or comment-only line
    Empty,
    /// Variable assignment: name = expr
    Assignment { name: String, expr: Box<Expr> },
    /// Expression to evaluate
    Expression(Expr),
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare number
    Number(f64),
    /// Number with a unit suffix: 3_km
    Literal { magnitude: f64, suffix: String },
    /// Variable reference
    Variable(String),
    /// Binary operation
    BinaryOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary minus
    Negate(Box<Expr>),
    /// Unit conversion: 60_mph to m/s
    Conversion { value: Box<Expr>, target: UnitExpr },
    /// Function call: sqrt(x), fmod(a, b)
    FunctionCall { name: String, args: Vec<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Conversion target such as `m/s^2`: unit names or literals with their
/// net exponents, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitExpr {
    pub factors: Vec<(String, i32)>,
}

fn malformed(pair: &Pair<'_, Rule>, message: &str) -> Error {
    Error::Syntax {
        pos: pair.as_span().start(),
        message: message.to_string(),
    }
}

pub(super) fn parse_number(pair: &Pair<'_, Rule>) -> Result<f64> {
    pair.as_str()
        .parse()
        .map_err(|_| malformed(pair, "invalid number"))
}

/// Build AST from parsed pairs
pub fn build_ast(mut pairs: Pairs<'_, Rule>) -> Result<Ast> {
    let Some(line) = pairs.next() else {
        return Ok(Ast::Empty);
    };
    for pair in line.into_inner() {
        match pair.as_rule() {
            Rule::assignment => return build_assignment(pair),
            Rule::expression => return Ok(Ast::Expression(build_expression(pair)?)),
            _ => {}
        }
    }
    Ok(Ast::Empty)
}

fn build_assignment(pair: Pair<'_, Rule>) -> Result<Ast> {
    let mut inner = pair.clone().into_inner();
    let name = inner
        .next()
        .ok_or_else(|| malformed(&pair, "expected identifier"))?
        .as_str()
        .to_string();
    let expr_pair = inner
        .next()
        .ok_or_else(|| malformed(&pair, "expected expression"))?;

    Ok(Ast::Assignment {
        name,
        expr: Box::new(build_expression(expr_pair)?),
    })
}

fn build_expression(pair: Pair<'_, Rule>) -> Result<Expr> {
    let mut calculation = None;
    let mut target = None;

    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::calculation => calculation = Some(build_calculation(inner)?),
            Rule::conversion_suffix => {
                if let Some(unit_expr) = inner.into_inner().find(|p| p.as_rule() == Rule::unit_expr)
                {
                    target = Some(build_unit_expr(unit_expr)?);
                }
            }
            _ => {}
        }
    }

    let expr = calculation.ok_or_else(|| malformed(&pair, "expected calculation"))?;
    Ok(match target {
        Some(target) => Expr::Conversion {
            value: Box::new(expr),
            target,
        },
        None => expr,
    })
}

fn build_calculation(pair: Pair<'_, Rule>) -> Result<Expr> {
    let mut terms: Vec<Expr> = Vec::new();
    let mut ops: Vec<BinaryOp> = Vec::new();

    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::term => terms.push(build_term(inner)?),
            Rule::add => ops.push(BinaryOp::Add),
            Rule::subtract => ops.push(BinaryOp::Subtract),
            Rule::multiply => ops.push(BinaryOp::Multiply),
            Rule::divide => ops.push(BinaryOp::Divide),
            Rule::power => ops.push(BinaryOp::Power),
            _ => {}
        }
    }

    if terms.is_empty() {
        return Err(malformed(&pair, "empty expression"));
    }

    // Pass 1: Power
    process_ops(&mut terms, &mut ops, &[BinaryOp::Power]);

    // Pass 2: Multiply, Divide
    process_ops(
        &mut terms,
        &mut ops,
        &[BinaryOp::Multiply, BinaryOp::Divide],
    );

    // Pass 3: Add, Subtract
    process_ops(&mut terms, &mut ops, &[BinaryOp::Add, BinaryOp::Subtract]);

    if terms.len() != 1 {
        return Err(malformed(&pair, "failed to reduce expression"));
    }

    Ok(terms.remove(0))
}

fn process_ops(terms: &mut Vec<Expr>, ops: &mut Vec<BinaryOp>, target_ops: &[BinaryOp]) {
    let mut i = 0;
    while i < ops.len() {
        if target_ops.contains(&ops[i]) {
            let op = ops.remove(i);
            let left = terms.remove(i);
            let right = terms.remove(i);

            terms.insert(
                i,
                Expr::BinaryOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
        } else {
            i += 1;
        }
    }
}

fn build_term(pair: Pair<'_, Rule>) -> Result<Expr> {
    let mut negations = 0;
    let mut atom = None;

    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::negate => negations += 1,
            _ => atom = Some(build_atom(inner)?),
        }
    }

    let mut expr = atom.ok_or_else(|| malformed(&pair, "expected operand"))?;
    for _ in 0..negations {
        expr = Expr::Negate(Box::new(expr));
    }
    Ok(expr)
}

fn build_atom(pair: Pair<'_, Rule>) -> Result<Expr> {
    match pair.as_rule() {
        Rule::number => Ok(Expr::Number(parse_number(&pair)?)),
        Rule::literal => {
            let (magnitude, suffix) = literal_parts(pair)?;
            Ok(Expr::Literal { magnitude, suffix })
        }
        Rule::variable_ref => Ok(Expr::Variable(pair.as_str().to_string())),
        Rule::parenthesized => {
            let inner = pair
                .clone()
                .into_inner()
                .next()
                .ok_or_else(|| malformed(&pair, "expected expression"))?;
            build_expression(inner)
        }
        Rule::function_call => build_function_call(pair),
        _ => Err(malformed(&pair, "unexpected token")),
    }
}

/// Splits a `literal` pair into its magnitude and suffix.
pub(super) fn literal_parts(pair: Pair<'_, Rule>) -> Result<(f64, String)> {
    let mut inner = pair.clone().into_inner();
    let number = inner
        .next()
        .ok_or_else(|| malformed(&pair, "expected number"))?;
    let suffix = inner
        .next()
        .ok_or_else(|| malformed(&pair, "expected unit suffix"))?;
    Ok((parse_number(&number)?, suffix.as_str().to_string()))
}

fn build_function_call(pair: Pair<'_, Rule>) -> Result<Expr> {
    let mut inner = pair.clone().into_inner();
    let name = inner
        .next()
        .ok_or_else(|| malformed(&pair, "expected function name"))?
        .as_str()
        .to_string();

    let args = inner
        .filter(|p| p.as_rule() == Rule::expression)
        .map(build_expression)
        .collect::<Result<Vec<_>>>()?;

    Ok(Expr::FunctionCall { name, args })
}

fn build_unit_expr(pair: Pair<'_, Rule>) -> Result<UnitExpr> {
    let mut factors = Vec::new();
    let mut sign = 1;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::unit_mul => sign = 1,
            Rule::unit_div => sign = -1,
            Rule::unit_factor => {
                let mut parts = inner.clone().into_inner();
                let name = parts
                    .next()
                    .ok_or_else(|| malformed(&inner, "expected unit name"))?
                    .as_str()
                    .to_string();
                let exponent = match parts.next() {
                    Some(power) => power
                        .as_str()
                        .parse::<i32>()
                        .map_err(|_| malformed(&power, "invalid unit exponent"))?,
                    None => 1,
                };
                let exponent = exponent.checked_mul(sign).ok_or(Error::Overflow)?;
                factors.push((name, exponent));
            }
            _ => {}
        }
    }

    Ok(UnitExpr { factors })
}
