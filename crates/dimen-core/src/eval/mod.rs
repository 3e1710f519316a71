//! Expression evaluation engine

use std::collections::HashMap;

use crate::catalog::catalog;
use crate::error::{Error, Result};
use crate::math;
use crate::parser::{Ast, BinaryOp, Expr, UnitExpr};
use crate::types::{CompoundUnit, Quantity, Value};

/// Evaluation context with variables
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub(crate) variables: HashMap<String, Value>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable value
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Set a variable
    pub fn set_variable(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }

    /// Clear all variables
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }
}

/// Evaluate an AST node. Empty lines produce `None`.
pub fn evaluate(ast: &Ast, ctx: &mut EvalContext) -> Result<Option<Value>> {
    match ast {
        Ast::Empty => Ok(None),
        Ast::Assignment { name, expr } => {
            let value = eval_expr(expr, ctx)?;
            ctx.set_variable(name.clone(), value.clone());
            Ok(Some(value))
        }
        Ast::Expression(expr) => eval_expr(expr, ctx).map(Some),
    }
}

fn eval_expr(expr: &Expr, ctx: &EvalContext) -> Result<Value> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Literal { magnitude, suffix } => {
            catalog().quantity(*magnitude, suffix).map(Value::from)
        }
        Expr::Variable(name) => ctx
            .get_variable(name)
            .cloned()
            .ok_or_else(|| Error::UnknownVariable(name.clone())),
        Expr::BinaryOp { op, left, right } => {
            let lval = eval_expr(left, ctx)?;
            let rval = eval_expr(right, ctx)?;
            eval_binary_op(*op, &lval, &rval)
        }
        Expr::Negate(inner) => Ok(eval_expr(inner, ctx)?.negate()),
        Expr::Conversion { value, target } => {
            let val = eval_expr(value, ctx)?;
            eval_conversion(val, target)
        }
        Expr::FunctionCall { name, args } => {
            let evaluated = args
                .iter()
                .map(|a| eval_expr(a, ctx))
                .collect::<Result<Vec<_>>>()?;
            eval_function(name, &evaluated)
        }
    }
}

fn eval_binary_op(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add => left.try_add(right),
        BinaryOp::Subtract => left.try_sub(right),
        BinaryOp::Multiply => left.multiply(right),
        BinaryOp::Divide => left.divide(right),
        BinaryOp::Power => eval_power(left, right),
    }
}

fn eval_power(base: &Value, exponent: &Value) -> Result<Value> {
    let n = exponent
        .as_number()
        .ok_or_else(|| Error::incompatible(exponent.unit(), CompoundUnit::dimensionless()))?;
    match base {
        Value::Number(x) => Ok(Value::Number(x.powf(n))),
        Value::Quantity(q) => {
            if n.fract() != 0.0 {
                return Err(Error::NonIntegerExponent(n));
            }
            if n.abs() > i32::MAX as f64 {
                return Err(Error::Overflow);
            }
            q.powi(n as i32)
        }
    }
}

/// Resolves a conversion target against the catalog.
fn resolve_unit_expr(target: &UnitExpr) -> Result<CompoundUnit> {
    let cat = catalog();
    target
        .factors
        .iter()
        .try_fold(CompoundUnit::dimensionless(), |acc, (name, exponent)| {
            acc.multiply(&cat.resolve(name)?.powi(*exponent)?)
        })
}

fn eval_conversion(value: Value, target: &UnitExpr) -> Result<Value> {
    let unit = resolve_unit_expr(target)?;
    match value {
        Value::Quantity(q) => q.convert_compound(&unit).map(Value::Quantity),
        Value::Number(_) => Err(Error::UnsupportedConversion {
            from: CompoundUnit::dimensionless().to_string(),
            to: unit.to_string(),
            reason: "a bare number has no unit to convert",
        }),
    }
}

fn check_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::Arity {
            function: name.to_string(),
            expected,
            found: args.len(),
        })
    }
}

fn eval_function(name: &str, args: &[Value]) -> Result<Value> {
    match name {
        "fmod" => {
            check_arity(name, args, 2)?;
            match (&args[0], &args[1]) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a % b)),
                (Value::Quantity(a), Value::Quantity(b)) => math::fmod(a, b).map(Value::Quantity),
                (a, b) => Err(Error::incompatible(a.unit(), b.unit())),
            }
        }
        "pow" => {
            check_arity(name, args, 2)?;
            let exponent = args[1]
                .as_number()
                .ok_or_else(|| Error::incompatible(args[1].unit(), CompoundUnit::dimensionless()))?;
            match &args[0] {
                Value::Number(x) => Ok(Value::Number(x.powf(exponent))),
                Value::Quantity(q) => Ok(Value::Quantity(math::pow(q, exponent))),
            }
        }
        _ => {
            let Some(number_fn) = math::number_fn(name) else {
                return Err(Error::UnknownFunction(name.to_string()));
            };
            check_arity(name, args, 1)?;
            match &args[0] {
                Value::Number(x) => Ok(Value::Number(number_fn(*x))),
                Value::Quantity(q) => eval_quantity_function(name, q),
            }
        }
    }
}

fn eval_quantity_function(name: &str, q: &Quantity) -> Result<Value> {
    if let Some(f) = math::angle_fn(name) {
        return f(q).map(Value::Number);
    }
    match math::magnitude_fn(name) {
        Some(f) => Ok(Value::Quantity(f(q))),
        None => Err(Error::UnknownFunction(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    fn eval(input: &str, ctx: &mut EvalContext) -> Result<Option<Value>> {
        evaluate(&parse_line(input)?, ctx)
    }

    fn value(input: &str) -> Value {
        eval(input, &mut EvalContext::new()).unwrap().unwrap()
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(eval("", &mut EvalContext::new()), Ok(None));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(value("10 + 20 * 2"), Value::Number(50.0));
        assert_eq!(value("2 ^ 10"), Value::Number(1024.0));
        assert_eq!(value("-(3 - 5)"), Value::Number(2.0));
    }

    #[test]
    fn test_variables() {
        let mut ctx = EvalContext::new();
        eval("d = 3_km", &mut ctx).unwrap();
        let v = eval("d + 2_km", &mut ctx).unwrap().unwrap();
        assert_eq!(v.to_string(), "5 km");
        assert_eq!(
            eval("missing", &mut ctx),
            Err(Error::UnknownVariable("missing".into()))
        );
    }

    #[test]
    fn test_mixed_units_rejected() {
        assert!(matches!(
            eval("1_m + 1_mile", &mut EvalContext::new()),
            Err(Error::IncompatibleUnits { .. })
        ));
        assert!(matches!(
            eval("1_m + 1", &mut EvalContext::new()),
            Err(Error::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn test_power_of_quantity() {
        let v = value("(3_m) ^ 2");
        assert_eq!(v.to_string(), "9 m^2");
        assert_eq!(
            eval("3_m ^ 0.5", &mut EvalContext::new()),
            Err(Error::NonIntegerExponent(0.5))
        );
    }

    #[test]
    fn test_exponent_overflow_is_reported() {
        let mut ctx = EvalContext::new();
        for input in [
            "(1_m ^ 2147483647) * 1_m",
            "(1_m ^ 2) ^ 2000000000",
            "1_m ^ 3000000000",
            "1_m to m^2147483647*m",
        ] {
            assert_eq!(eval(input, &mut ctx), Err(Error::Overflow), "{input}");
        }
        let v = value("(1_m ^ 2147483647) / 1_m");
        assert_eq!(v.unit().to_string(), "m^2147483646");
    }

    #[test]
    fn test_conversion() {
        let v = value("60_mph to m/s");
        assert!((v.as_f64() - 26.8224).abs() < 1e-9);
        assert_eq!(v.unit().to_string(), "m*s^-1");
        assert!(matches!(
            eval("3 to m", &mut EvalContext::new()),
            Err(Error::UnsupportedConversion { .. })
        ));
        assert!(matches!(
            eval("3_m to furlong", &mut EvalContext::new()),
            Err(Error::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_functions() {
        assert!((value("sin(90_deg)").as_f64() - 1.0).abs() < 1e-9);
        assert_eq!(value("sqrt(16)"), Value::Number(4.0));
        assert_eq!(value("abs(-2_m)").to_string(), "2 m");
        assert_eq!(value("fmod(7_s, 2_s)").to_string(), "1 s");
        assert_eq!(value("pow(2_m, 3)").to_string(), "8 m");
    }

    #[test]
    fn test_function_errors() {
        let mut ctx = EvalContext::new();
        assert_eq!(
            eval("frobnicate(1)", &mut ctx),
            Err(Error::UnknownFunction("frobnicate".into()))
        );
        assert_eq!(
            eval("sqrt(1, 2)", &mut ctx),
            Err(Error::Arity {
                function: "sqrt".into(),
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            eval("cos(1_m)", &mut ctx),
            Err(Error::NotAnAngle("m".into()))
        );
    }
}
