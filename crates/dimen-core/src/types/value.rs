//! Result values: bare numbers or quantities
//!
//! Multiplying or dividing quantities whose units cancel yields a plain
//! number rather than a dimensionless quantity; `Value` is the type that
//! carries either outcome.

use serde::Serialize;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{CompoundUnit, Quantity};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Plain number
    Number(f64),
    /// Magnitude with a non-empty unit
    Quantity(Quantity),
}

impl Value {
    /// Wraps a quantity, collapsing the dimensionless unit to a bare number.
    pub fn from_quantity(quantity: Quantity) -> Self {
        if quantity.unit().is_dimensionless() {
            Value::Number(quantity.magnitude())
        } else {
            Value::Quantity(quantity)
        }
    }

    /// Get the numeric value as f64, ignoring units
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Quantity(q) => q.magnitude(),
        }
    }

    /// The number, if this value carries no unit
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Quantity(_) => None,
        }
    }

    pub fn into_quantity(self) -> Option<Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            Value::Number(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// The value's unit; dimensionless for bare numbers.
    pub fn unit(&self) -> CompoundUnit {
        match self {
            Value::Number(_) => CompoundUnit::dimensionless(),
            Value::Quantity(q) => q.unit().clone(),
        }
    }

    fn to_quantity(&self) -> Quantity {
        match self {
            Value::Number(n) => Quantity::new(*n, CompoundUnit::dimensionless()),
            Value::Quantity(q) => q.clone(),
        }
    }

    pub fn try_add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::Quantity(l), Value::Quantity(r)) => l.try_add(r).map(Value::Quantity),
            _ => Err(Error::incompatible(self.unit(), other.unit())),
        }
    }

    pub fn try_sub(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l - r)),
            (Value::Quantity(l), Value::Quantity(r)) => l.try_sub(r).map(Value::Quantity),
            _ => Err(Error::incompatible(self.unit(), other.unit())),
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l * r)),
            (Value::Quantity(q), Value::Number(k)) | (Value::Number(k), Value::Quantity(q)) => {
                Ok(Value::Quantity(q.scale_by(*k)))
            }
            (Value::Quantity(l), Value::Quantity(r)) => l.multiply(r),
        }
    }

    pub fn divide(&self, other: &Value) -> Result<Value> {
        self.to_quantity().divide(&other.to_quantity())
    }

    pub fn negate(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            Value::Quantity(q) => Value::Quantity(q.negate()),
        }
    }

    pub fn powi(&self, n: i32) -> Result<Value> {
        match self {
            Value::Number(x) => Ok(Value::Number(x.powi(n))),
            Value::Quantity(q) => q.powi(n),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::from_quantity(q)
    }
}

impl Add for Value {
    type Output = Result<Value>;

    fn add(self, rhs: Value) -> Result<Value> {
        self.try_add(&rhs)
    }
}

impl Sub for Value {
    type Output = Result<Value>;

    fn sub(self, rhs: Value) -> Result<Value> {
        self.try_sub(&rhs)
    }
}

impl Mul for Value {
    type Output = Result<Value>;

    fn mul(self, rhs: Value) -> Result<Value> {
        self.multiply(&rhs)
    }
}

impl Div for Value {
    type Output = Result<Value>;

    fn div(self, rhs: Value) -> Result<Value> {
        self.divide(&rhs)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        self.negate()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Quantity(q) => fmt::Display::fmt(q, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::symbol::{LENGTH, TIME};
    use crate::types::BaseUnit;

    fn meter() -> CompoundUnit {
        BaseUnit::new(LENGTH).into()
    }

    #[test]
    fn test_dimensionless_collapses() {
        let v = Value::from_quantity(Quantity::new(3.0, CompoundUnit::dimensionless()));
        assert_eq!(v, Value::Number(3.0));
        assert!(v.is_number());
    }

    #[test]
    fn test_mixed_add_rejected() {
        let q = Value::from(Quantity::new(1.0, meter()));
        let err = q.try_add(&Value::Number(1.0)).unwrap_err();
        assert_eq!(
            err,
            Error::IncompatibleUnits {
                left: "m".into(),
                right: "1".into()
            }
        );
    }

    #[test]
    fn test_number_times_quantity() {
        let v = (Value::Number(2.0) * Value::from(Quantity::new(3.0, meter()))).unwrap();
        assert_eq!(v.as_f64(), 6.0);
        assert_eq!(v.unit(), meter());
    }

    #[test]
    fn test_number_over_quantity_inverts() {
        let second: CompoundUnit = BaseUnit::new(TIME).into();
        let v = (Value::Number(1.0) / Value::from(Quantity::new(4.0, second))).unwrap();
        assert_eq!(v.to_string(), "0.25 s^-1");
    }

    #[test]
    fn test_serialize() {
        let q = Value::from(Quantity::new(2.5, meter()));
        assert_eq!(
            serde_json::to_string(&q).unwrap(),
            r#"{"magnitude":2.5,"unit":"m"}"#
        );
        assert_eq!(serde_json::to_string(&Value::Number(4.0)).unwrap(), "4.0");
    }
}
