//! Quantities: a magnitude tagged with a compound unit
//!
//! Addition, subtraction and comparison require identical units (same
//! descriptors, same metadata). Nothing is converted implicitly; a caller
//! mixing meters and miles converts one operand first.
//!
//! `==` follows the same rule: it is unit identity plus equal magnitude,
//! so `1 m == 1 mi` is `false` rather than a cross-unit comparison. Use
//! [`Quantity::try_cmp`] to have a unit mismatch reported as an error.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_traits::CheckedDiv;

use super::descriptor::{scale_to_f64, BaseUnit};
use super::unit::CompoundUnit;
use super::value::Value;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    magnitude: f64,
    unit: CompoundUnit,
}

impl Quantity {
    pub fn new(magnitude: f64, unit: CompoundUnit) -> Self {
        Self { magnitude, unit }
    }

    pub fn zero(unit: CompoundUnit) -> Self {
        Self::new(0.0, unit)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> &CompoundUnit {
        &self.unit
    }

    pub fn into_parts(self) -> (f64, CompoundUnit) {
        (self.magnitude, self.unit)
    }

    fn ensure_same_unit(&self, other: &Quantity) -> Result<()> {
        if self.unit == other.unit {
            Ok(())
        } else {
            tracing::trace!(left = %self.unit, right = %other.unit, "rejected mixed-unit operation");
            Err(Error::incompatible(&self.unit, &other.unit))
        }
    }

    pub fn try_add(&self, other: &Quantity) -> Result<Quantity> {
        self.ensure_same_unit(other)?;
        Ok(Self::new(self.magnitude + other.magnitude, self.unit.clone()))
    }

    pub fn try_sub(&self, other: &Quantity) -> Result<Quantity> {
        self.ensure_same_unit(other)?;
        Ok(Self::new(self.magnitude - other.magnitude, self.unit.clone()))
    }

    /// Total ordering of magnitudes between identical units.
    pub fn try_cmp(&self, other: &Quantity) -> Result<Ordering> {
        self.ensure_same_unit(other)?;
        Ok(self.magnitude.total_cmp(&other.magnitude))
    }

    pub fn negate(&self) -> Quantity {
        Self::new(-self.magnitude, self.unit.clone())
    }

    /// Product of two quantities; a dimensionless result collapses to a number.
    pub fn multiply(&self, other: &Quantity) -> Result<Value> {
        Ok(Value::from_quantity(Self::new(
            self.magnitude * other.magnitude,
            self.unit.multiply(&other.unit)?,
        )))
    }

    pub fn divide(&self, other: &Quantity) -> Result<Value> {
        Ok(Value::from_quantity(Self::new(
            self.magnitude / other.magnitude,
            self.unit.divide(&other.unit)?,
        )))
    }

    pub fn scale_by(&self, k: f64) -> Quantity {
        Self::new(self.magnitude * k, self.unit.clone())
    }

    pub fn unscale_by(&self, k: f64) -> Quantity {
        Self::new(self.magnitude / k, self.unit.clone())
    }

    /// Raises magnitude and unit exponents together.
    pub fn powi(&self, n: i32) -> Result<Value> {
        Ok(Value::from_quantity(Self::new(
            self.magnitude.powi(n),
            self.unit.powi(n)?,
        )))
    }

    /// Converts between two single-descriptor units of the same dimension
    /// symbol and exponent.
    ///
    /// Ratio units convert by `(from_scale * from_factor / (to_scale * to_factor))^exponent`.
    /// Affine units (celsius) go through the canonical base and are only
    /// defined at exponent 1.
    pub fn convert_to(&self, target: &CompoundUnit) -> Result<Quantity> {
        let unsupported = |reason: &'static str| {
            tracing::trace!(from = %self.unit, to = %target, reason, "rejected conversion");
            Error::UnsupportedConversion {
                from: self.unit.to_string(),
                to: target.to_string(),
                reason,
            }
        };

        let (Some(from), Some(to)) = (self.unit.single(), target.single()) else {
            return Err(unsupported("only single-dimension units convert directly"));
        };
        if from.symbol() != to.symbol() {
            return Err(unsupported("units measure different dimensions"));
        }
        if from.exponent() != to.exponent() {
            return Err(unsupported("units have different exponents"));
        }

        match ratio_between(from, to)? {
            Some(ratio) => Ok(Self::new(
                self.magnitude * ratio.powi(from.exponent()),
                target.clone(),
            )),
            None if from.exponent() == 1 => Ok(Self::new(
                to.from_base(from.to_base(self.magnitude)),
                target.clone(),
            )),
            None => Err(unsupported("affine conversions require exponent 1")),
        }
    }

    /// Converts a compound unit as the product of per-dimension conversions.
    ///
    /// Both units must describe the same physical dimension. Affine
    /// descriptors only convert through [`Quantity::convert_to`].
    pub fn convert_compound(&self, target: &CompoundUnit) -> Result<Quantity> {
        if self.unit.single().is_some() && target.single().is_some() {
            return self.convert_to(target);
        }
        let unsupported = |reason: &'static str| Error::UnsupportedConversion {
            from: self.unit.to_string(),
            to: target.to_string(),
            reason,
        };
        if !self.unit.same_dimension(target) {
            return Err(unsupported("units measure different dimensions"));
        }
        if self.unit.factors().iter().chain(target.factors()).any(BaseUnit::is_affine) {
            return Err(unsupported("affine units cannot convert inside a compound unit"));
        }

        let mut factor = 1.0;
        for to in target.factors() {
            let from = self
                .unit
                .factors()
                .iter()
                .find(|f| f.symbol() == to.symbol())
                .ok_or_else(|| unsupported("units measure different dimensions"))?;
            let ratio = ratio_between(from, to)?
                .ok_or_else(|| unsupported("affine units cannot convert inside a compound unit"))?;
            factor *= ratio.powi(to.exponent());
        }
        Ok(Self::new(self.magnitude * factor, target.clone()))
    }
}

/// Linear factor from one descriptor to another of the same symbol, with
/// the prefix scales divided exactly. `None` if either side is affine.
fn ratio_between(from: &BaseUnit, to: &BaseUnit) -> Result<Option<f64>> {
    let (Some(from_factor), Some(to_factor)) =
        (from.conversion().factor(), to.conversion().factor())
    else {
        return Ok(None);
    };
    let scale = from
        .scale()
        .checked_div(to.scale())
        .ok_or(Error::Overflow)?;
    Ok(Some(scale_to_f64(&scale) * from_factor / to_factor))
}

impl PartialOrd for Quantity {
    /// `None` when the units differ; use [`Quantity::try_cmp`] for an error.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.unit == other.unit {
            self.magnitude.partial_cmp(&other.magnitude)
        } else {
            None
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.magnitude, f)?;
        if !self.unit.is_dimensionless() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

/// Parses a single unit literal such as `3_km` or `2.5_mile`.
impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_literal(s)
    }
}

impl Add for Quantity {
    type Output = Result<Quantity>;

    fn add(self, rhs: Quantity) -> Result<Quantity> {
        self.try_add(&rhs)
    }
}

impl Add for &Quantity {
    type Output = Result<Quantity>;

    fn add(self, rhs: &Quantity) -> Result<Quantity> {
        self.try_add(rhs)
    }
}

impl Sub for Quantity {
    type Output = Result<Quantity>;

    fn sub(self, rhs: Quantity) -> Result<Quantity> {
        self.try_sub(&rhs)
    }
}

impl Sub for &Quantity {
    type Output = Result<Quantity>;

    fn sub(self, rhs: &Quantity) -> Result<Quantity> {
        self.try_sub(rhs)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.negate()
    }
}

impl Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.negate()
    }
}

impl Mul for Quantity {
    type Output = Result<Value>;

    fn mul(self, rhs: Quantity) -> Result<Value> {
        self.multiply(&rhs)
    }
}

impl Mul for &Quantity {
    type Output = Result<Value>;

    fn mul(self, rhs: &Quantity) -> Result<Value> {
        self.multiply(rhs)
    }
}

impl Div for Quantity {
    type Output = Result<Value>;

    fn div(self, rhs: Quantity) -> Result<Value> {
        self.divide(&rhs)
    }
}

impl Div for &Quantity {
    type Output = Result<Value>;

    fn div(self, rhs: &Quantity) -> Result<Value> {
        self.divide(rhs)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.scale_by(rhs)
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.scale_by(rhs)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self.unscale_by(rhs)
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self.unscale_by(rhs)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        rhs.scale_by(self)
    }
}

/// `k / q` carries the inverted unit.
impl Div<Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::new(self / rhs.magnitude, rhs.unit.invert())
    }
}
