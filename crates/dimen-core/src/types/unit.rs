//! Compound units and the unit algebra
//!
//! A compound unit is an ordered list of base-unit descriptors with
//! pairwise-distinct dimension symbols and non-zero exponents. The empty
//! list is the dimensionless unit.
//!
//! Multiplication folds the right operand's descriptors into a copy of the
//! left one, summing exponents of matching symbols and dropping any that
//! cancel to zero. When both sides carry a descriptor for the same symbol
//! with different metadata (miles times meters), the left descriptor's
//! metadata is kept for the merged entry.
//!
//! Exponents stay within `-i32::MAX..=i32::MAX`; any step that would leave
//! that range fails with [`Error::Overflow`], so inversion never overflows.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Div, Mul};

use num_traits::CheckedMul;

use super::descriptor::{BaseUnit, Scale};
use super::symbol::DimensionSymbol;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CompoundUnit {
    factors: Vec<BaseUnit>,
}

impl CompoundUnit {
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Builds a unit from arbitrary descriptors, merging repeated symbols.
    pub fn from_factors<I>(factors: I) -> Result<Self>
    where
        I: IntoIterator<Item = BaseUnit>,
    {
        let mut out = Vec::new();
        for factor in factors {
            checked_exponent(Some(factor.exponent()))?;
            fold_factor(&mut out, &factor)?;
        }
        Ok(Self { factors: out })
    }

    pub fn is_dimensionless(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn factors(&self) -> &[BaseUnit] {
        &self.factors
    }

    /// The only descriptor, when the unit has exactly one.
    pub fn single(&self) -> Option<&BaseUnit> {
        match self.factors.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Exponent of `symbol`, 0 when absent.
    pub fn exponent_of(&self, symbol: DimensionSymbol) -> i32 {
        self.factors
            .iter()
            .find(|f| f.symbol() == symbol)
            .map_or(0, BaseUnit::exponent)
    }

    pub fn multiply(&self, other: &CompoundUnit) -> Result<CompoundUnit> {
        let mut factors = self.factors.clone();
        for factor in &other.factors {
            fold_factor(&mut factors, factor)?;
        }
        Ok(CompoundUnit { factors })
    }

    pub fn invert(&self) -> CompoundUnit {
        CompoundUnit {
            factors: self
                .factors
                .iter()
                .map(|f| f.with_exponent(-f.exponent()))
                .collect(),
        }
    }

    pub fn divide(&self, other: &CompoundUnit) -> Result<CompoundUnit> {
        self.multiply(&other.invert())
    }

    pub fn powi(&self, n: i32) -> Result<CompoundUnit> {
        if n == 0 {
            return Ok(CompoundUnit::dimensionless());
        }
        let factors = self
            .factors
            .iter()
            .map(|f| -> Result<BaseUnit> {
                Ok(f.with_exponent(checked_exponent(f.exponent().checked_mul(n))?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CompoundUnit { factors })
    }

    /// Applies an SI prefix. Only a single, unscaled descriptor at exponent 1
    /// can be prefixed; prefixes never compound.
    pub fn apply_scale(&self, ratio: Scale, prefix: &'static str) -> Result<CompoundUnit> {
        let invalid = |reason: &'static str| Error::InvalidScaling {
            unit: self.to_string(),
            reason,
        };
        let base = self
            .single()
            .ok_or_else(|| invalid("prefixes apply to a single base unit only"))?;
        if base.exponent() != 1 {
            return Err(invalid("prefixes apply to exponent 1 only"));
        }
        if !base.is_unscaled() {
            return Err(invalid("unit already carries a prefix"));
        }
        let scale = base.scale().checked_mul(&ratio).ok_or(Error::Overflow)?;
        Ok(CompoundUnit {
            factors: vec![base.with_scale(scale, prefix)],
        })
    }

    /// Same physical dimension: equal `(symbol, exponent)` sets, metadata ignored.
    pub fn same_dimension(&self, other: &CompoundUnit) -> bool {
        self.shape() == other.shape()
    }

    fn shape(&self) -> Vec<(DimensionSymbol, i32)> {
        let mut shape: Vec<_> = self
            .factors
            .iter()
            .map(|f| (f.symbol(), f.exponent()))
            .collect();
        shape.sort();
        shape
    }
}

/// Rejects exponents that overflowed or whose negation would.
fn checked_exponent(exponent: Option<i32>) -> Result<i32> {
    exponent
        .filter(|e| *e != i32::MIN)
        .ok_or(Error::Overflow)
}

fn fold_factor(factors: &mut Vec<BaseUnit>, factor: &BaseUnit) -> Result<()> {
    match factors.iter().position(|f| f.symbol() == factor.symbol()) {
        Some(i) => {
            let sum = checked_exponent(factors[i].exponent().checked_add(factor.exponent()))?;
            if sum == 0 {
                factors.remove(i);
            } else {
                factors[i] = factors[i].with_exponent(sum);
            }
        }
        None if factor.exponent() != 0 => factors.push(factor.clone()),
        None => {}
    }
    Ok(())
}

/// A single canonical or sub-unit descriptor at exponent 1.
impl From<BaseUnit> for CompoundUnit {
    fn from(base: BaseUnit) -> Self {
        CompoundUnit {
            factors: vec![base],
        }
    }
}

/// Identity for add/sub/compare: same descriptors with the same metadata,
/// in any order.
impl PartialEq for CompoundUnit {
    fn eq(&self, other: &Self) -> bool {
        self.factors.len() == other.factors.len()
            && self.factors.iter().all(|f| {
                other
                    .factors
                    .iter()
                    .any(|g| {
                        g.symbol() == f.symbol()
                            && g.exponent() == f.exponent()
                            && g.same_metadata(f)
                    })
            })
    }
}

impl Mul for &CompoundUnit {
    type Output = Result<CompoundUnit>;

    fn mul(self, rhs: &CompoundUnit) -> Result<CompoundUnit> {
        self.multiply(rhs)
    }
}

impl Div for &CompoundUnit {
    type Output = Result<CompoundUnit>;

    fn div(self, rhs: &CompoundUnit) -> Result<CompoundUnit> {
        self.divide(rhs)
    }
}

impl fmt::Display for CompoundUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return f.write_str("1");
        }
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            write!(f, "{factor}")?;
        }
        Ok(())
    }
}

impl Serialize for CompoundUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::descriptor::Conversion;
    use crate::types::symbol::{CURRENT, LENGTH, MASS, TIME};
    use pretty_assertions::assert_eq;

    fn meter() -> CompoundUnit {
        BaseUnit::new(LENGTH).into()
    }

    fn second() -> CompoundUnit {
        BaseUnit::new(TIME).into()
    }

    fn mile() -> CompoundUnit {
        BaseUnit::sub_unit(LENGTH, "mi", Conversion::Ratio { factor: 1609.344 }).into()
    }

    #[test]
    fn test_multiply_sums_exponents() {
        let area = meter().multiply(&meter()).unwrap();
        assert_eq!(area.exponent_of(LENGTH), 2);
        assert_eq!(area.factors().len(), 1);
        assert_eq!(area.to_string(), "m^2");
    }

    #[test]
    fn test_multiply_appends_new_symbols_in_order() {
        let unit = meter().divide(&second().multiply(&second()).unwrap()).unwrap();
        assert_eq!(unit.to_string(), "m*s^-2");
    }

    #[test]
    fn test_multiply_by_inverse_is_dimensionless() {
        let unit = meter().divide(&second()).unwrap();
        assert!(unit.multiply(&unit.invert()).unwrap().is_dimensionless());
    }

    #[test]
    fn test_cancellation_removes_entry() {
        let kg: CompoundUnit = BaseUnit::new(MASS).into();
        let unit = kg.multiply(&meter()).unwrap().divide(&kg).unwrap();
        assert_eq!(unit, meter());
        assert_eq!(unit.exponent_of(MASS), 0);
    }

    #[test]
    fn test_left_metadata_wins_on_merge() {
        let merged = mile().multiply(&meter()).unwrap();
        let only = merged.single().unwrap();
        assert_eq!(only.display(), "mi");
        assert_eq!(only.exponent(), 2);

        let merged = meter().multiply(&mile()).unwrap();
        assert_eq!(merged.single().unwrap().display(), "m");
    }

    #[test]
    fn test_equality_is_order_insensitive() {
        let a = meter().multiply(&second()).unwrap();
        let b = second().multiply(&meter()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_equality_includes_metadata() {
        assert_ne!(meter(), mile());
        assert!(meter().same_dimension(&mile()));
    }

    #[test]
    fn test_apply_scale() {
        let km = meter().apply_scale(Scale::from_integer(1000), "k").unwrap();
        assert_eq!(km.to_string(), "km");
        assert_eq!(*km.single().unwrap().scale(), Scale::from_integer(1000));
    }

    #[test]
    fn test_apply_scale_rejections() {
        let area = meter().multiply(&meter()).unwrap();
        assert!(matches!(
            area.apply_scale(Scale::from_integer(1000), "k"),
            Err(Error::InvalidScaling { .. })
        ));

        let compound = meter().multiply(&second()).unwrap();
        assert!(compound.apply_scale(Scale::from_integer(1000), "k").is_err());

        let km = meter().apply_scale(Scale::from_integer(1000), "k").unwrap();
        assert!(km.apply_scale(Scale::new(1, 100), "c").is_err());

        assert!(CompoundUnit::dimensionless()
            .apply_scale(Scale::from_integer(10), "da")
            .is_err());
    }

    #[test]
    fn test_powi() {
        let velocity = meter().divide(&second()).unwrap();
        assert_eq!(velocity.powi(2).unwrap().to_string(), "m^2*s^-2");
        assert!(velocity.powi(0).unwrap().is_dimensionless());
        assert_eq!(velocity.powi(-1).unwrap(), second().divide(&meter()).unwrap());
    }

    #[test]
    fn test_dimensionless_display() {
        assert_eq!(CompoundUnit::dimensionless().to_string(), "1");
    }

    #[test]
    fn test_from_factors_normalizes() {
        let unit = CompoundUnit::from_factors([
            BaseUnit::new(CURRENT),
            BaseUnit::new(TIME),
            BaseUnit::new(CURRENT).with_exponent(-1),
        ])
        .unwrap();
        assert_eq!(unit, second());
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        let huge = meter().powi(i32::MAX).unwrap();
        assert_eq!(huge.exponent_of(LENGTH), i32::MAX);
        assert_eq!(huge.multiply(&meter()), Err(Error::Overflow));
        assert_eq!(meter().powi(2).unwrap().powi(2_000_000_000), Err(Error::Overflow));

        // the negation of the lowest exponent would not fit
        let lowest = huge.invert().divide(&meter());
        assert_eq!(lowest, Err(Error::Overflow));
        assert_eq!(huge.invert().exponent_of(LENGTH), -i32::MAX);
    }

    #[test]
    fn test_exponent_limit_allows_cancellation() {
        let huge = meter().powi(i32::MAX).unwrap();
        assert!(huge.multiply(&huge.invert()).unwrap().is_dimensionless());
    }
}
