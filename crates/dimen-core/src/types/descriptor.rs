//! Base-unit descriptors
//!
//! A descriptor is one dimension symbol raised to an integer exponent,
//! together with the metadata that distinguishes differently-scaled
//! representations of that dimension: an exact SI-prefix scale, a display
//! prefix and symbol, and the sub-unit conversion rule.

use num_rational::Ratio;
use num_traits::One;
use serde::Serialize;
use std::fmt;

use super::symbol::DimensionSymbol;

/// Exact SI-prefix scale relative to the canonical base.
pub type Scale = Ratio<i128>;

/// Relationship between a sub-unit and its canonical base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    /// `base = value * factor` (mile -> meter, degree -> radian)
    Ratio { factor: f64 },
    /// `base = value * scale + offset` (celsius -> kelvin)
    Affine { scale: f64, offset: f64 },
}

impl Conversion {
    pub const IDENTITY: Conversion = Conversion::Ratio { factor: 1.0 };

    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Conversion::Ratio { factor } => value * factor,
            Conversion::Affine { scale, offset } => value * scale + offset,
        }
    }

    pub fn from_base(&self, value: f64) -> f64 {
        match *self {
            Conversion::Ratio { factor } => value / factor,
            Conversion::Affine { scale, offset } => (value - offset) / scale,
        }
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, Conversion::Affine { .. })
    }

    /// Multiplicative factor, or `None` for affine conversions.
    pub fn factor(&self) -> Option<f64> {
        match *self {
            Conversion::Ratio { factor } => Some(factor),
            Conversion::Affine { .. } => None,
        }
    }
}

impl Default for Conversion {
    fn default() -> Self {
        Conversion::IDENTITY
    }
}

pub(crate) fn scale_to_f64(scale: &Scale) -> f64 {
    *scale.numer() as f64 / *scale.denom() as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseUnit {
    symbol: DimensionSymbol,
    exponent: i32,
    scale: Scale,
    prefix: &'static str,
    display: &'static str,
    conversion: Conversion,
}

impl BaseUnit {
    /// Canonical descriptor: exponent 1, unscaled, displayed as its symbol.
    pub fn new(symbol: DimensionSymbol) -> Self {
        Self {
            symbol,
            exponent: 1,
            scale: Scale::one(),
            prefix: "",
            display: symbol.as_str(),
            conversion: Conversion::IDENTITY,
        }
    }

    /// A differently-named unit of the same dimension (mile, degree, celsius).
    pub fn sub_unit(symbol: DimensionSymbol, display: &'static str, conversion: Conversion) -> Self {
        Self {
            display,
            conversion,
            ..Self::new(symbol)
        }
    }

    pub fn symbol(&self) -> DimensionSymbol {
        self.symbol
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn display(&self) -> &'static str {
        self.display
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    pub fn is_unscaled(&self) -> bool {
        self.scale.is_one()
    }

    pub fn is_affine(&self) -> bool {
        self.conversion.is_affine()
    }

    pub(crate) fn with_exponent(&self, exponent: i32) -> Self {
        Self {
            exponent,
            ..self.clone()
        }
    }

    pub(crate) fn with_scale(&self, scale: Scale, prefix: &'static str) -> Self {
        Self {
            scale,
            prefix,
            ..self.clone()
        }
    }

    /// Same scale, display and conversion; exponent is not compared.
    pub fn same_metadata(&self, other: &BaseUnit) -> bool {
        self.scale == other.scale
            && self.prefix == other.prefix
            && self.display == other.display
            && self.conversion == other.conversion
    }

    /// Value-to-base factor for one power of this descriptor, `None` when affine.
    pub fn linear_factor(&self) -> Option<f64> {
        self.conversion
            .factor()
            .map(|factor| factor * scale_to_f64(&self.scale))
    }

    /// Converts a value at exponent 1 into the canonical base.
    pub fn to_base(&self, value: f64) -> f64 {
        self.conversion.to_base(value * scale_to_f64(&self.scale))
    }

    /// Converts a canonical base value into this descriptor at exponent 1.
    pub fn from_base(&self, value: f64) -> f64 {
        self.conversion.from_base(value) / scale_to_f64(&self.scale)
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.display)?;
        if self.exponent != 1 {
            write!(f, "^{}", self.exponent)?;
        }
        Ok(())
    }
}
