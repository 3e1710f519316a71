//! Dimension symbols
//!
//! A symbol names one base physical dimension ("m", "s", "rad", ...).
//! The unit catalog is closed and assembled from program literals, so a
//! symbol is simply a `'static` string compared by value.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DimensionSymbol(&'static str);

impl DimensionSymbol {
    pub const fn new(symbol: &'static str) -> Self {
        Self(symbol)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DimensionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Length (meter)
pub const LENGTH: DimensionSymbol = DimensionSymbol::new("m");
/// Time (second)
pub const TIME: DimensionSymbol = DimensionSymbol::new("s");
/// Mass (gram, so that "kg" is the kilo-prefixed form)
pub const MASS: DimensionSymbol = DimensionSymbol::new("g");
/// Electric current (ampere)
pub const CURRENT: DimensionSymbol = DimensionSymbol::new("A");
/// Thermodynamic temperature (kelvin)
pub const TEMPERATURE: DimensionSymbol = DimensionSymbol::new("K");
/// Amount of substance (mole)
pub const AMOUNT: DimensionSymbol = DimensionSymbol::new("mol");
/// Luminous intensity (candela)
pub const LUMINOUS_INTENSITY: DimensionSymbol = DimensionSymbol::new("cd");
/// Plane angle (radian)
pub const ANGLE: DimensionSymbol = DimensionSymbol::new("rad");
/// Solid angle (steradian)
pub const SOLID_ANGLE: DimensionSymbol = DimensionSymbol::new("sr");
/// Screen pixels
pub const PIXEL: DimensionSymbol = DimensionSymbol::new("px");
