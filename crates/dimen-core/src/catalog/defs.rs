//! Unit definitions
//!
//! To add a new unit, simply add an entry to the UNITS array. Entries are
//! assembled in order, so a derived unit may only reference names defined
//! above it (prefixed names such as "kilogram" exist once their base has
//! been defined).

use std::f64::consts::PI;

use crate::types::symbol::{
    DimensionSymbol, AMOUNT, ANGLE, CURRENT, LENGTH, LUMINOUS_INTENSITY, MASS, PIXEL, SOLID_ANGLE,
    TEMPERATURE, TIME,
};
use crate::types::Conversion;

/// How a unit is built from the core algebra
pub enum UnitKind {
    /// Canonical descriptor for a dimension symbol, optionally with the
    /// full SI prefix family
    Base {
        symbol: DimensionSymbol,
        prefixed: bool,
    },
    /// Differently named unit of an existing dimension
    Sub {
        symbol: DimensionSymbol,
        display: &'static str,
        conversion: Conversion,
    },
    /// Product of previously defined units raised to integer powers
    Derived {
        factors: &'static [(&'static str, i32)],
    },
}

/// Unit metadata - single source of truth for each unit
pub struct UnitDef {
    /// Unit name (e.g., "meter", "newton")
    pub name: &'static str,
    /// Literal suffix (e.g., "m" for `3_m`)
    pub literal: &'static str,
    /// Extra names resolving to the same unit
    pub aliases: &'static [&'static str],
    pub kind: UnitKind,
}

const fn base(name: &'static str, literal: &'static str, symbol: DimensionSymbol) -> UnitDef {
    UnitDef {
        name,
        literal,
        aliases: &[],
        kind: UnitKind::Base {
            symbol,
            prefixed: true,
        },
    }
}

const fn ratio(
    name: &'static str,
    literal: &'static str,
    symbol: DimensionSymbol,
    display: &'static str,
    factor: f64,
) -> UnitDef {
    UnitDef {
        name,
        literal,
        aliases: &[],
        kind: UnitKind::Sub {
            symbol,
            display,
            conversion: Conversion::Ratio { factor },
        },
    }
}

const fn derived(
    name: &'static str,
    literal: &'static str,
    factors: &'static [(&'static str, i32)],
) -> UnitDef {
    UnitDef {
        name,
        literal,
        aliases: &[],
        kind: UnitKind::Derived { factors },
    }
}

/// Complete registry of all supported units.
pub static UNITS: &[UnitDef] = &[
    // Base units (each with the full SI prefix family)
    base("meter", "m", LENGTH),
    base("second", "s", TIME),
    base("gram", "g", MASS),
    base("ampere", "A", CURRENT),
    base("kelvin", "K", TEMPERATURE),
    base("mole", "mol", AMOUNT),
    base("candela", "cd", LUMINOUS_INTENSITY),
    base("radian", "rad", ANGLE),
    base("pixel", "px", PIXEL),
    UnitDef {
        name: "steradian",
        literal: "sr",
        aliases: &[],
        kind: UnitKind::Base {
            symbol: SOLID_ANGLE,
            prefixed: false,
        },
    },
    // Angle
    ratio("degree", "deg", ANGLE, "deg", PI / 180.0),
    ratio("gradian", "grad", ANGLE, "grad", PI / 200.0),
    // Imperial
    ratio("mile", "mile", LENGTH, "mi", 1609.344),
    ratio("foot", "ft", LENGTH, "ft", 0.3048),
    ratio("pound", "lb", MASS, "lb", 453.59237),
    ratio("ounce", "oz", MASS, "oz", 28.349523125),
    // Time
    ratio("minute", "min", TIME, "min", 60.0),
    ratio("hour", "h", TIME, "h", 3600.0),
    ratio("day", "d", TIME, "d", 86400.0),
    // Temperature
    UnitDef {
        name: "celsius",
        literal: "degC",
        aliases: &[],
        kind: UnitKind::Sub {
            symbol: TEMPERATURE,
            display: "°C",
            conversion: Conversion::Affine {
                scale: 1.0,
                offset: 273.15,
            },
        },
    },
    // Common compositions
    derived("liter", "L", &[("decimeter", 3)]),
    derived("square_meter", "m2", &[("meter", 2)]),
    derived("cubic_meter", "m3", &[("meter", 3)]),
    derived("meter_per_second", "m_per_s", &[("meter", 1), ("second", -1)]),
    derived(
        "meter_per_second_squared",
        "m_per_s2",
        &[("meter", 1), ("second", -2)],
    ),
    derived("radian_per_second", "rad_per_s", &[("radian", 1), ("second", -1)]),
    derived(
        "radian_per_second_squared",
        "rad_per_s2",
        &[("radian", 1), ("second", -2)],
    ),
    derived("mile_per_second", "mile_per_s", &[("mile", 1), ("second", -1)]),
    derived("mile_per_hour", "mph", &[("mile", 1), ("hour", -1)]),
    derived("kilometer_per_hour", "kph", &[("kilometer", 1), ("hour", -1)]),
    // Mechanics
    derived("hertz", "Hz", &[("second", -1)]),
    derived(
        "newton",
        "N",
        &[("kilogram", 1), ("meter", 1), ("second", -2)],
    ),
    derived("pascal", "Pa", &[("newton", 1), ("meter", -2)]),
    derived("joule", "J", &[("newton", 1), ("meter", 1)]),
    derived("watt", "W", &[("joule", 1), ("second", -1)]),
    derived(
        "kilogram_per_cubic_meter",
        "kg_per_m3",
        &[("kilogram", 1), ("meter", -3)],
    ),
    derived("newton_meter", "N_m", &[("newton", 1), ("meter", 1)]),
    derived(
        "dyne",
        "dyn",
        &[("gram", 1), ("centimeter", 1), ("second", -2)],
    ),
    // Thermodynamics
    derived("joule_per_kelvin", "J_per_K", &[("joule", 1), ("kelvin", -1)]),
    derived(
        "watt_per_meter_kelvin",
        "W_per_m_K",
        &[("watt", 1), ("meter", -1), ("kelvin", -1)],
    ),
    derived("pascal_second", "Pa_s", &[("pascal", 1), ("second", 1)]),
    derived("becquerel", "Bq", &[("second", -1)]),
    // Electromagnetism
    derived("coulomb", "C", &[("ampere", 1), ("second", 1)]),
    derived("volt", "V", &[("watt", 1), ("ampere", -1)]),
    derived("ohm", "ohm", &[("volt", 1), ("ampere", -1)]),
    derived("farad", "F", &[("coulomb", 1), ("volt", -1)]),
    derived("weber", "Wb", &[("volt", 1), ("second", 1)]),
    UnitDef {
        name: "tesla",
        literal: "T",
        aliases: &["magnetic_flux_density"],
        kind: UnitKind::Derived {
            factors: &[("weber", 1), ("meter", -2)],
        },
    },
    derived("henry", "H", &[("weber", 1), ("ampere", -1)]),
    derived("siemens", "S", &[("ampere", 1), ("volt", -1)]),
    derived("gray", "Gy", &[("joule", 1), ("kilogram", -1)]),
    derived("permittivity", "F_per_m", &[("farad", 1), ("meter", -1)]),
    derived("permeability", "H_per_m", &[("henry", 1), ("meter", -1)]),
    // Photometry and radiation
    derived("lumen", "lm", &[("candela", 1), ("steradian", 1)]),
    derived("lux", "lx", &[("lumen", 1), ("meter", -2)]),
    derived("sievert", "Sv", &[("joule", 1), ("kilogram", -1)]),
    derived("katal", "kat", &[("mole", 1), ("second", -1)]),
];
