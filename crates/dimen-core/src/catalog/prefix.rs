//! SI prefixes
//!
//! To add a prefix, add an entry to the PREFIXES array; every prefixed base
//! unit in the catalog picks it up.

use crate::types::Scale;

pub struct Prefix {
    /// Long name, prepended to the unit name ("kilo" + "meter")
    pub name: &'static str,
    /// Display prefix ("k", "μ")
    pub symbol: &'static str,
    /// ASCII literal prefix ("k", "u")
    pub literal: &'static str,
    /// Power of ten
    pub power: i32,
}

impl Prefix {
    /// Exact `10^power`.
    pub fn scale(&self) -> Scale {
        let ten = Scale::from_integer(10);
        if self.power >= 0 {
            num_traits::pow(ten, self.power as usize)
        } else {
            num_traits::pow(ten.recip(), self.power.unsigned_abs() as usize)
        }
    }
}

pub static PREFIXES: &[Prefix] = &[
    Prefix {
        name: "exa",
        symbol: "E",
        literal: "E",
        power: 18,
    },
    Prefix {
        name: "peta",
        symbol: "P",
        literal: "P",
        power: 15,
    },
    Prefix {
        name: "tera",
        symbol: "T",
        literal: "T",
        power: 12,
    },
    Prefix {
        name: "giga",
        symbol: "G",
        literal: "G",
        power: 9,
    },
    Prefix {
        name: "mega",
        symbol: "M",
        literal: "M",
        power: 6,
    },
    Prefix {
        name: "kilo",
        symbol: "k",
        literal: "k",
        power: 3,
    },
    Prefix {
        name: "hecto",
        symbol: "h",
        literal: "h",
        power: 2,
    },
    Prefix {
        name: "deca",
        symbol: "da",
        literal: "da",
        power: 1,
    },
    Prefix {
        name: "deci",
        symbol: "d",
        literal: "d",
        power: -1,
    },
    Prefix {
        name: "centi",
        symbol: "c",
        literal: "c",
        power: -2,
    },
    Prefix {
        name: "milli",
        symbol: "m",
        literal: "m",
        power: -3,
    },
    Prefix {
        name: "micro",
        symbol: "μ",
        literal: "u",
        power: -6,
    },
    Prefix {
        name: "nano",
        symbol: "n",
        literal: "n",
        power: -9,
    },
    Prefix {
        name: "pico",
        symbol: "p",
        literal: "p",
        power: -12,
    },
    Prefix {
        name: "femto",
        symbol: "f",
        literal: "f",
        power: -15,
    },
];
