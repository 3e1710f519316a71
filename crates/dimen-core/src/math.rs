//! Math namespace over quantities
//!
//! Magnitude-wise functions (`abs`, `log`, `sqrt`, ...) keep the operand's
//! unit unchanged. Whether that is physically meaningful (a square root of
//! an area) is the caller's call; use [`Quantity::powi`] when the exponents
//! should change too. Domain errors follow `f64` (NaN, infinity).
//!
//! Trigonometric functions take an angle in any angle unit, convert it to
//! radians and return a bare number.

use crate::error::{Error, Result};
use crate::types::symbol::ANGLE;
use crate::types::Quantity;

fn map_magnitude(q: &Quantity, f: impl FnOnce(f64) -> f64) -> Quantity {
    Quantity::new(f(q.magnitude()), q.unit().clone())
}

pub fn abs(q: &Quantity) -> Quantity {
    map_magnitude(q, f64::abs)
}

/// Floating remainder of `a / b`, sign of `a`. Units must be identical.
pub fn fmod(a: &Quantity, b: &Quantity) -> Result<Quantity> {
    if a.unit() != b.unit() {
        return Err(Error::incompatible(a.unit(), b.unit()));
    }
    Ok(map_magnitude(a, |x| x % b.magnitude()))
}

/// Natural logarithm
pub fn log(q: &Quantity) -> Quantity {
    map_magnitude(q, f64::ln)
}

pub fn log2(q: &Quantity) -> Quantity {
    map_magnitude(q, f64::log2)
}

pub fn log10(q: &Quantity) -> Quantity {
    map_magnitude(q, f64::log10)
}

pub fn pow(q: &Quantity, exponent: f64) -> Quantity {
    map_magnitude(q, |x| x.powf(exponent))
}

pub fn sqrt(q: &Quantity) -> Quantity {
    map_magnitude(q, f64::sqrt)
}

pub fn cbrt(q: &Quantity) -> Quantity {
    map_magnitude(q, f64::cbrt)
}

/// Magnitude of an angle in radians.
pub fn radians(angle: &Quantity) -> Result<f64> {
    match angle.unit().single() {
        Some(base) if base.symbol() == ANGLE && base.exponent() == 1 => {
            Ok(base.to_base(angle.magnitude()))
        }
        _ => Err(Error::NotAnAngle(angle.unit().to_string())),
    }
}

macro_rules! angle_fns {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(angle: &Quantity) -> Result<f64> {
                radians(angle).map(f64::$name)
            }
        )*
    };
}

angle_fns!(sin, cos, tan, sinh, cosh, tanh, asin, acos, atan, asinh, acosh, atanh);

/// Function names understood by the expression evaluator.
pub const FUNCTIONS: &[&str] = &[
    "abs", "fmod", "log", "log2", "log10", "pow", "sqrt", "cbrt", "sin", "cos", "tan", "sinh",
    "cosh", "tanh", "asin", "acos", "atan", "asinh", "acosh", "atanh",
];

/// Looks up a single-argument angle function by name.
pub(crate) fn angle_fn(name: &str) -> Option<fn(&Quantity) -> Result<f64>> {
    let f: fn(&Quantity) -> Result<f64> = match name {
        "sin" => sin,
        "cos" => cos,
        "tan" => tan,
        "sinh" => sinh,
        "cosh" => cosh,
        "tanh" => tanh,
        "asin" => asin,
        "acos" => acos,
        "atan" => atan,
        "asinh" => asinh,
        "acosh" => acosh,
        "atanh" => atanh,
        _ => return None,
    };
    Some(f)
}

/// Looks up a single-argument, unit-preserving function by name.
pub(crate) fn magnitude_fn(name: &str) -> Option<fn(&Quantity) -> Quantity> {
    let f: fn(&Quantity) -> Quantity = match name {
        "abs" => abs,
        "log" => log,
        "log2" => log2,
        "log10" => log10,
        "sqrt" => sqrt,
        "cbrt" => cbrt,
        _ => return None,
    };
    Some(f)
}

/// Plain `f64` counterpart of a named function, for unitless arguments.
pub(crate) fn number_fn(name: &str) -> Option<fn(f64) -> f64> {
    let f: fn(f64) -> f64 = match name {
        "abs" => f64::abs,
        "log" => f64::ln,
        "log2" => f64::log2,
        "log10" => f64::log10,
        "sqrt" => f64::sqrt,
        "cbrt" => f64::cbrt,
        "sin" => f64::sin,
        "cos" => f64::cos,
        "tan" => f64::tan,
        "sinh" => f64::sinh,
        "cosh" => f64::cosh,
        "tanh" => f64::tanh,
        "asin" => f64::asin,
        "acos" => f64::acos,
        "atan" => f64::atan,
        "asinh" => f64::asinh,
        "acosh" => f64::acosh,
        "atanh" => f64::atanh,
        _ => return None,
    };
    Some(f)
}
