use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("incompatible units: '{left}' vs '{right}'")]
    IncompatibleUnits { left: String, right: String },

    #[error("cannot scale unit '{unit}': {reason}")]
    InvalidScaling { unit: String, reason: &'static str },

    #[error("unsupported conversion from '{from}' to '{to}': {reason}")]
    UnsupportedConversion {
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error("expected an angle, found '{0}'")]
    NotAnAngle(String),

    #[error("exponent {0} is not an integer")]
    NonIntegerExponent(f64),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{function} expects {expected} argument(s), found {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("syntax error at byte {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("unit catalog error: {0}")]
    Catalog(String),

    #[error("numeric overflow")]
    Overflow,
}

impl Error {
    pub(crate) fn incompatible(left: impl ToString, right: impl ToString) -> Self {
        Error::IncompatibleUnits {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
