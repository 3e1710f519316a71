//! Value types for dimen calculations

pub mod descriptor;
pub mod quantity;
pub mod symbol;
pub mod unit;
mod value;

pub use descriptor::{BaseUnit, Conversion, Scale};
pub use quantity::Quantity;
pub use symbol::DimensionSymbol;
pub use unit::CompoundUnit;
pub use value::Value;
