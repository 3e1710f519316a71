//! dimen-core: dimensional analysis and unit algebra
//!
//! Quantities carry a compound unit next to their magnitude. Adding or
//! comparing quantities of different units is an error rather than a silent
//! coercion, multiplication and division compose units, and conversion
//! between units of the same dimension is explicit.
//!
//! # Example
//!
//! ```
//! use dimen_core::{lit, Engine, Quantity};
//!
//! let distance = lit(3, "km").unwrap();
//! let more: Quantity = "2_km".parse().unwrap();
//! assert_eq!((&distance + &more).unwrap().to_string(), "5 km");
//!
//! // Different units never add
//! assert!((&distance + &lit(1, "mile").unwrap()).is_err());
//!
//! let mut engine = Engine::new();
//! engine.eval("speed = 60_mph").unwrap();
//! let si = engine.eval("speed to m/s").unwrap().unwrap();
//! assert!((si.as_f64() - 26.8224).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod error;
pub mod eval;
pub mod math;
mod matrix;
pub mod parser;
pub mod types;
mod vector;

pub use catalog::{catalog, Catalog};
pub use error::{Error, Result};
pub use eval::EvalContext;
pub use matrix::{Matrix, Matrix2, Matrix3, Matrix4};
pub use parser::{parse_line, Ast, BinaryOp, Expr, UnitExpr};
pub use types::{BaseUnit, CompoundUnit, Conversion, DimensionSymbol, Quantity, Scale, Value};
pub use vector::{Vector, Vector2, Vector3};

/// Built-in unit by name ("kilometer", "newton").
pub fn unit(name: &str) -> Result<CompoundUnit> {
    catalog().unit(name).cloned()
}

/// Quantity from a magnitude and a literal suffix: `lit(3, "km")` is `3_km`.
pub fn lit(value: impl Into<f64>, literal: &str) -> Result<Quantity> {
    catalog().quantity(value, literal)
}

/// Main engine for evaluating expressions
pub struct Engine {
    context: EvalContext,
    lines: Vec<LineResult>,
}

/// Result of evaluating a single line
#[derive(Debug, Clone)]
pub struct LineResult {
    pub input: String,
    pub value: Result<Option<Value>>,
}

impl Engine {
    /// Create a new engine instance
    pub fn new() -> Self {
        Self {
            context: EvalContext::new(),
            lines: Vec::new(),
        }
    }

    /// Evaluate a single line and store the result
    pub fn eval(&mut self, input: &str) -> Result<Option<Value>> {
        let result = parse_line(input).and_then(|ast| eval::evaluate(&ast, &mut self.context));
        if let Err(e) = &result {
            tracing::debug!(input, error = %e, "line failed");
        }

        self.lines.push(LineResult {
            input: input.to_string(),
            value: result.clone(),
        });

        result
    }

    /// Evaluate without storing the result (for previews)
    pub fn eval_preview(&self, input: &str) -> Result<Option<Value>> {
        let mut ctx = self.context.clone();
        parse_line(input).and_then(|ast| eval::evaluate(&ast, &mut ctx))
    }

    /// Get all line results
    pub fn lines(&self) -> &[LineResult] {
        &self.lines
    }

    /// Clear all lines and variables
    pub fn clear(&mut self) {
        self.lines.clear();
        self.context.clear_variables();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
