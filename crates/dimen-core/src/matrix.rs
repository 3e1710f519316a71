//! Fixed-size matrices of quantities sharing one unit
//!
//! Storage is row-major. Like [`Vector`], a matrix keeps bare magnitudes
//! next to one compound unit; matrix products, matrix-vector products and
//! determinants carry the unit the algebra gives them.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::types::{CompoundUnit, Quantity, Value};
use crate::vector::{write_row, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<const R: usize, const C: usize> {
    rows: [[f64; C]; R],
    unit: CompoundUnit,
}

pub type Matrix2 = Matrix<2, 2>;
pub type Matrix3 = Matrix<3, 3>;
pub type Matrix4 = Matrix<4, 4>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    pub fn from_rows(rows: [[f64; C]; R], unit: CompoundUnit) -> Self {
        Self { rows, unit }
    }

    /// Builds a matrix from quantities of identical unit.
    pub fn from_quantities(rows: [[Quantity; C]; R]) -> Result<Self> {
        let unit = match rows.iter().flatten().next() {
            Some(first) => first.unit().clone(),
            None => CompoundUnit::dimensionless(),
        };
        if let Some(other) = rows.iter().flatten().find(|q| q.unit() != &unit) {
            return Err(Error::incompatible(&unit, other.unit()));
        }
        Ok(Self::from_rows(
            rows.map(|row| row.map(|q| q.magnitude())),
            unit,
        ))
    }

    pub fn zero(unit: CompoundUnit) -> Self {
        Self::from_rows([[0.0; C]; R], unit)
    }

    pub fn get(&self, r: usize, c: usize) -> Option<Quantity> {
        self.rows
            .get(r)
            .and_then(|row| row.get(c))
            .map(|&m| Quantity::new(m, self.unit.clone()))
    }

    pub fn rows(&self) -> &[[f64; C]; R] {
        &self.rows
    }

    pub fn unit(&self) -> &CompoundUnit {
        &self.unit
    }

    pub fn row(&self, r: usize) -> Option<Vector<C>> {
        self.rows
            .get(r)
            .map(|row| Vector::from_components(*row, self.unit.clone()))
    }

    pub fn col(&self, c: usize) -> Option<Vector<R>> {
        (c < C).then(|| {
            Vector::from_components(self.rows.map(|row| row[c]), self.unit.clone())
        })
    }

    pub fn transposed(&self) -> Matrix<C, R> {
        Matrix::from_rows(
            std::array::from_fn(|c| std::array::from_fn(|r| self.rows[r][c])),
            self.unit.clone(),
        )
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_rows(self.rows.map(|row| row.map(&f)), self.unit.clone())
    }

    fn zip(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> [[f64; C]; R] {
        std::array::from_fn(|r| std::array::from_fn(|c| f(self.rows[r][c], other.rows[r][c])))
    }

    fn ensure_same_unit(&self, other: &Self) -> Result<()> {
        if self.unit == other.unit {
            Ok(())
        } else {
            Err(Error::incompatible(&self.unit, &other.unit))
        }
    }

    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_unit(other)?;
        Ok(Self::from_rows(self.zip(other, |a, b| a + b), self.unit.clone()))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.ensure_same_unit(other)?;
        Ok(Self::from_rows(self.zip(other, |a, b| a - b), self.unit.clone()))
    }

    pub fn negate(&self) -> Self {
        self.map(|x| -x)
    }

    pub fn scale(&self, k: f64) -> Self {
        self.map(|x| x * k)
    }

    pub fn unscale(&self, k: f64) -> Self {
        self.map(|x| x / k)
    }

    pub fn mul_quantity(&self, k: &Quantity) -> Result<Self> {
        Ok(Self::from_rows(
            self.rows.map(|row| row.map(|x| x * k.magnitude())),
            self.unit.multiply(k.unit())?,
        ))
    }

    pub fn div_quantity(&self, k: &Quantity) -> Result<Self> {
        Ok(Self::from_rows(
            self.rows.map(|row| row.map(|x| x / k.magnitude())),
            self.unit.divide(k.unit())?,
        ))
    }

    /// Element-wise product; units multiply.
    pub fn component_mul(&self, other: &Self) -> Result<Self> {
        Ok(Self::from_rows(
            self.zip(other, |a, b| a * b),
            self.unit.multiply(&other.unit)?,
        ))
    }

    /// Matrix product `self * other`; the unit is the product of both units.
    pub fn matmul<const K: usize>(&self, other: &Matrix<C, K>) -> Result<Matrix<R, K>> {
        let unit = self.unit.multiply(&other.unit)?;
        let rows = std::array::from_fn(|r| {
            std::array::from_fn(|k| (0..C).map(|i| self.rows[r][i] * other.rows[i][k]).sum::<f64>())
        });
        Ok(Matrix::from_rows(rows, unit))
    }

    /// Matrix-vector product `self * v`.
    pub fn apply(&self, v: &Vector<C>) -> Result<Vector<R>> {
        let unit = self.unit.multiply(v.unit())?;
        let x = v.components();
        let components =
            std::array::from_fn(|r| self.rows[r].iter().zip(x).map(|(a, b)| a * b).sum::<f64>());
        Ok(Vector::from_components(components, unit))
    }
}

impl<const N: usize> Matrix<N, N> {
    /// Ones on the diagonal, in `unit`.
    pub fn identity(unit: CompoundUnit) -> Self {
        Self::from_rows(
            std::array::from_fn(|r| std::array::from_fn(|c| if r == c { 1.0 } else { 0.0 })),
            unit,
        )
    }

    pub fn trace(&self) -> Quantity {
        let sum = (0..N).map(|i| self.rows[i][i]).sum::<f64>();
        Quantity::new(sum, self.unit.clone())
    }

    fn determinant_of(&self, magnitude: f64) -> Result<Value> {
        // a product of N entries carries the unit to the N-th power
        let n = i32::try_from(N).map_err(|_| Error::Overflow)?;
        Ok(Value::from_quantity(Quantity::new(
            magnitude,
            self.unit.powi(n)?,
        )))
    }
}

impl Matrix<2, 2> {
    pub fn determinant(&self) -> Result<Value> {
        let [[a, b], [c, d]] = self.rows;
        self.determinant_of(a * d - b * c)
    }
}

impl Matrix<3, 3> {
    pub fn determinant(&self) -> Result<Value> {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.rows;
        self.determinant_of(a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g))
    }
}

impl<const R: usize, const C: usize> Add for &Matrix<R, C> {
    type Output = Result<Matrix<R, C>>;

    fn add(self, rhs: &Matrix<R, C>) -> Result<Matrix<R, C>> {
        self.try_add(rhs)
    }
}

impl<const R: usize, const C: usize> Sub for &Matrix<R, C> {
    type Output = Result<Matrix<R, C>>;

    fn sub(self, rhs: &Matrix<R, C>) -> Result<Matrix<R, C>> {
        self.try_sub(rhs)
    }
}

impl<const R: usize, const C: usize> Neg for Matrix<R, C> {
    type Output = Matrix<R, C>;

    fn neg(self) -> Matrix<R, C> {
        self.negate()
    }
}

impl<const R: usize, const C: usize> Mul<f64> for Matrix<R, C> {
    type Output = Matrix<R, C>;

    fn mul(self, k: f64) -> Matrix<R, C> {
        self.scale(k)
    }
}

impl<const R: usize, const C: usize, const K: usize> Mul<&Matrix<C, K>> for &Matrix<R, C> {
    type Output = Result<Matrix<R, K>>;

    fn mul(self, rhs: &Matrix<C, K>) -> Result<Matrix<R, K>> {
        self.matmul(rhs)
    }
}

impl<const R: usize, const C: usize> Mul<&Vector<C>> for &Matrix<R, C> {
    type Output = Result<Vector<R>>;

    fn mul(self, rhs: &Vector<C>) -> Result<Vector<R>> {
        self.apply(rhs)
    }
}

impl<const R: usize, const C: usize> fmt::Display for Matrix<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;
        for (r, row) in self.rows.iter().enumerate() {
            f.write_str("  ")?;
            write_row(f, row)?;
            f.write_str(if r + 1 < R { ",\n" } else { "\n" })?;
        }
        f.write_str("}")?;
        if !self.unit.is_dimensionless() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

impl<const R: usize, const C: usize> Serialize for Matrix<R, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rows: Vec<&[f64]> = self.rows.iter().map(|row| &row[..]).collect();
        let mut state = serializer.serialize_struct("Matrix", 2)?;
        state.serialize_field("rows", &rows)?;
        state.serialize_field("unit", &self.unit)?;
        state.end()
    }
}
