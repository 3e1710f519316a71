//! Fixed-size vectors of quantities sharing one unit
//!
//! Components are stored as bare magnitudes next to a single compound unit.
//! Products (dot, component-wise, cross) compose units through the unit
//! algebra; sums require identical units.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::math;
use crate::types::symbol::ANGLE;
use crate::types::{BaseUnit, CompoundUnit, Quantity, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Vector<const N: usize> {
    components: [f64; N],
    unit: CompoundUnit,
}

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;

impl<const N: usize> Vector<N> {
    /// Builds a vector from quantities of identical unit.
    pub fn from_quantities(quantities: [Quantity; N]) -> Result<Self> {
        let unit = match quantities.first() {
            Some(first) => first.unit().clone(),
            None => CompoundUnit::dimensionless(),
        };
        if let Some(other) = quantities.iter().find(|q| q.unit() != &unit) {
            return Err(Error::incompatible(&unit, other.unit()));
        }
        Ok(Self::from_components(quantities.map(|q| q.magnitude()), unit))
    }

    pub fn from_components(components: [f64; N], unit: CompoundUnit) -> Self {
        Self { components, unit }
    }

    pub fn zero(unit: CompoundUnit) -> Self {
        Self::from_components([0.0; N], unit)
    }

    pub fn get(&self, i: usize) -> Option<Quantity> {
        self.components
            .get(i)
            .map(|&m| Quantity::new(m, self.unit.clone()))
    }

    pub fn components(&self) -> [f64; N] {
        self.components
    }

    pub fn unit(&self) -> &CompoundUnit {
        &self.unit
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_components(self.components.map(f), self.unit.clone())
    }

    fn zip(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> [f64; N] {
        std::array::from_fn(|i| f(self.components[i], other.components[i]))
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
        Ok(Self::from_components(
            self.zip(other, |a, b| a + b),
            self.unit.clone(),
        ))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.ensure_same_unit(other)?;
        Ok(Self::from_components(
            self.zip(other, |a, b| a - b),
            self.unit.clone(),
        ))
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

    /// Multiplies every component by a quantity; the unit picks up its unit.
    pub fn mul_quantity(&self, k: &Quantity) -> Result<Self> {
        Ok(Self::from_components(
            self.components.map(|x| x * k.magnitude()),
            self.unit.multiply(k.unit())?,
        ))
    }

    pub fn div_quantity(&self, k: &Quantity) -> Result<Self> {
        Ok(Self::from_components(
            self.components.map(|x| x / k.magnitude()),
            self.unit.divide(k.unit())?,
        ))
    }

    fn dot_magnitude(&self, other: &Self) -> f64 {
        self.zip(other, |a, b| a * b).iter().sum()
    }

    /// Dot product; the unit is the product of both units.
    pub fn dot(&self, other: &Self) -> Result<Value> {
        Ok(Value::from_quantity(Quantity::new(
            self.dot_magnitude(other),
            self.unit.multiply(&other.unit)?,
        )))
    }

    pub fn component_mul(&self, other: &Self) -> Result<Self> {
        Ok(Self::from_components(
            self.zip(other, |a, b| a * b),
            self.unit.multiply(&other.unit)?,
        ))
    }

    pub fn component_div(&self, other: &Self) -> Result<Self> {
        Ok(Self::from_components(
            self.zip(other, |a, b| a / b),
            self.unit.divide(&other.unit)?,
        ))
    }

    pub fn length_squared(&self) -> Result<Value> {
        self.dot(self)
    }

    pub fn length(&self) -> Quantity {
        Quantity::new(self.dot_magnitude(self).sqrt(), self.unit.clone())
    }

    /// Unit-length direction; the result is dimensionless. A zero-length
    /// vector stays zero.
    pub fn normalized(&self) -> Self {
        let length = self.dot_magnitude(self).sqrt();
        if length == 0.0 {
            return Self::zero(CompoundUnit::dimensionless());
        }
        Self::from_components(
            self.components.map(|x| x / length),
            CompoundUnit::dimensionless(),
        )
    }

    /// Angle between two vectors in radians; zero when either is zero-length.
    pub fn angle_to(&self, other: &Self) -> Quantity {
        let radian = CompoundUnit::from(BaseUnit::new(ANGLE));
        let den = self.dot_magnitude(self).sqrt() * other.dot_magnitude(other).sqrt();
        if den == 0.0 {
            return Quantity::zero(radian);
        }
        let cos = (self.dot_magnitude(other) / den).clamp(-1.0, 1.0);
        Quantity::new(cos.acos(), radian)
    }

    /// Component of `self` along `axis`, in `self`'s unit. Projecting onto
    /// a zero-length axis gives the zero vector.
    pub fn projected_onto(&self, axis: &Self) -> Self {
        let axis_len_sq = axis.dot_magnitude(axis);
        if axis_len_sq == 0.0 {
            return Self::zero(self.unit.clone());
        }
        let factor = self.dot_magnitude(axis) / axis_len_sq;
        Self::from_components(axis.components.map(|a| a * factor), self.unit.clone())
    }
}

impl Vector<3> {
    pub fn new(x: Quantity, y: Quantity, z: Quantity) -> Result<Self> {
        Self::from_quantities([x, y, z])
    }

    pub fn x(&self) -> Quantity {
        Quantity::new(self.components[0], self.unit.clone())
    }

    pub fn y(&self) -> Quantity {
        Quantity::new(self.components[1], self.unit.clone())
    }

    pub fn z(&self) -> Quantity {
        Quantity::new(self.components[2], self.unit.clone())
    }

    pub fn cross(&self, other: &Self) -> Result<Self> {
        let [a1, a2, a3] = self.components;
        let [b1, b2, b3] = other.components;
        Ok(Self::from_components(
            [a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1],
            self.unit.multiply(&other.unit)?,
        ))
    }

    /// Rotates around `axis` by `angle` (right-hand rule). The axis only
    /// contributes its direction; a zero-length axis leaves the vector as is.
    pub fn rotated_by(&self, angle: &Quantity, axis: &Self) -> Result<Self> {
        let phi = math::radians(angle)?;
        let k = axis.normalized();
        if k.dot_magnitude(&k) == 0.0 {
            return Ok(self.clone());
        }
        let (sin, cos) = phi.sin_cos();
        let k_cross_v = k.cross(self)?.components;
        let k_dot_v = k.dot_magnitude(self);

        let [v1, v2, v3] = self.components;
        let [k1, k2, k3] = k.components;
        let rotate = |v: f64, kv: f64, k: f64| v * cos + kv * sin + k * k_dot_v * (1.0 - cos);
        Ok(Self::from_components(
            [
                rotate(v1, k_cross_v[0], k1),
                rotate(v2, k_cross_v[1], k2),
                rotate(v3, k_cross_v[2], k3),
            ],
            self.unit.clone(),
        ))
    }
}

impl<const N: usize> Add for &Vector<N> {
    type Output = Result<Vector<N>>;

    fn add(self, rhs: &Vector<N>) -> Result<Vector<N>> {
        self.try_add(rhs)
    }
}

impl<const N: usize> Sub for &Vector<N> {
    type Output = Result<Vector<N>>;

    fn sub(self, rhs: &Vector<N>) -> Result<Vector<N>> {
        self.try_sub(rhs)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Vector<N>;

    fn neg(self) -> Vector<N> {
        self.negate()
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Vector<N>;

    fn mul(self, k: f64) -> Vector<N> {
        self.scale(k)
    }
}

impl<const N: usize> Mul<Vector<N>> for f64 {
    type Output = Vector<N>;

    fn mul(self, v: Vector<N>) -> Vector<N> {
        v.scale(self)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Vector<N>;

    fn div(self, k: f64) -> Vector<N> {
        self.unscale(k)
    }
}

pub(crate) fn write_row(f: &mut fmt::Formatter<'_>, row: &[f64]) -> fmt::Result {
    f.write_str("{")?;
    for (i, x) in row.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{x}")?;
    }
    f.write_str("}")
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(f, &self.components)?;
        if !self.unit.is_dimensionless() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

impl<const N: usize> Serialize for Vector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Vector", 2)?;
        state.serialize_field("components", &self.components[..])?;
        state.serialize_field("unit", &self.unit)?;
        state.end()
    }
}
