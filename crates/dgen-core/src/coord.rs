//! Integer grid coordinates
//!
//! `Coord<2>` is `[x, y]`. `Coord<3>` is `[x, y, z]` with `y` vertical.

use core::fmt;
use core::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A cell coordinate in an N-dimensional grid
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord<const N: usize>(pub [i32; N]);

pub type Coord2 = Coord<2>;
pub type Coord3 = Coord<3>;

impl<const N: usize> Coord<N> {
    pub const ZERO: Self = Coord([0; N]);

    pub const fn new(components: [i32; N]) -> Self {
        Coord(components)
    }

    /// Same value on every axis
    pub const fn splat(value: i32) -> Self {
        Coord([value; N])
    }

    pub fn x(&self) -> i32 {
        self.0[0]
    }

    pub fn y(&self) -> i32 {
        self.0[1]
    }

    /// Apply `f` to every component
    pub fn map(self, mut f: impl FnMut(i32) -> i32) -> Self {
        let mut out = self.0;
        for c in &mut out {
            *c = f(*c);
        }
        Coord(out)
    }

    /// Combine two coordinates component-wise
    pub fn zip_with(self, other: Self, mut f: impl FnMut(i32, i32) -> i32) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(other.0) {
            *a = f(*a, b);
        }
        Coord(out)
    }

    /// Each component clamped to -1..=1
    pub fn signum(self) -> Self {
        self.map(i32::signum)
    }

    /// Product of all components; the cell count of a box of this size
    pub fn volume(&self) -> usize {
        self.0.iter().map(|&c| c.max(0) as usize).product()
    }

    /// Euclidean distance between two cells
    pub fn distance(&self, other: &Self) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let d = (a - b) as f32;
                d * d
            })
            .sum::<f32>()
            .sqrt()
    }

    /// Sum of absolute per-axis differences
    pub fn manhattan(&self, other: &Self) -> i32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| (a - b).abs())
            .sum()
    }

    /// Components as floats
    pub fn to_f64(self) -> [f64; N] {
        self.0.map(f64::from)
    }
}

impl Coord<3> {
    pub fn z(&self) -> i32 {
        self.0[2]
    }

    /// The same cell with the vertical component zeroed
    pub fn horizontal(self) -> Self {
        Coord([self.0[0], 0, self.0[2]])
    }

    /// Only the vertical component
    pub fn vertical(self) -> Self {
        Coord([0, self.0[1], 0])
    }
}

impl<const N: usize> Default for Coord<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[i32; N]> for Coord<N> {
    fn from(components: [i32; N]) -> Self {
        Coord(components)
    }
}

impl<const N: usize> fmt::Debug for Coord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl<const N: usize> fmt::Display for Coord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> Add for Coord<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Coord<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<const N: usize> Mul<i32> for Coord<N> {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        self.map(|c| c * rhs)
    }
}

impl<const N: usize> Neg for Coord<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> Index<usize> for Coord<N> {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        &self.0[axis]
    }
}

impl<const N: usize> IndexMut<usize> for Coord<N> {
    fn index_mut(&mut self, axis: usize) -> &mut i32 {
        &mut self.0[axis]
    }
}

// Serialized as a plain array so configs read naturally: "size": [30, 5, 30]
impl<const N: usize> Serialize for Coord<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de, const N: usize> Deserialize<'de> for Coord<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let components = Vec::<i32>::deserialize(deserializer)?;
        let len = components.len();
        let array: [i32; N] = components
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"one component per grid axis"))?;
        Ok(Coord(array))
    }
}
