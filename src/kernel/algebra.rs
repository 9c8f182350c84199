//! Vector algebra: element-wise arithmetic over embeddings.
//!
//! - **add** / **subtract**: element-wise, dimensions must agree
//! - **apply**: dispatch on an [`Operator`] token
//! - **dot** / **magnitude**: inner product and L2 norm

use crate::error::{Result, VectorscopeError};
use crate::kernel::vector::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary operator accepted in an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = VectorscopeError;

    /// Accepts `+`, `-` and the Unicode minus sign `−`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" | "\u{2212}" => Ok(Operator::Subtract),
            other => Err(VectorscopeError::MalformedExpression(format!(
                "unsupported operator '{}'",
                other
            ))),
        }
    }
}

/// Collection of element-wise vector operations.
pub struct Algebra;

impl Algebra {
    fn check_dimensions(a: &Vector, b: &Vector) -> Result<()> {
        if a.dimensions() != b.dimensions() {
            return Err(VectorscopeError::DimensionMismatch {
                expected: a.dimensions(),
                got: b.dimensions(),
            });
        }
        Ok(())
    }

    fn zip_with(a: &Vector, b: &Vector, f: impl Fn(f64, f64) -> f64) -> Result<Vector> {
        Self::check_dimensions(a, b)?;

        let data: Vec<f64> = a
            .data()
            .iter()
            .zip(b.data().iter())
            .map(|(&x, &y)| f(x, y))
            .collect();

        Ok(Vector::from_data(data))
    }

    /// Element-wise sum `a + b`.
    pub fn add(a: &Vector, b: &Vector) -> Result<Vector> {
        Self::zip_with(a, b, |x, y| x + y)
    }

    /// Element-wise difference `a - b`.
    pub fn subtract(a: &Vector, b: &Vector) -> Result<Vector> {
        Self::zip_with(a, b, |x, y| x - y)
    }

    /// `apply('+', x, y) = x + y`, `apply('-', x, y) = x - y`.
    pub fn apply(op: Operator, a: &Vector, b: &Vector) -> Result<Vector> {
        match op {
            Operator::Add => Self::add(a, b),
            Operator::Subtract => Self::subtract(a, b),
        }
    }

    /// Raw dot product.
    pub fn dot(a: &Vector, b: &Vector) -> Result<f64> {
        Self::check_dimensions(a, b)?;
        Ok(a.data().iter().zip(b.data().iter()).map(|(&x, &y)| x * y).sum())
    }

    /// L2 magnitude.
    pub fn magnitude(a: &Vector) -> f64 {
        a.norm()
    }
}
