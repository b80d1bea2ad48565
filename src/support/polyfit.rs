//! Least-squares polynomial curve fitting.
//!
//! [`Polynomial::fit`] solves the over-determined Vandermonde system for a
//! polynomial of fixed order through a set of samples, using the SVD of the
//! design matrix so moderately high orders stay well-behaved.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Singular values below this threshold are treated as zero.
const SINGULAR_VALUE_EPS: f64 = 1e-14;

/// Errors that can occur while fitting a polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    /// Fewer samples than unknown coefficients.
    #[error("a polynomial of order {order} needs more than {order} samples, got {samples}")]
    TooFewSamples { samples: usize, order: usize },

    /// Abscissa and ordinate slices differ in length.
    #[error("sample length mismatch: {x_len} x values, {y_len} y values")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// A sample value is NaN or infinite.
    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },

    /// The least-squares system could not be solved.
    #[error("least-squares solve failed: {context}")]
    Solve { context: String },
}

/// A polynomial with coefficients stored in ascending powers.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from ascending-power coefficients.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Fits a polynomial of the given order to `(x, y)` samples.
    ///
    /// # Errors
    ///
    /// Returns [`FitError`] if there are fewer than `order + 1` samples, the
    /// slices differ in length, a sample is not finite, or the system is
    /// rank deficient.
    pub fn fit(x: &[f64], y: &[f64], order: usize) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < order + 1 {
            return Err(FitError::TooFewSamples {
                samples: x.len(),
                order,
            });
        }
        if let Some(index) = x
            .iter()
            .zip(y)
            .position(|(xi, yi)| !xi.is_finite() || !yi.is_finite())
        {
            return Err(FitError::NonFiniteSample { index });
        }

        let design = DMatrix::from_fn(x.len(), order + 1, |row, power| {
            x[row].powi(power as i32)
        });
        let rhs = DVector::from_column_slice(y);

        let solution = design
            .svd(true, true)
            .solve(&rhs, SINGULAR_VALUE_EPS)
            .map_err(|context| FitError::Solve {
                context: context.to_string(),
            })?;

        if solution.iter().any(|c| !c.is_finite()) {
            return Err(FitError::Solve {
                context: "non-finite coefficients".to_string(),
            });
        }

        Ok(Self::new(solution.iter().copied().collect()))
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// Returns the polynomial order.
    #[must_use]
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Returns the ascending-power coefficients.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}
