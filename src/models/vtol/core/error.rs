use std::fmt;

use thiserror::Error;
use uom::si::f64::{ElectricPotential, Energy};

use crate::support::{
    constraint::{Constraint, ConstraintError},
    polyfit::FitError,
};

/// Kind of catalog part, used when reporting lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Propeller,
    Motor,
    BatteryCell,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Propeller => "propeller",
            Self::Motor => "motor type",
            Self::BatteryCell => "battery type",
        })
    }
}

/// A requested part name is absent from its catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`, choices are {choices:?}")]
pub struct UnknownPartError {
    pub kind: PartKind,
    pub name: String,
    pub choices: Vec<String>,
}

/// Physically inconsistent or invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The motor voltage needed to sustain cruise exceeds the pack voltage
    /// at minimum charge.
    #[error(
        "insufficient battery voltage or prop too small: cruise needs {required:?}, pack provides {available:?}"
    )]
    InsufficientVoltage {
        required: ElectricPotential,
        available: ElectricPotential,
    },

    /// The momentum-theory inflow quadratic has no real root.
    #[error("propeller inflow has no real solution: discriminant={discriminant}")]
    NegativeInflowDiscriminant { discriminant: f64 },

    /// More motors installed than are used in cruise and hover combined.
    #[error("total number of motors ({total}) higher than sum of cruise ({cruise}) and hover ({hover})")]
    MotorCount { total: u32, cruise: u32, hover: u32 },

    /// Hover consumes the whole battery before cruise begins.
    #[error("hover consumes {hover:?} of a {capacity:?} battery")]
    HoverExhaustsBattery { hover: Energy, capacity: Energy },

    /// A propeller coefficient curve could not be fitted.
    #[error("propeller `{model}` curve fit failed")]
    CurveFit {
        model: String,
        #[source]
        source: FitError,
    },

    /// A component parameter violates its numeric constraint.
    #[error("invalid {parameter} for {part}")]
    InvalidParameter {
        part: String,
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },
}

impl ConfigurationError {
    /// Checks `value` against constraint `C`, naming the offending parameter.
    pub(crate) fn check<T, C: Constraint<T>>(
        part: &str,
        parameter: &'static str,
        value: &T,
    ) -> Result<(), Self> {
        C::check(value).map_err(|source| Self::InvalidParameter {
            part: part.to_string(),
            parameter,
            source,
        })
    }
}

/// Fixed-point loop identifier carried by [`ConvergenceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePhase {
    CruiseRpm,
    Climb,
    HoverTorque,
    HoverThrust,
}

impl fmt::Display for SolvePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CruiseRpm => "cruise RPM",
            Self::Climb => "climb",
            Self::HoverTorque => "hover torque",
            Self::HoverThrust => "hover thrust",
        })
    }
}

/// An iterative solve did not reach its tolerance.
///
/// Unconverged iterates are never returned as results.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConvergenceError {
    /// The loop reached its iteration cap.
    #[error("{phase} solve hit iteration limit: iters={iters}, residual={residual}")]
    MaxIters {
        phase: SolvePhase,
        iters: usize,
        /// Last residual, in the loop's own normalization.
        residual: f64,
    },

    /// An iterate left the physical domain (non-finite or non-positive).
    #[error("{phase} solve diverged: iters={iters}, {variable}={value}")]
    Diverged {
        phase: SolvePhase,
        iters: usize,
        variable: &'static str,
        value: f64,
    },
}

impl ConvergenceError {
    /// Returns the loop that failed.
    #[must_use]
    pub fn phase(&self) -> SolvePhase {
        match *self {
            Self::MaxIters { phase, .. } | Self::Diverged { phase, .. } => phase,
        }
    }

    /// Returns the iteration count reached before failing.
    #[must_use]
    pub fn iters(&self) -> usize {
        match *self {
            Self::MaxIters { iters, .. } | Self::Diverged { iters, .. } => iters,
        }
    }
}

/// Errors returned by the solve entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}

/// Errors returned by a complete performance analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error(transparent)]
    UnknownPart(#[from] UnknownPartError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}

impl From<SolveError> for PerformanceError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Configuration(err) => Self::Configuration(err),
            SolveError::Convergence(err) => Self::Convergence(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_phase() {
        let err = ConvergenceError::MaxIters {
            phase: SolvePhase::CruiseRpm,
            iters: 10_000,
            residual: 0.2,
        };
        assert_eq!(
            err.to_string(),
            "cruise RPM solve hit iteration limit: iters=10000, residual=0.2"
        );
        assert_eq!(err.phase(), SolvePhase::CruiseRpm);
        assert_eq!(err.iters(), 10_000);
    }

    #[test]
    fn solve_errors_flatten_into_performance_errors() {
        let err: PerformanceError = SolveError::from(ConvergenceError::Diverged {
            phase: SolvePhase::HoverTorque,
            iters: 3,
            variable: "rpm",
            value: -1.0,
        })
        .into();

        assert!(matches!(
            err,
            PerformanceError::Convergence(ConvergenceError::Diverged {
                phase: SolvePhase::HoverTorque,
                ..
            })
        ));
    }
}
