use uom::si::f64::MassDensity;

use crate::support::atmosphere::sea_level_density;

/// Settings for one damped fixed-point loop.
///
/// The gains are tuned to this problem's shape. Changing them changes the
/// converged iterate within tolerance, and can stop a loop converging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Proportional correction gain.
    pub gain: f64,

    /// Convergence tolerance on the loop's normalized residual.
    pub tolerance: f64,

    /// Iteration cap. Reaching it is an error.
    pub max_iters: usize,
}

/// Solver configuration for the equilibrium solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub air_density: MassDensity,

    /// Advance-ratio step of the best-efficiency scan seeding cruise.
    pub best_eta_step: f64,

    /// Cruise RPM loop. Residual is thrust error over drag.
    pub cruise: LoopConfig,

    /// Climb torque balance. Residual is excess torque over propeller
    /// torque; the gain scales the RPM step in torque-coefficient space.
    pub climb: LoopConfig,

    /// Inner hover torque balance, same form as [`SolverConfig::climb`].
    pub hover_torque: LoopConfig,

    /// Outer hover voltage loop. Residual is thrust error over weight.
    pub hover_thrust: LoopConfig,

    /// Initial hover RPM as a fraction of the unloaded speed at the trial
    /// supply voltage.
    pub hover_rpm_seed_fraction: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            air_density: sea_level_density(),
            best_eta_step: 0.01,
            cruise: LoopConfig {
                gain: 0.01,
                tolerance: 0.001,
                max_iters: 10_000,
            },
            climb: LoopConfig {
                gain: 1000.0,
                tolerance: 0.001,
                max_iters: 1000,
            },
            hover_torque: LoopConfig {
                gain: 1000.0,
                tolerance: 0.001,
                max_iters: 1000,
            },
            hover_thrust: LoopConfig {
                gain: 0.1,
                tolerance: 0.01,
                max_iters: 1000,
            },
            hover_rpm_seed_fraction: 2.0 / 3.0,
        }
    }
}
