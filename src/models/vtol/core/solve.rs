//! Equilibrium solves for cruise, climb and hover.
//!
//! Every solve is a damped fixed-point iteration on one scalar: each pass
//! evaluates the models at the current iterate, checks the normalized
//! residual against the loop tolerance, and only then applies a
//! proportional correction. A converged result therefore reports exactly
//! the iterate at which the residual was evaluated.
//!
//! Loops never return an unconverged iterate. Hitting the iteration cap
//! yields [`ConvergenceError::MaxIters`] and an iterate leaving the physical
//! domain (non-finite or non-positive speed or voltage) yields
//! [`ConvergenceError::Diverged`].
//!
//! Iteration runs on plain SI `f64` values. Results are converted back to
//! [`uom`] quantities at the boundary.

mod climb;
mod cruise;
mod endurance;
mod hover;

pub use climb::{ClimbConditions, ClimbResult, solve_climb};
pub use cruise::{
    CruiseConditions, CruiseElectrical, CruiseResult, CruiseRpm, solve_cruise,
    solve_cruise_electrical, solve_cruise_rpm,
};
pub use endurance::{HoverCorrected, hover_corrected_endurance};
pub use hover::{HoverConditions, HoverResult, solve_hover};

use std::f64::consts::PI;

use tracing::{debug, trace, warn};
use uom::si::{electric_current::ampere, length::meter, mass_density::kilogram_per_cubic_meter};

use super::{
    config::{LoopConfig, SolverConfig},
    error::{ConvergenceError, SolvePhase},
    motor::MotorModel,
    propeller::PropellerModel,
};

/// Propeller kinematics at one shaft speed.
#[derive(Debug, Clone, Copy)]
struct Rotor {
    rpm: f64,
    /// Tip-path speed scale `n·D`, with `n` in rev/s.
    nd: f64,
    diameter: f64,
    density: f64,
}

impl Rotor {
    fn new(propeller: &PropellerModel, density: f64, rpm: f64) -> Self {
        let diameter = propeller.diameter().get::<meter>();
        Self {
            rpm,
            nd: rpm / 60.0 * diameter,
            diameter,
            density,
        }
    }

    fn advance_ratio(&self, speed: f64) -> f64 {
        speed / self.nd
    }

    fn omega(&self) -> f64 {
        2.0 * PI * self.rpm / 60.0
    }

    /// `ρ·(nD)²·D²`, the scale that turns a coefficient into a force.
    fn force_scale(&self) -> f64 {
        self.density * self.nd * self.nd * self.diameter * self.diameter
    }

    fn thrust(&self, ct: f64) -> f64 {
        ct * self.force_scale()
    }

    fn shaft_power(&self, cp: f64) -> f64 {
        cp * self.force_scale() * self.nd
    }

    fn shaft_torque(&self, cp: f64) -> f64 {
        self.shaft_power(cp) / self.omega()
    }
}

/// How the torque balance picks its advance ratio.
#[derive(Debug, Clone, Copy)]
enum Inflow {
    /// From forward speed, clamped to the table range.
    Forward,
    /// Held at a fixed value.
    Fixed(f64),
}

/// A motor driving a propeller from a fixed supply voltage.
struct TorqueBalance<'a> {
    phase: SolvePhase,
    propeller: &'a PropellerModel,
    motor: &'a MotorModel,
    density: f64,
    /// Forward speed; also scales the RPM correction step.
    speed: f64,
    inflow: Inflow,
    supply_voltage: f64,
    /// Series resistance between the supply and the back-EMF.
    resistance: f64,
}

/// Converged torque balance.
#[derive(Debug, Clone, Copy)]
struct TorqueEquilibrium {
    rotor: Rotor,
    advance_ratio: f64,
    current: f64,
    back_emf: f64,
    iters: usize,
}

impl TorqueBalance<'_> {
    /// Steps RPM until motor torque at the current-limited armature current
    /// matches the propeller's torque load.
    ///
    /// The correction is applied in torque-coefficient space so the step
    /// size does not depend on propeller size.
    fn solve(
        &self,
        seed_rpm: f64,
        config: &LoopConfig,
    ) -> Result<TorqueEquilibrium, ConvergenceError> {
        let kt = self.motor.torque_constant();
        let current_limit = self.motor.current_limit().get::<ampere>();
        let step_scale = config.gain * self.speed / self.propeller.diameter().get::<meter>();

        let mut rpm = seed_rpm;
        let mut iters = 0;
        loop {
            ensure_physical(self.phase, iters, "rpm", rpm)?;

            let rotor = Rotor::new(self.propeller, self.density, rpm);
            let advance_ratio = match self.inflow {
                Inflow::Forward => self
                    .propeller
                    .clamp_advance_ratio(rotor.advance_ratio(self.speed)),
                Inflow::Fixed(j) => j,
            };
            let load = rotor.shaft_torque(self.propeller.cp(advance_ratio));

            let back_emf = self.motor.emf_volts(rpm);
            let current = ((self.supply_voltage - back_emf) / self.resistance).min(current_limit);
            let excess = (current - self.motor.io_amps(rpm)) * kt - load;
            let residual = excess / load;

            iters += 1;
            trace!(phase = %self.phase, iters, rpm, current, residual, "torque balance");

            if residual.abs() < config.tolerance {
                debug!(phase = %self.phase, iters, rpm, residual, "torque balance converged");
                return Ok(TorqueEquilibrium {
                    rotor,
                    advance_ratio,
                    current,
                    back_emf,
                    iters,
                });
            }
            check_iters(self.phase, iters, residual, config)?;

            rpm += step_scale * excess / rotor.force_scale();
        }
    }
}

/// Fails with [`ConvergenceError::Diverged`] unless `value` is finite and
/// positive.
fn ensure_physical(
    phase: SolvePhase,
    iters: usize,
    variable: &'static str,
    value: f64,
) -> Result<(), ConvergenceError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    warn!(%phase, iters, variable, value, "solve left the physical domain");
    Err(ConvergenceError::Diverged {
        phase,
        iters,
        variable,
        value,
    })
}

/// Fails with [`ConvergenceError::MaxIters`] once the cap is reached.
fn check_iters(
    phase: SolvePhase,
    iters: usize,
    residual: f64,
    config: &LoopConfig,
) -> Result<(), ConvergenceError> {
    if iters < config.max_iters {
        return Ok(());
    }
    warn!(%phase, iters, residual, "solve hit iteration limit");
    Err(ConvergenceError::MaxIters {
        phase,
        iters,
        residual,
    })
}

fn density_si(config: &SolverConfig) -> f64 {
    config.air_density.get::<kilogram_per_cubic_meter>()
}
