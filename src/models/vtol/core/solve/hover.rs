use tracing::{debug, trace};
use uom::si::{
    angular_velocity::revolution_per_minute,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{AngularVelocity, ElectricCurrent, ElectricPotential, Force, Mass, Power, Velocity},
    force::newton,
    mass::{gram, kilogram},
    power::watt,
    velocity::meter_per_second,
};

use crate::{
    models::vtol::core::{
        MotorCount,
        config::SolverConfig,
        error::{ConvergenceError, SolvePhase},
        motor::MotorModel,
        propeller::PropellerModel,
    },
    support::atmosphere::STANDARD_GRAVITY,
};

use super::{Inflow, TorqueBalance, check_iters, density_si, ensure_physical};

const PHASE: SolvePhase = SolvePhase::HoverThrust;

/// Vertical flight on the hover motors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverConditions {
    /// Pack voltage the hover is evaluated at, usually minimum charge.
    pub battery_voltage: ElectricPotential,
    /// Mission speed. Only scales the RPM correction step.
    pub speed: Velocity,
    pub all_up_mass: Mass,
    pub motors: MotorCount,
}

/// Hover equilibrium of one hover motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverResult {
    pub shaft_speed: AngularVelocity,
    /// Supply voltage at which total thrust balances weight.
    pub supply_voltage: ElectricPotential,
    /// Supply voltage over battery voltage.
    pub throttle: f64,
    pub current: ElectricCurrent,
    /// Motor voltage, `I·R_arm + EMF`.
    pub voltage: ElectricPotential,
    /// Electrical power per motor.
    pub power: Power,
    /// Electrical power of all hover motors.
    pub battery_power: Power,
    /// Thrust per motor.
    pub thrust: Force,
    /// Outer voltage loop iterations.
    pub iters: usize,
}

impl HoverResult {
    /// Thrust per motor expressed as the mass it holds up.
    #[must_use]
    pub fn thrust_grams(&self) -> f64 {
        Mass::new::<kilogram>(self.thrust.get::<newton>() / STANDARD_GRAVITY).get::<gram>()
    }
}

/// Finds the supply voltage and shaft speed at which the hover motors hold
/// up the aircraft.
///
/// An outer loop scales the supply voltage by `1 − gain·error/weight` until
/// the total thrust error is within `tolerance·weight`. For each trial
/// voltage an inner torque balance, with zero advance ratio and armature
/// resistance only, finds the equilibrium RPM. The inner RPM carries over
/// between trial voltages.
///
/// # Errors
///
/// Returns [`ConvergenceError`] if either loop hits its cap, or the RPM or
/// supply voltage leaves the physical domain. A non-positive battery voltage
/// fails immediately.
pub fn solve_hover(
    propeller: &PropellerModel,
    motor: &MotorModel,
    conditions: &HoverConditions,
    config: &SolverConfig,
) -> Result<HoverResult, ConvergenceError> {
    let loop_config = &config.hover_thrust;
    let motors = f64::from(conditions.motors.get());
    let weight = conditions.all_up_mass.get::<kilogram>() * STANDARD_GRAVITY;
    let battery_voltage = conditions.battery_voltage.get::<volt>();
    let static_ct = propeller.ct(0.0);

    let mut supply_voltage = battery_voltage;
    let mut rpm = config.hover_rpm_seed_fraction * supply_voltage * motor.kv();
    let mut iters = 0;

    loop {
        ensure_physical(PHASE, iters, "supply voltage", supply_voltage)?;

        let balance = TorqueBalance {
            phase: SolvePhase::HoverTorque,
            propeller,
            motor,
            density: density_si(config),
            speed: conditions.speed.get::<meter_per_second>(),
            inflow: Inflow::Fixed(0.0),
            supply_voltage,
            resistance: motor.armature_resistance().get::<ohm>(),
        };
        let eq = balance.solve(rpm, &config.hover_torque)?;
        rpm = eq.rotor.rpm;

        let thrust = eq.rotor.thrust(static_ct);
        let error = motors * thrust - weight;
        let residual = error / weight;

        iters += 1;
        trace!(iters, supply_voltage, rpm, residual, "hover thrust");

        if residual.abs() < loop_config.tolerance {
            debug!(iters, supply_voltage, rpm, residual, "hover thrust converged");
            let voltage = eq.current * balance.resistance + eq.back_emf;
            let power = eq.current * voltage;
            return Ok(HoverResult {
                shaft_speed: AngularVelocity::new::<revolution_per_minute>(rpm),
                supply_voltage: ElectricPotential::new::<volt>(supply_voltage),
                throttle: supply_voltage / battery_voltage,
                current: ElectricCurrent::new::<ampere>(eq.current),
                voltage: ElectricPotential::new::<volt>(voltage),
                power: Power::new::<watt>(power),
                battery_power: Power::new::<watt>(motors * power),
                thrust: Force::new::<newton>(thrust),
                iters,
            });
        }
        check_iters(PHASE, iters, residual, loop_config)?;

        supply_voltage *= 1.0 - loop_config.gain * error / weight;
    }
}
