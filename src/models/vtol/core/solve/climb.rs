use uom::si::{
    angular_velocity::revolution_per_minute,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{AngularVelocity, ElectricCurrent, ElectricPotential, Force, Mass, Power, Velocity},
    force::newton,
    mass::kilogram,
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

use super::{Inflow, TorqueBalance, density_si};

/// Climb at mission speed from a fixed supply voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbConditions {
    /// Level-flight drag at the mission speed.
    pub drag: Force,
    pub speed: Velocity,
    pub supply_voltage: ElectricPotential,
    /// Starting shaft speed, usually a converged cruise or climb RPM.
    pub seed: AngularVelocity,
    pub motors: MotorCount,
    pub all_up_mass: Mass,
}

/// Torque equilibrium of the cruise motors at full available current.
///
/// Current, voltage and power are per motor; thrust is the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbResult {
    pub shaft_speed: AngularVelocity,
    pub advance_ratio: f64,
    pub current: ElectricCurrent,
    /// Motor voltage, `I·(R_arm + n·R_supply) + EMF`.
    pub voltage: ElectricPotential,
    pub power: Power,
    pub thrust: Force,
    pub climb_rate: Velocity,
    /// Thrust exceeds drag plus weight, so the climb rate is reported as the
    /// mission speed instead of the excess-power estimate.
    pub saturated: bool,
    pub iters: usize,
}

/// Finds the shaft speed at which motor torque balances propeller torque at
/// the given supply voltage, then the resulting climb rate.
///
/// Armature current is `(V − EMF) / (R_arm + n·R_supply)`, capped at the
/// motor's current limit. When total thrust is no more than drag plus
/// weight, the climb rate is the excess thrust power over weight; otherwise
/// it saturates at the mission speed.
///
/// # Errors
///
/// Returns [`ConvergenceError`] if the torque balance hits its cap or the
/// RPM leaves the physical domain.
pub fn solve_climb(
    propeller: &PropellerModel,
    motor: &MotorModel,
    conditions: &ClimbConditions,
    config: &SolverConfig,
) -> Result<ClimbResult, ConvergenceError> {
    let motors = f64::from(conditions.motors.get());
    let speed = conditions.speed.get::<meter_per_second>();
    let resistance = motor.armature_resistance().get::<ohm>()
        + motors * motor.supply_resistance().get::<ohm>();

    let balance = TorqueBalance {
        phase: SolvePhase::Climb,
        propeller,
        motor,
        density: density_si(config),
        speed,
        inflow: Inflow::Forward,
        supply_voltage: conditions.supply_voltage.get::<volt>(),
        resistance,
    };
    let eq = balance.solve(
        conditions.seed.get::<revolution_per_minute>(),
        &config.climb,
    )?;

    let drag = conditions.drag.get::<newton>();
    let weight = conditions.all_up_mass.get::<kilogram>() * STANDARD_GRAVITY;
    let thrust = motors * eq.rotor.thrust(propeller.ct(eq.advance_ratio));
    let saturated = thrust > drag + weight;
    let climb_rate = if saturated {
        speed
    } else {
        (thrust - drag) * speed / weight
    };

    let voltage = eq.current * resistance + eq.back_emf;

    Ok(ClimbResult {
        shaft_speed: AngularVelocity::new::<revolution_per_minute>(eq.rotor.rpm),
        advance_ratio: eq.advance_ratio,
        current: ElectricCurrent::new::<ampere>(eq.current),
        voltage: ElectricPotential::new::<volt>(voltage),
        power: Power::new::<watt>(eq.current * voltage),
        thrust: Force::new::<newton>(thrust),
        climb_rate: Velocity::new::<meter_per_second>(climb_rate),
        saturated,
        iters: eq.iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::vtol::core::test_support::{
            apc_11x7, motors, mt3520, reference_battery, reference_climb,
        },
        support::units::{ShaftSpeedExt, rpm},
    };

    // Reference values come from the mission calculator script, seeded by
    // its converged cruise RPM. The script applies one more correction after
    // its last residual check, so values agree to 1e-4.
    const CRUISE_RPM: f64 = 10_821.251;

    #[test]
    fn full_pack_hits_current_limit() {
        let battery = reference_battery();
        let conditions = reference_climb(battery.voltage_max(), rpm(CRUISE_RPM));

        let result =
            solve_climb(&apc_11x7(), &mt3520(), &conditions, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.current.get::<ampere>(), 38.0);
        assert_relative_eq!(result.shaft_speed.rpm(), 14_398.079, max_relative = 1e-4);
        assert_relative_eq!(result.voltage.get::<volt>(), 39.110_736, max_relative = 1e-4);
        assert_relative_eq!(result.power.get::<watt>(), 1486.208_0, max_relative = 1e-4);
        assert_relative_eq!(
            result.climb_rate.get::<meter_per_second>(),
            6.791_074,
            max_relative = 1e-4
        );
        assert!(!result.saturated);
    }

    #[test]
    fn empty_pack_is_voltage_limited() {
        let battery = reference_battery();
        let full = solve_climb(
            &apc_11x7(),
            &mt3520(),
            &reference_climb(battery.voltage_max(), rpm(CRUISE_RPM)),
            &SolverConfig::default(),
        )
        .unwrap();

        let result = solve_climb(
            &apc_11x7(),
            &mt3520(),
            &reference_climb(battery.voltage_min(), full.shaft_speed),
            &SolverConfig::default(),
        )
        .unwrap();

        assert!(result.current.get::<ampere>() < 38.0);
        assert_relative_eq!(result.current.get::<ampere>(), 34.139_217, max_relative = 1e-4);
        assert_relative_eq!(result.voltage.get::<volt>(), 37.2, max_relative = 1e-9);
        assert_relative_eq!(result.shaft_speed.rpm(), 13_760.090, max_relative = 1e-4);
        assert_relative_eq!(
            result.climb_rate.get::<meter_per_second>(),
            5.435_020,
            max_relative = 1e-4
        );
        assert_relative_eq!(result.thrust.get::<newton>(), 27.797_455, max_relative = 1e-4);
        assert!(result.climb_rate < full.climb_rate);
    }

    #[test]
    fn light_aircraft_saturates_at_mission_speed() {
        let battery = reference_battery();
        let conditions = ClimbConditions {
            all_up_mass: Mass::new::<kilogram>(0.5),
            ..reference_climb(battery.voltage_max(), rpm(CRUISE_RPM))
        };

        let result =
            solve_climb(&apc_11x7(), &mt3520(), &conditions, &SolverConfig::default()).unwrap();

        assert!(result.saturated);
        assert_relative_eq!(result.climb_rate.get::<meter_per_second>(), 28.0);
    }

    #[test]
    fn is_idempotent() {
        let battery = reference_battery();
        let conditions = ClimbConditions {
            motors: motors(1),
            ..reference_climb(battery.voltage_max(), rpm(11_000.0))
        };
        let config = SolverConfig::default();

        let first = solve_climb(&apc_11x7(), &mt3520(), &conditions, &config).unwrap();
        let second = solve_climb(&apc_11x7(), &mt3520(), &conditions, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn iteration_cap_is_an_error() {
        let battery = reference_battery();
        let mut config = SolverConfig::default();
        config.climb.max_iters = 3;

        let err = solve_climb(
            &apc_11x7(),
            &mt3520(),
            &reference_climb(battery.voltage_max(), rpm(CRUISE_RPM)),
            &config,
        )
        .unwrap_err();

        assert_eq!(err.phase(), SolvePhase::Climb);
        assert_eq!(err.iters(), 3);
    }
}
