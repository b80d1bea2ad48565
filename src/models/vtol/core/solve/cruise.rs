use tracing::{debug, trace};
use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute},
    area::square_meter,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    energy::watt_hour,
    f64::{
        AngularVelocity, ElectricCurrent, ElectricPotential, Force, Length, Power, Time, Torque,
        Velocity,
    },
    force::newton,
    length::meter,
    power::watt,
    time::hour,
    torque::newton_meter,
    velocity::meter_per_second,
};

use crate::models::vtol::core::{
    MotorCount,
    battery::BatteryModel,
    config::SolverConfig,
    error::{ConfigurationError, ConvergenceError, SolveError, SolvePhase},
    motor::MotorModel,
    propeller::PropellerModel,
};

use super::{Rotor, check_iters, density_si, ensure_physical};

const PHASE: SolvePhase = SolvePhase::CruiseRpm;

/// Level-flight operating condition shared by the cruise motors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseConditions {
    /// Total airframe drag at the mission speed.
    pub drag: Force,
    pub speed: Velocity,
    /// Motors sharing the drag.
    pub motors: MotorCount,
    /// Electrical draw of everything other than the motors.
    pub avionics_power: Power,
}

/// Propeller operating point at which cruise thrust matches drag.
///
/// Thrust and power are per motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseRpm {
    pub shaft_speed: AngularVelocity,
    pub advance_ratio: f64,
    pub thrust: Force,
    pub ct: f64,
    pub cp: f64,
    /// Shaft power absorbed by the propeller.
    pub power: Power,
    pub iters: usize,
}

/// Electrical state of the drivetrain in cruise.
///
/// Currents, voltages and motor powers are per motor; battery powers and
/// the thrust power cover the whole aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseElectrical {
    /// Shaft torque per motor.
    pub torque: Torque,
    /// Induced velocity over flight speed from momentum theory.
    pub inflow_factor: f64,
    /// Shaft power per motor estimated from the propeller's momentum-disc
    /// efficiency.
    pub propulsive_power: Power,
    /// Battery power estimated from the fixed motor efficiency.
    pub estimated_battery_power: Power,
    pub estimated_endurance: Time,
    pub current: ElectricCurrent,
    pub back_emf: ElectricPotential,
    /// Motor supply voltage including armature and supply-line drops.
    pub voltage: ElectricPotential,
    /// Current at which the motor is most efficient at this speed.
    pub ideal_current: ElectricCurrent,
    /// Motors plus avionics.
    pub battery_power: Power,
    pub endurance: Time,
    /// Still-air range at the mission speed.
    pub range: Length,
    /// Total thrust times speed.
    pub thrust_power: Power,
    pub motor_power_out: Power,
    pub motor_power_in: Power,
    /// Thrust power over total motor shaft power.
    pub propeller_efficiency: f64,
    /// Shaft power over electrical input power.
    pub motor_efficiency: f64,
}

/// Complete cruise solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseResult {
    pub rpm: CruiseRpm,
    pub electrical: CruiseElectrical,
}

/// Finds the shaft speed at which the cruise motors' thrust balances drag.
///
/// Seeds from the best-efficiency advance ratio at the mission speed, then
/// applies `rpm ← rpm·(1 − gain·error/thrust)` until the total thrust error
/// is within `tolerance·drag`.
///
/// # Errors
///
/// Returns [`ConvergenceError`] if the loop hits its cap or the RPM leaves
/// the physical domain.
pub fn solve_cruise_rpm(
    propeller: &PropellerModel,
    conditions: &CruiseConditions,
    config: &SolverConfig,
) -> Result<CruiseRpm, ConvergenceError> {
    let loop_config = &config.cruise;
    let density = density_si(config);
    let drag = conditions.drag.get::<newton>();
    let speed = conditions.speed.get::<meter_per_second>();
    let motors = f64::from(conditions.motors.get());
    let diameter = propeller.diameter().get::<meter>();

    let seed_j = propeller.find_best_eta(config.best_eta_step);
    let mut rpm = 60.0 * speed / (seed_j * diameter);
    let mut iters = 0;

    loop {
        ensure_physical(PHASE, iters, "rpm", rpm)?;

        let rotor = Rotor::new(propeller, density, rpm);
        let advance_ratio = propeller.clamp_advance_ratio(rotor.advance_ratio(speed));
        let ct = propeller.ct(advance_ratio);
        let thrust = rotor.thrust(ct);
        let error = motors * thrust - drag;
        let residual = error / drag;

        iters += 1;
        trace!(iters, rpm, thrust, residual, "cruise RPM");

        if residual.abs() < loop_config.tolerance {
            debug!(iters, rpm, residual, "cruise RPM converged");
            let cp = propeller.cp(advance_ratio);
            return Ok(CruiseRpm {
                shaft_speed: AngularVelocity::new::<revolution_per_minute>(rpm),
                advance_ratio,
                thrust: Force::new::<newton>(thrust),
                ct,
                cp,
                power: Power::new::<watt>(rotor.shaft_power(cp)),
                iters,
            });
        }
        check_iters(PHASE, iters, residual, loop_config)?;

        rpm *= 1.0 - loop_config.gain * error / thrust;
    }
}

/// Derives the cruise electrical state from a converged cruise RPM.
///
/// # Errors
///
/// Returns [`ConfigurationError::NegativeInflowDiscriminant`] if momentum
/// theory has no real inflow, and
/// [`ConfigurationError::InsufficientVoltage`] if the motor voltage exceeds
/// the pack voltage at minimum charge.
pub fn solve_cruise_electrical(
    propeller: &PropellerModel,
    motor: &MotorModel,
    battery: &BatteryModel,
    conditions: &CruiseConditions,
    cruise: &CruiseRpm,
    config: &SolverConfig,
) -> Result<CruiseElectrical, ConfigurationError> {
    let density = density_si(config);
    let drag = conditions.drag.get::<newton>();
    let speed = conditions.speed.get::<meter_per_second>();
    let motors = f64::from(conditions.motors.get());
    let avionics = conditions.avionics_power.get::<watt>();
    let capacity = battery.energy_capacity().get::<watt_hour>();

    let rpm = cruise.shaft_speed.get::<revolution_per_minute>();
    let omega = cruise.shaft_speed.get::<radian_per_second>();
    let shaft_power = cruise.power.get::<watt>();
    let torque = shaft_power / omega;

    let drag_per_motor = drag / motors;
    let disc_area = propeller.disc_area().get::<square_meter>();
    let coef_c = -drag_per_motor / (2.0 * density * disc_area * speed * speed);
    let discriminant = 1.0 - 4.0 * coef_c;
    if discriminant < 0.0 || discriminant.is_nan() {
        return Err(ConfigurationError::NegativeInflowDiscriminant { discriminant });
    }
    let inflow_factor = (-1.0 + discriminant.sqrt()) / 2.0;

    let propulsive_power =
        (1.0 + inflow_factor) * speed * drag_per_motor / propeller.efficiency();
    let estimated_battery_power = motors * propulsive_power / motor.efficiency();

    let resistance = motor.armature_resistance().get::<ohm>();
    let supply_resistance = motor.supply_resistance().get::<ohm>();
    let io = motor.io_amps(rpm);
    let current = torque / motor.torque_constant() + io;
    let back_emf = motor.emf_volts(rpm);
    let voltage = back_emf + current * resistance + current * supply_resistance * motors;

    let available = battery.voltage_min();
    if voltage > available.get::<volt>() {
        return Err(ConfigurationError::InsufficientVoltage {
            required: ElectricPotential::new::<volt>(voltage),
            available,
        });
    }

    let ideal_current = (io * voltage / resistance).sqrt();
    let battery_power = motors * current * voltage + avionics;
    let endurance = capacity / battery_power;
    let motor_power_in = voltage * current;
    let thrust_power = speed * motors * cruise.thrust.get::<newton>();

    Ok(CruiseElectrical {
        torque: Torque::new::<newton_meter>(torque),
        inflow_factor,
        propulsive_power: Power::new::<watt>(propulsive_power),
        estimated_battery_power: Power::new::<watt>(estimated_battery_power),
        estimated_endurance: Time::new::<hour>(capacity / estimated_battery_power),
        current: ElectricCurrent::new::<ampere>(current),
        back_emf: ElectricPotential::new::<volt>(back_emf),
        voltage: ElectricPotential::new::<volt>(voltage),
        ideal_current: ElectricCurrent::new::<ampere>(ideal_current),
        battery_power: Power::new::<watt>(battery_power),
        endurance: Time::new::<hour>(endurance),
        range: Length::new::<meter>(endurance * 3600.0 * speed),
        thrust_power: Power::new::<watt>(thrust_power),
        motor_power_out: Power::new::<watt>(shaft_power),
        motor_power_in: Power::new::<watt>(motor_power_in),
        propeller_efficiency: thrust_power / (motors * shaft_power),
        motor_efficiency: shaft_power / motor_power_in,
    })
}

/// Solves cruise RPM and then the electrical state at that RPM.
///
/// # Errors
///
/// Returns [`SolveError`] if the RPM loop fails to converge or the
/// electrical state is infeasible.
pub fn solve_cruise(
    propeller: &PropellerModel,
    motor: &MotorModel,
    battery: &BatteryModel,
    conditions: &CruiseConditions,
    config: &SolverConfig,
) -> Result<CruiseResult, SolveError> {
    let rpm = solve_cruise_rpm(propeller, conditions, config)?;
    let electrical =
        solve_cruise_electrical(propeller, motor, battery, conditions, &rpm, config)?;
    Ok(CruiseResult { rpm, electrical })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::minute;

    use crate::{
        models::vtol::core::{
            BatteryModel, PartsCatalog,
            test_support::{apc_11x7, motors, mt3520, reference_battery, reference_cruise},
        },
        support::units::ShaftSpeedExt,
    };

    // Reference values come from the mission calculator script run on the
    // default mission with these coefficient tables (least-squares fits
    // solved exactly in rational arithmetic). The script applies one more
    // correction after its last residual check, so values agree to 1e-4.

    #[test]
    fn matches_reference_rpm() {
        let result =
            solve_cruise_rpm(&apc_11x7(), &reference_cruise(), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.shaft_speed.rpm(), 10_821.251, max_relative = 1e-4);
        assert_relative_eq!(result.advance_ratio, 0.555_660_6, max_relative = 1e-4);
        assert_relative_eq!(result.thrust.get::<newton>(), 12.024_554, max_relative = 1e-4);
        assert_relative_eq!(result.power.get::<watt>(), 415.522_55, max_relative = 1e-4);
        assert!(result.iters > 1 && result.iters < 10_000);

        // Converged thrust is within tolerance of drag.
        let drag = reference_cruise().drag.get::<newton>();
        assert!((result.thrust.get::<newton>() - drag).abs() < 0.001 * drag);
    }

    #[test]
    fn is_idempotent() {
        let prop = apc_11x7();
        let config = SolverConfig::default();
        let first = solve_cruise_rpm(&prop, &reference_cruise(), &config).unwrap();
        let second = solve_cruise_rpm(&prop, &reference_cruise(), &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn more_motors_need_less_rpm() {
        let prop = apc_11x7();
        let config = SolverConfig::default();

        let mut previous = f64::INFINITY;
        for n in 1..=3 {
            let conditions = CruiseConditions {
                motors: motors(n),
                ..reference_cruise()
            };
            let rpm = solve_cruise_rpm(&prop, &conditions, &config)
                .unwrap()
                .shaft_speed
                .rpm();
            assert!(rpm <= previous, "{n} motors needed {rpm} RPM");
            previous = rpm;
        }
    }

    #[test]
    fn iteration_cap_is_an_error() {
        let mut config = SolverConfig::default();
        config.cruise.max_iters = 10;

        let err = solve_cruise_rpm(&apc_11x7(), &reference_cruise(), &config).unwrap_err();
        assert!(matches!(
            err,
            ConvergenceError::MaxIters {
                phase: SolvePhase::CruiseRpm,
                iters: 10,
                ..
            }
        ));
    }

    #[test]
    fn electrical_state_matches_reference() {
        let result = solve_cruise(
            &apc_11x7(),
            &mt3520(),
            &reference_battery(),
            &reference_cruise(),
            &SolverConfig::default(),
        )
        .unwrap();
        let e = result.electrical;

        assert_relative_eq!(e.torque.get::<newton_meter>(), 0.366_681_1, max_relative = 1e-4);
        assert_relative_eq!(e.inflow_factor, 0.093_466_26, max_relative = 1e-9);
        assert_relative_eq!(e.current.get::<ampere>(), 18.605_877, max_relative = 1e-4);
        assert_relative_eq!(e.voltage.get::<volt>(), 28.578_810, max_relative = 1e-4);
        assert_relative_eq!(e.battery_power.get::<watt>(), 541.733_81, max_relative = 1e-4);
        assert_relative_eq!(e.endurance.get::<minute>(), 41.640_968, max_relative = 1e-4);
        assert_relative_eq!(e.range.get::<meter>(), 69_956.83, max_relative = 1e-4);
        assert_relative_eq!(e.ideal_current.get::<ampere>(), 53.845_132, max_relative = 1e-4);
        assert!(e.propeller_efficiency > 0.0 && e.propeller_efficiency < 1.0);
        assert!(e.motor_efficiency > 0.0 && e.motor_efficiency < 1.0);
    }

    #[test]
    fn low_pack_voltage_is_rejected() {
        let battery =
            BatteryModel::from_catalog(PartsCatalog::builtin(), "5Ah_6S_Nanotech", 6, 2).unwrap();

        let err = solve_cruise(
            &apc_11x7(),
            &mt3520(),
            &battery,
            &reference_cruise(),
            &SolverConfig::default(),
        )
        .unwrap_err();

        match err {
            SolveError::Configuration(ConfigurationError::InsufficientVoltage {
                required,
                available,
            }) => {
                assert_relative_eq!(available.get::<volt>(), 18.6, epsilon = 1e-12);
                assert!(required > available);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_drag_has_no_real_inflow() {
        let prop = apc_11x7();
        let config = SolverConfig::default();
        let rpm = solve_cruise_rpm(&prop, &reference_cruise(), &config).unwrap();
        let conditions = CruiseConditions {
            drag: Force::new::<newton>(-1e6),
            ..reference_cruise()
        };

        let err = solve_cruise_electrical(
            &prop,
            &mt3520(),
            &reference_battery(),
            &conditions,
            &rpm,
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NegativeInflowDiscriminant { discriminant } if discriminant < 0.0
        ));
    }
}
