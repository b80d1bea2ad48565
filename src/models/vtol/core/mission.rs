//! Full mission analysis: parts, mass, wing, then every flight regime.

use tracing::debug;
use uom::si::{
    f64::{ElectricCurrent, Length, Mass, Power, Time, Velocity},
    length::{inch, meter},
    mass::kilogram,
    power::watt,
    time::minute,
    velocity::meter_per_second,
};

use crate::support::constraint::NonNegative;

use super::{
    MotorCount,
    battery::BatteryModel,
    catalog::PartsCatalog,
    config::SolverConfig,
    error::{ConfigurationError, PerformanceError},
    mass::{MassBudget, Structure},
    motor::MotorModel,
    propeller::PropellerModel,
    solve::{
        ClimbConditions, ClimbResult, CruiseConditions, CruiseResult, HoverConditions,
        HoverCorrected, HoverResult, hover_corrected_endurance, solve_climb, solve_cruise,
        solve_hover,
    },
    wing::{DragPolarPoint, WingAerodynamics, WingModel},
};

const PART: &str = "mission";

/// Vehicle configuration and mission profile.
///
/// The default is a 3 m, 8.3 kg tail-sitter class design with one cruise
/// motor and three hover motors on a 12S2P pack.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub propeller: String,
    pub propeller_diameter: Length,
    pub cell_type: String,
    pub cells_series: u32,
    pub cells_parallel: u32,
    pub motor: String,
    pub wing_span: Length,
    pub aspect_ratio: f64,
    /// Lower bound on the mission speed.
    pub min_speed: Velocity,
    pub hover_time: Time,
    pub payload: Mass,
    /// Autopilot, datalink, power supply and wiring, excluding servos.
    pub avionics: Mass,
    pub structure: Structure,
    pub motors_cruise: u32,
    pub motors_hover: u32,
    /// Installed motors. May be less than cruise plus hover when motors are
    /// shared between the two.
    pub motors_total: u32,
    /// Parasitic electrical draw of the avionics.
    pub avionics_power: Power,
    pub aerodynamics: WingAerodynamics,
}

impl Default for Mission {
    fn default() -> Self {
        Self {
            propeller: "APC11x7".to_string(),
            propeller_diameter: Length::new::<inch>(11.0),
            cell_type: "5Ah_6S_Nanotech".to_string(),
            cells_series: 12,
            cells_parallel: 2,
            motor: "MT3520-11-400kV".to_string(),
            wing_span: Length::new::<meter>(3.0),
            aspect_ratio: 8.0,
            min_speed: Velocity::new::<meter_per_second>(28.0),
            hover_time: Time::new::<minute>(5.0),
            payload: Mass::new::<kilogram>(0.5),
            avionics: Mass::new::<kilogram>(0.15),
            structure: Structure::Mass(Mass::new::<kilogram>(4.15)),
            motors_cruise: 1,
            motors_hover: 3,
            motors_total: 3,
            avionics_power: Power::new::<watt>(10.0),
            aerodynamics: WingAerodynamics::default(),
        }
    }
}

/// Everything computed for a mission.
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub propeller: PropellerModel,
    pub motor: MotorModel,
    pub battery: BatteryModel,
    pub wing: WingModel,
    pub mass: MassBudget,
    pub mission_speed: Velocity,
    /// Drag polar at the all-up mass and mission speed.
    pub drag: DragPolarPoint,
    pub reynolds_number: f64,
    pub cruise: CruiseResult,
    /// Climb on a fully charged pack.
    pub climb_full: ClimbResult,
    /// Climb on a fully discharged pack.
    pub climb_empty: ClimbResult,
    /// Hover on a fully discharged pack.
    pub hover: HoverResult,
    /// Per-cell current while hovering.
    pub hover_cell_current: ElectricCurrent,
    /// Cruise endurance and range after the hover segment.
    pub endurance: HoverCorrected,
}

/// Runs every performance calculation for `mission`.
///
/// Parts are looked up in `catalog`; the wing is sized for the all-up mass.
/// Cruise is solved at the mission speed, climb on a full and then an empty
/// pack (each seeded by the previous RPM), and hover on an empty pack.
///
/// # Errors
///
/// Returns [`PerformanceError`] if a part is missing from the catalog, the
/// configuration is inconsistent, or any solve fails to converge.
pub fn analyze(
    mission: &Mission,
    catalog: &PartsCatalog,
    config: &SolverConfig,
) -> Result<PerformanceReport, PerformanceError> {
    let propeller =
        PropellerModel::from_catalog(catalog, &mission.propeller, mission.propeller_diameter)?;
    let motor = MotorModel::from_catalog(catalog, &mission.motor)?;
    let battery = BatteryModel::from_catalog(
        catalog,
        &mission.cell_type,
        mission.cells_series,
        mission.cells_parallel,
    )?;

    let motors_cruise = motor_count("cruise motors", mission.motors_cruise)?;
    let motors_hover = motor_count("hover motors", mission.motors_hover)?;
    let motors_total = motor_count("total motors", mission.motors_total)?;
    ConfigurationError::check::<_, NonNegative>(PART, "hover time", &mission.hover_time)?;

    let mass = MassBudget::new(
        &battery,
        &motor,
        &propeller,
        motors_total.get(),
        mission.avionics,
        mission.payload,
        mission.structure,
    )?;

    let wing = WingModel::with_aerodynamics(
        mission.wing_span,
        mission.aspect_ratio,
        mass.all_up,
        mission.aerodynamics,
        config.air_density,
    )?;
    let mission_speed = wing.mission_speed(mission.min_speed);
    let drag = wing.calc_drag(mass.all_up, mission_speed);

    if mission.motors_total > mission.motors_cruise + mission.motors_hover {
        return Err(ConfigurationError::MotorCount {
            total: mission.motors_total,
            cruise: mission.motors_cruise,
            hover: mission.motors_hover,
        }
        .into());
    }

    let cruise_conditions = CruiseConditions {
        drag: drag.drag,
        speed: mission_speed,
        motors: motors_cruise,
        avionics_power: mission.avionics_power,
    };
    let cruise = solve_cruise(&propeller, &motor, &battery, &cruise_conditions, config)?;

    let climb = |supply_voltage, seed| {
        let conditions = ClimbConditions {
            drag: drag.drag,
            speed: mission_speed,
            supply_voltage,
            seed,
            motors: motors_cruise,
            all_up_mass: mass.all_up,
        };
        solve_climb(&propeller, &motor, &conditions, config)
    };
    let climb_full = climb(battery.voltage_max(), cruise.rpm.shaft_speed)?;
    let climb_empty = climb(battery.voltage_min(), climb_full.shaft_speed)?;

    let hover = solve_hover(
        &propeller,
        &motor,
        &HoverConditions {
            battery_voltage: battery.voltage_min(),
            speed: mission_speed,
            all_up_mass: mass.all_up,
            motors: motors_hover,
        },
        config,
    )?;
    let hover_cell_current = battery.cell_current(hover.battery_power, battery.voltage_min());

    let endurance = hover_corrected_endurance(
        &battery,
        &cruise.electrical,
        &hover,
        mission.hover_time,
        mission_speed,
    )?;

    debug!(
        all_up_kg = mass.all_up.get::<kilogram>(),
        speed_mps = mission_speed.get::<meter_per_second>(),
        endurance_min = endurance.endurance.get::<minute>(),
        "mission analysis complete"
    );

    Ok(PerformanceReport {
        reynolds_number: wing.reynolds_number(mission_speed),
        propeller,
        motor,
        battery,
        wing,
        mass,
        mission_speed,
        drag,
        cruise,
        climb_full,
        climb_empty,
        hover,
        hover_cell_current,
        endurance,
    })
}

fn motor_count(parameter: &'static str, count: u32) -> Result<MotorCount, ConfigurationError> {
    MotorCount::new(count).map_err(|source| ConfigurationError::InvalidParameter {
        part: PART.to_string(),
        parameter,
        source,
    })
}
