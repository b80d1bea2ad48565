//! VTOL fixed-wing performance models.
//!
//! [`VtolPerformance`] is the [`twine_core::Model`] adapter: it takes a
//! [`Mission`] and returns the full [`PerformanceReport`]. The computational
//! core is in the internal `core` module. Its part models and the per-regime
//! solvers ([`solve_cruise`], [`solve_climb`], [`solve_hover`]) are
//! re-exported here for callers that drive a single flight regime.
//!
//! # Example
//!
//! ```
//! use uom::si::{
//!     f64::{Force, Length, Power, Velocity},
//!     force::newton,
//!     length::inch,
//!     power::watt,
//!     velocity::meter_per_second,
//! };
//! use vtol_models::models::vtol::{
//!     BatteryModel, CruiseConditions, MotorCount, MotorModel, PartsCatalog, PropellerModel,
//!     SolverConfig, solve_cruise,
//! };
//!
//! let catalog = PartsCatalog::builtin();
//! let propeller = PropellerModel::from_catalog(catalog, "APC11x7", Length::new::<inch>(11.0))?;
//! let motor = MotorModel::from_catalog(catalog, "MT3520-11-400kV")?;
//! let battery = BatteryModel::from_catalog(catalog, "5Ah_6S_Nanotech", 12, 2)?;
//!
//! let conditions = CruiseConditions {
//!     drag: Force::new::<newton>(12.0),
//!     speed: Velocity::new::<meter_per_second>(28.0),
//!     motors: MotorCount::new(1)?,
//!     avionics_power: Power::new::<watt>(10.0),
//! };
//! let cruise = solve_cruise(&propeller, &motor, &battery, &conditions, &SolverConfig::default())?;
//!
//! let drag = conditions.drag.get::<newton>();
//! assert!((cruise.rpm.thrust.get::<newton>() - drag).abs() < 0.001 * drag);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

use twine_core::Model;

pub use self::core::{
    BatteryModel, Catalog, CellSpec, ClimbConditions, ClimbResult, ConfigurationError,
    ConvergenceError, CruiseConditions, CruiseElectrical, CruiseResult, CruiseRpm,
    DragPolarPoint, HoverConditions, HoverCorrected, HoverResult, LoopConfig, MassBudget,
    Mission, MotorCount, MotorModel, MotorSpec, PartKind, PartsCatalog, PerformanceError,
    PerformanceReport, PropellerData, PropellerModel, PropellerSample, SolveError, SolvePhase,
    SolverConfig, Structure, UnknownPartError, WingAerodynamics, WingModel, analyze,
    hover_corrected_endurance, solve_climb, solve_cruise, solve_cruise_electrical,
    solve_cruise_rpm, solve_hover,
};

/// Steady-state mission performance of a VTOL fixed-wing aircraft.
///
/// Parts are resolved by name in the borrowed catalog on every call, so one
/// model can evaluate many missions against the same catalog.
#[derive(Debug, Clone)]
pub struct VtolPerformance<'a> {
    catalog: &'a PartsCatalog,
    config: SolverConfig,
}

impl<'a> VtolPerformance<'a> {
    #[must_use]
    pub fn new(catalog: &'a PartsCatalog, config: SolverConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &'a PartsCatalog {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Default for VtolPerformance<'static> {
    /// Built-in catalog with the default solver settings.
    fn default() -> Self {
        Self::new(PartsCatalog::builtin(), SolverConfig::default())
    }
}

impl Model for VtolPerformance<'_> {
    type Input = Mission;
    type Output = PerformanceReport;
    type Error = PerformanceError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::analyze(input, self.catalog, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angular_velocity::revolution_per_minute,
        electric_current::ampere,
        electric_potential::volt,
        energy::watt_hour,
        force::newton,
        length::meter,
        mass::kilogram,
        power::watt,
        time::minute,
        velocity::meter_per_second,
    };

    use crate::support::units::rpm;

    fn relative(actual: f64, expected: f64) {
        assert_relative_eq!(actual, expected, max_relative = 1e-3);
    }

    /// Output of the mission calculator script for the default mission,
    /// with its polynomial fits solved exactly in rational arithmetic.
    #[test]
    fn reference_mission() {
        let report = VtolPerformance::default().call(&Mission::default()).unwrap();

        relative(report.mass.all_up.get::<kilogram>(), 8.28);
        relative(report.battery.energy_capacity().get::<watt_hour>(), 375.972);
        relative(report.drag.drag.get::<newton>(), 12.036_08);
        relative(report.wing.stall_speed().get::<meter_per_second>(), 9.909_587);
        relative(report.wing.min_drag_speed().get::<meter_per_second>(), 13.229_21);
        relative(report.mission_speed.get::<meter_per_second>(), 28.0);
        relative(report.drag.ld_max, 15.864);

        let cruise = &report.cruise;
        relative(cruise.rpm.shaft_speed.get::<revolution_per_minute>(), 10_821.25);
        relative(cruise.rpm.thrust.get::<newton>(), 12.024_55);
        relative(cruise.electrical.battery_power.get::<watt>(), 541.733_8);
        relative(cruise.electrical.ideal_current.get::<ampere>(), 53.845_13);
        relative(cruise.electrical.current.get::<ampere>(), 18.605_88);
        relative(cruise.electrical.voltage.get::<volt>(), 28.578_81);
        relative(cruise.electrical.endurance.get::<minute>(), 41.640_97);
        relative(cruise.electrical.range.get::<meter>(), 69_956.83);

        relative(report.climb_full.voltage.get::<volt>(), 39.110_74);
        relative(report.climb_full.current.get::<ampere>(), 38.0);
        relative(report.climb_full.climb_rate.get::<meter_per_second>(), 6.791_074);
        relative(report.climb_empty.current.get::<ampere>(), 34.139_22);
        relative(report.climb_empty.climb_rate.get::<meter_per_second>(), 5.435_020);

        relative(report.hover.shaft_speed.get::<revolution_per_minute>(), 10_935.18);
        relative(report.hover.current.get::<ampere>(), 26.401_95);
        relative(report.hover.thrust.get::<newton>(), 27.305_98);
        relative(report.hover.battery_power.get::<watt>(), 3.0 * 744.086_4);
        relative(report.hover_cell_current.get::<ampere>(), 30.0);
        relative(report.propeller.speed_limit().get::<revolution_per_minute>(), 13_181.82);

        relative(report.endurance.remaining_energy.get::<watt_hour>(), 189.950_4);
        relative(report.endurance.endurance.get::<minute>(), 21.038_05);
        relative(report.endurance.range.get::<meter>(), 35_343.93);
    }

    #[test]
    fn adapter_matches_core() {
        let catalog = PartsCatalog::builtin();
        let config = SolverConfig::default();
        let mission = Mission::default();

        let model = VtolPerformance::new(catalog, config);
        let via_model = model.call(&mission).unwrap();
        let via_core = self::core::analyze(&mission, catalog, &config).unwrap();

        assert_eq!(via_model.cruise, via_core.cruise);
        assert_eq!(via_model.hover, via_core.hover);
        assert_eq!(via_model.endurance, via_core.endurance);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let model = VtolPerformance::default();
        let mission = Mission::default();

        let first = model.call(&mission).unwrap();
        let second = model.call(&mission).unwrap();

        assert_eq!(first.cruise, second.cruise);
        assert_eq!(first.climb_full, second.climb_full);
        assert_eq!(first.climb_empty, second.climb_empty);
        assert_eq!(first.hover, second.hover);
    }

    #[test]
    fn pack_voltage_bounds_are_exact() {
        let report = VtolPerformance::default().call(&Mission::default()).unwrap();

        assert_eq!(report.battery.voltage_max().get::<volt>(), 4.15 * 12.0);
        assert_eq!(report.battery.voltage_min().get::<volt>(), 3.1 * 12.0);
    }

    #[test]
    fn no_load_current_at_reference_speed() {
        let motor = MotorModel::from_catalog(PartsCatalog::builtin(), "MT3520-11-400kV").unwrap();

        assert_relative_eq!(motor.io_current_at(rpm(4000.0)).get::<ampere>(), 1.2, max_relative = 1e-12);
    }

    #[test]
    fn errors_surface_through_the_adapter() {
        let mission = Mission {
            motor: "missing".to_string(),
            ..Mission::default()
        };

        let err = VtolPerformance::default().call(&mission).unwrap_err();
        assert!(matches!(
            err,
            PerformanceError::UnknownPart(UnknownPartError {
                kind: PartKind::Motor,
                ..
            })
        ));
    }
}
