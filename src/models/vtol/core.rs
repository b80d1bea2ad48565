//! Steady-state performance of a VTOL fixed-wing aircraft.
//!
//! Component models (propeller, motor, battery, wing) are built once from
//! catalog records and stay immutable. The solvers in [`solve`] couple them
//! for each flight regime, and [`mission::analyze`] chains the regimes the
//! way a design review reads them: cruise, climb on a full and an empty
//! pack, then hover and the endurance left after it.

mod battery;
mod catalog;
mod config;
mod error;
mod mass;
mod mission;
mod motor;
mod propeller;
mod solve;
mod wing;

#[cfg(test)]
mod test_support;

pub use battery::{BatteryModel, CellSpec};
pub use catalog::{Catalog, PartsCatalog};
pub use config::{LoopConfig, SolverConfig};
pub use error::{
    ConfigurationError, ConvergenceError, PartKind, PerformanceError, SolveError, SolvePhase,
    UnknownPartError,
};
pub use mass::{MassBudget, Structure};
pub use mission::{Mission, PerformanceReport, analyze};
pub use motor::{MotorModel, MotorSpec};
pub use propeller::{PropellerData, PropellerModel, PropellerSample};
pub use solve::{
    ClimbConditions, ClimbResult, CruiseConditions, CruiseElectrical, CruiseResult, CruiseRpm,
    HoverConditions, HoverCorrected, HoverResult, hover_corrected_endurance, solve_climb,
    solve_cruise, solve_cruise_electrical, solve_cruise_rpm, solve_hover,
};
pub use wing::{DragPolarPoint, WingAerodynamics, WingModel};

use crate::support::constraint::{Constrained, StrictlyPositive};

/// Number of motors sharing a flight regime; at least one.
pub type MotorCount = Constrained<u32, StrictlyPositive>;
