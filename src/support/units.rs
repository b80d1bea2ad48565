//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units on its public API (masses,
//! speeds, voltages, currents, powers).
//! This module provides the pieces that are useful for aircraft performance
//! modeling but aren't included in [`uom`].
//!
//! ## Specific energy
//!
//! Battery cells are rated in watt-hours per kilogram. [`SpecificEnergy`] is
//! the matching quantity and [`specific_energy`] / [`SpecificEnergyExt`]
//! convert to and from that rating:
//!
//! ```
//! use vtol_models::support::units::{SpecificEnergyExt, specific_energy};
//!
//! let density = specific_energy(194.0);
//! assert!((density.watt_hours_per_kilogram() - 194.0).abs() < 1e-9);
//! ```
//!
//! ## Shaft speed
//!
//! Propeller and motor speeds are handled as [`AngularVelocity`] and read
//! back in revolutions per minute through [`rpm`] and [`ShaftSpeedExt`].
//!
//! [`AngularVelocity`]: uom::si::f64::AngularVelocity

mod quantities;
mod shaft_speed;

pub use quantities::{SpecificEnergy, SpecificEnergyExt, specific_energy};
pub use shaft_speed::{ShaftSpeedExt, rpm};
