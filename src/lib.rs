//! # VTOL Models
//!
//! Performance estimation for electric fixed-wing VTOL aircraft, built as
//! [Twine](https://github.com/isentropic-dev/twine) models.
//!
//! Given a propeller, motor and battery from a parts catalog plus a wing and
//! mission profile, the crate sizes the mass budget and solves the coupled
//! propeller, motor and battery equilibria for cruise, climb and hover.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Example
//!
//! ```no_run
//! use twine_core::Model;
//! use vtol_models::models::vtol::{Mission, VtolPerformance};
//!
//! let report = VtolPerformance::default().call(&Mission::default())?;
//! println!("all-up mass: {:?}", report.mass.all_up);
//! # Ok::<(), vtol_models::models::vtol::PerformanceError>(())
//! ```
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Note: Only utilities at the crate-level (in [`support`]) and the types
//! re-exported by each model are part of the public API. Model-specific
//! utility code remains private.

pub mod models;
pub mod support;
