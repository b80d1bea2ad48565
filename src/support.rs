//! Crate-level supporting utilities.
//!
//! These modules are part of the public API because they're useful outside
//! the performance models, but their APIs are not stable.

pub mod atmosphere;
pub mod constraint;
pub mod polyfit;
pub mod units;
