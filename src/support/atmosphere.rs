//! Standard gravity and sea-level air properties.
//!
//! Every performance figure in this crate is evaluated at sea level in a
//! standard atmosphere. The solver configuration carries its own density so
//! callers can evaluate other conditions.

use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Force, Mass, MassDensity},
    mass_density::kilogram_per_cubic_meter,
};

/// Standard acceleration due to gravity, m/s².
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Air density at sea level, kg/m³.
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Returns standard gravity as an [`Acceleration`].
#[must_use]
pub fn standard_gravity() -> Acceleration {
    Acceleration::new::<meter_per_second_squared>(STANDARD_GRAVITY)
}

/// Returns sea-level air density as a [`MassDensity`].
#[must_use]
pub fn sea_level_density() -> MassDensity {
    MassDensity::new::<kilogram_per_cubic_meter>(SEA_LEVEL_DENSITY)
}

/// Returns the weight of `mass` under standard gravity.
#[must_use]
pub fn weight(mass: Mass) -> Force {
    mass * standard_gravity()
}
