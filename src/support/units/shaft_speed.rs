use uom::si::{angular_velocity::revolution_per_minute, f64::AngularVelocity};

/// Creates an [`AngularVelocity`] from revolutions per minute.
#[must_use]
pub fn rpm(value: f64) -> AngularVelocity {
    AngularVelocity::new::<revolution_per_minute>(value)
}

/// Convenience accessors for shaft speeds.
pub trait ShaftSpeedExt {
    /// Returns the speed in revolutions per minute.
    fn rpm(&self) -> f64;

    /// Returns the speed in revolutions per second.
    fn revs_per_second(&self) -> f64 {
        self.rpm() / 60.0
    }
}

impl ShaftSpeedExt for AngularVelocity {
    fn rpm(&self) -> f64 {
        self.get::<revolution_per_minute>()
    }
}
