//! All-up mass build-up.

use uom::si::f64::Mass;

use crate::support::constraint::{NonNegative, UnitIntervalUpperOpen};

use super::{
    battery::BatteryModel, error::ConfigurationError, motor::MotorModel,
    propeller::PropellerModel,
};

const PART: &str = "mass budget";

/// How the airframe structure mass is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Structure {
    /// Airframe mass including servos and linkages.
    Mass(Mass),
    /// Fraction of the all-up mass that is structure, in `[0, 1)`.
    Fraction(f64),
}

/// Component masses and the resulting all-up mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBudget {
    pub battery: Mass,
    pub avionics: Mass,
    pub payload: Mass,
    /// Motors, speed controllers and propellers for every installed motor.
    pub propulsion: Mass,
    pub structure: Mass,
    pub all_up: Mass,
}

impl MassBudget {
    /// Sums the component masses for `motors_total` installed motors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if the avionics,
    /// payload or structure mass is negative, or the structure fraction is
    /// outside `[0, 1)`.
    pub fn new(
        battery: &BatteryModel,
        motor: &MotorModel,
        propeller: &PropellerModel,
        motors_total: u32,
        avionics: Mass,
        payload: Mass,
        structure: Structure,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::check::<_, NonNegative>(PART, "avionics mass", &avionics)?;
        ConfigurationError::check::<_, NonNegative>(PART, "payload mass", &payload)?;

        let battery = battery.mass();
        let propulsion = (motor.mass() + propeller.mass()) * f64::from(motors_total);
        let known = battery + avionics + payload + propulsion;

        let (structure, all_up) = match structure {
            Structure::Mass(structure) => {
                ConfigurationError::check::<_, NonNegative>(PART, "structure mass", &structure)?;
                (structure, known + structure)
            }
            Structure::Fraction(fraction) => {
                ConfigurationError::check::<_, UnitIntervalUpperOpen>(
                    PART,
                    "structure fraction",
                    &fraction,
                )?;
                let all_up = known / (1.0 - fraction);
                (all_up * fraction, all_up)
            }
        };

        Ok(Self {
            battery,
            avionics,
            payload,
            propulsion,
            structure,
            all_up,
        })
    }

    /// Everything except the battery.
    #[must_use]
    pub fn non_battery(&self) -> Mass {
        self.all_up - self.battery
    }
}
