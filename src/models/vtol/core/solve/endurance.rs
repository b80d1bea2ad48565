use uom::si::{
    energy::watt_hour,
    f64::{Energy, Length, Time, Velocity},
    length::meter,
    power::watt,
    time::hour,
    velocity::meter_per_second,
};

use crate::models::vtol::core::{battery::BatteryModel, error::ConfigurationError};

use super::{CruiseElectrical, HoverResult};

/// Cruise endurance and range left after the hover segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCorrected {
    /// Energy drawn by the hover motors over the hover time.
    pub hover_energy: Energy,
    /// Pack energy left for cruise.
    pub remaining_energy: Energy,
    pub endurance: Time,
    /// Still-air range at the mission speed.
    pub range: Length,
    /// Half the range, for an out-and-back mission.
    pub mission_radius: Length,
}

/// Subtracts the hover energy from the pack and recomputes cruise endurance
/// and range at the cruise battery power.
///
/// # Errors
///
/// Returns [`ConfigurationError::HoverExhaustsBattery`] if hovering for
/// `hover_time` uses the whole pack.
pub fn hover_corrected_endurance(
    battery: &BatteryModel,
    cruise: &CruiseElectrical,
    hover: &HoverResult,
    hover_time: Time,
    speed: Velocity,
) -> Result<HoverCorrected, ConfigurationError> {
    let capacity = battery.energy_capacity();
    let hover_energy = Energy::new::<watt_hour>(
        hover.battery_power.get::<watt>() * hover_time.get::<hour>(),
    );
    let remaining = capacity.get::<watt_hour>() - hover_energy.get::<watt_hour>();
    if remaining <= 0.0 {
        return Err(ConfigurationError::HoverExhaustsBattery {
            hover: hover_energy,
            capacity,
        });
    }

    let endurance = remaining / cruise.battery_power.get::<watt>();
    let range = endurance * 3600.0 * speed.get::<meter_per_second>();

    Ok(HoverCorrected {
        hover_energy,
        remaining_energy: Energy::new::<watt_hour>(remaining),
        endurance: Time::new::<hour>(endurance),
        range: Length::new::<meter>(range),
        mission_radius: Length::new::<meter>(range / 2.0),
    })
}
