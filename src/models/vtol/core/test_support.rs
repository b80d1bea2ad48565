use uom::si::{
    electric_potential::volt,
    f64::{AngularVelocity, ElectricPotential, Force, Length, Mass, Power, Velocity},
    force::newton,
    length::inch,
    mass::kilogram,
    power::watt,
    velocity::meter_per_second,
};

use super::{
    BatteryModel, ClimbConditions, CruiseConditions, HoverConditions, MotorCount, MotorModel,
    PartsCatalog, PropellerModel,
};

/// Drag of the default 8.28 kg, 3 m wing at 28 m/s.
const REFERENCE_DRAG: f64 = 12.036_080_705_333_232;
const REFERENCE_SPEED: f64 = 28.0;
const REFERENCE_MASS: f64 = 8.28;

pub(super) fn apc_11x7() -> PropellerModel {
    PropellerModel::from_catalog(PartsCatalog::builtin(), "APC11x7", Length::new::<inch>(11.0))
        .unwrap()
}

pub(super) fn mt3520() -> MotorModel {
    MotorModel::from_catalog(PartsCatalog::builtin(), "MT3520-11-400kV").unwrap()
}

/// 12S2P pack of 5 Ah Nanotech cells.
pub(super) fn reference_battery() -> BatteryModel {
    BatteryModel::from_catalog(PartsCatalog::builtin(), "5Ah_6S_Nanotech", 12, 2).unwrap()
}

pub(super) fn motors(n: u32) -> MotorCount {
    MotorCount::new(n).unwrap()
}

pub(super) fn reference_cruise() -> CruiseConditions {
    CruiseConditions {
        drag: Force::new::<newton>(REFERENCE_DRAG),
        speed: Velocity::new::<meter_per_second>(REFERENCE_SPEED),
        motors: motors(1),
        avionics_power: Power::new::<watt>(10.0),
    }
}

pub(super) fn reference_climb(
    supply_voltage: ElectricPotential,
    seed: AngularVelocity,
) -> ClimbConditions {
    ClimbConditions {
        drag: Force::new::<newton>(REFERENCE_DRAG),
        speed: Velocity::new::<meter_per_second>(REFERENCE_SPEED),
        supply_voltage,
        seed,
        motors: motors(1),
        all_up_mass: Mass::new::<kilogram>(REFERENCE_MASS),
    }
}

/// Three hover motors on an empty 12S pack.
pub(super) fn reference_hover() -> HoverConditions {
    HoverConditions {
        battery_voltage: ElectricPotential::new::<volt>(3.1 * 12.0),
        speed: Velocity::new::<meter_per_second>(REFERENCE_SPEED),
        all_up_mass: Mass::new::<kilogram>(REFERENCE_MASS),
        motors: motors(3),
    }
}
