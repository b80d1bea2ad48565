use uom::si::{
    electric_potential::volt,
    f64::{ElectricPotential, Mass},
    mass::kilogram,
};

use crate::{models::vtol::core::battery::CellSpec, support::units::specific_energy};

pub(super) fn entries() -> Vec<(&'static str, CellSpec)> {
    vec![
        // 5Ah 6S Nanotech pack, rated per cell.
        (
            "5Ah_6S_Nanotech",
            CellSpec {
                energy_density: specific_energy(194.0),
                mass: Mass::new::<kilogram>(0.095),
                voltage_max: ElectricPotential::new::<volt>(4.15),
                voltage_min: ElectricPotential::new::<volt>(3.1),
                packaging_factor: 1.0,
                aging_factor: 0.85,
            },
        ),
        // Panasonic NCR18650GA.
        (
            "NCR18650GA",
            CellSpec {
                energy_density: specific_energy(224.0),
                mass: Mass::new::<kilogram>(0.048),
                voltage_max: ElectricPotential::new::<volt>(4.15),
                voltage_min: ElectricPotential::new::<volt>(2.7),
                packaging_factor: 0.9,
                aging_factor: 0.85,
            },
        ),
    ]
}
