use uom::{
    si::{
        ISQ, Quantity, SI,
        energy::watt_hour,
        f64::{Energy, Mass},
        mass::kilogram,
    },
    typenum::{N2, P2, Z0},
};

/// Specific energy, J/kg in SI.
pub type SpecificEnergy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`SpecificEnergy`] from a rating in watt-hours per kilogram.
#[must_use]
pub fn specific_energy(wh_per_kg: f64) -> SpecificEnergy {
    Energy::new::<watt_hour>(wh_per_kg) / Mass::new::<kilogram>(1.0)
}

/// Reads a [`SpecificEnergy`] back as watt-hours per kilogram.
pub trait SpecificEnergyExt {
    /// Returns the value in Wh/kg.
    fn watt_hours_per_kilogram(&self) -> f64;
}

impl SpecificEnergyExt for SpecificEnergy {
    fn watt_hours_per_kilogram(&self) -> f64 {
        let energy: Energy = *self * Mass::new::<kilogram>(1.0);
        energy.get::<watt_hour>()
    }
}
