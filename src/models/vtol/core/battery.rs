//! Battery pack built from identical cells.

use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricCurrent, ElectricPotential, Energy, Mass, Power},
    power::watt,
};

use crate::support::{
    constraint::{StrictlyPositive, UnitIntervalLowerOpen},
    units::SpecificEnergy,
};

use super::{
    catalog::PartsCatalog,
    error::{ConfigurationError, PerformanceError},
};

/// Catalog record for a battery cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpec {
    pub energy_density: SpecificEnergy,
    pub mass: Mass,
    pub voltage_max: ElectricPotential,
    pub voltage_min: ElectricPotential,
    /// Cell mass over pack mass.
    pub packaging_factor: f64,
    /// Usable fraction of rated capacity after aging.
    pub aging_factor: f64,
}

/// A series-parallel pack of one cell type.
#[derive(Debug, Clone)]
pub struct BatteryModel {
    cell_type: String,
    cell: CellSpec,
    series: u32,
    parallel: u32,
}

impl BatteryModel {
    /// Builds a pack of `series` × `parallel` cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if either count is
    /// zero, the cell mass or energy density is not positive, or a packaging
    /// or aging factor is outside `(0, 1]`.
    pub fn new(
        cell_type: &str,
        cell: &CellSpec,
        series: u32,
        parallel: u32,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::check::<_, StrictlyPositive>(cell_type, "series count", &series)?;
        ConfigurationError::check::<_, StrictlyPositive>(cell_type, "parallel count", &parallel)?;
        ConfigurationError::check::<_, StrictlyPositive>(cell_type, "cell mass", &cell.mass)?;
        ConfigurationError::check::<_, StrictlyPositive>(
            cell_type,
            "energy density",
            &cell.energy_density,
        )?;
        ConfigurationError::check::<_, UnitIntervalLowerOpen>(
            cell_type,
            "packaging factor",
            &cell.packaging_factor,
        )?;
        ConfigurationError::check::<_, UnitIntervalLowerOpen>(
            cell_type,
            "aging factor",
            &cell.aging_factor,
        )?;

        Ok(Self {
            cell_type: cell_type.to_string(),
            cell: *cell,
            series,
            parallel,
        })
    }

    /// Looks up `cell_type` in the catalog and builds a pack from it.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceError::UnknownPart`] if the cell is not in the
    /// catalog, or the configuration errors of [`BatteryModel::new`].
    pub fn from_catalog(
        catalog: &PartsCatalog,
        cell_type: &str,
        series: u32,
        parallel: u32,
    ) -> Result<Self, PerformanceError> {
        let cell = catalog.cells.get(cell_type)?;
        Ok(Self::new(cell_type, cell, series, parallel)?)
    }

    #[must_use]
    pub fn cell_total(&self) -> u32 {
        self.series * self.parallel
    }

    /// Pack mass including packaging.
    #[must_use]
    pub fn mass(&self) -> Mass {
        self.cell.mass * f64::from(self.cell_total()) / self.cell.packaging_factor
    }

    /// Usable pack energy density after packaging and aging.
    #[must_use]
    pub fn energy_density(&self) -> SpecificEnergy {
        self.cell.energy_density * self.cell.packaging_factor * self.cell.aging_factor
    }

    /// Pack voltage at minimum charge.
    #[must_use]
    pub fn voltage_min(&self) -> ElectricPotential {
        self.cell.voltage_min * f64::from(self.series)
    }

    /// Pack voltage at full charge.
    #[must_use]
    pub fn voltage_max(&self) -> ElectricPotential {
        self.cell.voltage_max * f64::from(self.series)
    }

    /// Usable pack energy.
    #[must_use]
    pub fn energy_capacity(&self) -> Energy {
        self.mass() * self.energy_density()
    }

    /// Current drawn from each cell when the pack delivers `power` at
    /// `voltage`.
    #[must_use]
    pub fn cell_current(&self, power: Power, voltage: ElectricPotential) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(
            power.get::<watt>() / voltage.get::<volt>() / f64::from(self.parallel),
        )
    }

    /// Cell type and layout, such as `5Ah_6S_Nanotech (12S 2P)`.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} ({}S {}P)", self.cell_type, self.series, self.parallel)
    }

    #[must_use]
    pub fn cell_type(&self) -> &str {
        &self.cell_type
    }

    #[must_use]
    pub fn cell(&self) -> &CellSpec {
        &self.cell
    }

    #[must_use]
    pub fn series(&self) -> u32 {
        self.series
    }

    #[must_use]
    pub fn parallel(&self) -> u32 {
        self.parallel
    }
}
