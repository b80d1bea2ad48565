//! Brushless motor and speed controller electrical model.

use std::f64::consts::PI;

use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{AngularVelocity, ElectricCurrent, ElectricPotential, ElectricalResistance, Mass},
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive, UnitIntervalLowerOpen},
    units::ShaftSpeedExt,
};

use super::{
    catalog::PartsCatalog,
    error::{ConfigurationError, PerformanceError},
};

/// Catalog record for a motor and its speed controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorSpec {
    /// Shaft power out over electrical power in, used for quick estimates.
    pub efficiency: f64,
    /// Series resistance of the supply wiring and controller.
    pub supply_resistance: ElectricalResistance,
    /// Zero-load current measured at `i0_voltage`.
    pub i0_current: ElectricCurrent,
    pub i0_voltage: ElectricPotential,
    /// Unloaded speed per volt, in RPM/V.
    pub kv: f64,
    pub armature_resistance: ElectricalResistance,
    pub mass: Mass,
    pub esc_mass: Mass,
    pub current_limit: ElectricCurrent,
}

/// A validated motor.
#[derive(Debug, Clone)]
pub struct MotorModel {
    name: String,
    spec: MotorSpec,
}

impl MotorModel {
    /// Validates `spec` as a motor called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if kV, the zero-load
    /// reference voltage or the current limit is not positive, a resistance,
    /// current or mass is negative, or the efficiency is outside `(0, 1]`.
    pub fn new(name: &str, spec: &MotorSpec) -> Result<Self, ConfigurationError> {
        ConfigurationError::check::<_, StrictlyPositive>(name, "kV", &spec.kv)?;
        ConfigurationError::check::<_, StrictlyPositive>(name, "i0 voltage", &spec.i0_voltage)?;
        ConfigurationError::check::<_, StrictlyPositive>(
            name,
            "current limit",
            &spec.current_limit,
        )?;
        ConfigurationError::check::<_, UnitIntervalLowerOpen>(
            name,
            "efficiency",
            &spec.efficiency,
        )?;
        ConfigurationError::check::<_, NonNegative>(
            name,
            "supply resistance",
            &spec.supply_resistance,
        )?;
        ConfigurationError::check::<_, NonNegative>(
            name,
            "armature resistance",
            &spec.armature_resistance,
        )?;
        ConfigurationError::check::<_, NonNegative>(name, "i0 current", &spec.i0_current)?;
        ConfigurationError::check::<_, NonNegative>(name, "motor mass", &spec.mass)?;
        ConfigurationError::check::<_, NonNegative>(name, "ESC mass", &spec.esc_mass)?;

        Ok(Self {
            name: name.to_string(),
            spec: *spec,
        })
    }

    /// Looks up motor `name` in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceError::UnknownPart`] if the motor is not in the
    /// catalog, or the configuration errors of [`MotorModel::new`].
    pub fn from_catalog(catalog: &PartsCatalog, name: &str) -> Result<Self, PerformanceError> {
        let spec = catalog.motors.get(name)?;
        Ok(Self::new(name, spec)?)
    }

    /// Torque constant in N·m/A, `60 / (2π·kV)`.
    #[must_use]
    pub fn torque_constant(&self) -> f64 {
        60.0 / (2.0 * PI * self.spec.kv)
    }

    /// Zero-load current at `speed`.
    ///
    /// Scales the measured zero-load current linearly with speed relative to
    /// the unloaded speed at the reference voltage.
    #[must_use]
    pub fn io_current_at(&self, speed: AngularVelocity) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(self.io_amps(speed.rpm()))
    }

    /// Back-EMF generated at `speed`.
    #[must_use]
    pub fn back_emf(&self, speed: AngularVelocity) -> ElectricPotential {
        ElectricPotential::new::<volt>(self.emf_volts(speed.rpm()))
    }

    pub(crate) fn io_amps(&self, rpm: f64) -> f64 {
        self.spec.i0_current.get::<ampere>() * rpm
            / (self.spec.i0_voltage.get::<volt>() * self.spec.kv)
    }

    pub(crate) fn emf_volts(&self, rpm: f64) -> f64 {
        rpm / self.spec.kv
    }

    /// Motor and speed controller mass.
    #[must_use]
    pub fn mass(&self) -> Mass {
        self.spec.mass + self.spec.esc_mass
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn spec(&self) -> &MotorSpec {
        &self.spec
    }

    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.spec.efficiency
    }

    #[must_use]
    pub fn kv(&self) -> f64 {
        self.spec.kv
    }

    #[must_use]
    pub fn armature_resistance(&self) -> ElectricalResistance {
        self.spec.armature_resistance
    }

    #[must_use]
    pub fn supply_resistance(&self) -> ElectricalResistance {
        self.spec.supply_resistance
    }

    #[must_use]
    pub fn current_limit(&self) -> ElectricCurrent {
        self.spec.current_limit
    }
}
