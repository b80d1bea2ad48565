//! Wing geometry and quadratic drag polar.
//!
//! Drag at speed `v` follows `D = A·v² + B/v²`, where the parasite term
//! `A = ½ρ·CD0·S` and the induced term `B = W² / (π·b²·e·½ρ)` are fixed at
//! construction from the all-up mass. Minimum drag occurs at
//! `v_md = (B/A)^¼` and minimum power at `0.76·v_md`.

use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    f64::{Area, Force, Length, Mass, MassDensity, Velocity},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::support::{
    atmosphere::{STANDARD_GRAVITY, sea_level_density},
    constraint::{NonNegative, StrictlyPositive},
};

use super::error::ConfigurationError;

const PART: &str = "wing";

/// Ratio of minimum-power speed to minimum-drag speed for a parabolic polar.
const MIN_POWER_SPEED_RATIO: f64 = 0.76;

/// Reynolds number per metre of chord per m/s at sea level.
const REYNOLDS_PER_CHORD_SPEED: f64 = 69_000.0;

/// Aerodynamic assumptions shared by all wings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingAerodynamics {
    /// Maximum lift coefficient.
    pub cl_max: f64,
    /// Oswald span efficiency factor.
    pub span_efficiency: f64,
    /// Zero-lift drag coefficient of the wing section.
    pub cd0_wing: f64,
    /// Frontal area of the fuselage and motor pods.
    pub fuselage_frontal_area: Area,
    /// Drag coefficient of the fuselage frontal area.
    pub fuselage_drag_coef: f64,
    /// Minimum ratio of mission speed to stall speed.
    pub stall_speed_margin: f64,
}

impl Default for WingAerodynamics {
    fn default() -> Self {
        Self {
            cl_max: 1.2,
            span_efficiency: 0.85,
            // Typical for a wing section near Re = 300 000.
            cd0_wing: 0.015,
            fuselage_frontal_area: Area::new::<square_meter>(0.1 * 0.1),
            // Faired bluff body.
            fuselage_drag_coef: 0.7,
            stall_speed_margin: 1.5,
        }
    }
}

/// Drag polar evaluated at one mass and speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolarPoint {
    /// Drag at the minimum-drag speed.
    pub drag_best_ld: Force,
    /// Lift-to-drag ratio at the minimum-drag speed.
    pub ld_max: f64,
    /// Drag at the requested speed.
    pub drag: Force,
    /// Lift-to-drag ratio at the requested speed.
    pub ld: f64,
}

/// A wing sized for a given all-up mass.
#[derive(Debug, Clone, Copy)]
pub struct WingModel {
    span: f64,
    aspect_ratio: f64,
    aero: WingAerodynamics,
    cd0: f64,
    coef_a: f64,
    coef_b: f64,
    stall_speed: f64,
    min_drag_speed: f64,
}

impl WingModel {
    /// Builds a wing with default aerodynamics at sea-level density.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if the span, aspect
    /// ratio or mass is not positive.
    pub fn new(
        span: Length,
        aspect_ratio: f64,
        all_up_mass: Mass,
    ) -> Result<Self, ConfigurationError> {
        Self::with_aerodynamics(
            span,
            aspect_ratio,
            all_up_mass,
            WingAerodynamics::default(),
            sea_level_density(),
        )
    }

    /// Builds a wing with explicit aerodynamic assumptions and air density.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if a geometric,
    /// aerodynamic or mass parameter is out of range.
    pub fn with_aerodynamics(
        span: Length,
        aspect_ratio: f64,
        all_up_mass: Mass,
        aero: WingAerodynamics,
        density: MassDensity,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::check::<_, StrictlyPositive>(PART, "span", &span)?;
        ConfigurationError::check::<_, StrictlyPositive>(PART, "aspect ratio", &aspect_ratio)?;
        ConfigurationError::check::<_, StrictlyPositive>(PART, "all-up mass", &all_up_mass)?;
        ConfigurationError::check::<_, StrictlyPositive>(PART, "air density", &density)?;
        ConfigurationError::check::<_, StrictlyPositive>(PART, "CL max", &aero.cl_max)?;
        ConfigurationError::check::<_, StrictlyPositive>(
            PART,
            "span efficiency",
            &aero.span_efficiency,
        )?;
        ConfigurationError::check::<_, StrictlyPositive>(PART, "wing CD0", &aero.cd0_wing)?;
        ConfigurationError::check::<_, NonNegative>(
            PART,
            "fuselage frontal area",
            &aero.fuselage_frontal_area,
        )?;
        ConfigurationError::check::<_, NonNegative>(
            PART,
            "fuselage drag coefficient",
            &aero.fuselage_drag_coef,
        )?;

        let b = span.get::<meter>();
        let rho = density.get::<kilogram_per_cubic_meter>();
        let weight = all_up_mass.get::<kilogram>() * STANDARD_GRAVITY;
        let area = b * b / aspect_ratio;

        let cd0 = aero.cd0_wing
            + aero.fuselage_drag_coef * (aero.fuselage_frontal_area.get::<square_meter>() / area);
        let stall_speed = (2.0 * weight / (rho * area * aero.cl_max)).sqrt();
        let coef_a = 0.5 * rho * cd0 * area;
        let coef_b = weight * weight / (PI * b * b * aero.span_efficiency * 0.5 * rho);

        Ok(Self {
            span: b,
            aspect_ratio,
            aero,
            cd0,
            coef_a,
            coef_b,
            stall_speed,
            min_drag_speed: (coef_b / coef_a).powf(0.25),
        })
    }

    /// Evaluates the drag polar for `mass` at `speed`.
    ///
    /// The polar coefficients stay those of the construction mass; `mass`
    /// only sets the lift used in both lift-to-drag ratios.
    #[must_use]
    pub fn calc_drag(&self, mass: Mass, speed: Velocity) -> DragPolarPoint {
        let weight = mass.get::<kilogram>() * STANDARD_GRAVITY;
        let drag_best_ld = self.drag_at(self.min_drag_speed);
        let drag = self.drag_at(speed.get::<meter_per_second>());

        DragPolarPoint {
            drag_best_ld: Force::new::<newton>(drag_best_ld),
            ld_max: weight / drag_best_ld,
            drag: Force::new::<newton>(drag),
            ld: weight / drag,
        }
    }

    fn drag_at(&self, v: f64) -> f64 {
        self.coef_a * v * v + self.coef_b / (v * v)
    }

    /// Mission speed: the fastest of the stall-margin speed, the
    /// minimum-power speed and `minimum`.
    #[must_use]
    pub fn mission_speed(&self, minimum: Velocity) -> Velocity {
        let floor = (self.aero.stall_speed_margin * self.stall_speed).max(self.min_power_speed_mps());
        Velocity::new::<meter_per_second>(floor.max(minimum.get::<meter_per_second>()))
    }

    /// Approximate chord Reynolds number at `speed`.
    #[must_use]
    pub fn reynolds_number(&self, speed: Velocity) -> f64 {
        REYNOLDS_PER_CHORD_SPEED * self.mac().get::<meter>() * speed.get::<meter_per_second>()
    }

    #[must_use]
    pub fn span(&self) -> Length {
        Length::new::<meter>(self.span)
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    #[must_use]
    pub fn area(&self) -> Area {
        Area::new::<square_meter>(self.span * self.span / self.aspect_ratio)
    }

    /// Mean aerodynamic chord of a rectangular planform.
    #[must_use]
    pub fn mac(&self) -> Length {
        Length::new::<meter>(self.span / self.aspect_ratio)
    }

    /// Zero-lift drag coefficient of wing and fuselage.
    #[must_use]
    pub fn cd0(&self) -> f64 {
        self.cd0
    }

    /// Parasite polar coefficient `A`, in N·s²/m².
    #[must_use]
    pub fn coef_a(&self) -> f64 {
        self.coef_a
    }

    /// Induced polar coefficient `B`, in N·m²/s².
    #[must_use]
    pub fn coef_b(&self) -> f64 {
        self.coef_b
    }

    #[must_use]
    pub fn stall_speed(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.stall_speed)
    }

    #[must_use]
    pub fn min_drag_speed(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.min_drag_speed)
    }

    #[must_use]
    pub fn min_power_speed(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.min_power_speed_mps())
    }

    fn min_power_speed_mps(&self) -> f64 {
        MIN_POWER_SPEED_RATIO * self.min_drag_speed
    }

    #[must_use]
    pub fn aerodynamics(&self) -> &WingAerodynamics {
        &self.aero
    }
}
