//! Propeller aerodynamics from coefficient tables.

use std::f64::consts::PI;

use uom::si::{
    angular_velocity::revolution_per_minute,
    area::square_meter,
    f64::{AngularVelocity, Area, Length, Mass},
    length::{inch, meter},
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive, UnitIntervalLowerOpen},
    polyfit::{FitError, Polynomial},
};

use super::{
    catalog::PartsCatalog,
    error::{ConfigurationError, PerformanceError},
};

const CT_ORDER: usize = 5;
const CP_ORDER: usize = 6;
const ETA_ORDER: usize = 8;

/// Upper bound on the samples taken by [`PropellerModel::find_best_eta`].
const MAX_SCAN_SAMPLES: f64 = 1.0e6;

/// Tip-speed limit expressed as RPM × diameter in inches.
const SPEED_LIMIT_RPM_INCHES: f64 = 145_000.0;

/// One row of a propeller coefficient table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerSample {
    pub advance_ratio: f64,
    pub ct: f64,
    pub cp: f64,
    pub eta: f64,
}

/// Catalog record for a propeller family.
///
/// Samples must be sorted by ascending advance ratio; the first and last
/// rows bound the domain of the fitted curves.
#[derive(Debug, Clone, PartialEq)]
pub struct PropellerData {
    /// Pitch-to-diameter ratio of the propeller used to record the table.
    pub pitch_ratio: f64,
    pub mass: Mass,
    /// Efficiency as a fraction of an ideal momentum disc.
    pub efficiency: f64,
    pub samples: Vec<PropellerSample>,
}

/// A propeller of a given diameter with fitted coefficient curves.
///
/// The curves are only valid over `[j_min, j_max]`. Callers clamp the
/// advance ratio with [`PropellerModel::clamp_advance_ratio`] before
/// evaluating them.
#[derive(Debug, Clone)]
pub struct PropellerModel {
    model: String,
    diameter: Length,
    pitch: Length,
    efficiency: f64,
    mass: Mass,
    ct: Polynomial,
    cp: Polynomial,
    eta: Polynomial,
    j_min: f64,
    j_max: f64,
}

impl PropellerModel {
    /// Fits the coefficient curves of `data` for a propeller of `diameter`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::CurveFit`] if a curve cannot be fitted
    /// (for example, fewer than nine samples for the efficiency curve) and
    /// [`ConfigurationError::InvalidParameter`] for a non-positive diameter
    /// or an efficiency outside `(0, 1]`.
    pub fn new(
        model: &str,
        data: &PropellerData,
        diameter: Length,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::check::<_, StrictlyPositive>(model, "diameter", &diameter)?;
        ConfigurationError::check::<_, StrictlyPositive>(model, "pitch ratio", &data.pitch_ratio)?;
        ConfigurationError::check::<_, UnitIntervalLowerOpen>(
            model,
            "efficiency",
            &data.efficiency,
        )?;
        ConfigurationError::check::<_, NonNegative>(model, "mass", &data.mass)?;

        let curve_fit = |source| ConfigurationError::CurveFit {
            model: model.to_string(),
            source,
        };

        let (Some(first), Some(last)) = (data.samples.first(), data.samples.last()) else {
            return Err(curve_fit(FitError::TooFewSamples {
                samples: 0,
                order: ETA_ORDER,
            }));
        };

        let j: Vec<f64> = data.samples.iter().map(|s| s.advance_ratio).collect();
        let column = |f: fn(&PropellerSample) -> f64| data.samples.iter().map(f).collect::<Vec<_>>();

        let ct = Polynomial::fit(&j, &column(|s| s.ct), CT_ORDER).map_err(curve_fit)?;
        let cp = Polynomial::fit(&j, &column(|s| s.cp), CP_ORDER).map_err(curve_fit)?;
        let eta = Polynomial::fit(&j, &column(|s| s.eta), ETA_ORDER).map_err(curve_fit)?;

        Ok(Self {
            model: model.to_string(),
            diameter,
            pitch: diameter * data.pitch_ratio,
            efficiency: data.efficiency,
            mass: data.mass,
            ct,
            cp,
            eta,
            j_min: first.advance_ratio,
            j_max: last.advance_ratio,
        })
    }

    /// Looks up `model` in the catalog and fits it at `diameter`.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceError::UnknownPart`] if the propeller is not in
    /// the catalog, or the configuration errors of [`PropellerModel::new`].
    pub fn from_catalog(
        catalog: &PartsCatalog,
        model: &str,
        diameter: Length,
    ) -> Result<Self, PerformanceError> {
        let data = catalog.propellers.get(model)?;
        Ok(Self::new(model, data, diameter)?)
    }

    /// Thrust coefficient at advance ratio `j`.
    #[must_use]
    pub fn ct(&self, j: f64) -> f64 {
        self.ct.eval(j)
    }

    /// Power coefficient at advance ratio `j`.
    #[must_use]
    pub fn cp(&self, j: f64) -> f64 {
        self.cp.eval(j)
    }

    /// Propeller efficiency at advance ratio `j`.
    #[must_use]
    pub fn eta(&self, j: f64) -> f64 {
        self.eta.eval(j)
    }

    /// Clamps `j` to the range covered by the coefficient table.
    #[must_use]
    pub fn clamp_advance_ratio(&self, j: f64) -> f64 {
        j.clamp(self.j_min, self.j_max)
    }

    #[must_use]
    pub fn j_min(&self) -> f64 {
        self.j_min
    }

    #[must_use]
    pub fn j_max(&self) -> f64 {
        self.j_max
    }

    /// Scans the table range in increments of `step` for a cruise seed
    /// advance ratio.
    ///
    /// Each candidate `J + step` is compared against the efficiency at
    /// `j_min`, and the last `J` whose successor beats it is returned. On a
    /// single-peaked curve this lands near the upper end of the table rather
    /// than at the peak. It is only used to seed the cruise solve, and
    /// changing it moves the converged cruise point within its tolerance.
    ///
    /// A non-positive `step` returns `j_min`. Steps finer than
    /// `1/MAX_SCAN_SAMPLES` of the table range are coarsened to that.
    #[must_use]
    pub fn find_best_eta(&self, step: f64) -> f64 {
        if step.is_nan() || step <= 0.0 {
            return self.j_min;
        }
        let step = step.max((self.j_max - self.j_min) / MAX_SCAN_SAMPLES);

        let mut best = self.j_min;
        let threshold = self.eta(self.j_min);

        let mut i = 0_u32;
        loop {
            let j = self.j_min + f64::from(i) * step;
            if j >= self.j_max {
                break;
            }
            let candidate = (j + step).min(self.j_max);
            if self.eta(candidate) > threshold {
                best = j;
            }
            i += 1;
        }

        best
    }

    /// Catalog name of the propeller.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }

    /// Pitch scaled from the diameter by the table's pitch ratio.
    #[must_use]
    pub fn pitch(&self) -> Length {
        self.pitch
    }

    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Efficiency as a fraction of an ideal momentum disc.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Swept disc area.
    #[must_use]
    pub fn disc_area(&self) -> Area {
        let d = self.diameter.get::<meter>();
        Area::new::<square_meter>(PI * d * d / 4.0)
    }

    /// Maximum safe shaft speed for this diameter.
    #[must_use]
    pub fn speed_limit(&self) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(
            SPEED_LIMIT_RPM_INCHES / self.diameter.get::<inch>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::vtol::core::{
        error::UnknownPartError, test_support::apc_11x7,
    };

    #[test]
    fn fits_track_table_values() {
        let catalog = PartsCatalog::builtin();
        for name in catalog.propellers.names() {
            let data = catalog.propellers.get(name).unwrap();
            let prop = PropellerModel::new(name, data, Length::new::<inch>(11.0)).unwrap();

            for s in &data.samples {
                assert_relative_eq!(prop.ct(s.advance_ratio), s.ct, epsilon = 1e-3);
                assert_relative_eq!(prop.cp(s.advance_ratio), s.cp, epsilon = 1e-3);
                assert_relative_eq!(prop.eta(s.advance_ratio), s.eta, epsilon = 2.5e-3);
            }
        }
    }

    #[test]
    fn domain_comes_from_first_and_last_rows() {
        let prop = apc_11x7();

        assert_relative_eq!(prop.j_min(), 0.0);
        assert_relative_eq!(prop.j_max(), 0.76);
        assert_relative_eq!(prop.clamp_advance_ratio(-0.2), 0.0);
        assert_relative_eq!(prop.clamp_advance_ratio(0.9), 0.76);
        assert_relative_eq!(prop.clamp_advance_ratio(0.3), 0.3);
    }

    #[test]
    fn best_eta_threshold_is_eta_at_j_min() {
        let prop = apc_11x7();

        // Compared against the efficiency at `j_min`, so the last step
        // below the top of the table wins.
        assert_relative_eq!(prop.find_best_eta(0.01), 0.75, epsilon = 1e-9);
        assert_relative_eq!(prop.find_best_eta(0.2), 0.6, epsilon = 1e-9);

        for step in [0.003, 0.01, 0.05, 0.2, 1.0] {
            let j = prop.find_best_eta(step);
            assert!(
                (prop.j_min()..=prop.j_max()).contains(&j),
                "step {step} gave {j}"
            );
        }
        assert_relative_eq!(prop.find_best_eta(0.0), prop.j_min());
        assert_relative_eq!(prop.find_best_eta(-0.1), prop.j_min());
    }

    #[test]
    fn tiny_step_is_coarsened() {
        let prop = apc_11x7();

        // 7.6e9 samples at this step; the scan caps at 1e6 and still finishes.
        let j = prop.find_best_eta(1e-10);
        assert!((prop.j_min()..prop.j_max()).contains(&j), "{j}");
        assert_relative_eq!(j, 0.76, epsilon = 1e-5);
    }

    #[test]
    fn geometry() {
        let prop = apc_11x7();

        assert_eq!(prop.model(), "APC11x7");
        assert_relative_eq!(prop.diameter().get::<inch>(), 11.0, epsilon = 1e-12);
        assert_relative_eq!(prop.pitch().get::<inch>(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(prop.efficiency(), 0.65);
        assert_relative_eq!(
            prop.disc_area().get::<square_meter>(),
            PI * 0.2794 * 0.2794 / 4.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            prop.speed_limit().get::<revolution_per_minute>(),
            145_000.0 / 11.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn short_tables_fail_to_fit() {
        let mut data = PartsCatalog::builtin()
            .propellers
            .get("APC11x7")
            .unwrap()
            .clone();
        data.samples.truncate(8);

        let err = PropellerModel::new("short", &data, Length::new::<inch>(11.0)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::CurveFit {
                model: "short".into(),
                source: FitError::TooFewSamples {
                    samples: 8,
                    order: ETA_ORDER
                },
            }
        );

        data.samples.clear();
        assert!(PropellerModel::new("empty", &data, Length::new::<inch>(11.0)).is_err());
    }

    #[test]
    fn unknown_propeller() {
        let err = PropellerModel::from_catalog(
            PartsCatalog::builtin(),
            "APC9x6",
            Length::new::<inch>(9.0),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PerformanceError::UnknownPart(UnknownPartError { ref name, .. }) if name == "APC9x6"
        ));
    }
}
