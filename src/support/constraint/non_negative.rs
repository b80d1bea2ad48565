use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// Resistances, zero-load currents, payload masses and hover times may all
/// legitimately be zero, but never negative.
///
/// # Examples
///
/// ```
/// use vtol_models::support::constraint::NonNegative;
///
/// assert!(NonNegative::new(0.0).is_ok());
/// assert!(NonNegative::new(0.032).is_ok());
/// assert!(NonNegative::new(-0.05).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{electrical_resistance::ohm, f64::ElectricalResistance};

    #[test]
    fn resistances() {
        assert!(NonNegative::new(ElectricalResistance::new::<ohm>(0.0)).is_ok());
        assert!(NonNegative::new(ElectricalResistance::new::<ohm>(0.116)).is_ok());
        assert_eq!(
            NonNegative::new(ElectricalResistance::new::<ohm>(-0.01)),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }
}
