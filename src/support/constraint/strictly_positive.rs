use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Used for quantities the models divide by or take roots of: motor kV,
/// cell and motor counts, diameters, spans and masses.
///
/// # Examples
///
/// ```
/// use vtol_models::support::constraint::StrictlyPositive;
///
/// let kv = StrictlyPositive::new(400.0).unwrap();
/// assert_eq!(kv.into_inner(), 400.0);
///
/// assert!(StrictlyPositive::new(0_u32).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Mass, mass::kilogram};

    #[test]
    fn counts() {
        let series = Constrained::<u32, StrictlyPositive>::new(12).unwrap();
        assert_eq!(series.get(), 12);

        assert_eq!(StrictlyPositive::new(0_u32), Err(ConstraintError::Zero));
    }

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(0.1).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-5.0), Err(ConstraintError::Negative));
        assert!(StrictlyPositive::new(f64::NAN).is_err());
    }

    #[test]
    fn masses() {
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(0.095)).is_ok());
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(0.0)).is_err());
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(-1.0)).is_err());
    }
}
