//! Read-only parts catalogs.
//!
//! A catalog maps a part name to its parameter record. Catalogs are built
//! once and injected into model constructors by reference; nothing in the
//! models mutates them.

mod cells;
mod motors;
mod propellers;

use std::{collections::BTreeMap, sync::LazyLock};

use super::{
    battery::CellSpec,
    error::{PartKind, UnknownPartError},
    motor::MotorSpec,
    propeller::PropellerData,
};

/// An immutable mapping from part name to parameter record.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    kind: PartKind,
    entries: BTreeMap<String, T>,
}

impl<T> Catalog<T> {
    /// Creates a catalog of the given part kind.
    pub fn new<N: Into<String>>(kind: PartKind, entries: impl IntoIterator<Item = (N, T)>) -> Self {
        Self {
            kind,
            entries: entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        }
    }

    /// Looks up a part by name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownPartError`] listing the available names if `name`
    /// is not in the catalog.
    pub fn get(&self, name: &str) -> Result<&T, UnknownPartError> {
        self.entries.get(name).ok_or_else(|| UnknownPartError {
            kind: self.kind,
            name: name.to_string(),
            choices: self.names().map(str::to_string).collect(),
        })
    }

    /// Returns the part names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the kind of part this catalog holds.
    #[must_use]
    pub fn kind(&self) -> PartKind {
        self.kind
    }
}

/// Propeller, motor and battery cell catalogs.
#[derive(Debug, Clone)]
pub struct PartsCatalog {
    pub propellers: Catalog<PropellerData>,
    pub motors: Catalog<MotorSpec>,
    pub cells: Catalog<CellSpec>,
}

static BUILTIN: LazyLock<PartsCatalog> = LazyLock::new(|| PartsCatalog {
    propellers: Catalog::new(PartKind::Propeller, propellers::entries()),
    motors: Catalog::new(PartKind::Motor, motors::entries()),
    cells: Catalog::new(PartKind::BatteryCell, cells::entries()),
});

impl PartsCatalog {
    /// Returns the built-in catalog, built on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::mass::kilogram;

    #[test]
    fn builtin_parts_are_present() {
        let catalog = PartsCatalog::builtin();

        assert_eq!(
            catalog.propellers.names().collect::<Vec<_>>(),
            ["APC11x7", "APC13x8"]
        );
        assert_eq!(
            catalog.motors.names().collect::<Vec<_>>(),
            ["MT3520-11-400kV", "U5-400"]
        );
        assert_eq!(
            catalog.cells.names().collect::<Vec<_>>(),
            ["5Ah_6S_Nanotech", "NCR18650GA"]
        );
    }

    #[test]
    fn propeller_tables_share_reference_geometry() {
        for name in PartsCatalog::builtin().propellers.names() {
            let data = PartsCatalog::builtin().propellers.get(name).unwrap();

            assert_eq!(data.pitch_ratio, 7.0 / 11.0, "{name}");
            assert_eq!(data.mass.get::<kilogram>(), 0.025, "{name}");
            assert_eq!(data.efficiency, 0.65, "{name}");
        }
    }

    #[test]
    fn unknown_part_lists_choices() {
        let err = PartsCatalog::builtin().motors.get("U8-100").unwrap_err();

        assert_eq!(err.kind, PartKind::Motor);
        assert_eq!(err.name, "U8-100");
        assert_eq!(err.choices, ["MT3520-11-400kV", "U5-400"]);
        assert_eq!(
            err.to_string(),
            r#"unknown motor type `U8-100`, choices are ["MT3520-11-400kV", "U5-400"]"#
        );
    }
}
