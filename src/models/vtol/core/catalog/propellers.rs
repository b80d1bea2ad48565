//! Coefficient tables for the built-in propellers.
//!
//! Rows are `[J, CT, CP, ETA]` in ascending advance ratio, where
//! `CT = T / (ρ·n²·D⁴)` and `CP = P / (ρ·n³·D⁵)`.
//!
//! The tables are hand-authored approximations shaped after published APC
//! thin-electric curves, not measured wind-tunnel data. Every table shares
//! the pitch ratio and mass of the 11x7 reference propeller, so a table
//! sets only the curve shape and the diameter is chosen per mission.

use uom::si::{f64::Mass, mass::kilogram};

use crate::models::vtol::core::propeller::{PropellerData, PropellerSample};

/// Pitch-to-diameter ratio of the propeller the tables describe.
const DATA_PITCH_RATIO: f64 = 7.0 / 11.0;
const PROPELLER_MASS_KG: f64 = 0.025;
const MOMENTUM_DISC_EFFICIENCY: f64 = 0.65;

const APC_11X7: [[f64; 4]; 20] = [
    [0.00, 0.1100, 0.0500, 0.0000],
    [0.04, 0.1093, 0.0505, 0.0866],
    [0.08, 0.1077, 0.0505, 0.1706],
    [0.12, 0.1053, 0.0502, 0.2517],
    [0.16, 0.1024, 0.0496, 0.3303],
    [0.20, 0.0992, 0.0490, 0.4049],
    [0.24, 0.0959, 0.0483, 0.4765],
    [0.28, 0.0922, 0.0475, 0.5435],
    [0.32, 0.0876, 0.0462, 0.6068],
    [0.36, 0.0822, 0.0446, 0.6635],
    [0.40, 0.0761, 0.0427, 0.7129],
    [0.44, 0.0698, 0.0407, 0.7546],
    [0.48, 0.0634, 0.0386, 0.7884],
    [0.52, 0.0566, 0.0364, 0.8086],
    [0.56, 0.0490, 0.0338, 0.8118],
    [0.60, 0.0406, 0.0309, 0.7883],
    [0.64, 0.0315, 0.0276, 0.7304],
    [0.68, 0.0220, 0.0242, 0.6182],
    [0.72, 0.0124, 0.0208, 0.4292],
    [0.76, 0.0026, 0.0173, 0.1142],
];

const APC_13X8: [[f64; 4]; 19] = [
    [0.00, 0.1150, 0.0480, 0.0000],
    [0.04, 0.1138, 0.0486, 0.0937],
    [0.08, 0.1118, 0.0488, 0.1833],
    [0.12, 0.1091, 0.0487, 0.2688],
    [0.16, 0.1057, 0.0482, 0.3509],
    [0.20, 0.1021, 0.0477, 0.4281],
    [0.24, 0.0982, 0.0470, 0.5014],
    [0.28, 0.0939, 0.0460, 0.5716],
    [0.32, 0.0888, 0.0448, 0.6343],
    [0.36, 0.0829, 0.0431, 0.6924],
    [0.40, 0.0764, 0.0411, 0.7436],
    [0.44, 0.0696, 0.0390, 0.7852],
    [0.48, 0.0625, 0.0367, 0.8174],
    [0.52, 0.0550, 0.0343, 0.8338],
    [0.56, 0.0468, 0.0315, 0.8320],
    [0.60, 0.0377, 0.0283, 0.7993],
    [0.64, 0.0281, 0.0248, 0.7252],
    [0.68, 0.0180, 0.0211, 0.5801],
    [0.72, 0.0077, 0.0172, 0.3223],
];

fn samples(rows: &[[f64; 4]]) -> Vec<PropellerSample> {
    rows.iter()
        .map(|&[advance_ratio, ct, cp, eta]| PropellerSample {
            advance_ratio,
            ct,
            cp,
            eta,
        })
        .collect()
}

pub(super) fn entries() -> Vec<(&'static str, PropellerData)> {
    vec![
        (
            "APC11x7",
            PropellerData {
                pitch_ratio: DATA_PITCH_RATIO,
                mass: Mass::new::<kilogram>(PROPELLER_MASS_KG),
                efficiency: MOMENTUM_DISC_EFFICIENCY,
                samples: samples(&APC_11X7),
            },
        ),
        (
            "APC13x8",
            PropellerData {
                pitch_ratio: DATA_PITCH_RATIO,
                mass: Mass::new::<kilogram>(PROPELLER_MASS_KG),
                efficiency: MOMENTUM_DISC_EFFICIENCY,
                samples: samples(&APC_13X8),
            },
        ),
    ]
}
