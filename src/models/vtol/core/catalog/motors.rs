use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{ElectricCurrent, ElectricPotential, ElectricalResistance, Mass},
    mass::kilogram,
};

use crate::models::vtol::core::motor::MotorSpec;

pub(super) fn entries() -> Vec<(&'static str, MotorSpec)> {
    vec![
        // T-motor MT3520-11 400kV with YPG HV 14S ESC.
        (
            "MT3520-11-400kV",
            MotorSpec {
                efficiency: 0.85,
                supply_resistance: ElectricalResistance::new::<ohm>(0.05),
                i0_current: ElectricCurrent::new::<ampere>(1.2),
                i0_voltage: ElectricPotential::new::<volt>(10.0),
                kv: 400.0,
                armature_resistance: ElectricalResistance::new::<ohm>(0.032),
                mass: Mass::new::<kilogram>(0.205),
                esc_mass: Mass::new::<kilogram>(0.170),
                current_limit: ElectricCurrent::new::<ampere>(38.0),
            },
        ),
        // T-motor U5-KV400 with Castle Creations Phoenix Edge HV 40A ESC.
        (
            "U5-400",
            MotorSpec {
                efficiency: 0.85,
                supply_resistance: ElectricalResistance::new::<ohm>(0.05),
                i0_current: ElectricCurrent::new::<ampere>(0.3),
                i0_voltage: ElectricPotential::new::<volt>(10.0),
                kv: 400.0,
                armature_resistance: ElectricalResistance::new::<ohm>(0.116),
                mass: Mass::new::<kilogram>(0.195),
                esc_mass: Mass::new::<kilogram>(0.031),
                current_limit: ElectricCurrent::new::<ampere>(30.0),
            },
        ),
    ]
}
