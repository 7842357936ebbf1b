use hap::{CharacteristicType, ServiceType};

use super::{Binding, Capability, Profile, Sensor, ServiceProfile, Snapshot, Trigger};

pub const MODEL: &str = "Elevator";

/// Call button plus an arrival sensor.
pub fn profile(name: &str) -> Profile {
    let call = ServiceProfile::new(ServiceType::Switch, name).with(Capability::new(
        CharacteristicType::On,
        Binding::Trigger(Trigger {
            set: "elevator/call",
        }),
    ));

    let arrived = ServiceProfile::new(ServiceType::OccupancySensor, name).with(Capability::new(
        CharacteristicType::OccupancyDetected,
        Binding::Sensor(Sensor {
            get: "elevator/arrived",
        }),
    ));

    Profile {
        model: MODEL,
        scope: vec![],
        snapshot: Snapshot::default(),
        services: vec![call, arrived],
    }
}
