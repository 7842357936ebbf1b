use hap::{CharacteristicType, ServiceType};

use super::{Binding, Capability, Profile, ServiceProfile, Slot, Snapshot, Switch};

pub const MODEL: &str = "LightAll";

/// Every light in the home at once.
pub fn profile(name: &str) -> Profile {
    let service = ServiceProfile::new(ServiceType::Switch, name).with(Capability::new(
        CharacteristicType::On,
        Binding::Switch(Switch::on_off(
            Slot::Power,
            "lightall/power/get",
            "lightall/power/set",
            "state",
        )),
    ));

    Profile {
        model: MODEL,
        scope: vec![],
        snapshot: Snapshot::default(),
        services: vec![service],
    }
}
