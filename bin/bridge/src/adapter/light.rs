use hap::{CharacteristicType, ServiceType};
use hyunho::Room;

use super::{Binding, Capability, Profile, ServiceProfile, Slot, Snapshot, Switch};

pub const MODEL: &str = "Light";

/// One bulb per ceiling fixture of `room`, numbered from 0.
pub fn profile(name: &str, room: Room) -> Profile {
    let count = room.fixture_count();

    let services = (0..count)
        .map(|index| {
            let subtype = format!("Light {room} {index}");

            ServiceProfile::new(ServiceType::Lightbulb, format!("{name} {index}"))
                .subtype(subtype)
                .with(Capability::new(
                    CharacteristicType::On,
                    Binding::Switch(Switch::on_off(
                        Slot::Fixture(index),
                        "light/power/get",
                        "light/power/set",
                        "state",
                    )),
                ))
        })
        .collect();

    Profile {
        model: MODEL,
        scope: vec![("room_name", room.to_string())],
        snapshot: Snapshot::with_fixtures(count),
        services,
    }
}
