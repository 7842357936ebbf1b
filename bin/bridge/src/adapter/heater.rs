use hap::{
    current_heater_cooler_state, target_heater_cooler_state, CharacteristicType, Props,
    ServiceType, Value,
};
use hyunho::{Room, Token};

use super::{
    Binding, Body, Capability, Profile, Reads, ServiceProfile, Slot, Snapshot, Switch,
    Temperature,
};

pub const MODEL: &str = "Heater";

/// Floor heating. Power reads `on`, `off` or `out`; going out (away mode) is
/// exposed as the swing toggle.
pub fn profile(name: &str, room: Room) -> Profile {
    let service = ServiceProfile::new(ServiceType::HeaterCooler, name)
        .with(Capability::new(
            CharacteristicType::Active,
            Binding::Switch(Switch {
                reads: Reads::IsNot(Token::Off),
                ..Switch::on_off(Slot::Power, "heat/power/get", "heat/power/set", "state")
            }),
        ))
        .with(
            Capability::new(
                CharacteristicType::CurrentHeaterCoolerState,
                Binding::Fixed(Value::Int(current_heater_cooler_state::HEATING)),
            )
            .props(Props::valid_values(&[current_heater_cooler_state::HEATING])),
        )
        .with(
            Capability::new(
                CharacteristicType::TargetHeaterCoolerState,
                Binding::Fixed(Value::Int(target_heater_cooler_state::HEAT)),
            )
            .props(Props::valid_values(&[target_heater_cooler_state::HEAT])),
        )
        .with(
            Capability::new(
                CharacteristicType::CurrentTemperature,
                Binding::Temperature(Temperature {
                    get: "heat/current_temp/get",
                    body: Body::Number,
                    set: None,
                }),
            )
            .props(Props::range(0.0, 100.0, 1.0)),
        )
        .with(
            Capability::new(
                CharacteristicType::HeatingThresholdTemperature,
                Binding::Temperature(Temperature {
                    get: "heat/target_temp/get",
                    body: Body::Number,
                    set: Some(("heat/target_temp/set", "state")),
                }),
            )
            .props(Props::range(5.0, 40.0, 1.0)),
        )
        .with(Capability::new(
            CharacteristicType::SwingMode,
            Binding::Switch(Switch {
                on: Token::Out,
                reads: Reads::Is(Token::Out),
                ..Switch::on_off(Slot::OutMode, "heat/power/get", "heat/power/set", "state")
            }),
        ));

    Profile {
        model: MODEL,
        scope: vec![("room_name", room.to_string())],
        snapshot: Snapshot::default(),
        services: vec![service],
    }
}
