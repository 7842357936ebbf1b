use hap::{
    current_heater_cooler_state, target_heater_cooler_state, CharacteristicType, Props,
    ServiceType, Value,
};
use hyunho::{Room, Token};

use super::{
    Bands, Binding, Body, Capability, Closed, Profile, ServiceProfile, Slot, Snapshot, Speed,
    Switch, Temperature,
};

pub const MODEL: &str = "Heater Cooler";

/// `floor(speed / 25)` tiers, 100 still counts as high.
pub const ROTATION_SPEED: Bands = Bands::new(
    0.0,
    Closed::Lower,
    &[
        (25.0, Token::Auto),
        (50.0, Token::Low),
        (75.0, Token::Mid),
        (100.0, Token::High),
    ],
    &[
        (Token::Auto, 0.0),
        (Token::Low, 25.0),
        (Token::Mid, 50.0),
        (Token::High, 75.0),
    ],
);

/// Air conditioner driven through the thermostat style endpoints: target
/// temperature comes back as `{"temperature": n}` and every write uses its
/// attribute name as the query key.
pub fn profile(name: &str, room: Room) -> Profile {
    let service = ServiceProfile::new(ServiceType::HeaterCooler, name)
        .with(Capability::new(
            CharacteristicType::Active,
            Binding::Switch(Switch::on_off(
                Slot::Power,
                "aircon/power/get",
                "aircon/power/set",
                "state",
            )),
        ))
        .with(
            Capability::new(
                CharacteristicType::CurrentHeaterCoolerState,
                Binding::Fixed(Value::Int(current_heater_cooler_state::COOLING)),
            )
            .props(Props::valid_values(&[current_heater_cooler_state::COOLING])),
        )
        .with(
            Capability::new(
                CharacteristicType::TargetHeaterCoolerState,
                Binding::Fixed(Value::Int(target_heater_cooler_state::COOL)),
            )
            .props(Props::valid_values(&[target_heater_cooler_state::COOL])),
        )
        .with(
            Capability::new(
                CharacteristicType::CurrentTemperature,
                Binding::Temperature(Temperature {
                    get: "aircon/current_temp/get",
                    body: Body::Number,
                    set: None,
                }),
            )
            .props(Props::range(0.0, 100.0, 0.1)),
        )
        .with(
            Capability::new(
                CharacteristicType::CoolingThresholdTemperature,
                Binding::Temperature(Temperature {
                    get: "aircon/target_temp/get",
                    body: Body::Field("temperature"),
                    set: Some(("aircon/target_temp/set", "temp")),
                }),
            )
            .props(Props::range(18.0, 30.0, 1.0)),
        )
        .with(Capability::new(
            CharacteristicType::SwingMode,
            Binding::Switch(Switch::on_off(
                Slot::SwingVertical,
                "aircon/wind_updown/get",
                "aircon/wind_updown/set",
                "wind_updown",
            )),
        ))
        .with(
            Capability::new(
                CharacteristicType::RotationSpeed,
                Binding::Speed(Speed {
                    slot: Slot::FanSpeed,
                    get: "aircon/wind_power/get",
                    set: "aircon/wind_power/set",
                    key: "wind_power",
                    bands: ROTATION_SPEED,
                }),
            )
            .props(Props::range(0.0, 100.0, 1.0)),
        );

    Profile {
        model: MODEL,
        scope: vec![("room_name", room.to_string())],
        snapshot: Snapshot::default(),
        services: vec![service],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::testing::expect;
    use crate::adapter::{Adapter, Reading, Write};
    use hyunho::{MockTransport, Response};
    use serde_json::json;

    fn adapter(transport: MockTransport) -> Adapter {
        Adapter::new(
            "Thermostat",
            Arc::new(transport),
            profile("Thermostat", Room::Kitchen),
        )
    }

    #[tokio::test]
    async fn test_target_temperature_body() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/target_temp/get?room_name=kitchen",
            1,
            Response::ok(json!({ "temperature": 23 })),
        );
        expect(
            &mut transport,
            "aircon/target_temp/set?room_name=kitchen&temp=25",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let target = adapter.keys(CharacteristicType::CoolingThresholdTemperature)[0];

        assert_eq!(adapter.get(target).await, Reading::Device(Value::Float(23.0)));
        assert!(matches!(
            adapter.set(target, Value::Float(25.0)).await,
            Write::Sent(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_temperature_field() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/target_temp/get?room_name=kitchen",
            1,
            Response::ok(json!({ "temp": 23 })),
        );

        let mut adapter = adapter(transport);
        let target = adapter.keys(CharacteristicType::CoolingThresholdTemperature)[0];

        assert_eq!(adapter.get(target).await, Reading::Fallback(Value::Float(18.0)));
    }

    #[tokio::test]
    async fn test_rotation_speed() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/wind_power/get?room_name=kitchen",
            1,
            Response::ok(json!("low")),
        );
        expect(
            &mut transport,
            "aircon/wind_power/set?room_name=kitchen&wind_power=high",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let speed = adapter.keys(CharacteristicType::RotationSpeed)[0];

        assert_eq!(adapter.get(speed).await, Reading::Device(Value::Float(25.0)));
        assert_eq!(adapter.set(speed, Value::Float(30.0)).await, Write::Unchanged);
        assert!(matches!(
            adapter.set(speed, Value::Float(100.0)).await,
            Write::Sent(_)
        ));
        assert_eq!(
            adapter.set(speed, Value::Float(120.0)).await,
            Write::Invalid(Value::Float(120.0))
        );
    }

    #[tokio::test]
    async fn test_swing() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/wind_updown/set?room_name=kitchen&wind_updown=on",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let swing = adapter.keys(CharacteristicType::SwingMode)[0];

        assert!(matches!(
            adapter.set(swing, Value::Int(1)).await,
            Write::Sent(_)
        ));
        assert_eq!(adapter.snapshot().swing_vertical, Token::On);
    }
}
