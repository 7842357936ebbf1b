use hap::{
    current_heater_cooler_state, target_heater_cooler_state, CharacteristicType, Props,
    ServiceType, Value,
};
use hyunho::{Room, Token};

use super::{
    Bands, Binding, Body, Capability, Closed, Profile, ServiceProfile, Slot, Snapshot, Speed,
    Switch, Temperature,
};

pub const MODEL: &str = "Air Conditioner";

pub const ROTATION_SPEED: Bands = Bands::new(
    1.0,
    Closed::Upper,
    &[
        (1.0, Token::Auto),
        (34.0, Token::Low),
        (67.0, Token::Mid),
        (100.0, Token::High),
    ],
    &[
        (Token::Auto, 1.0),
        (Token::Low, 34.0),
        (Token::Mid, 67.0),
        (Token::High, 100.0),
    ],
);

/// A cooling only room air conditioner. With `horizontal_swing` the left/right
/// louver gets its own switch next to the up/down swing.
pub fn profile(name: &str, room: Room, horizontal_swing: bool) -> Profile {
    let mut services = vec![ServiceProfile::new(ServiceType::HeaterCooler, name)
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
                    body: Body::Number,
                    set: Some(("aircon/target_temp/set", "state")),
                }),
            )
            .props(Props::range(18.0, 30.0, 1.0)),
        )
        .with(Capability::new(
            CharacteristicType::SwingMode,
            Binding::Switch(Switch::on_off(
                Slot::SwingVertical,
                "aircon/wind_vertical/get",
                "aircon/wind_vertical/set",
                "state",
            )),
        ))
        .with(
            Capability::new(
                CharacteristicType::RotationSpeed,
                Binding::Speed(Speed {
                    slot: Slot::FanSpeed,
                    get: "aircon/wind_power/get",
                    set: "aircon/wind_power/set",
                    key: "state",
                    bands: ROTATION_SPEED,
                }),
            )
            .props(Props::range(1.0, 100.0, 33.0)),
        )];

    if horizontal_swing {
        services.push(
            ServiceProfile::new(ServiceType::Switch, format!("{name} Horizontal Swing"))
                .subtype("wind_horizontal")
                .with(Capability::new(
                    CharacteristicType::On,
                    Binding::Switch(Switch::on_off(
                        Slot::SwingHorizontal,
                        "aircon/wind_horizontal/get",
                        "aircon/wind_horizontal/set",
                        "state",
                    )),
                )),
        );
    }

    Profile {
        model: MODEL,
        scope: vec![("room_name", room.to_string())],
        snapshot: Snapshot::default(),
        services,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::testing::{expect, expect_error};
    use crate::adapter::{Adapter, Reading, Write};
    use hyunho::{MockTransport, Response};
    use serde_json::json;

    fn adapter(transport: MockTransport) -> Adapter {
        Adapter::new(
            "Living Aircon",
            Arc::new(transport),
            profile("Living Aircon", Room::Living, false),
        )
    }

    fn key(adapter: &Adapter, characteristic: CharacteristicType) -> usize {
        adapter.keys(characteristic)[0]
    }

    #[tokio::test]
    async fn test_active() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/power/get?room_name=living",
            1,
            Response::ok(json!("on")),
        );
        expect(
            &mut transport,
            "aircon/power/set?room_name=living&state=off",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let active = key(&adapter, CharacteristicType::Active);

        assert_eq!(adapter.get(active).await, Reading::Device(Value::Bool(true)));
        assert_eq!(adapter.set(active, Value::Bool(true)).await, Write::Unchanged);
        assert!(matches!(
            adapter.set(active, Value::Bool(false)).await,
            Write::Sent(_)
        ));
        assert_eq!(adapter.snapshot().power, Token::Off);
    }

    #[tokio::test]
    async fn test_rotation_speed() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/wind_power/get?room_name=living",
            1,
            Response::ok(json!("mid")),
        );
        expect(
            &mut transport,
            "aircon/wind_power/set?room_name=living&state=high",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let speed = key(&adapter, CharacteristicType::RotationSpeed);

        assert_eq!(adapter.get(speed).await, Reading::Device(Value::Float(67.0)));
        assert_eq!(adapter.set(speed, Value::Float(50.0)).await, Write::Unchanged);
        assert!(matches!(
            adapter.set(speed, Value::Float(80.0)).await,
            Write::Sent(_)
        ));
        assert_eq!(
            adapter.set(speed, Value::Float(0.0)).await,
            Write::Invalid(Value::Float(0.0))
        );
        assert_eq!(adapter.snapshot().fan_speed, Token::High);
    }

    #[tokio::test]
    async fn test_speed_within_the_same_tier_is_sent_once() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/wind_power/set?room_name=living&state=mid",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let speed = key(&adapter, CharacteristicType::RotationSpeed);

        assert!(matches!(
            adapter.set(speed, Value::Float(50.0)).await,
            Write::Sent(_)
        ));
        assert_eq!(adapter.set(speed, Value::Float(60.0)).await, Write::Unchanged);
        assert_eq!(adapter.snapshot().fan_speed, Token::Mid);
    }

    #[tokio::test]
    async fn test_power_set_against_server_error() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/power/set?room_name=living&state=on",
            1,
            Response::new(500, "internal error"),
        );

        let mut adapter = adapter(transport);
        let active = key(&adapter, CharacteristicType::Active);

        assert_eq!(adapter.set(active, Value::Int(1)).await, Write::Rejected(500));
        assert_eq!(adapter.snapshot().power, Token::Off);
    }

    #[tokio::test]
    async fn test_unknown_speed_reads_fallback() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/wind_power/get?room_name=living",
            1,
            Response::ok(json!("off")),
        );

        let mut adapter = adapter(transport);
        let speed = key(&adapter, CharacteristicType::RotationSpeed);

        assert_eq!(adapter.get(speed).await, Reading::Fallback(Value::Float(1.0)));
    }

    #[tokio::test]
    async fn test_temperatures() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/current_temp/get?room_name=living",
            1,
            Response::ok(json!(26.4)),
        );
        expect_error(&mut transport, "aircon/target_temp/get?room_name=living", 1);
        expect(
            &mut transport,
            "aircon/target_temp/set?room_name=living&state=24",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);
        let current = key(&adapter, CharacteristicType::CurrentTemperature);
        let target = key(&adapter, CharacteristicType::CoolingThresholdTemperature);

        assert_eq!(adapter.get(current).await, Reading::Device(Value::Float(26.4)));
        assert_eq!(adapter.get(target).await, Reading::Fallback(Value::Float(18.0)));
        assert!(matches!(
            adapter.set(target, Value::Int(24)).await,
            Write::Sent(_)
        ));
        assert_eq!(adapter.set(current, Value::Int(24)).await, Write::Ignored);
    }

    #[tokio::test]
    async fn test_fixed_states() {
        let mut adapter = adapter(MockTransport::new());
        let current = key(&adapter, CharacteristicType::CurrentHeaterCoolerState);
        let target = key(&adapter, CharacteristicType::TargetHeaterCoolerState);

        assert_eq!(
            adapter.get(current).await,
            Reading::Local(Value::Int(current_heater_cooler_state::COOLING))
        );
        assert_eq!(
            adapter.get(target).await,
            Reading::Local(Value::Int(target_heater_cooler_state::COOL))
        );
        assert_eq!(
            adapter
                .set(target, Value::Int(target_heater_cooler_state::HEAT))
                .await,
            Write::Ignored
        );
    }

    #[tokio::test]
    async fn test_horizontal_swing() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aircon/wind_horizontal/set?room_name=master&state=on",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = Adapter::new(
            "Master Aircon",
            Arc::new(transport),
            profile("Master Aircon", Room::Master, true),
        );

        let swings = adapter.keys(CharacteristicType::SwingMode);
        let on = adapter.keys(CharacteristicType::On);
        assert_eq!(swings.len(), 1);
        assert_eq!(on.len(), 1);

        assert!(matches!(
            adapter.set(on[0], Value::Bool(true)).await,
            Write::Sent(_)
        ));
        assert_eq!(adapter.snapshot().swing_horizontal, Token::On);
        assert_eq!(adapter.snapshot().swing_vertical, Token::Off);
    }

    #[test]
    fn test_horizontal_swing_is_optional() {
        assert_eq!(profile("Aircon", Room::Guest, false).services.len(), 1);

        let profile = profile("Aircon", Room::Guest, true);
        assert_eq!(profile.services.len(), 2);
        assert_eq!(profile.services[1].subtype.as_deref(), Some("wind_horizontal"));
    }
}
