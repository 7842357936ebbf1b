use hap::{CharacteristicType, ServiceType};

use super::{Binding, Capability, Profile, Remote, ServiceProfile, Slot, Snapshot};

pub const MODEL: &str = "InfraRed";

/// Infrared blaster button pair named after the accessory. Key 0 turns the
/// target on, key 1 turns it off.
pub fn profile(name: &str) -> Profile {
    let service = ServiceProfile::new(ServiceType::Lightbulb, name).with(Capability::new(
        CharacteristicType::On,
        Binding::Remote(Remote {
            slot: Slot::Power,
            set: "aqara/click",
            key: "key_num",
            on: 0,
            off: 1,
        }),
    ));

    Profile {
        model: MODEL,
        scope: vec![("device_name", name.to_string())],
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
    use hap::Value;
    use hyunho::{MockTransport, Response, Token};
    use serde_json::json;

    #[tokio::test]
    async fn test_every_press_is_sent() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aqara/click?device_name=TV&key_num=0",
            2,
            Response::ok(json!("ok")),
        );
        expect(
            &mut transport,
            "aqara/click?device_name=TV&key_num=1",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = Adapter::new("TV", Arc::new(transport), profile("TV"));
        let on = adapter.keys(CharacteristicType::On)[0];

        assert_eq!(adapter.get(on).await, Reading::Local(Value::Bool(false)));
        assert!(matches!(adapter.set(on, Value::Bool(true)).await, Write::Sent(_)));
        assert!(matches!(adapter.set(on, Value::Bool(true)).await, Write::Sent(_)));
        assert_eq!(adapter.get(on).await, Reading::Local(Value::Bool(true)));
        assert!(matches!(adapter.set(on, Value::Bool(false)).await, Write::Sent(_)));
        assert_eq!(adapter.snapshot().power, Token::Off);
    }

    #[tokio::test]
    async fn test_rejected_press_keeps_state() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "aqara/click?device_name=TV&key_num=0",
            1,
            Response::new(404, "unknown device"),
        );

        let mut adapter = Adapter::new("TV", Arc::new(transport), profile("TV"));
        let on = adapter.keys(CharacteristicType::On)[0];

        assert_eq!(adapter.set(on, Value::Bool(true)).await, Write::Rejected(404));
        assert_eq!(adapter.get(on).await, Reading::Local(Value::Bool(false)));
    }
}
