use hap::{CharacteristicType, Props, ServiceType};
use hyunho::Token;

use super::{
    Bands, Binding, Capability, Closed, Profile, Reads, ServiceProfile, Slot, Snapshot, Speed,
    Switch,
};

pub const MODEL: &str = "Fan";

/// 0 is left to the active toggle, which HomeKit sends alongside.
pub const ROTATION_SPEED: Bands = Bands::new(
    0.0,
    Closed::Upper,
    &[(30.0, Token::Low), (60.0, Token::Mid), (100.0, Token::High)],
    &[
        (Token::Off, 0.0),
        (Token::Low, 30.0),
        (Token::Mid, 60.0),
        (Token::High, 100.0),
    ],
)
.no_change_at(0.0);

/// Ventilation fan. Power and speed share one `fan/power` attribute, the
/// bypass damper is exposed as the swing toggle.
pub fn profile(name: &str) -> Profile {
    let service = ServiceProfile::new(ServiceType::Fanv2, name)
        .with(Capability::new(
            CharacteristicType::Active,
            Binding::Switch(Switch {
                on: Token::High,
                reads: Reads::IsNot(Token::Off),
                ..Switch::on_off(Slot::Power, "fan/power/get", "fan/power/set", "power")
            }),
        ))
        .with(Capability::new(
            CharacteristicType::SwingMode,
            Binding::Switch(Switch::on_off(
                Slot::Bypass,
                "fan/bipass/get",
                "fan/bipass/set",
                "bipass",
            )),
        ))
        .with(
            Capability::new(
                CharacteristicType::RotationSpeed,
                Binding::Speed(Speed {
                    slot: Slot::Power,
                    get: "fan/power/get",
                    set: "fan/power/set",
                    key: "power",
                    bands: ROTATION_SPEED,
                }),
            )
            .props(Props::range(0.0, 100.0, 10.0)),
        );

    Profile {
        model: MODEL,
        scope: vec![],
        snapshot: Snapshot::default(),
        services: vec![service],
    }
}
