use hap::{CharacteristicType, ServiceType};
use hyunho::Token;

use super::{Binding, Capability, Profile, Reads, ServiceProfile, Slot, Snapshot, Switch};

pub const MODEL: &str = "Cook";

/// Gas range valve. It can only be locked remotely, so any write targets
/// `off` and is sent only while the valve is known to be open.
pub fn profile(name: &str) -> Profile {
    let service = ServiceProfile::new(ServiceType::Outlet, name).with(Capability::new(
        CharacteristicType::On,
        Binding::Switch(Switch {
            slot: Slot::Power,
            get: "cook/power/get",
            set: "cook/power/lock",
            key: None,
            on: Token::Off,
            off: Token::Off,
            reads: Reads::Is(Token::On),
        }),
    ));

    Profile {
        model: MODEL,
        scope: vec![],
        snapshot: Snapshot::default(),
        services: vec![service],
    }
}
