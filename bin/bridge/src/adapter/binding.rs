use hap::Value;
use hyunho::Token;

use super::{Bands, Slot};

/// How a characteristic maps onto the control server.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// Always reports the same value, writes are ignored.
    Fixed(Value),
    Switch(Switch),
    Speed(Speed),
    Temperature(Temperature),
    Trigger(Trigger),
    Sensor(Sensor),
    Remote(Remote),
}

/// Which tokens read back as active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reads {
    Is(Token),
    IsNot(Token),
}

impl Reads {
    pub fn active(&self, token: Token) -> bool {
        match self {
            Reads::Is(expected) => token == *expected,
            Reads::IsNot(expected) => token != *expected,
        }
    }
}

/// Two state attribute backed by a token on the server. Writes are skipped
/// when the remembered token already matches.
#[derive(Clone, Debug, PartialEq)]
pub struct Switch {
    pub slot: Slot,
    pub get: &'static str,
    pub set: &'static str,
    /// Query key carrying the token, `None` when the path alone is the command.
    pub key: Option<&'static str>,
    pub on: Token,
    pub off: Token,
    pub reads: Reads,
}

impl Switch {
    /// `on`/`off` attribute reading active on `on`.
    pub fn on_off(
        slot: Slot,
        get: &'static str,
        set: &'static str,
        key: &'static str,
    ) -> Switch {
        Switch {
            slot,
            get,
            set,
            key: Some(key),
            on: Token::On,
            off: Token::Off,
            reads: Reads::Is(Token::On),
        }
    }

    pub fn token(&self, active: bool) -> Token {
        if active {
            self.on
        } else {
            self.off
        }
    }

    /// Per fixture switches carry the fixture number on every request.
    pub fn fixture(&self) -> Option<usize> {
        match self.slot {
            Slot::Fixture(index) => Some(index),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Speed {
    pub slot: Slot,
    pub get: &'static str,
    pub set: &'static str,
    pub key: &'static str,
    pub bands: Bands,
}

/// Shape of a temperature body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Number,
    Field(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Temperature {
    pub get: &'static str,
    pub body: Body,
    /// Path and query key for writable temperatures.
    pub set: Option<(&'static str, &'static str)>,
}

/// Momentary command, only a write of `true` fires it.
#[derive(Clone, Debug, PartialEq)]
pub struct Trigger {
    pub set: &'static str,
}

/// Read only boolean state.
#[derive(Clone, Debug, PartialEq)]
pub struct Sensor {
    pub get: &'static str,
}

/// Fire and forget key press with no readable state. Every write is sent.
#[derive(Clone, Debug, PartialEq)]
pub struct Remote {
    pub slot: Slot,
    pub set: &'static str,
    pub key: &'static str,
    pub on: u8,
    pub off: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads() {
        assert!(Reads::Is(Token::On).active(Token::On));
        assert!(!Reads::Is(Token::On).active(Token::Out));
        assert!(Reads::IsNot(Token::Off).active(Token::Out));
        assert!(Reads::IsNot(Token::Off).active(Token::Low));
        assert!(!Reads::IsNot(Token::Off).active(Token::Off));
    }

    #[test]
    fn test_fixture() {
        let switch = Switch::on_off(
            Slot::Fixture(2),
            "light/power/get",
            "light/power/set",
            "state",
        );
        assert_eq!(switch.fixture(), Some(2));
        assert_eq!(switch.token(true), Token::On);

        let switch = Switch::on_off(
            Slot::Power,
            "aircon/power/get",
            "aircon/power/set",
            "state",
        );
        assert_eq!(switch.fixture(), None);
        assert_eq!(switch.token(false), Token::Off);
    }
}
