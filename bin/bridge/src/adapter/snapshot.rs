use hyunho::Token;

/// Piece of device state an adapter remembers between calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Power,
    FanSpeed,
    SwingVertical,
    SwingHorizontal,
    OutMode,
    Bypass,
    Fixture(usize),
}

/// Last tokens an adapter read from or successfully wrote to the control
/// server. Owned by a single adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub power: Token,
    pub fan_speed: Token,
    pub swing_vertical: Token,
    pub swing_horizontal: Token,
    pub out_mode: Token,
    pub bypass: Token,
    pub fixtures: Vec<Token>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            power: Token::Off,
            fan_speed: Token::Auto,
            swing_vertical: Token::Off,
            swing_horizontal: Token::Off,
            out_mode: Token::Off,
            bypass: Token::Off,
            fixtures: vec![],
        }
    }
}

impl Snapshot {
    pub fn with_fixtures(count: usize) -> Snapshot {
        Snapshot {
            fixtures: vec![Token::Off; count],
            ..Snapshot::default()
        }
    }

    pub fn get(&self, slot: Slot) -> Option<Token> {
        match slot {
            Slot::Power => Some(self.power),
            Slot::FanSpeed => Some(self.fan_speed),
            Slot::SwingVertical => Some(self.swing_vertical),
            Slot::SwingHorizontal => Some(self.swing_horizontal),
            Slot::OutMode => Some(self.out_mode),
            Slot::Bypass => Some(self.bypass),
            Slot::Fixture(index) => self.fixtures.get(index).copied(),
        }
    }

    pub fn set(&mut self, slot: Slot, token: Token) {
        let target = match slot {
            Slot::Power => &mut self.power,
            Slot::FanSpeed => &mut self.fan_speed,
            Slot::SwingVertical => &mut self.swing_vertical,
            Slot::SwingHorizontal => &mut self.swing_horizontal,
            Slot::OutMode => &mut self.out_mode,
            Slot::Bypass => &mut self.bypass,
            Slot::Fixture(index) => match self.fixtures.get_mut(index) {
                Some(fixture) => fixture,
                None => return,
            },
        };

        *target = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let snapshot = Snapshot::with_fixtures(3);

        assert_eq!(snapshot.get(Slot::Power), Some(Token::Off));
        assert_eq!(snapshot.get(Slot::FanSpeed), Some(Token::Auto));
        assert_eq!(snapshot.get(Slot::Fixture(2)), Some(Token::Off));
        assert_eq!(snapshot.get(Slot::Fixture(3)), None);
    }

    #[test]
    fn test_set() {
        let mut snapshot = Snapshot::with_fixtures(2);

        snapshot.set(Slot::Fixture(1), Token::On);
        snapshot.set(Slot::Fixture(5), Token::On);
        snapshot.set(Slot::OutMode, Token::Out);

        assert_eq!(snapshot.fixtures, vec![Token::Off, Token::On]);
        assert_eq!(snapshot.out_mode, Token::Out);
        assert_eq!(snapshot.power, Token::Off);
    }
}
