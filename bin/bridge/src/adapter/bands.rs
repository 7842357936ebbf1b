use hyunho::Token;

/// Which end of each band is inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Closed {
    /// `(previous, upper]`, the first band also includes the floor.
    Upper,
    /// `[previous, upper)`, the last band also includes its upper bound.
    Lower,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tier {
    Speed(Token),
    NoChange,
}

/// Partition of a numeric rotation speed range into fan speed tiers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bands {
    floor: f32,
    closed: Closed,
    tiers: &'static [(f32, Token)],
    readings: &'static [(Token, f32)],
    no_change: Option<f32>,
}

impl Bands {
    /// `tiers` holds the upper bound of each band in ascending order,
    /// `readings` the value reported back for each tier.
    pub const fn new(
        floor: f32,
        closed: Closed,
        tiers: &'static [(f32, Token)],
        readings: &'static [(Token, f32)],
    ) -> Bands {
        Bands {
            floor,
            closed,
            tiers,
            readings,
            no_change: None,
        }
    }

    pub const fn no_change_at(mut self, speed: f32) -> Bands {
        self.no_change = Some(speed);
        self
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    pub fn ceiling(&self) -> f32 {
        self.tiers.last().map(|(upper, _)| *upper).unwrap_or(self.floor)
    }

    /// `None` when `speed` falls outside every band.
    pub fn tier(&self, speed: f32) -> Option<Tier> {
        if self.no_change == Some(speed) {
            return Some(Tier::NoChange);
        }

        if !speed.is_finite() || speed < self.floor {
            return None;
        }

        let last = self.tiers.len().checked_sub(1)?;

        self.tiers
            .iter()
            .enumerate()
            .find(|(index, (upper, _))| match self.closed {
                Closed::Upper => speed <= *upper,
                Closed::Lower => speed < *upper || (*index == last && speed <= *upper),
            })
            .map(|(_, (_, token))| Tier::Speed(*token))
    }

    pub fn reading(&self, token: Token) -> Option<f32> {
        self.readings
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, speed)| *speed)
    }
}
