use serde::{Deserialize, Serialize};
use token_derive::Token;

/// Every value the control server speaks for switch-like and fan-like
/// attributes. Power attributes use `on`/`off` (heaters also `out`), fan
/// attributes use the speed tiers.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, Token, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    On,
    Off,
    Out,
    Low,
    Mid,
    High,
    Auto,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Token, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    Master,
    Living,
    Kitchen,
    Guest,
}

impl Room {
    /// Number of independently switchable ceiling lights wired in the room.
    pub const fn fixture_count(&self) -> usize {
        match self {
            Room::Master => 2,
            Room::Living => 3,
            Room::Kitchen => 2,
            Room::Guest => 4,
        }
    }
}
