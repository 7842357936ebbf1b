use std::path::Path;
use std::str::FromStr;

use hyunho::Room;
use serde::{Deserialize, Serialize};
use token_derive::Token;

use crate::{Error, Result};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_control_server")]
    pub control_server: String,
    #[serde(default)]
    pub accessories: Vec<AccessoryConfig>,
}

fn default_control_server() -> String {
    hyunho::DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let contents = std::fs::read(path)?;
        Ok(serde_json::from_slice(&contents)?)
    }
}

/// One configured accessory. Also stored as the accessory context so cached
/// accessories remember what they were created from.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default, alias = "room_name", skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default)]
    pub horizontal_swing: bool,
}

impl AccessoryConfig {
    pub fn device_type(&self) -> Result<DeviceType> {
        DeviceType::from_str(&self.device_type)
            .map_err(|_| Error::UnknownDeviceType(self.device_type.clone()))
    }

    pub fn room(&self) -> Result<Room> {
        let room = self
            .room_name
            .as_deref()
            .ok_or_else(|| Error::MissingRoom(self.name.clone()))?;

        Room::from_str(room).map_err(|_| Error::UnknownRoom(room.to_string()))
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Token, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DeviceType {
    AirConditioner,
    HeaterCooler,
    Heater,
    Fan,
    Light,
    LightAll,
    Cook,
    Elevator,
    InfraRed,
}
