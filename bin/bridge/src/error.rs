use std::fmt;

#[derive(Debug)]
pub enum Error {
    Hap(hap::Error),
    Hyunho(hyunho::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    UnknownDeviceType(String),
    MissingRoom(String),
    UnknownRoom(String),
    InvalidCharacteristicId(String),
}

impl From<hap::Error> for Error {
    fn from(err: hap::Error) -> Self {
        Self::Hap(err)
    }
}

impl From<hyunho::Error> for Error {
    fn from(err: hyunho::Error) -> Self {
        Self::Hyunho(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hap(err) => write!(f, "bridge error: {err}"),
            Self::Hyunho(err) => write!(f, "control server error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::UnknownDeviceType(device_type) => write!(f, "unknown device type {device_type}"),
            Self::MissingRoom(name) => write!(f, "{name} needs a roomName"),
            Self::UnknownRoom(room) => write!(f, "unknown room {room}"),
            Self::InvalidCharacteristicId(id) => write!(f, "invalid characteristic id {id}"),
        }
    }
}

impl std::error::Error for Error {}
