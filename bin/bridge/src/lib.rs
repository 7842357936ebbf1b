pub mod adapter;

mod config;
pub use config::{AccessoryConfig, Config, DeviceType};

mod error;
pub use error::Error;

mod platform;
pub use platform::HyunhoPlatform;

pub mod web_service;

pub type Result<T> = std::result::Result<T, Error>;
pub type ErasedError = Box<dyn std::error::Error + Send + Sync + 'static>;
