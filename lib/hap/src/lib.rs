mod accessory;
pub use accessory::{Accessory, Handler, HandlerKey, HapStatus};

mod bridge;
pub use bridge::{generate_uuid, Bridge, CachedAccessory, Platform};

mod error;
pub use error::Error;

mod service;
pub use service::{Characteristic, CharacteristicType, Service, ServiceType};

mod value;
pub use value::{Format, Props, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub use uuid::Uuid;

pub mod current_heater_cooler_state {
    pub const INACTIVE: i32 = 0;
    pub const IDLE: i32 = 1;
    pub const HEATING: i32 = 2;
    pub const COOLING: i32 = 3;
}

pub mod target_heater_cooler_state {
    pub const AUTO: i32 = 0;
    pub const HEAT: i32 = 1;
    pub const COOL: i32 = 2;
}
