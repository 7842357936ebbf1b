mod client;
pub use client::{Client, Error, Response, Transport};

#[cfg(feature = "mock")]
pub use client::MockTransport;

mod endpoint;
pub use endpoint::Endpoint;

mod token;
pub use token::{Room, Token};

pub type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
