mod accessories;
mod characteristics;

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use hap::Bridge;
use log::error;
use tokio::sync::Mutex;

use crate::Error;

/// Every request locks the whole bridge, so accessory handlers never run
/// concurrently.
pub type SharedBridge = Arc<Mutex<Bridge>>;

pub struct ServiceError(Error, uuid::Uuid);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response<Body> {
        error!("ServiceError[{}]: {}", self.1, self.0);

        let status = match self.0 {
            Error::InvalidCharacteristicId(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.0.to_string()).into_response()
    }
}

impl From<Error> for ServiceError {
    fn from(value: Error) -> Self {
        ServiceError(value, uuid::Uuid::new_v4())
    }
}

pub fn router(bridge: SharedBridge) -> Router {
    Router::new()
        .route("/accessories", get(accessories::accessories))
        .route(
            "/characteristics",
            get(characteristics::read).put(characteristics::write),
        )
        .with_state(bridge)
}
