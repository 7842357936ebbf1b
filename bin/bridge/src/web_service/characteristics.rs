use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hap::{HapStatus, Value};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ServiceError, SharedBridge};
use crate::Error;

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    /// Comma separated `aid.iid` pairs.
    id: String,
}

#[derive(Debug, Deserialize)]
pub struct WriteRequest {
    characteristics: Vec<WriteItem>,
}

#[derive(Debug, Deserialize)]
pub struct WriteItem {
    aid: u64,
    iid: u64,
    value: Option<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Outcome {
    aid: u64,
    iid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<i32>,
}

fn parse_ids(ids: &str) -> Result<Vec<(u64, u64)>, Error> {
    ids.split(',')
        .map(|id| {
            id.trim()
                .split_once('.')
                .and_then(|(aid, iid)| Some((aid.parse().ok()?, iid.parse().ok()?)))
                .ok_or_else(|| Error::InvalidCharacteristicId(id.to_string()))
        })
        .collect()
}

pub async fn read(
    State(bridge): State<SharedBridge>,
    Query(query): Query<ReadQuery>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let ids = parse_ids(&query.id)?;
    debug!("read {:?}", ids);

    let mut bridge = bridge.lock().await;
    let mut outcomes = vec![];
    let mut failed = false;

    for (aid, iid) in ids {
        let result = match bridge.accessory_by_aid_mut(aid) {
            Some(accessory) => accessory.read(iid).await,
            None => Err(HapStatus::ResourceDoesNotExist),
        };

        outcomes.push(match result {
            Ok(value) => Outcome {
                aid,
                iid,
                value: Some(value),
                status: None,
            },
            Err(status) => {
                failed = true;
                Outcome {
                    aid,
                    iid,
                    value: None,
                    status: Some(status.code()),
                }
            }
        });
    }

    let status = if failed {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(serde_json::json!({ "characteristics": outcomes })),
    ))
}

pub async fn write(
    State(bridge): State<SharedBridge>,
    Json(request): Json<WriteRequest>,
) -> Response {
    let mut bridge = bridge.lock().await;
    let mut outcomes = vec![];
    let mut failed = false;

    for item in request.characteristics {
        let Some(value) = item.value else {
            outcomes.push(Outcome {
                aid: item.aid,
                iid: item.iid,
                value: None,
                status: Some(0),
            });
            continue;
        };

        let result = match bridge.accessory_by_aid_mut(item.aid) {
            Some(accessory) => accessory.write(item.iid, value).await,
            None => Err(HapStatus::ResourceDoesNotExist),
        };

        let status = match result {
            Ok(()) => 0,
            Err(status) => {
                failed = true;
                status.code()
            }
        };

        outcomes.push(Outcome {
            aid: item.aid,
            iid: item.iid,
            value: None,
            status: Some(status),
        });
    }

    if failed {
        (
            StatusCode::MULTI_STATUS,
            Json(serde_json::json!({ "characteristics": outcomes })),
        )
            .into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
