//! Response envelopes for roster use-cases.
//!
//! # Responsibility
//! - Map service outcomes onto status codes and JSON bodies.
//! - Keep error wording stable for HTTP callers.
//!
//! # Invariants
//! - `MissingField` is a 400, `NotFound` on a mutation is a 404, and store
//!   failures are a 500.
//! - A lookup miss on list is a 200 carrying `{"msg": "not found"}`.

use log::error;
use roster_core::{Listing, Participant, ServiceError, ServiceResult};
use serde_json::{json, Value};

pub const MSG_CREATED: &str = "participant created";
pub const MSG_UPDATED: &str = "participant updated";
pub const MSG_PATCHED: &str = "participant partially updated";
pub const MSG_DELETED: &str = "deleted";
pub const MSG_NOT_FOUND: &str = "not found";

/// Transport-neutral response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            body: json!({ "error": message.into() }),
        }
    }
}

pub fn list_response(result: ServiceResult<Listing>) -> ApiResponse {
    match result {
        Ok(Listing::All(items)) => ApiResponse::ok(json!({ "all": items })),
        Ok(Listing::Found(participant)) => ApiResponse::ok(json!({ "participant": participant })),
        Ok(Listing::NotFound(id)) => ApiResponse::ok(json!({ "msg": MSG_NOT_FOUND, "id": id })),
        Err(err) => failure_response("list", err),
    }
}

pub fn create_response(result: ServiceResult<Participant>) -> ApiResponse {
    match result {
        Ok(participant) => ApiResponse::created(json!({
            "msg": MSG_CREATED,
            "participant": participant,
        })),
        Err(err) => failure_response("create", err),
    }
}

pub fn update_response(result: ServiceResult<Participant>, partial: bool) -> ApiResponse {
    let msg = if partial { MSG_PATCHED } else { MSG_UPDATED };
    match result {
        Ok(participant) => ApiResponse::ok(json!({ "msg": msg, "participant": participant })),
        Err(err) => failure_response(if partial { "patch" } else { "update" }, err),
    }
}

pub fn delete_response(result: ServiceResult<Participant>) -> ApiResponse {
    match result {
        Ok(removed) => ApiResponse::ok(json!({ "msg": MSG_DELETED, "id": removed.id })),
        Err(err) => failure_response("delete", err),
    }
}

fn failure_response(operation: &str, err: ServiceError) -> ApiResponse {
    match err {
        ServiceError::MissingField(_) => ApiResponse::bad_request(err.to_string()),
        ServiceError::NotFound(id) => ApiResponse {
            status: 404,
            body: json!({ "msg": MSG_NOT_FOUND, "id": id }),
        },
        ServiceError::Store(store_err) => {
            error!("event=request_failed module=api status=error op={operation} error={store_err}");
            ApiResponse::internal_error(store_err.to_string())
        }
    }
}
