//! Resource APIs.
//!
//! Each submodule adds methods to [`CiamClient`](crate::CiamClient). Every
//! method validates its arguments before anything is sent.

mod auth;
mod permissions;
mod roles;
mod users;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Serialize a request payload into a JSON body.
pub(crate) fn to_body<B: Serialize>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body).map_err(ClientError::Encode)
}
