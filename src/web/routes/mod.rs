pub mod admin;
pub mod avatar;
pub mod events;
pub mod friends;
pub mod health;
pub mod locations;
pub mod mitid;
pub mod stats;
pub mod suggestions;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

pub(crate) fn ok() -> Json<Value> {
    Json(json!({ "ok": true }))
}
