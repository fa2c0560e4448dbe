// crates/server/src/routes/registration.rs
//! Registration endpoints.
//!
//! Validation happens here, at the boundary: MAC strings go through
//! [`MacAddr`] canonicalization and empty nicknames are rejected before
//! anything reaches the store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use whoshere_types::MacAddr;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Form body for registration and deregistration requests.
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub mac: String,
    pub nick: String,
}

impl RegistrationForm {
    fn validate(&self) -> Result<(MacAddr, &str), ApiError> {
        let mac = self
            .mac
            .trim()
            .parse::<MacAddr>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let nick = self.nick.trim();
        if nick.is_empty() {
            return Err(ApiError::BadRequest("nickname must not be empty".into()));
        }
        Ok((mac, nick))
    }
}

/// POST /api/reg - Claim a MAC for a nickname. First claim wins.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegistrationForm>,
) -> ApiResult<&'static str> {
    let (mac, nick) = form.validate()?;
    if state.registry.register(&mac, nick)? {
        Ok("success")
    } else {
        Err(ApiError::Conflict(format!("{mac} is already registered")))
    }
}

/// POST /api/dereg - Release a MAC, if it is registered to exactly `nick`.
pub async fn deregister(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegistrationForm>,
) -> ApiResult<&'static str> {
    let (mac, nick) = form.validate()?;
    if state.registry.deregister(&mac, nick)? {
        Ok("success")
    } else {
        Err(ApiError::Conflict(format!(
            "{mac} is not registered to {nick}"
        )))
    }
}

/// GET /api/list/{nick} - All MACs registered under a nickname.
pub async fn list_nick(
    State(state): State<Arc<AppState>>,
    Path(nick): Path<String>,
) -> ApiResult<Json<Vec<MacAddr>>> {
    let macs = state.registry.lookup_nick(&nick);
    if macs.is_empty() {
        return Err(ApiError::NotFound(format!("no MACs registered for {nick}")));
    }
    Ok(Json(macs))
}

/// Create the registration routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reg", post(register))
        .route("/dereg", post(deregister))
        .route("/list/{nick}", get(list_nick))
}
