//! Resource controllers shared by every entity.
//!
//! # Responsibility
//! - Mount list / get / post / put / delete for a `Resource` under `/api/<path>`.
//! - Translate query keys into typed record keys before calling the service.
//!
//! # Invariants
//! - Reads need `UserAccess`; mutations need `AdminAccess`.
//! - The capability extractor is always the first handler argument.

pub mod resources;

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use campus_core::{core_version, ping, Record, RecordKey};
use log::info;
use serde::Serialize;

use crate::{
    auth::{AdminAccess, Authorized, UserAccess},
    error::ApiError,
    state::AppState,
};

pub use resources::Resource;

/// Registers the five controller routes for `R`.
pub fn resource_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let base = format!("/api/{}", R::PATH);

    router
        .route(
            &base,
            get(get_by_id::<R>).put(update::<R>).delete(delete::<R>),
        )
        .route(&format!("{base}/all"), get(list_all::<R>))
        .route(&format!("{base}/post"), post(create::<R>))
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBody {
    pub name: &'static str,
    pub version: &'static str,
    pub core_version: &'static str,
}

pub async fn healthz() -> &'static str {
    ping()
}

pub async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        core_version: core_version(),
    })
}

async fn list_all<R: Resource>(
    _caller: Authorized<UserAccess>,
    State(state): State<AppState>,
) -> Result<Json<Vec<R>>, ApiError> {
    let records = state.with_service::<R, _, _>(|service| service.list_all())?;
    Ok(Json(records))
}

async fn get_by_id<R: Resource>(
    _caller: Authorized<UserAccess>,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<R>, ApiError> {
    let key = key_param::<R>(&params)?;
    let record = state.with_service::<R, _, _>(|service| service.get_by_id(&key))?;
    Ok(Json(record))
}

async fn create<R: Resource>(
    caller: Authorized<AdminAccess>,
    State(state): State<AppState>,
    Query(params): Query<R::CreateParams>,
) -> Result<Json<R>, ApiError> {
    let record = R::from_params(params);
    let saved = state.with_service::<R, _, _>(|service| service.create(record))?;

    info!(
        "event=resource_post module=http status=ok entity={} key={} caller={}",
        R::ENTITY_NAME,
        saved.key(),
        caller.principal.email
    );
    Ok(Json(saved))
}

async fn update<R: Resource>(
    caller: Authorized<AdminAccess>,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(incoming): Json<R>,
) -> Result<Json<R>, ApiError> {
    let key = key_param::<R>(&params)?;
    let updated = state.with_service::<R, _, _>(|service| service.update(&key, incoming))?;

    info!(
        "event=resource_put module=http status=ok entity={} key={key} caller={}",
        R::ENTITY_NAME,
        caller.principal.email
    );
    Ok(Json(updated))
}

async fn delete<R: Resource>(
    caller: Authorized<AdminAccess>,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MessageBody>, ApiError> {
    let key = key_param::<R>(&params)?;
    let message = state.with_service::<R, _, _>(|service| service.delete(&key))?;

    info!(
        "event=resource_delete module=http status=ok entity={} key={key} caller={}",
        R::ENTITY_NAME,
        caller.principal.email
    );
    Ok(Json(MessageBody { message }))
}

fn key_param<R: Resource>(params: &HashMap<String, String>) -> Result<<R as Record>::Key, ApiError> {
    let raw = params
        .get(R::KEY_PARAM)
        .ok_or_else(|| ApiError::missing_param(R::KEY_PARAM))?;

    <<R as Record>::Key as RecordKey>::parse_key(raw)
        .ok_or_else(|| ApiError::type_mismatch(R::KEY_PARAM, raw))
}
