use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use super::message;
use crate::server::serializers::ApiMessage;
use crate::server::AppState;
use crate::store::{DictionaryEntry, DictionaryPatch, NewDictionaryEntry};

type MessageErr = (StatusCode, Json<ApiMessage>);

pub async fn create_entry(
    State(state): State<AppState>,
    body: Result<Json<NewDictionaryEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<DictionaryEntry>), MessageErr> {
    let Json(req) = body.map_err(rejected)?;
    let created = state
        .dictionary
        .insert(req)
        .await
        .map_err(|e| message(StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<DictionaryEntry>>, MessageErr> {
    let entries = state.dictionary.list().await.map_err(|e| {
        warn!("Listing dictionary failed: {}", e);
        message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(entries))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DictionaryPatch>, JsonRejection>,
) -> Result<Json<DictionaryEntry>, MessageErr> {
    let id = parse_id(&id, StatusCode::BAD_REQUEST)?;
    let Json(patch) = body.map_err(rejected)?;
    let updated = state
        .dictionary
        .update(id, patch)
        .await
        .map_err(|e| message(StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(updated))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, MessageErr> {
    let id = parse_id(&id, StatusCode::INTERNAL_SERVER_ERROR)?;
    state
        .dictionary
        .delete(id)
        .await
        .map_err(|e| message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(ApiMessage {
        message: "Entry deleted".to_string(),
    }))
}

fn rejected(rejection: JsonRejection) -> MessageErr {
    message(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Ids are parsed by hand so a bad id gets the route's JSON error shape.
fn parse_id(raw: &str, status: StatusCode) -> Result<i32, MessageErr> {
    raw.parse()
        .map_err(|_| message(status, format!("Invalid dictionary entry id: {}", raw)))
}
