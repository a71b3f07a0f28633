use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use service::guitars::{Guitar, GuitarInput};

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Serialize, Debug)]
pub struct DeleteOutput {
    pub message: &'static str,
    pub guitar: Guitar,
}

/// Leading-digit parse of a path id: `" 12abc"` and `"12.5"` both read as 12.
/// No leading digits, a negative sign or overflow can never match a record.
fn parse_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_end == 0 || negative {
        return None;
    }
    unsigned[..digits_end].parse::<u64>().ok()
}

/// An empty body is read as `{}` so create falls through to the required-field check
/// and update becomes a no-op.
fn parse_input(body: &Bytes) -> Result<GuitarInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GuitarInput::default());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
    Ok(GuitarInput::from_body(value)?)
}

/// List every guitar in collection order
pub async fn list_guitars(State(state): State<ServerState>) -> Json<Vec<Guitar>> {
    Json(state.guitars.list().await)
}

pub async fn get_guitar(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Guitar>, ApiError> {
    let id = parse_id(&id).ok_or_else(ApiError::guitar_not_found)?;
    state
        .guitars
        .get(id)
        .await
        .map(Json)
        .ok_or_else(ApiError::guitar_not_found)
}

pub async fn create_guitar(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Guitar>), ApiError> {
    let input = parse_input(&body)?;
    let created = state.guitars.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update: only fields present in the body are overwritten
pub async fn update_guitar(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Guitar>, ApiError> {
    let id = parse_id(&id).ok_or_else(ApiError::guitar_not_found)?;
    if state.guitars.get(id).await.is_none() {
        return Err(ApiError::guitar_not_found());
    }
    let input = parse_input(&body)?;
    Ok(Json(state.guitars.update(id, input).await?))
}

pub async fn delete_guitar(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutput>, ApiError> {
    let id = parse_id(&id).ok_or_else(ApiError::guitar_not_found)?;
    let guitar = state.guitars.delete(id).await?;
    Ok(Json(DeleteOutput { message: "Guitar deleted", guitar }))
}
