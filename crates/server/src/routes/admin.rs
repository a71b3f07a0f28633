use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::routes::ServerState;

#[derive(Serialize, Debug)]
pub struct RefreshOutput {
    pub message: String,
    pub count: usize,
}

/// Re-read the backing file, discarding any in-memory changes.
pub async fn refresh(State(state): State<ServerState>) -> Json<RefreshOutput> {
    let count = state.guitars.reload().await;
    let source = state.guitars.source_name();
    info!(event = "refresh", %source, count, "collection reloaded");
    Json(RefreshOutput { message: format!("Data reloaded from {source}"), count })
}
