use super::AppState;
use crate::{Result, types::SequenceResult};
use axum::{
    Json,
    extract::{Path, State},
};

/// `GET /sequence/region/{system}/{location}`
pub async fn get_sequence(
    State(state): State<AppState>,
    Path((system, location)): Path<(String, String)>,
) -> Result<Json<SequenceResult>> {
    let result = state.service.handle(&system, &location).await?;
    Ok(Json(result))
}
