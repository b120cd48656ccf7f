use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::CATEGORY;
use crate::api::response::ApiResponse;
use crate::features::shared::routes::{category_router, ApiError};
use crate::features::shared::manifests;
use crate::features::FeatureState;

pub fn routes() -> Router<FeatureState> {
    // Standard surface plus a single-manifest lookup the frontend's
    // heatmap admin screen uses.
    category_router(&CATEGORY).route("/uploads/:id", get(get_upload))
}

async fn get_upload(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let manifest = manifests::fetch_by_id(&state.db, &CATEGORY, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Upload {id} not found")))?;

    Ok(ApiResponse::success(manifest.to_json(&CATEGORY)).into_response())
}
