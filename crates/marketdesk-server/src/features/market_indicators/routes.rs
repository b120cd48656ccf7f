use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;

use super::{queries, sections, CATEGORY};
use crate::api::response::ApiResponse;
use crate::features::shared::routes::{self as shared_routes, ApiError};
use crate::features::FeatureState;

pub fn routes() -> Router<FeatureState> {
    Router::new()
        .route(
            "/upload",
            post(|state: State<FeatureState>, multipart: Multipart| {
                shared_routes::upload(&CATEGORY, state, multipart)
            }),
        )
        .route(
            "/uploads",
            get(|state: State<FeatureState>| shared_routes::list(&CATEGORY, state)),
        )
        .route(
            "/uploads/:id",
            put(|state: State<FeatureState>, path: Path<i64>, multipart: Multipart| {
                shared_routes::update(&CATEGORY, state, path, multipart)
            }),
        )
        .route(
            "/uploads/:id",
            delete(|state: State<FeatureState>, path: Path<i64>| {
                shared_routes::remove(&CATEGORY, state, path)
            }),
        )
        .route("/latest", get(latest_sections))
        .route("/tabs/:tab_id", get(latest_tab))
        .route(
            "/files/:id",
            get(|state: State<FeatureState>, path: Path<i64>| {
                shared_routes::download(&CATEGORY, state, path)
            }),
        )
}

/// Latest snapshot regrouped into per-tab sections.
async fn latest_sections(State(state): State<FeatureState>) -> Result<Response, ApiError> {
    let (manifest, rows) = queries::latest_rows(&state.db).await?;

    let body = ApiResponse::success(json!({
        "upload_date": manifest.upload_date,
        "data_date": manifest.data_date,
        "data_type": manifest.data_type,
        "tabs": sections::group_into_sections(&rows),
    }));
    Ok(body.into_response())
}

/// Flat rows for one tab of the latest snapshot.
async fn latest_tab(
    State(state): State<FeatureState>,
    Path(tab_id): Path<f64>,
) -> Result<Response, ApiError> {
    let (manifest, rows) = queries::latest_tab_rows(&state.db, tab_id)
        .await
        .map_err(|e| match e {
            crate::features::shared::queries::LatestSnapshotError::NoRows => {
                ApiError::NotFound(format!("No stock data found for tab {tab_id}"))
            },
            other => other.into(),
        })?;

    let body = ApiResponse::success(json!({
        "upload_date": manifest.upload_date,
        "data_date": manifest.data_date,
        "data_type": manifest.data_type,
        "tab": sections::tab_name(tab_id),
        "rows": rows,
    }));
    Ok(body.into_response())
}
