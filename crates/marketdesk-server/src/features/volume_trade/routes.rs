use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::commands::{
    delete_group, update_group, upload_group, DeleteGroupError, UpdateGroupCommand,
    UpdateGroupError, UploadGroupCommand, UploadGroupError,
};
use super::{is_valid_tab, queries, CATEGORY};
use crate::api::response::ApiResponse;
use crate::features::shared::form::read_form;
use crate::features::shared::queries::{latest_snapshot, LatestQuery};
use crate::features::shared::routes::{self as shared_routes, require_date, ApiError};
use crate::features::FeatureState;

pub fn routes() -> Router<FeatureState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/uploads", get(list))
        .route("/uploads/:group_id", put(update).delete(remove))
        .route("/latest", get(latest))
        .route(
            "/files/:id",
            get(|state: State<FeatureState>, path: Path<i64>| {
                shared_routes::download(&CATEGORY, state, path)
            }),
        )
}

/// Upload the tab trio under one generated group id.
async fn upload(
    State(state): State<FeatureState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(&mut multipart).await?;

    if form.files.len() != form.data_types.len() {
        return Err(UploadGroupError::MismatchedLists.into());
    }

    let command = UploadGroupCommand {
        upload_date: require_date(form.upload_date, "upload_date")?,
        data_date: require_date(form.data_date, "data_date")?,
        entries: form.data_types.into_iter().zip(form.files).collect(),
    };

    let group = upload_group::handle(&state, command).await?;

    let body = ApiResponse::success(json!({
        "message": format!("{} files uploaded as one group", group.files.len()),
        "group_id": group.group_id,
        "files": group.files,
    }));
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn list(State(state): State<FeatureState>) -> Result<Response, ApiError> {
    let groups = queries::list_groups::handle(&state.db).await?;
    Ok(ApiResponse::success(groups).into_response())
}

#[derive(Debug, Deserialize)]
struct TabParams {
    tab: Option<String>,
}

/// Latest snapshot for one tab (default `volume`).
async fn latest(
    State(state): State<FeatureState>,
    Query(params): Query<TabParams>,
) -> Result<Response, ApiError> {
    let tab = params.tab.unwrap_or_else(|| "volume".to_string());
    if !is_valid_tab(&tab) {
        return Err(ApiError::Validation(
            "Invalid tab. Must be volume, value, or trade.".to_string(),
        ));
    }

    let snapshot = latest_snapshot::handle(
        &state.db,
        &CATEGORY,
        LatestQuery { discriminant: Some(tab), name: None },
    )
    .await?;

    Ok(ApiResponse::success(snapshot.to_json(&CATEGORY)).into_response())
}

/// Replace dates and/or per-tab files for a whole group.
async fn update(
    State(state): State<FeatureState>,
    Path(group_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(&mut multipart).await?;

    let command = UpdateGroupCommand {
        group_id,
        upload_date: form.upload_date,
        data_date: form.data_date,
        tab_files: form.tab_files,
    };

    let updated = update_group::handle(&state, command).await?;

    let body = ApiResponse::success(json!({
        "message": "Upload group updated successfully",
        "group_id": updated.group_id,
        "files_replaced": updated.files_replaced,
        "records_inserted": updated.records_inserted,
    }));
    Ok(Json(body).into_response())
}

async fn remove(
    State(state): State<FeatureState>,
    Path(group_id): Path<String>,
) -> Result<Response, ApiError> {
    let deleted = delete_group::handle(&state, &group_id).await?;

    let body = ApiResponse::success(json!({
        "message": "Upload group deleted successfully",
        "group_id": deleted.group_id,
        "uploads_deleted": deleted.uploads_deleted,
        "rows_deleted": deleted.rows_deleted,
    }));
    Ok(Json(body).into_response())
}

impl From<UploadGroupError> for ApiError {
    fn from(err: UploadGroupError) -> Self {
        match err {
            UploadGroupError::NoFiles
            | UploadGroupError::MismatchedLists
            | UploadGroupError::InvalidTab(_) => ApiError::Validation(err.to_string()),
            UploadGroupError::Ingest(e) => ApiError::Ingest(e),
        }
    }
}

impl From<UpdateGroupError> for ApiError {
    fn from(err: UpdateGroupError) -> Self {
        match err {
            UpdateGroupError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UpdateGroupError::Update(e) => ApiError::Update(e),
            UpdateGroupError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<DeleteGroupError> for ApiError {
    fn from(err: DeleteGroupError) -> Self {
        match err {
            DeleteGroupError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DeleteGroupError::Delete(e) => ApiError::Delete(e),
            DeleteGroupError::Database(e) => ApiError::Database(e),
        }
    }
}
