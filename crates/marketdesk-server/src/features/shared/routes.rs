//! Generic HTTP wiring for a category
//!
//! [`category_router`] mounts the uniform six-endpoint surface. Categories
//! with extra endpoints compose these handlers into their own router
//! instead.

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete as delete_route, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio_util::io::ReaderStream;

use super::commands::{
    self, DeleteUploadError, IngestError, IngestUploadCommand, UpdateUploadCommand,
    UpdateUploadError,
};
use super::form::{read_form, FormError};
use super::queries::{self, DownloadFileError, LatestQuery, LatestSnapshotError};
use super::Category;
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::features::FeatureState;

/// The uniform per-category surface:
///
/// - `POST   /upload`        multipart ingest
/// - `GET    /uploads`       manifest history
/// - `GET    /latest`        latest snapshot
/// - `GET    /files/:id`     original file download
/// - `PUT    /uploads/:id`   replace file and/or dates
/// - `DELETE /uploads/:id`   remove manifest, rows, file
pub fn category_router(cat: &'static Category) -> Router<FeatureState> {
    Router::new()
        .route(
            "/upload",
            post(move |state: State<FeatureState>, multipart: Multipart| {
                upload(cat, state, multipart)
            }),
        )
        .route("/uploads", get(move |state: State<FeatureState>| list(cat, state)))
        .route(
            "/uploads/:id",
            put(move |state: State<FeatureState>, path: Path<i64>, multipart: Multipart| {
                update(cat, state, path, multipart)
            }),
        )
        .route(
            "/uploads/:id",
            delete_route(move |state: State<FeatureState>, path: Path<i64>| {
                remove(cat, state, path)
            }),
        )
        .route(
            "/latest",
            get(move |state: State<FeatureState>, query: Query<LatestParams>| {
                latest(cat, state, query)
            }),
        )
        .route(
            "/files/:id",
            get(move |state: State<FeatureState>, path: Path<i64>| download(cat, state, path)),
        )
}

/// Query parameters accepted by `GET /latest`.
#[derive(Debug, Default, Deserialize)]
pub struct LatestParams {
    pub data_type: Option<String>,
    /// Heatmap's discriminant name.
    pub value: Option<String>,
    pub name: Option<String>,
}

impl LatestParams {
    pub fn into_query(self) -> LatestQuery {
        LatestQuery {
            discriminant: self.data_type.or(self.value),
            name: self.name,
        }
    }
}

#[tracing::instrument(skip(state, multipart), fields(category = cat.slug))]
pub async fn upload(
    cat: &'static Category,
    State(state): State<FeatureState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(&mut multipart).await?;

    let command = IngestUploadCommand {
        upload_date: require_date(form.upload_date, "upload_date")?,
        data_date: require_date(form.data_date, "data_date")?,
        data_type: form.data_type.unwrap_or_default(),
        name: form.name,
        files: form.files,
    };

    let files = commands::ingest_upload::handle(&state, cat, command).await?;

    let body = ApiResponse::success(json!({
        "message": format!("Processed {} files", files.len()),
        "files": files,
    }));
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn list(
    cat: &'static Category,
    State(state): State<FeatureState>,
) -> Result<Response, ApiError> {
    let uploads = queries::list_uploads::handle(&state.db, cat).await?;
    Ok(ApiResponse::success(uploads).into_response())
}

pub async fn latest(
    cat: &'static Category,
    State(state): State<FeatureState>,
    Query(params): Query<LatestParams>,
) -> Result<Response, ApiError> {
    let snapshot = queries::latest_snapshot::handle(&state.db, cat, params.into_query()).await?;
    Ok(ApiResponse::success(snapshot.to_json(cat)).into_response())
}

pub async fn download(
    cat: &'static Category,
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let manifest = queries::download_file::handle(&state, cat, id).await?;

    let file = state
        .files
        .open(&manifest.file_path)
        .await
        .map_err(|_| ApiError::Download(DownloadFileError::FileMissing))?;
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", manifest.file_name),
        ),
    ];
    Ok((headers, body).into_response())
}

#[tracing::instrument(skip(state, multipart), fields(category = cat.slug, upload_id = id))]
pub async fn update(
    cat: &'static Category,
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = read_form(&mut multipart).await?;

    let command = UpdateUploadCommand {
        id,
        upload_date: form.upload_date,
        data_date: form.data_date,
        data_type: form.data_type,
        name: form.name,
        file: if form.files.is_empty() { None } else { Some(form.files.remove(0)) },
    };

    let updated = commands::update_upload::handle(&state, cat, command).await?;

    let body = ApiResponse::success(json!({
        "message": "Upload updated successfully",
        "upload_id": updated.upload_id,
        "file_name": updated.file_name,
        "upload_date": updated.upload_date,
        "data_date": updated.data_date,
        "records_inserted": updated.records_inserted,
    }));
    Ok(Json(body).into_response())
}

pub async fn remove(
    cat: &'static Category,
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let deleted = commands::delete_upload::handle(&state, cat, id).await?;

    let body = ApiResponse::success(json!({
        "message": "Upload deleted successfully",
        "upload_id": deleted.upload_id,
        "rows_deleted": deleted.rows_deleted,
    }));
    Ok(Json(body).into_response())
}

pub fn require_date(
    value: Option<chrono::NaiveDate>,
    field: &'static str,
) -> Result<chrono::NaiveDate, ApiError> {
    value.ok_or_else(|| ApiError::Validation(format!("A {field} value is required")))
}

/// Route-level error covering every shared command and query.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Update(#[from] UpdateUploadError),

    #[error(transparent)]
    Delete(#[from] DeleteUploadError),

    #[error(transparent)]
    Latest(#[from] LatestSnapshotError),

    #[error(transparent)]
    Download(#[from] DownloadFileError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_)
            | ApiError::Form(_)
            | ApiError::Ingest(IngestError::NoFiles)
            | ApiError::Ingest(IngestError::MissingField(_))
            | ApiError::Ingest(IngestError::Parse { .. })
            | ApiError::Update(UpdateUploadError::Parse { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            },

            ApiError::NotFound(_)
            | ApiError::Update(UpdateUploadError::NotFound(_))
            | ApiError::Delete(DeleteUploadError::NotFound(_))
            | ApiError::Latest(LatestSnapshotError::NoUploads)
            | ApiError::Latest(LatestSnapshotError::NoRows)
            | ApiError::Download(DownloadFileError::NotFound(_))
            | ApiError::Download(DownloadFileError::FileMissing) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            },

            ApiError::Ingest(IngestError::Storage(_))
            | ApiError::Update(UpdateUploadError::Storage(_)) => {
                tracing::error!("Storage error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            },

            ApiError::Ingest(IngestError::Database(_))
            | ApiError::Update(UpdateUploadError::Database(_))
            | ApiError::Delete(DeleteUploadError::Database(_))
            | ApiError::Latest(LatestSnapshotError::Database(_))
            | ApiError::Download(DownloadFileError::Database(_))
            | ApiError::Database(_) => {
                tracing::error!("Database error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            },
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            match code {
                "STORAGE_ERROR" => "A storage error occurred".to_string(),
                _ => "A database error occurred".to_string(),
            }
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ParseError;

    #[test]
    fn test_column_count_maps_to_bad_request() {
        let err = ApiError::Ingest(IngestError::Parse {
            file: "ipo.csv".to_string(),
            source: ParseError::ColumnCount { expected: "exactly 47".to_string(), found: 46 },
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_upload_maps_to_not_found() {
        let err = ApiError::Delete(DeleteUploadError::NotFound(42));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_latest_params_prefer_data_type() {
        let params = LatestParams {
            data_type: Some("daily".to_string()),
            value: None,
            name: None,
        };
        assert_eq!(params.into_query().discriminant.as_deref(), Some("daily"));

        let params = LatestParams {
            data_type: None,
            value: Some("Company".to_string()),
            name: None,
        };
        assert_eq!(params.into_query().discriminant.as_deref(), Some("Company"));
    }
}
