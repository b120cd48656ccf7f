//! Multipart form extraction for upload and update endpoints

use axum::extract::Multipart;
use chrono::NaiveDate;
use thiserror::Error;

/// One file part of a multipart request.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Everything an upload or update endpoint may receive.
///
/// Unknown fields are ignored; which fields are required is decided by the
/// command that consumes the form.
#[derive(Debug, Default)]
pub struct UploadForm {
    /// `files` / `file` parts, in request order.
    pub files: Vec<FilePart>,
    /// `data_types` values parallel to `files` (volume_trade).
    pub data_types: Vec<String>,
    pub upload_date: Option<NaiveDate>,
    pub data_date: Option<NaiveDate>,
    /// `data_type`, or `value` for the heatmap category.
    pub data_type: Option<String>,
    /// `name` (most_valued house).
    pub name: Option<String>,
    /// `volume_file` / `value_file` / `trade_file` parts for group updates,
    /// keyed by tab.
    pub tab_files: Vec<(String, FilePart)>,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    #[error("Invalid date {value:?} for field '{field}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Drain a multipart body into an [`UploadForm`].
pub async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, FormError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Multipart(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Multipart(e.to_string()))?;
                form.files.push(FilePart { file_name, bytes: bytes.to_vec() });
            },
            "volume_file" | "value_file" | "trade_file" => {
                let tab = field_name.trim_end_matches("_file").to_string();
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Multipart(e.to_string()))?;
                form.tab_files.push((tab, FilePart { file_name, bytes: bytes.to_vec() }));
            },
            "data_types" => {
                form.data_types.push(text_field(field).await?);
            },
            "upload_date" => {
                form.upload_date = Some(date_field(field, "upload_date").await?);
            },
            "data_date" => {
                form.data_date = Some(date_field(field, "data_date").await?);
            },
            "data_type" | "value" => {
                form.data_type = Some(text_field(field).await?);
            },
            "name" => {
                form.name = Some(text_field(field).await?);
            },
            _ => {
                // Unknown fields are tolerated so frontend additions do not
                // break older servers.
            },
        }
    }

    Ok(form)
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, FormError> {
    field
        .text()
        .await
        .map(|s| s.trim().to_string())
        .map_err(|e| FormError::Multipart(e.to_string()))
}

async fn date_field(
    field: axum::extract::multipart::Field<'_>,
    name: &'static str,
) -> Result<NaiveDate, FormError> {
    let raw = text_field(field).await?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate { field: name, value: raw })
}
