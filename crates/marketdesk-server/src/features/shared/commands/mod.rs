//! Write operations shared by every category

pub mod delete_upload;
pub mod ingest_upload;
pub mod update_upload;

pub use delete_upload::{DeleteUploadError, DeleteUploadResponse};
pub use ingest_upload::{IngestError, IngestUploadCommand, IngestedFile};
pub use update_upload::{UpdateUploadCommand, UpdateUploadError, UpdateUploadResponse};
