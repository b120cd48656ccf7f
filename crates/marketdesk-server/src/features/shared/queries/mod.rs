//! Read operations shared by every category

pub mod download_file;
pub mod latest_snapshot;
pub mod list_uploads;

pub use download_file::DownloadFileError;
pub use latest_snapshot::{LatestQuery, LatestSnapshot, LatestSnapshotError};
