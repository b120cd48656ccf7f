//! Group-scoped write operations

pub mod delete_group;
pub mod update_group;
pub mod upload_group;

pub use delete_group::{DeleteGroupError, DeleteGroupResponse};
pub use update_group::{UpdateGroupCommand, UpdateGroupError, UpdateGroupResponse};
pub use upload_group::{UploadGroupCommand, UploadGroupError, UploadGroupResponse};
