//! HTTP API surface
//!
//! Response envelope types shared by every feature router.

pub mod response;

pub use response::{ApiResponse, ErrorResponse};
