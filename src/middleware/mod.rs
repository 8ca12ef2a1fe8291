//! Request middleware
//!
//! - [`request_id_middleware`]: tags every request/response with `x-request-id`
//! - [`track_metrics`]: records the request counter and duration histogram
//! - [`require_get`]: rejects every method other than GET with 405

pub mod method;
pub mod request_id;
pub mod track;

pub use method::{ALLOWED_METHODS, require_get};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use track::track_metrics;
