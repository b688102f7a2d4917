//! Data models for API definitions, resolved requests and responses.

pub mod definition;
pub mod request;
pub mod response;

pub use definition::{ApiDefinition, HttpMethod};
pub use request::ResolvedRequest;
pub use response::ApiResponse;
