//! Execution Layer
//!
//! Everything that turns a [`RequestDescriptor`] into a raw response body:
//! header construction, the HTTP transport abstraction, interceptors, the
//! error mapper and the refresh-and-retry pipeline.

pub mod errors;
pub mod http;
pub mod pipeline;
pub mod request;

pub use pipeline::{RawBody, RequestPipeline};
pub use request::RequestDescriptor;
