//! Request building, the service call, and response normalization

pub mod client;
pub mod request;
pub mod response;

// Re-export main types for convenience
pub use client::{HttpTransport, ServiceClient, Transport, TransportError, TransportResponse};
pub use request::RequestBuilder;
pub use response::{ResponseNormalizer, clean_summary, strip_markdown};
