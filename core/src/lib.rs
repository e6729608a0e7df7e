//! Typed HTTP request executor for the photo-search service.
//!
//! # Overview
//! `RequestExecutor` takes an endpoint string, an HTTP method, and an
//! expected response type; performs the call; and returns either the decoded
//! value or a classified error. Two calling conventions sit on the same
//! executor:
//! - callback convention: `execute` / `execute_with_callback`, any 2xx is
//!   success, failures are `NetworkError` with a message and status code.
//! - awaitable convention: `request` / `post_request`, only 200 is success,
//!   failures are `DataError`.
//!
//! # Design
//! - Collaborators are injected: `Transport` does the I/O, `Connectivity`
//!   reports reachability, `JsonCodec` encodes and decodes bodies.
//! - Status classification lives in `classify` as pure functions, so the
//!   rules are testable without a socket.
//! - `PhotoSearch` builds image-search endpoints and runs them through the
//!   executor. DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod awaitable;
pub mod classify;
pub mod codec;
pub mod connectivity;
pub mod error;
pub mod executor;
pub mod http;
pub mod search;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use codec::{JsonCodec, SerdeJson};
pub use connectivity::Connectivity;
pub use error::{CodecError, DataError, NetworkError, QueryError, SearchError, TransportError};
pub use executor::{ExecutorBuilder, ExecutorConfig, Outcome, RequestExecutor};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use search::{PhotoSearch, SearchConfig, SearchQuery};
pub use transport::{HttpTransport, Transport};
pub use types::{ImageType, Photo, SearchResponse};
