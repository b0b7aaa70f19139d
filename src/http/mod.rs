//! HTTP data model
//!
//! This module provides the types a server threads through its handlers:
//! an incoming [`Request`], an outgoing [`Response`] and the pieces they are
//! made of. Nothing here touches a socket.
//!
//! # Architecture
//!
//! Requests and responses are values. Every "setter" consumes the value and
//! returns a new one with a single field replaced:
//!
//! - [`HasHeaders`] gives both types the same add/set/get/list/delete header operations
//! - [`ResponseBody`] is either a streaming writer or a file (range) transfer,
//!   materialized with [`ResponseBody::drive`]
//! - [`date`] converts between POSIX seconds and HTTP/log date strings
//!
//! # Examples
//!
//! ```
//! use httpmodel::http::{HasHeaders, Response, ResponseBody};
//!
//! let response = Response::new()
//!     .set_response_code(404)
//!     .set_header("Content-Type", "text/plain")
//!     .set_response_body(ResponseBody::from_bytes("missing"));
//!
//! assert_eq!(response.status_reason(), "Not Found");
//! let out = response.body().drive(Vec::new()).unwrap();
//! assert_eq!(out, b"missing");
//! ```

pub mod body;
pub mod cookie;
pub mod date;
pub mod headers;
pub mod message;
pub mod request;
pub mod response;
pub mod status;

pub use body::{BodyWriter, ResponseBody};
pub use cookie::Cookie;
pub use headers::{HasHeaders, Headers};
pub use message::{HttpVersion, Method};
pub use request::{Params, Request, RequestBody, RequestBuilder};
pub use response::Response;

/// Result type for HTTP model operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP model errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid byte range: {start}..{end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("Invalid HTTP date: {0}")]
    InvalidDate(String),

    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),
}

/// Separator used when several values of one header are reported together
pub const HEADER_VALUE_SEPARATOR: &str = ",";

/// Chunk size used when a request body is read from a `Read` source
pub const BODY_CHUNK_SIZE: usize = 8192;

/// Reason phrase for status codes missing from the reason table
pub const UNKNOWN_REASON: &str = "Unknown";
