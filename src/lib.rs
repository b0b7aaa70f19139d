//! httpmodel - HTTP request/response data model
//!
//! This crate provides transport-independent types for representing an HTTP
//! request and response inside a server: headers, methods, cookies, response
//! bodies (streamed or file-backed) and the HTTP date codec.

pub mod http;
