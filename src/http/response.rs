//! HTTP response
//!
//! Every setter consumes the response and returns the updated one. The
//! content length kept here is authoritative: serializers frame the body
//! from [`Response::content_length`] and ignore any literal
//! `Content-Length` header.

use super::status::reason_phrase;
use super::{BodyWriter, Cookie, HasHeaders, Headers, ResponseBody, UNKNOWN_REASON};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    headers: Headers,
    cookies: BTreeMap<Bytes, Cookie>,
    content_length: Option<u64>,
    body: ResponseBody,
    status: u16,
    status_reason: String,
    transforming_body: bool,
}

impl Response {
    /// An empty `200 OK` response with no headers, cookies or body
    pub fn new() -> Self {
        Response {
            headers: Headers::new(),
            cookies: BTreeMap::new(),
            content_length: None,
            body: ResponseBody::empty(),
            status: 200,
            status_reason: "OK".to_string(),
            transforming_body: false,
        }
    }

    /// Get the status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the reason phrase
    pub fn status_reason(&self) -> &str {
        &self.status_reason
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Whether the handler is rewriting the request body into the response
    pub fn is_transforming_body(&self) -> bool {
        self.transforming_body
    }

    /// Set the status code and its canonical reason phrase
    ///
    /// Codes missing from the reason table get [`UNKNOWN_REASON`].
    pub fn set_response_code(self, code: u16) -> Self {
        let reason = reason_phrase(code).unwrap_or(UNKNOWN_REASON);
        self.set_response_status(code, reason)
    }

    /// Set the status code with a custom reason phrase
    pub fn set_response_status(mut self, code: u16, reason: impl Into<String>) -> Self {
        self.status = code;
        self.status_reason = reason.into();
        self
    }

    pub fn set_response_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    /// Wrap the current body's output with `f`
    ///
    /// See [`ResponseBody::map`].
    pub fn modify_response_body<F>(mut self, f: F) -> Self
    where
        F: FnOnce(BodyWriter) -> BodyWriter,
    {
        self.body = self.body.map(f);
        self
    }

    pub fn set_content_type(self, content_type: impl Into<String>) -> Self {
        self.set_header("Content-Type", content_type)
    }

    pub fn set_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    pub fn clear_content_length(mut self) -> Self {
        self.content_length = None;
        self
    }

    pub fn set_transforming_body(mut self, transforming: bool) -> Self {
        self.transforming_body = transforming;
        self
    }

    /// Add a cookie, replacing any cookie with the same name
    pub fn add_response_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.insert(cookie.name.clone(), cookie);
        self
    }

    pub fn response_cookie(&self, name: &[u8]) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    /// All cookies, ordered by name
    pub fn response_cookies(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.values()
    }

    pub fn delete_response_cookie(mut self, name: &[u8]) -> Self {
        self.cookies.remove(name);
        self
    }

    /// Replace the named cookie with `f` applied to it
    ///
    /// Returns the response unchanged when no such cookie exists. If `f`
    /// renames the cookie, it is stored under its new name only.
    pub fn modify_response_cookie<F>(mut self, name: &[u8], f: F) -> Self
    where
        F: FnOnce(Cookie) -> Cookie,
    {
        match self.cookies.remove(name) {
            Some(cookie) => self.add_response_cookie(f(cookie)),
            None => self,
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl HasHeaders for Response {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.status, self.status_reason)?;
        for (name, value) in self.headers.iter() {
            if !name.eq_ignore_ascii_case("Content-Length") {
                writeln!(f, "{}: {}", name, value)?;
            }
        }
        for cookie in self.cookies.values() {
            writeln!(f, "Set-Cookie: {}", cookie.to_set_cookie())?;
        }
        if let Some(length) = self.content_length {
            writeln!(f, "content-length: {}", length)?;
        }
        Ok(())
    }
}
