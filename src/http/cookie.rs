//! HTTP cookies

use super::date::format_http_time;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// An HTTP cookie
///
/// Cookies are plain values: equality compares every attribute, and a
/// changed cookie is a new value built with the `with_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cookie {
    pub name: Bytes,
    pub value: Bytes,
    pub expires: Option<DateTime<Utc>>,
    pub domain: Option<Bytes>,
    pub path: Option<Bytes>,
    pub secure: bool,
    pub http_only: bool,
}

impl Cookie {
    /// Create a session cookie with no attributes
    pub fn new(name: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Cookie {
            name: name.into(),
            value: value.into(),
            expires: None,
            domain: None,
            path: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<Bytes>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<Bytes>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<Bytes>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Render the cookie as a `Set-Cookie` header value
    ///
    /// ```
    /// use httpmodel::http::Cookie;
    ///
    /// let cookie = Cookie::new("sid", "abc").with_path("/").with_http_only(true);
    /// assert_eq!(cookie.to_set_cookie(), "sid=abc; path=/; HttpOnly");
    /// ```
    pub fn to_set_cookie(&self) -> String {
        let mut out = format!(
            "{}={}",
            String::from_utf8_lossy(&self.name),
            String::from_utf8_lossy(&self.value)
        );

        if let Some(path) = &self.path {
            out.push_str("; path=");
            out.push_str(&String::from_utf8_lossy(path));
        }
        if let Some(expires) = &self.expires {
            out.push_str("; expires=");
            out.push_str(&format_http_time(expires.timestamp()));
        }
        if let Some(domain) = &self.domain {
            out.push_str("; domain=");
            out.push_str(&String::from_utf8_lossy(domain));
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }

        out
    }
}
