//! HTTP headers handling
//!
//! This module provides a type for managing HTTP headers with case-insensitive
//! lookups and support for multiple values per header name, and the
//! [`HasHeaders`] capability shared by requests and responses.

use super::HEADER_VALUE_SEPARATOR;
use std::borrow::Cow;
use std::fmt;

/// HTTP headers collection
///
/// Headers are stored in insertion order and support:
/// - Case-insensitive header name lookups
/// - Multiple values for the same header name
/// - Iteration over all headers
///
/// When a header has several values, [`Headers::get`] and [`Headers::to_list`]
/// report them joined with [`HEADER_VALUE_SEPARATOR`], in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: Vec<(String, String)>,
}

impl Headers {
    /// Create a new empty headers collection
    pub fn new() -> Self {
        Headers {
            headers: Vec::new(),
        }
    }

    /// Insert a header
    ///
    /// If a header with the same name (case-insensitive) already exists,
    /// this adds another value rather than replacing it.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Replace every value of a header with a single new value
    ///
    /// The header keeps the position of its first occurrence.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(pos) => {
                // Every other match sits after `pos`, so `pos` stays valid.
                let mut idx = 0;
                self.headers.retain(|(n, _)| {
                    let keep = idx == pos || !n.eq_ignore_ascii_case(&name);
                    idx += 1;
                    keep
                });
                self.headers[pos] = (name, value);
            }
            None => self.headers.push((name, value)),
        }
    }

    /// Get the value of a header (case-insensitive)
    ///
    /// Multiple values are joined in arrival order; a single value is
    /// borrowed as-is.
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        let mut values = self.get_all(name).into_iter();
        let first = values.next()?;

        match values.next() {
            None => Some(Cow::Borrowed(first)),
            Some(second) => {
                let mut joined = String::with_capacity(first.len() + second.len() + 1);
                joined.push_str(first);
                joined.push_str(HEADER_VALUE_SEPARATOR);
                joined.push_str(second);
                for value in values {
                    joined.push_str(HEADER_VALUE_SEPARATOR);
                    joined.push_str(value);
                }
                Some(Cow::Owned(joined))
            }
        }
    }

    /// Get all values for a header (case-insensitive)
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check if a header exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove all instances of a header (case-insensitive)
    pub fn remove(&mut self, name: &str) -> usize {
        let initial_len = self.headers.len();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        initial_len - self.headers.len()
    }

    /// One entry per distinct header name, values joined
    ///
    /// Entries are ordered by first occurrence and keep the spelling of the
    /// name as first inserted.
    pub fn to_list(&self) -> Vec<(String, String)> {
        let mut list: Vec<(String, String)> = Vec::new();
        for (name, value) in &self.headers {
            match list.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
                Some((_, joined)) => {
                    joined.push_str(HEADER_VALUE_SEPARATOR);
                    joined.push_str(value);
                }
                None => list.push((name.clone(), value.clone())),
            }
        }
        list
    }

    /// Get the number of stored header values
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Check if there are no headers
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over all stored header values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Header operations for anything that carries a [`Headers`] container
///
/// Only the two accessors are required; the value-to-value operations are
/// provided. All of them are total.
pub trait HasHeaders: Sized {
    /// Borrow the header container
    fn headers(&self) -> &Headers;

    /// Mutably borrow the header container
    fn headers_mut(&mut self) -> &mut Headers;

    /// Apply `f` to the headers and return the updated value
    fn update_headers<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Headers),
    {
        f(self.headers_mut());
        self
    }

    /// Append a value to a header, keeping prior values
    fn add_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.update_headers(|h| h.insert(name, value))
    }

    /// Replace all values of a header with `value`
    fn set_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.update_headers(|h| h.set(name, value))
    }

    /// Case-insensitive lookup, values joined by the container
    fn get_header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers().get(name)
    }

    /// One `(name, value)` entry per distinct header name
    fn list_headers(&self) -> Vec<(String, String)> {
        self.headers().to_list()
    }

    /// Remove every value of a header
    fn delete_header(self, name: &str) -> Self {
        self.update_headers(|h| {
            h.remove(name);
        })
    }
}

impl HasHeaders for Headers {
    fn headers(&self) -> &Headers {
        self
    }

    fn headers_mut(&mut self) -> &mut Headers {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");
        headers.insert("Content-Length", "42");

        assert_eq!(headers.get("Content-Type").as_deref(), Some("text/html"));
        assert_eq!(headers.get("Content-Length").as_deref(), Some("42"));
        assert_eq!(headers.get("Missing"), None);
    }

    #[test]
    fn test_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");

        assert_eq!(headers.get("content-type").as_deref(), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE").as_deref(), Some("text/html"));
        assert_eq!(headers.get("CoNtEnT-TyPe").as_deref(), Some("text/html"));
    }

    #[test]
    fn test_multiple_values_are_joined() {
        let mut headers = Headers::new();
        headers.insert("Accept", "text/html");
        headers.insert("accept", "text/plain");
        headers.insert("ACCEPT", "*/*");

        assert_eq!(headers.get_all("Accept"), vec!["text/html", "text/plain", "*/*"]);
        assert_eq!(
            headers.get("Accept").as_deref(),
            Some("text/html,text/plain,*/*")
        );
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut headers = Headers::new();
        headers.insert("X-First", "1");
        headers.insert("X-Custom", "a");
        headers.insert("X-Other", "2");
        headers.insert("x-custom", "b");

        headers.set("X-Custom", "c");

        assert_eq!(headers.get_all("X-Custom"), vec!["c"]);
        let collected: Vec<_> = headers.iter().collect();
        assert_eq!(
            collected,
            vec![("X-First", "1"), ("X-Custom", "c"), ("X-Other", "2")]
        );
    }

    #[test]
    fn test_set_inserts_missing() {
        let mut headers = Headers::new();
        headers.set("Server", "httpmodel");
        assert_eq!(headers.get("server").as_deref(), Some("httpmodel"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::new();
        headers.insert("X-Remove", "value1");
        headers.insert("X-Keep", "value2");
        headers.insert("X-Remove", "value3");

        assert_eq!(headers.remove("x-remove"), 2);
        assert_eq!(headers.get("X-Remove"), None);
        assert_eq!(headers.get("X-Keep").as_deref(), Some("value2"));
    }

    #[test]
    fn test_contains() {
        let mut headers = Headers::new();
        headers.insert("X-Test", "value");

        assert!(headers.contains("X-Test"));
        assert!(headers.contains("x-test"));
        assert!(!headers.contains("X-Missing"));
    }

    #[test]
    fn test_to_list_one_entry_per_name() {
        let mut headers = Headers::new();
        headers.insert("A", "1");
        headers.insert("B", "2");
        headers.insert("a", "3");

        assert_eq!(
            headers.to_list(),
            vec![
                ("A".to_string(), "1,3".to_string()),
                ("B".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_has_headers_add_then_set() {
        let headers = Headers::new()
            .add_header("Vary", "Accept")
            .add_header("vary", "Cookie");
        assert_eq!(
            headers.list_headers(),
            vec![("Vary".to_string(), "Accept,Cookie".to_string())]
        );

        let headers = headers.set_header("VARY", "Origin");
        assert_eq!(
            headers.list_headers(),
            vec![("VARY".to_string(), "Origin".to_string())]
        );

        let headers = headers.delete_header("vary");
        assert!(headers.list_headers().is_empty());
    }

    #[test]
    fn test_display() {
        let headers: Headers = vec![
            ("Host".to_string(), "example.com".to_string()),
            ("Accept".to_string(), "*/*".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(headers.to_string(), "Host: example.com\nAccept: */*\n");
    }
}
