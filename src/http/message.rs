//! HTTP method and version types

use super::{Error, Result};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// HTTP methods
///
/// `Custom` carries any method name read off the wire. A custom name that
/// spells one of the canonical methods is the same method:
/// `Method::Custom("GET".into()) == Method::Get`. Equality, ordering and
/// hashing all compare the [`normalize`](Method::normalize)d form.
#[derive(Debug, Clone)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Trace,
    Options,
    Connect,
    Patch,
    Custom(String),
}

const CANONICAL: [(&str, Method); 9] = [
    ("GET", Method::Get),
    ("HEAD", Method::Head),
    ("POST", Method::Post),
    ("PUT", Method::Put),
    ("DELETE", Method::Delete),
    ("TRACE", Method::Trace),
    ("OPTIONS", Method::Options),
    ("CONNECT", Method::Connect),
    ("PATCH", Method::Patch),
];

impl Method {
    /// Build a method from raw wire bytes
    ///
    /// Canonical names (case-sensitive) map to their variant; anything else
    /// becomes `Custom`, lossily decoded as UTF-8.
    pub fn from_bytes(raw: &[u8]) -> Self {
        Method::normalize(Method::Custom(String::from_utf8_lossy(raw).into_owned()))
    }

    /// Map a `Custom` method naming a canonical method to that variant
    pub fn normalize(self) -> Self {
        match self {
            Method::Custom(name) => match canonical_index(&name) {
                Some(idx) => CANONICAL[idx].1.clone(),
                None => Method::Custom(name),
            },
            other => other,
        }
    }

    /// Convert method to string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Trace => "TRACE",
            Method::Options => "OPTIONS",
            Method::Connect => "CONNECT",
            Method::Patch => "PATCH",
            Method::Custom(name) => name,
        }
    }

    /// Comparison key of the normalized form, without allocating
    fn key(&self) -> (usize, &str) {
        let tag = match self {
            Method::Get => 0,
            Method::Head => 1,
            Method::Post => 2,
            Method::Put => 3,
            Method::Delete => 4,
            Method::Trace => 5,
            Method::Options => 6,
            Method::Connect => 7,
            Method::Patch => 8,
            Method::Custom(name) => {
                return match canonical_index(name) {
                    Some(idx) => (idx, ""),
                    None => (CANONICAL.len(), name.as_str()),
                };
            }
        };
        (tag, "")
    }
}

fn canonical_index(name: &str) -> Option<usize> {
    CANONICAL.iter().position(|(n, _)| *n == name)
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Method {}

impl PartialOrd for Method {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Method {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Method::Custom(s.to_string()).normalize())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP version as a `(major, minor)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpVersion {
    pub major: u16,
    pub minor: u16,
}

impl HttpVersion {
    pub const HTTP_10: HttpVersion = HttpVersion { major: 1, minor: 0 };
    pub const HTTP_11: HttpVersion = HttpVersion { major: 1, minor: 1 };

    /// Create a version from its components
    pub const fn new(major: u16, minor: u16) -> Self {
        HttpVersion { major, minor }
    }
}

impl FromStr for HttpVersion {
    type Err = Error;

    /// Parse `HTTP/<major>.<minor>`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_string());

        let digits = s.strip_prefix("HTTP/").ok_or_else(invalid)?;
        let (major, minor) = digits.split_once('.').ok_or_else(invalid)?;
        let major = major.parse().map_err(|_| invalid())?;
        let minor = minor.parse().map_err(|_| invalid())?;

        Ok(HttpVersion { major, minor })
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        HttpVersion::HTTP_11
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(m: &Method) -> u64 {
        let mut hasher = DefaultHasher::new();
        m.hash(&mut hasher);
        hasher.finish()
    }

    fn all_methods() -> Vec<Method> {
        let mut methods: Vec<Method> = CANONICAL.iter().map(|(_, m)| m.clone()).collect();
        for (name, _) in CANONICAL {
            methods.push(Method::Custom(name.to_string()));
        }
        methods.push(Method::Custom("PROPFIND".to_string()));
        methods.push(Method::Custom("get".to_string()));
        methods.push(Method::Custom(String::new()));
        methods
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert!(matches!(
            "BREW".parse::<Method>().unwrap(),
            Method::Custom(name) if name == "BREW"
        ));
    }

    #[test]
    fn test_from_bytes() {
        assert!(matches!(Method::from_bytes(b"PATCH"), Method::Patch));
        assert!(matches!(Method::from_bytes(b"MKCOL"), Method::Custom(_)));
    }

    #[test]
    fn test_custom_canonical_equals_variant() {
        assert_eq!(Method::Custom("GET".to_string()), Method::Get);
        assert_eq!(Method::Delete, Method::Custom("DELETE".to_string()));
        assert_ne!(Method::Custom("get".to_string()), Method::Get);
        assert_eq!(
            hash_of(&Method::Custom("OPTIONS".to_string())),
            hash_of(&Method::Options)
        );
    }

    #[test]
    fn test_normalize_idempotent() {
        for m in all_methods() {
            let once = m.clone().normalize();
            let twice = once.clone().normalize();
            assert_eq!(once, twice);
            assert_eq!(once.as_str(), twice.as_str());
            assert_eq!(once, m);
        }
    }

    #[test]
    fn test_normalize_rewrites_variant() {
        assert!(matches!(Method::Custom("PUT".to_string()).normalize(), Method::Put));
    }

    #[test]
    fn test_ordering() {
        assert!(Method::Get < Method::Head);
        assert!(Method::Connect < Method::Patch);
        assert!(Method::Patch < Method::Custom("ANY".to_string()));
        assert!(Method::Custom("A".to_string()) < Method::Custom("B".to_string()));
        assert_eq!(
            Method::Custom("TRACE".to_string()).cmp(&Method::Trace),
            Ordering::Equal
        );
        assert!(Method::Custom("HEAD".to_string()) < Method::Post);
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("HTTP/1.0".parse::<HttpVersion>().unwrap(), HttpVersion::HTTP_10);
        assert_eq!("HTTP/1.1".parse::<HttpVersion>().unwrap(), HttpVersion::HTTP_11);
        assert_eq!("HTTP/2.0".parse::<HttpVersion>().unwrap(), HttpVersion::new(2, 0));
        assert!("HTTP/x.1".parse::<HttpVersion>().is_err());
        assert!("HTTP1.1".parse::<HttpVersion>().is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(HttpVersion::HTTP_10.to_string(), "HTTP/1.0");
        assert_eq!(HttpVersion::default().to_string(), "HTTP/1.1");
    }
}
