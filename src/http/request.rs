//! HTTP request
//!
//! A [`Request`] is built once by the transport layer and then handed through
//! handler code by value. Field replacement helpers consume the request and
//! return the modified one; none of them touch the body stream.

use super::{Cookie, HasHeaders, Headers, HttpVersion, Method, BODY_CHUNK_SIZE};
use bytes::{Bytes, BytesMut};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read};
use std::net::{Ipv4Addr, SocketAddr};

/// Request parameters: name to values in arrival order, iterated by name
pub type Params = BTreeMap<Bytes, Vec<Bytes>>;

/// Incoming request body
///
/// A forward-only sequence of byte chunks with a single consumer. Once a
/// chunk has been taken it cannot be read again.
pub struct RequestBody {
    chunks: Box<dyn Iterator<Item = io::Result<Bytes>> + Send>,
}

impl RequestBody {
    /// A body with no content
    pub fn empty() -> Self {
        RequestBody {
            chunks: Box::new(std::iter::empty()),
        }
    }

    /// A body yielding the given chunks in order
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Bytes>,
        I::IntoIter: Send + 'static,
    {
        RequestBody {
            chunks: Box::new(chunks.into_iter().map(Ok)),
        }
    }

    /// A body read from `reader` in chunks of [`BODY_CHUNK_SIZE`] bytes
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        RequestBody {
            chunks: Box::new(ReaderChunks {
                reader: Some(reader),
            }),
        }
    }

    /// Drain the remaining chunks into one buffer
    pub fn into_bytes(self) -> io::Result<Bytes> {
        let mut buf = BytesMut::new();
        for chunk in self {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Iterator for RequestBody {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        RequestBody::empty()
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestBody(..)")
    }
}

struct ReaderChunks<R> {
    reader: Option<R>,
}

impl<R: Read> Iterator for ReaderChunks<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let mut buf = vec![0u8; BODY_CHUNK_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(Bytes::from(buf)));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.reader = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// HTTP request
///
/// `uri` always equals `context_path ++ path_info`, followed by
/// `?query_string` when the query string is not empty.
pub struct Request {
    host_name: Bytes,
    client_addr: SocketAddr,
    server_addr: SocketAddr,
    local_hostname: Bytes,
    secure: bool,
    headers: Headers,
    body: RequestBody,
    content_length: Option<u64>,
    method: Method,
    version: HttpVersion,
    cookies: Vec<Cookie>,
    path_info: Bytes,
    context_path: Bytes,
    uri: Bytes,
    query_string: Bytes,
    params: Params,
    query_params: Params,
    post_params: Params,
    // `params` is still the merge of the two source maps
    params_derived: bool,
}

impl Request {
    /// Create a builder for constructing requests
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Host the client asked for
    pub fn host_name(&self) -> &Bytes {
        &self.host_name
    }

    pub fn client_addr(&self) -> SocketAddr {
        self.client_addr
    }

    pub fn client_port(&self) -> u16 {
        self.client_addr.port()
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn server_port(&self) -> u16 {
        self.server_addr.port()
    }

    /// Host name of the machine serving the request
    pub fn local_hostname(&self) -> &Bytes {
        &self.local_hostname
    }

    /// Whether the request arrived over TLS
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Request body content length, if the client declared one
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// Cookies in the order the client sent them, duplicates included
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Look up a cookie by name; the last one sent wins
    pub fn cookie(&self, name: &[u8]) -> Option<&Cookie> {
        self.cookies.iter().rev().find(|c| &c.name[..] == name)
    }

    /// Path below the handler's mount point
    pub fn path_info(&self) -> &Bytes {
        &self.path_info
    }

    /// Mount point of the handler
    pub fn context_path(&self) -> &Bytes {
        &self.context_path
    }

    pub fn uri(&self) -> &Bytes {
        &self.uri
    }

    /// Query string without the leading `?`
    pub fn query_string(&self) -> &Bytes {
        &self.query_string
    }

    /// Query and post parameters together
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn query_params(&self) -> &Params {
        &self.query_params
    }

    pub fn post_params(&self) -> &Params {
        &self.post_params
    }

    pub fn param(&self, name: &[u8]) -> Option<&[Bytes]> {
        self.params.get(name).map(Vec::as_slice)
    }

    pub fn query_param(&self, name: &[u8]) -> Option<&[Bytes]> {
        self.query_params.get(name).map(Vec::as_slice)
    }

    pub fn post_param(&self, name: &[u8]) -> Option<&[Bytes]> {
        self.post_params.get(name).map(Vec::as_slice)
    }

    /// Borrow the body stream for reading
    pub fn body_mut(&mut self) -> &mut RequestBody {
        &mut self.body
    }

    /// Take the body stream, leaving an empty one behind
    pub fn take_body(&mut self) -> RequestBody {
        std::mem::take(&mut self.body)
    }

    /// Replace the merged parameters with `f` applied to them
    ///
    /// From then on the merged parameters are kept as given and are no
    /// longer recomputed when a source map is replaced.
    pub fn modify_params<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Params) -> Params,
    {
        self.params = f(std::mem::take(&mut self.params));
        self.params_derived = false;
        self
    }

    /// Set the values of one merged parameter
    pub fn set_param(self, name: impl Into<Bytes>, values: Vec<Bytes>) -> Self {
        let name = name.into();
        self.modify_params(|mut params| {
            params.insert(name, values);
            params
        })
    }

    /// Replace the query parameters
    ///
    /// Merged parameters derived from the source maps are merged again;
    /// externally supplied or modified ones are left alone.
    pub fn with_query_params(mut self, query_params: Params) -> Self {
        self.query_params = query_params;
        self.remerge_params()
    }

    /// Replace the post parameters; see [`with_query_params`](Self::with_query_params)
    pub fn with_post_params(mut self, post_params: Params) -> Self {
        self.post_params = post_params;
        self.remerge_params()
    }

    fn remerge_params(mut self) -> Self {
        if self.params_derived {
            self.params = merge_params(&self.query_params, &self.post_params);
        }
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_version(mut self, version: HttpVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_content_length(mut self, content_length: Option<u64>) -> Self {
        self.content_length = content_length;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_path_info(mut self, path_info: impl Into<Bytes>) -> Self {
        self.path_info = path_info.into();
        self.refresh_uri()
    }

    pub fn with_context_path(mut self, context_path: impl Into<Bytes>) -> Self {
        self.context_path = context_path.into();
        self.refresh_uri()
    }

    pub fn with_query_string(mut self, query_string: impl Into<Bytes>) -> Self {
        self.query_string = query_string.into();
        self.refresh_uri()
    }

    fn refresh_uri(mut self) -> Self {
        self.uri = build_uri(&self.context_path, &self.path_info, &self.query_string);
        self
    }
}

fn build_uri(context_path: &[u8], path_info: &[u8], query_string: &[u8]) -> Bytes {
    let mut uri =
        BytesMut::with_capacity(context_path.len() + path_info.len() + query_string.len() + 1);
    uri.extend_from_slice(context_path);
    uri.extend_from_slice(path_info);
    if !query_string.is_empty() {
        uri.extend_from_slice(b"?");
        uri.extend_from_slice(query_string);
    }
    uri.freeze()
}

/// Merge parameter maps; on a name present in both, `post` wins
fn merge_params(query: &Params, post: &Params) -> Params {
    let mut merged = query.clone();
    for (name, values) in post {
        merged.insert(name.clone(), values.clone());
    }
    merged
}

impl HasHeaders for Request {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("version", &self.version)
            .field("host_name", &self.host_name)
            .field("client_addr", &self.client_addr)
            .field("server_addr", &self.server_addr)
            .field("secure", &self.secure)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .field("cookies", &self.cookies)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} {}",
            self.method,
            String::from_utf8_lossy(&self.uri),
            self.version
        )?;
        writeln!(f, "host: {}", String::from_utf8_lossy(&self.host_name))?;
        writeln!(f, "client: {}", self.client_addr)?;
        writeln!(f, "server: {}", self.server_addr)?;
        write!(f, "{}", self.headers)?;
        for (name, values) in &self.params {
            let values: Vec<_> = values.iter().map(|v| String::from_utf8_lossy(v)).collect();
            writeln!(f, "param {}: {}", String::from_utf8_lossy(name), values.join(", "))?;
        }
        Ok(())
    }
}

/// Builder for HTTP requests
///
/// When no merged parameter map is given, `build` merges the query and post
/// parameters with post values replacing query values of the same name.
#[derive(Debug)]
pub struct RequestBuilder {
    host_name: Bytes,
    client_addr: SocketAddr,
    server_addr: SocketAddr,
    local_hostname: Bytes,
    secure: bool,
    headers: Headers,
    body: RequestBody,
    content_length: Option<u64>,
    method: Method,
    version: HttpVersion,
    cookies: Vec<Cookie>,
    path_info: Bytes,
    context_path: Bytes,
    query_string: Bytes,
    params: Option<Params>,
    query_params: Params,
    post_params: Params,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        let localhost = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
        RequestBuilder {
            host_name: Bytes::from_static(b"localhost"),
            client_addr: localhost,
            server_addr: localhost,
            local_hostname: Bytes::from_static(b"localhost"),
            secure: false,
            headers: Headers::new(),
            body: RequestBody::empty(),
            content_length: None,
            method: Method::Get,
            version: HttpVersion::default(),
            cookies: Vec::new(),
            path_info: Bytes::new(),
            context_path: Bytes::from_static(b"/"),
            query_string: Bytes::new(),
            params: None,
            query_params: Params::new(),
            post_params: Params::new(),
        }
    }
}

impl RequestBuilder {
    pub fn host_name(mut self, host_name: impl Into<Bytes>) -> Self {
        self.host_name = host_name.into();
        self
    }

    pub fn client_addr(mut self, addr: SocketAddr) -> Self {
        self.client_addr = addr;
        self
    }

    pub fn server_addr(mut self, addr: SocketAddr) -> Self {
        self.server_addr = addr;
        self
    }

    pub fn local_hostname(mut self, local_hostname: impl Into<Bytes>) -> Self {
        self.local_hostname = local_hostname.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn version(mut self, version: HttpVersion) -> Self {
        self.version = version;
        self
    }

    pub fn cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn path_info(mut self, path_info: impl Into<Bytes>) -> Self {
        self.path_info = path_info.into();
        self
    }

    pub fn context_path(mut self, context_path: impl Into<Bytes>) -> Self {
        self.context_path = context_path.into();
        self
    }

    pub fn query_string(mut self, query_string: impl Into<Bytes>) -> Self {
        self.query_string = query_string.into();
        self
    }

    /// Supply the merged parameters instead of deriving them
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn query_params(mut self, query_params: Params) -> Self {
        self.query_params = query_params;
        self
    }

    pub fn post_params(mut self, post_params: Params) -> Self {
        self.post_params = post_params;
        self
    }

    /// Build the request
    pub fn build(self) -> Request {
        let uri = build_uri(&self.context_path, &self.path_info, &self.query_string);
        let params_derived = self.params.is_none();
        let params = self
            .params
            .unwrap_or_else(|| merge_params(&self.query_params, &self.post_params));

        Request {
            host_name: self.host_name,
            client_addr: self.client_addr,
            server_addr: self.server_addr,
            local_hostname: self.local_hostname,
            secure: self.secure,
            headers: self.headers,
            body: self.body,
            content_length: self.content_length,
            method: self.method,
            version: self.version,
            cookies: self.cookies,
            path_info: self.path_info,
            context_path: self.context_path,
            uri,
            query_string: self.query_string,
            params,
            query_params: self.query_params,
            post_params: self.post_params,
            params_derived,
        }
    }
}
