//! Response bodies
//!
//! A response body is either a writer that streams its content into a sink,
//! or a file (optionally a byte range of it) to be copied into the sink.
//! [`ResponseBody::drive`] materializes either one.

use super::{Error, Result};
use bytes::Bytes;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// A procedure writing a body's full content into an output sink
pub type BodyWriter = Arc<dyn Fn(&mut dyn Write) -> io::Result<()> + Send + Sync>;

/// Wrap a closure as a [`BodyWriter`]
pub fn body_writer<F>(f: F) -> BodyWriter
where
    F: Fn(&mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// HTTP response body
#[derive(Clone)]
pub enum ResponseBody {
    /// Content produced by a writer
    Stream(BodyWriter),
    /// Content read from a file; `range` is `(start, end)` with `end` exclusive
    SendFile {
        path: PathBuf,
        range: Option<(u64, u64)>,
    },
}

impl ResponseBody {
    /// A streamed body
    pub fn stream<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
    {
        ResponseBody::Stream(body_writer(f))
    }

    /// A body that writes nothing
    pub fn empty() -> Self {
        ResponseBody::stream(|_| Ok(()))
    }

    /// A streamed body with fixed content
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data: Bytes = data.into();
        ResponseBody::stream(move |sink| sink.write_all(&data))
    }

    /// Send a whole file
    pub fn send_file(path: impl Into<PathBuf>) -> Self {
        ResponseBody::SendFile {
            path: path.into(),
            range: None,
        }
    }

    /// Send bytes `start..end` of a file
    pub fn send_file_range(path: impl Into<PathBuf>, start: u64, end: u64) -> Self {
        ResponseBody::SendFile {
            path: path.into(),
            range: Some((start, end)),
        }
    }

    /// Write the whole body into `sink` and hand the sink back
    ///
    /// File failures (missing, unreadable or shorter than the requested
    /// range) are returned as [`Error::Io`]; nothing is truncated silently.
    /// An inverted range is [`Error::InvalidRange`], also after [`map`](Self::map).
    pub fn drive<W: Write>(&self, mut sink: W) -> Result<W> {
        match self {
            ResponseBody::Stream(writer) => writer(&mut sink).map_err(writer_error)?,
            ResponseBody::SendFile { path, range } => {
                check_range(*range)?;
                copy_file(path, *range, &mut sink)?;
            }
        }
        Ok(sink)
    }

    /// Turn any body into a writer with the same output
    pub fn into_writer(self) -> BodyWriter {
        match self {
            ResponseBody::Stream(writer) => writer,
            ResponseBody::SendFile { path, range } => body_writer(move |sink| {
                check_range(range).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                copy_file(&path, range, sink).map(|_| ())
            }),
        }
    }

    /// Wrap the body's effective output with `f`, yielding a `Stream`
    ///
    /// `f` receives the writer of the original body, whatever its
    /// representation, so a filter applies the same way to a stream and to a
    /// file.
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(BodyWriter) -> BodyWriter,
    {
        ResponseBody::Stream(f(self.into_writer()))
    }
}

/// Recover a range error a file writer had to carry inside an `io::Error`
fn writer_error(e: io::Error) -> Error {
    let range = e
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<Error>())
        .and_then(|inner| match inner {
            Error::InvalidRange { start, end } => Some((*start, *end)),
            _ => None,
        });

    match range {
        Some((start, end)) => Error::InvalidRange { start, end },
        None => Error::Io(e),
    }
}

fn check_range(range: Option<(u64, u64)>) -> Result<()> {
    match range {
        Some((start, end)) if start > end => Err(Error::InvalidRange { start, end }),
        _ => Ok(()),
    }
}

/// Copy a file, or `start..end` of it, into `sink`
///
/// The file handle is dropped on every return path.
fn copy_file(path: &Path, range: Option<(u64, u64)>, sink: &mut dyn Write) -> io::Result<u64> {
    let mut file = File::open(path)?;
    debug!(path = %path.display(), ?range, "sending file");

    let copied = match range {
        None => io::copy(&mut file, sink)?,
        Some((start, end)) => {
            if start > 0 {
                file.seek(SeekFrom::Start(start))?;
            }
            let wanted = end - start;
            let copied = io::copy(&mut Read::by_ref(&mut file).take(wanted), sink)?;
            if copied < wanted {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "{} ended after {} of {} requested bytes",
                        path.display(),
                        copied,
                        wanted
                    ),
                ));
            }
            copied
        }
    };

    trace!(path = %path.display(), bytes = copied, "file sent");
    Ok(copied)
}

impl Default for ResponseBody {
    fn default() -> Self {
        ResponseBody::empty()
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Stream(_) => f.write_str("Stream(..)"),
            ResponseBody::SendFile { path, range } => f
                .debug_struct("SendFile")
                .field("path", path)
                .field("range", range)
                .finish(),
        }
    }
}
