//! Error types for the request/response pipeline.
//!
//! # Design
//! One variant per failure class. `Decode` is the only recoverable one:
//! the output formatter catches it and falls back to raw text. Transport
//! failures (DNS, refused connection, TLS, timeout) are deliberately kept in
//! a single `Transport` variant; callers only need to know the round trip
//! failed.

use std::io;
use std::path::PathBuf;

/// Errors returned by the builders, the client, and the output layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad URL, method, or header name/value.
    #[error("invalid request: {0}")]
    Parse(String),

    /// An input file (upload source) could not be opened or read.
    #[error("failed to open file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Network, TLS, or timeout failure while executing a request.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// A value could not be serialized to JSON.
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Writing to disk or to an output stream failed.
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Error {
        move |source| Error::Io { context, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
