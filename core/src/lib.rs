//! Request/response pipeline for a small curl-like HTTP client.
//!
//! # Overview
//! Builds a request (`HttpRequest` or a multipart upload), executes it with
//! `HttpClient`, buffers the result into an `HttpResponse`, and renders it
//! with a `Formatter` or writes the body to disk with `download`.
//!
//! # Design
//! - Everything is synchronous and single-threaded; the only blocking call
//!   is the round trip inside `HttpClient::send`.
//! - Builders are plain data until `build()`, which is the single place URL,
//!   method, and headers are validated.
//! - Nothing here exits the process; the binary maps `Error` to exit codes.

pub mod client;
pub mod download;
pub mod error;
pub mod http;
pub mod multipart;
pub mod output;
pub mod response;
pub mod trace;

pub use client::{ClientOptions, HttpClient};
pub use download::download;
pub use error::{Error, Result};
pub use http::HttpRequest;
pub use multipart::{build_multipart_request, MultipartForm, UploadFile};
pub use output::Formatter;
pub use response::HttpResponse;
