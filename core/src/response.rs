//! Fully buffered HTTP response.
//!
//! # Design
//! The transport body is read to the end exactly once, when the response is
//! wrapped, and the stream is dropped before `from_transport` returns on
//! every path. Afterwards the response is plain data.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use log::debug;
use serde::Serialize;
use ureq::http::{HeaderMap, StatusCode};

use crate::error::{Error, Result};
use crate::http::canonical_header_name;

/// Status, headers, and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    /// Code and reason phrase, e.g. `200 OK`.
    pub status: String,
    /// Canonicalized header names; a name maps to every value received.
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    status_code: u16,
    status: &'a str,
    headers: &'a BTreeMap<String, Vec<String>>,
    body: Cow<'a, str>,
}

impl HttpResponse {
    /// Consume a transport response, reading its whole body into memory.
    pub fn from_transport(response: ureq::http::Response<ureq::Body>) -> Result<Self> {
        let (parts, body) = response.into_parts();
        let reader = body.into_with_config().limit(u64::MAX).reader();
        Self::from_parts(parts.status, &parts.headers, reader)
    }

    /// Wrap a status and header map, draining `body` to the end.
    pub fn from_parts(status: StatusCode, headers: &HeaderMap, mut body: impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)
            .map_err(Error::io("failed to read response body"))?;

        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            map.entry(canonical_header_name(name.as_str()))
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        debug!("response {} with {} body bytes", status, buf.len());
        Ok(Self {
            status_code: status.as_u16(),
            status: status_line(status),
            headers: map,
            body: buf,
        })
    }

    /// First value of header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_name(name))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON. Failure is expected for non-JSON bodies.
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    /// Wrap status, headers, and the body as text into one JSON object. The
    /// body is embedded as a string even when it is JSON itself.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.envelope()).map_err(Error::Encode)
    }

    pub(crate) fn to_json_compact(&self) -> Result<String> {
        serde_json::to_string(&self.envelope()).map_err(Error::Encode)
    }

    fn envelope(&self) -> Envelope<'_> {
        Envelope {
            status_code: self.status_code,
            status: &self.status,
            headers: &self.headers,
            body: self.text(),
        }
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.status, self.text())
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
