//! Outgoing request description and conversion into a transport request.
//!
//! # Design
//! `HttpRequest` is plain data: method, URL, headers, and an optional body.
//! Nothing is validated until `build()`, which parses the URL, method, and
//! headers into an `http::Request` that the client can send. Headers use
//! replace semantics: setting a name that is already present (compared
//! case-insensitively, as HTTP does) overwrites the previous value.

use log::debug;
use ureq::http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use ureq::http::{Method, Request, Uri};

use crate::error::{Error, Result};

/// Content type applied when a body is present and none was set explicitly.
pub const DEFAULT_BODY_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An HTTP request described as plain data.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Set `name` to `value`, replacing any earlier value for the same name.
    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => *entry = (name.to_string(), value.to_string()),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Validate and convert into a transport request.
    ///
    /// A request without a body carries an empty `Vec`.
    pub fn build(&self) -> Result<Request<Vec<u8>>> {
        let uri = parse_absolute_url(&self.url)?;
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|_| Error::Parse(format!("invalid method {:?}", self.method)))?;

        let mut request = Request::new(self.body.clone().unwrap_or_default());
        *request.method_mut() = method;
        *request.uri_mut() = uri;

        let headers = request.headers_mut();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Parse(format!("invalid header name {name:?}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::Parse(format!("invalid value for header {name}")))?;
            headers.insert(name, value);
        }
        if self.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(DEFAULT_BODY_CONTENT_TYPE),
            );
        }

        debug!("built {} {}", request.method(), request.uri());
        Ok(request)
    }
}

/// Parse `url`, requiring a scheme and a host.
pub fn parse_absolute_url(url: &str) -> Result<Uri> {
    let uri: Uri = url
        .parse()
        .map_err(|e| Error::Parse(format!("invalid URL {url:?}: {e}")))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(Error::Parse(format!("URL {url:?} is not absolute")));
    }
    Ok(uri)
}

/// Render a header name the way HTTP/1.1 tools conventionally print it,
/// e.g. `content-type` becomes `Content-Type`.
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}
