//! `multipart/form-data` body construction (RFC 7578).
//!
//! Parts are written in the order they are added, so the encoded body is
//! reproducible apart from the random boundary.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::http::HttpRequest;

/// A file to send as one part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub field_name: String,
    pub file_path: PathBuf,
}

impl UploadFile {
    pub fn new(field_name: &str, file_path: impl Into<PathBuf>) -> Self {
        Self {
            field_name: field_name.to_string(),
            file_path: file_path.into(),
        }
    }
}

/// Incrementally encoded multipart body.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::with_boundary(Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Stream the file at `path` into a file part named `field_name`, using
    /// the file's base name as the part's filename.
    pub fn add_file(&mut self, field_name: &str, path: &Path) -> Result<&mut Self> {
        let file_error = |source| Error::File {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(file_error)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n",
            escape_quotes(field_name),
            escape_quotes(&filename),
        ));
        let copied = io::copy(&mut file, &mut self.body).map_err(file_error)?;
        debug!("multipart: {} bytes from {} as {field_name:?}", copied, path.display());
        Ok(self)
    }

    /// Append a plain text field.
    pub fn add_text(&mut self, name: &str, value: &str) -> &mut Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n",
            escape_quotes(name)
        ));
        self.body.extend_from_slice(value.as_bytes());
        self
    }

    /// Close the body, returning the `Content-Type` header value and the bytes.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        if !self.body.is_empty() {
            self.body.extend_from_slice(b"\r\n");
        }
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }

    fn open_part(&mut self, part_headers: &str) {
        if !self.body.is_empty() {
            self.body.extend_from_slice(b"\r\n");
        }
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(part_headers.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a request whose body carries `files` followed by `fields`.
///
/// `method` is used as given; callers decide whether an upload should be
/// upgraded from GET to POST.
pub fn build_multipart_request(
    method: &str,
    url: &str,
    files: &[UploadFile],
    fields: &[(String, String)],
) -> Result<HttpRequest> {
    let mut form = MultipartForm::new();
    for file in files {
        form.add_file(&file.field_name, &file.file_path)?;
    }
    for (name, value) in fields {
        form.add_text(name, value);
    }
    let (content_type, body) = form.finish();

    let mut request = HttpRequest::new(method, url);
    request.set_header("Content-Type", &content_type).set_body(body);
    Ok(request)
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
