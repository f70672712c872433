//! Verbose request/response trace lines (`> ...` and `< ...`).

use std::io::{self, Write};

use ureq::http::Request;

use crate::http::canonical_header_name;
use crate::response::HttpResponse;

/// `> METHOD URL`, one `> Name: Value` line per header value, then `>`.
pub fn write_request_trace<B>(out: &mut impl Write, request: &Request<B>) -> io::Result<()> {
    writeln!(out, "> {} {}", request.method(), request.uri())?;
    for (name, value) in request.headers() {
        writeln!(
            out,
            "> {}: {}",
            canonical_header_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes())
        )?;
    }
    writeln!(out, ">")
}

/// `< STATUS`, one `< Name: Value` line per header value, then `<`.
pub fn write_response_trace(out: &mut impl Write, response: &HttpResponse) -> io::Result<()> {
    writeln!(out, "< {}", response.status)?;
    for (name, values) in &response.headers {
        for value in values {
            writeln!(out, "< {name}: {value}")?;
        }
    }
    writeln!(out, "<")
}
