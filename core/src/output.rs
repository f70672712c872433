//! Rendering a response for the user.

use std::io::Write;

use crate::error::{Error, Result};
use crate::response::HttpResponse;

/// How a response is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// The body verbatim, followed by a newline.
    Text,
    /// The body as JSON when it decodes, otherwise as text.
    Json { pretty: bool },
}

impl Formatter {
    pub fn new(json: bool) -> Self {
        if json {
            Formatter::Json { pretty: true }
        } else {
            Formatter::Text
        }
    }

    /// Write `response` to `out`.
    ///
    /// With `verbose` set, JSON mode emits the status/headers/body envelope
    /// instead of the decoded body. Text mode ignores `verbose`.
    pub fn render(&self, response: &HttpResponse, verbose: bool, out: &mut impl Write) -> Result<()> {
        match *self {
            Formatter::Text => write_line(out, &response.body),
            Formatter::Json { pretty } if verbose => {
                let envelope = if pretty {
                    response.to_json()?
                } else {
                    response.to_json_compact()?
                };
                write_line(out, envelope.as_bytes())
            }
            Formatter::Json { pretty } => match response.json() {
                Ok(value) => {
                    let encoded = if pretty {
                        serde_json::to_string_pretty(&value)
                    } else {
                        serde_json::to_string(&value)
                    }
                    .map_err(Error::Encode)?;
                    write_line(out, encoded.as_bytes())
                }
                Err(Error::Decode(_)) => write_line(out, &response.body),
                Err(other) => Err(other),
            },
        }
    }
}

fn write_line(out: &mut impl Write, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes)
        .and_then(|()| out.write_all(b"\n"))
        .and_then(|()| out.flush())
        .map_err(Error::io("failed to write output"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::tests::response;

    fn render(formatter: Formatter, verbose: bool, body: &str) -> String {
        let mut out = Vec::new();
        formatter.render(&response(200, body), verbose, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_is_verbatim_with_trailing_newline() {
        assert_eq!(render(Formatter::Text, false, "hello"), "hello\n");
        assert_eq!(render(Formatter::Text, true, r#"{"a":1}"#), "{\"a\":1}\n");
    }

    #[test]
    fn json_body_is_pretty_printed() {
        assert_eq!(
            render(Formatter::new(true), false, r#"{"a":1}"#),
            "{\n  \"a\": 1\n}\n"
        );
    }

    #[test]
    fn non_json_body_falls_back_to_raw_text() {
        assert_eq!(render(Formatter::new(true), false, "not json"), "not json\n");
    }

    #[test]
    fn compact_json_is_one_line() {
        assert_eq!(
            render(Formatter::Json { pretty: false }, false, "{ \"a\" : [1, 2] }"),
            "{\"a\":[1,2]}\n"
        );
    }

    #[test]
    fn verbose_json_wraps_body_as_string() {
        let out = render(Formatter::new(true), true, r#"{"a":1}"#);
        assert!(out.starts_with("{\n  \"status_code\": 200,"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "200 OK");
        assert_eq!(value["body"], r#"{"a":1}"#);
        assert_eq!(value["headers"]["Content-Type"], serde_json::json!(["text/plain"]));
    }

    #[test]
    fn text_keeps_non_utf8_bytes() {
        let mut resp = response(200, "");
        resp.body = vec![0xff, 0x00, 0xfe];
        let mut out = Vec::new();
        Formatter::Text.render(&resp, false, &mut out).unwrap();
        assert_eq!(out, vec![0xff, 0x00, 0xfe, b'\n']);
    }
}
