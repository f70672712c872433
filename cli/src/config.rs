//! Immutable run configuration built once from parsed arguments.

use std::path::PathBuf;

use rcurl_core::{ClientOptions, UploadFile};

use crate::args::Args;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub insecure: bool,
    pub verbose: bool,
    pub upload: Option<UploadFile>,
    pub form_fields: Vec<(String, String)>,
    pub url: String,
}

impl Config {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            skip_tls_verify: self.insecure,
            ..ClientOptions::default()
        }
    }

    /// The method actually sent: uploads requested with the default GET go
    /// out as POST, any other method is kept.
    pub fn effective_method(&self) -> &str {
        if self.upload.is_some() && self.method == "GET" {
            "POST"
        } else {
            &self.method
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = CliError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let url = args.url.ok_or(CliError::MissingUrl)?;
        let upload = args.upload.as_deref().map(parse_upload).transpose()?;
        let form_fields = args.form.as_deref().and_then(parse_form_field).into_iter().collect();

        Ok(Config {
            method: args.method,
            headers: parse_headers(&args.headers),
            body: args.data.filter(|data| !data.is_empty()),
            output: args.output.filter(|path| !path.is_empty()).map(PathBuf::from),
            json: args.json,
            insecure: args.insecure,
            verbose: args.verbose,
            upload,
            form_fields,
            url,
        })
    }
}

/// Split each raw `-H` value on newlines into trimmed `(name, value)` pairs.
/// Lines without a colon are skipped.
pub fn parse_headers(raw: &[String]) -> Vec<(String, String)> {
    raw.iter()
        .flat_map(|value| value.split('\n'))
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// `field=@path`
fn parse_upload(raw: &str) -> Result<UploadFile, CliError> {
    let (field, path) = raw.split_once("=@").ok_or(CliError::UploadFormat)?;
    Ok(UploadFile::new(field, path))
}

/// `name=value`; anything else is ignored.
fn parse_form_field(raw: &str) -> Option<(String, String)> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> Result<Config, CliError> {
        let mut full = vec!["rcurl"];
        full.extend_from_slice(argv);
        Config::try_from(Args::parse_from_argv(full).unwrap())
    }

    #[test]
    fn missing_url_is_fatal() {
        assert!(matches!(config(&["-v"]), Err(CliError::MissingUrl)));
    }

    #[test]
    fn headers_split_on_newlines_and_first_colon() {
        let headers = parse_headers(&[
            "Accept: text/plain\nX-Time:  12:30 \nno colon here".to_string(),
            "Authorization:Bearer t".to_string(),
        ]);
        assert_eq!(
            headers,
            vec![
                ("Accept".to_string(), "text/plain".to_string()),
                ("X-Time".to_string(), "12:30".to_string()),
                ("Authorization".to_string(), "Bearer t".to_string()),
            ]
        );
    }

    #[test]
    fn upload_and_form_are_parsed() {
        let cfg = config(&["-F", "avatar=@/tmp/a.png", "-form", "name=bob=x", "http://h/"]).unwrap();
        assert_eq!(cfg.upload, Some(UploadFile::new("avatar", "/tmp/a.png")));
        assert_eq!(cfg.form_fields, vec![("name".to_string(), "bob=x".to_string())]);
        assert_eq!(cfg.effective_method(), "POST");
    }

    #[test]
    fn malformed_upload_is_fatal() {
        assert!(matches!(
            config(&["-F", "avatar=/tmp/a.png", "http://h/"]),
            Err(CliError::UploadFormat)
        ));
    }

    #[test]
    fn form_without_equals_is_ignored() {
        let cfg = config(&["-F", "f=@x", "-form", "novalue", "http://h/"]).unwrap();
        assert!(cfg.form_fields.is_empty());
    }

    #[test]
    fn explicit_non_get_method_survives_upload() {
        let cfg = config(&["-X", "DELETE", "-F", "f=@x", "http://h/"]).unwrap();
        assert_eq!(cfg.effective_method(), "DELETE");
    }

    #[test]
    fn get_without_upload_stays_get() {
        let cfg = config(&["http://h/"]).unwrap();
        assert_eq!(cfg.effective_method(), "GET");
    }

    #[test]
    fn empty_data_means_no_body() {
        let cfg = config(&["-d", "", "http://h/"]).unwrap();
        assert!(cfg.body.is_none());
    }

    #[test]
    fn insecure_maps_to_client_options() {
        let options = config(&["-k", "http://h/"]).unwrap().client_options();
        assert!(options.skip_tls_verify);
        assert!(options.follow_redirects);
    }
}
