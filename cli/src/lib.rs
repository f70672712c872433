//! Command-line driver: flags in, one HTTP request out, response rendered.
//!
//! # Design
//! `Args` is parsed once and turned into an immutable `Config`, which is
//! the only input to `run`. `run` writes everything meant for the user
//! (trace lines and the formatted response) to the writer it is given, so
//! the whole pipeline can be exercised in tests without a process.

pub mod args;
pub mod config;
pub mod error;

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use rcurl_core::http::HttpRequest;
use rcurl_core::trace::{write_request_trace, write_response_trace};
use rcurl_core::{build_multipart_request, download, Formatter, HttpClient, HttpResponse};

pub use args::Args;
pub use config::Config;
pub use error::CliError;

/// Build, send, and render the request described by `config`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<(), CliError> {
    let client = HttpClient::new(config.client_options());

    let request = prepare_request(config)?.build().map_err(CliError::Build)?;
    if config.verbose {
        write_request_trace(out, &request).map_err(CliError::Write)?;
    }

    let transport = client.send(request).map_err(CliError::Execute)?;
    let response = HttpResponse::from_transport(transport).map_err(CliError::Response)?;
    if config.verbose {
        write_response_trace(out, &response).map_err(CliError::Write)?;
    }

    let formatter = Formatter::new(config.json);
    match &config.output {
        Some(path) if !config.json => {
            download(response.body.as_slice(), path).map_err(CliError::Download)?;
            info!("saved response body to {}", path.display());
            if config.verbose {
                writeln!(out, "Downloaded content to {}", path.display()).map_err(CliError::Write)?;
            }
            Ok(())
        }
        Some(path) => render_to_file(formatter, &response, config.verbose, path),
        None => formatter
            .render(&response, config.verbose, out)
            .map_err(error::render_error),
    }
}

/// The request before validation: multipart when uploading, otherwise the
/// raw body. Header flags are applied last so they override defaults such as
/// the multipart content type.
fn prepare_request(config: &Config) -> Result<HttpRequest, CliError> {
    let mut request = match &config.upload {
        Some(upload) => build_multipart_request(
            config.effective_method(),
            &config.url,
            std::slice::from_ref(upload),
            &config.form_fields,
        )
        .map_err(CliError::Multipart)?,
        None => {
            let mut request = HttpRequest::new(&config.method, &config.url);
            if let Some(body) = &config.body {
                request.set_body(body.as_bytes());
            }
            request
        }
    };
    for (name, value) in &config.headers {
        request.set_header(name, value);
    }
    debug!("prepared {} {}", request.method, request.url);
    Ok(request)
}

fn render_to_file(
    formatter: Formatter,
    response: &HttpResponse,
    verbose: bool,
    path: &Path,
) -> Result<(), CliError> {
    let mut file = rcurl_core::download::create_output_file(path).map_err(CliError::OutputFile)?;
    formatter
        .render(response, verbose, &mut file)
        .map_err(error::render_error)?;
    info!("wrote formatted response to {}", path.display());
    Ok(())
}
