//! Fatal errors of the command-line driver.
//!
//! Every variant maps to exit code 1; the message carries the stage that
//! failed so the user can tell a bad URL from a refused connection.

use rcurl_core::Error;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Error: URL is required")]
    MissingUrl,

    #[error("Error: File upload format should be fieldname=@filename")]
    UploadFormat,

    #[error("Error creating multipart request: {0}")]
    Multipart(#[source] Error),

    #[error("Error building request: {0}")]
    Build(#[source] Error),

    #[error("Error executing request: {0}")]
    Execute(#[source] Error),

    #[error("Error parsing response: {0}")]
    Response(#[source] Error),

    #[error("Error creating output file: {0}")]
    OutputFile(#[source] Error),

    #[error("Error downloading content: {0}")]
    Download(#[source] Error),

    #[error("Error formatting JSON: {0}")]
    Format(#[source] Error),

    #[error("Error writing output: {0}")]
    Write(#[source] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Classify a rendering failure: encoding problems are formatting errors,
/// anything else is a failed write.
pub(crate) fn render_error(err: Error) -> CliError {
    match err {
        Error::Io { source, .. } => CliError::Write(source),
        other => CliError::Format(other),
    }
}
