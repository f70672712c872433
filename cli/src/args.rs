//! Command-line surface.

use std::ffi::OsString;

use clap::Parser;

/// Long flags that are also accepted with a single dash (`-json`).
const SINGLE_DASH_LONG: &[&str] = &["json", "form"];

#[derive(Clone, Debug, Parser)]
#[command(
    name = "rcurl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Make an HTTP request and print the response",
    override_usage = "rcurl [options] URL"
)]
pub struct Args {
    /// HTTP method to use
    #[arg(short = 'X', value_name = "METHOD", default_value = "GET")]
    pub method: String,

    /// Headers as `Name: Value`; several may be joined with newlines
    #[arg(short = 'H', value_name = "HEADERS")]
    pub headers: Vec<String>,

    /// Data to send in the request body
    #[arg(short = 'd', value_name = "DATA")]
    pub data: Option<String>,

    /// Write output to file instead of stdout
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<String>,

    /// Format output as JSON
    #[arg(long)]
    pub json: bool,

    /// Allow insecure TLS connections
    #[arg(short = 'k')]
    pub insecure: bool,

    /// Print request and response headers
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Upload file, as `fieldname=@filename`
    #[arg(short = 'F', value_name = "FIELD=@FILE")]
    pub upload: Option<String>,

    /// Extra form field for uploads, as `name=value`
    #[arg(long, value_name = "NAME=VALUE")]
    pub form: Option<String>,

    /// Target URL
    pub url: Option<String>,
}

impl Args {
    /// Parse `argv` (including the program name) after rewriting
    /// single-dash long flags.
    pub fn parse_from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize(argv))
    }
}

/// Rewrite `-json` to `--json` and `-form` / `-form=x` to `--form` / `--form=x`.
/// Everything after `--` is left alone.
pub fn normalize<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    argv.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_single_dash_long(rest) => {
                    OsString::from(format!("-{s}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    SINGLE_DASH_LONG.contains(&name)
}
