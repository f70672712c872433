//! Blocking HTTP client over a `ureq` agent.
//!
//! # Design
//! `ClientOptions` is applied once when the agent is built; nothing about
//! TLS verification, redirects, or the timeout can change per request. The
//! client never turns a 4xx/5xx status into an error: every status the
//! server sends back is returned to the caller as data.

use std::time::Duration;

use log::debug;
use ureq::http::{Request, Response};
use ureq::tls::TlsConfig;
use ureq::{Agent, Body};

use crate::error::Result;
use crate::response::HttpResponse;

/// Redirects followed when `follow_redirects` is on.
const MAX_REDIRECTS: u32 = 10;

/// Fixed per-client transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Bounds the whole round trip: connect, headers, and body.
    pub timeout: Duration,
    pub skip_tls_verify: bool,
    pub follow_redirects: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            skip_tls_verify: false,
            follow_redirects: true,
        }
    }
}

/// Executes built requests.
#[derive(Clone)]
pub struct HttpClient {
    agent: Agent,
    options: ClientOptions,
}

impl HttpClient {
    pub fn new(options: ClientOptions) -> Self {
        let max_redirects = if options.follow_redirects { MAX_REDIRECTS } else { 0 };
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(options.timeout))
            .max_redirects(max_redirects)
            .max_redirects_will_error(options.follow_redirects)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(options.skip_tls_verify)
                    .build(),
            )
            .build()
            .new_agent();
        Self { agent, options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Send `request` and return the live transport response.
    ///
    /// An empty body is sent as no body at all.
    pub fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Body>> {
        debug!("sending {} {}", request.method(), request.uri());
        let response = if request.body().is_empty() {
            self.agent.run(request.map(|_| ()))?
        } else {
            self.agent.run(request)?
        };
        debug!("received {}", response.status());
        Ok(response)
    }

    /// Send `request` and buffer the whole response.
    pub fn execute(&self, request: Request<Vec<u8>>) -> Result<HttpResponse> {
        HttpResponse::from_transport(self.send(request)?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(ClientOptions::default())
    }
}
