//! Traced HTTP client for outgoing JSON calls.
//!
//! Wraps `reqwest::Client`: every request runs inside an `outgoing_http` span
//! that records method, URL and response status, and carries a `traceparent`
//! header.

use reqwest::{header, Method};
use serde::Serialize;
use tracing::{field, Instrument, Level};

use crate::http::trace_context::inject_trace_context;

#[derive(Clone)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Execute a built request inside an `outgoing_http` span, injecting trace headers.
    pub async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO,
            "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = field::Empty,
            trace_id = field::Empty,
            error = field::Empty,
            otel.kind = "client",
        );

        if let Some(trace_id) = inject_trace_context(req.headers_mut()) {
            span.record("trace_id", trace_id.as_str());
        }

        let result = self.inner.execute(req).instrument(span.clone()).await;
        match &result {
            Ok(response) => {
                let status = response.status();
                span.record("http.status_code", status.as_u16());
                if status.is_client_error() || status.is_server_error() {
                    span.record("error", true);
                }
            }
            Err(e) => {
                span.record("error", true);
                tracing::debug!(parent: &span, error = %e, "request failed before a response");
            }
        }
        result
    }

    /// Send a request with an optional bearer token and optional JSON body.
    pub async fn send_json<B>(
        &self,
        method: Method,
        url: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> reqwest::Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self
            .inner
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder.build()?).await
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
