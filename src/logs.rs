use chrono::SecondsFormat;
use futures::io::AsyncReadExt;
use http::Request;
use tracing::debug;

use crate::client::client_for_context;
use crate::error::{Error, Result};
use crate::executor::HttpExecutor;
use crate::stream::LogStream;
use crate::types::{LogRequest, PodReference};

/// Upper bound on how much of a rejected response is kept for the error.
const ERROR_BODY_LIMIT: usize = 4096;

/// Streams container logs through an injected [`HttpExecutor`].
///
/// Every call is a single request/response round trip. Nothing is retried,
/// buffered or timed out here; those policies belong to the executor and to
/// whoever reads the returned [`LogStream`].
#[derive(Debug, Clone)]
pub struct LogFetcher<E = kube::Client> {
    executor: E,
}

impl LogFetcher<kube::Client> {
    /// Fetcher for the current kubeconfig context, or in-cluster config.
    pub async fn try_default() -> Result<Self> {
        Self::for_context(None).await
    }

    /// Fetcher for a named kubeconfig context.
    pub async fn for_context(context: Option<&str>) -> Result<Self> {
        let client = client_for_context(context).await?;
        Ok(Self::new(client))
    }
}

impl<E: HttpExecutor> LogFetcher<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Open the log of one container.
    ///
    /// The returned stream holds the connection open until it is closed or
    /// dropped.
    pub async fn stream_log(&self, request: &LogRequest) -> Result<LogStream> {
        request.validate()?;
        let req = build_request(request)?;
        debug!(
            "Requesting logs: {} (container {})",
            req.uri().path(),
            request.container
        );

        let response = self
            .executor
            .execute(req)
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let mut snippet = Vec::new();
            // Whatever part of the body arrives is diagnostics only.
            if let Err(e) = response
                .into_body()
                .take(ERROR_BODY_LIMIT as u64)
                .read_to_end(&mut snippet)
                .await
            {
                debug!("Could not read error body for status {}: {}", status, e);
            }
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                body: snippet_text(&snippet),
            });
        }

        Ok(LogStream::new(response.into_body()))
    }

    /// Open the log of the pod's first container with default options.
    pub async fn stream_log_for_pod(&self, pod: &PodReference) -> Result<LogStream> {
        let request = pod.log_request()?;
        self.stream_log(&request).await
    }
}

/// Lossy text of an error body, trimmed and kept within [`ERROR_BODY_LIMIT`] bytes.
fn snippet_text(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).trim_end().to_string();
    if text.len() > ERROR_BODY_LIMIT {
        let mut end = ERROR_BODY_LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

fn log_path(namespace: &str, name: &str) -> String {
    format!("/api/v1/namespaces/{}/pods/{}/log", namespace, name)
}

fn log_query(request: &LogRequest) -> String {
    let mut qp = form_urlencoded::Serializer::new(String::new());
    qp.append_pair("container", &request.container);
    qp.append_pair("follow", bool_str(request.follow));
    if let Some(bytes) = request.limit_bytes {
        qp.append_pair("limitBytes", &bytes.to_string());
    }
    qp.append_pair("previous", bool_str(request.previous));
    if let Some(secs) = request.since_seconds {
        qp.append_pair("sinceSeconds", &secs.to_string());
    }
    if let Some(time) = &request.since_time {
        qp.append_pair(
            "sinceTime",
            &time.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    if let Some(lines) = request.tail_lines {
        qp.append_pair("tailLines", &lines.to_string());
    }
    qp.append_pair("timestamps", bool_str(request.timestamps));
    qp.finish()
}

fn bool_str(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

fn build_request(request: &LogRequest) -> Result<Request<Vec<u8>>> {
    let uri = format!(
        "{}?{}",
        log_path(&request.namespace, &request.name),
        log_query(request)
    );
    Request::get(uri)
        .body(Vec::new())
        .map_err(|e| Error::invalid(format!("cannot build log request: {}", e)))
}
