mod cli;
mod utils;

use clap::Parser;
use futures::io::AsyncBufReadExt;
use futures::stream::StreamExt;
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client};
use kube_logs::client::client_for_context;
use kube_logs::{LogFetcher, LogRequest, PodReference};
use regex::Regex;
use std::io::IsTerminal;
use tracing::{debug, info};

use cli::Cli;
use utils::line_prefix;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the log lines, diagnostics go to stderr
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let grep_regex = match &cli.grep {
        Some(pattern) => Some(
            Regex::new(pattern)
                .map_err(|e| anyhow::anyhow!("Invalid regex pattern '{}': {}", pattern, e))?,
        ),
        None => None,
    };

    let client = client_for_context(cli.context.as_deref()).await?;
    let namespace = cli
        .namespace
        .clone()
        .unwrap_or_else(|| client.default_namespace().to_string());

    let container = match &cli.container {
        Some(c) => c.clone(),
        None => default_container(&client, &namespace, &cli.pod).await?,
    };

    let request = build_request(&cli, namespace, container);
    let prefix = cli.prefix.then(|| {
        line_prefix(
            &request.namespace,
            &request.name,
            &request.container,
            std::io::stdout().is_terminal(),
        )
    });

    let fetcher = LogFetcher::new(client);
    let stream = fetcher.stream_log(&request).await?;
    debug!(
        "Streaming logs for {}/{}/{}",
        request.namespace, request.name, request.container
    );

    let mut lines = stream.lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else { break };
                let line = line?;
                if let Some(ref regex) = grep_regex
                    && !regex.is_match(&line)
                {
                    continue;
                }
                match &prefix {
                    Some(p) => println!("{} {}", p, line),
                    None => println!("{}", line),
                }
            }
            _ = &mut ctrl_c => {
                debug!("Interrupted, closing log stream");
                break;
            }
        }
    }

    Ok(())
}

/// Resolve the container to read when none was given on the command line.
async fn default_container(client: &Client, namespace: &str, pod_name: &str) -> anyhow::Result<String> {
    let api: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let pod = api
        .get(pod_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get pod {}/{}: {}", namespace, pod_name, e))?;
    let pod_ref = PodReference::from(&pod);
    let Some(container) = pod_ref.default_container() else {
        anyhow::bail!("Pod {}/{} has no containers", namespace, pod_name);
    };
    if pod_ref.containers.len() > 1 {
        info!(
            "Defaulted container \"{}\" out of: {}",
            container,
            pod_ref.containers.join(", ")
        );
    }
    Ok(container.to_string())
}

fn build_request(cli: &Cli, namespace: String, container: String) -> LogRequest {
    let mut request = LogRequest::new(namespace, cli.pod.clone(), container)
        .follow(cli.follow)
        .timestamps(cli.timestamps)
        .previous(cli.previous);
    if let Some(secs) = cli.since {
        request = request.since_seconds(secs);
    }
    if let Some(time) = cli.since_time {
        request = request.since_time(time);
    }
    if let Some(lines) = cli.tail {
        request = request.tail_lines(lines);
    }
    if let Some(bytes) = cli.limit_bytes {
        request = request.limit_bytes(bytes);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_from_flags() {
        let cli = Cli::try_parse_from(["kube-logs", "web-0", "-f", "--tail", "5", "--previous"])
            .unwrap();
        let req = build_request(&cli, "prod".to_string(), "app".to_string());
        assert_eq!(
            req,
            LogRequest::new("prod", "web-0", "app")
                .follow(true)
                .tail_lines(5)
                .previous(true)
        );
    }

    #[test]
    fn test_build_request_defaults() {
        let cli = Cli::try_parse_from(["kube-logs", "web-0"]).unwrap();
        let req = build_request(&cli, "default".to_string(), "app".to_string());
        assert_eq!(req, LogRequest::new("default", "web-0", "app"));
    }
}
