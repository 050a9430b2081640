use kube::{Client, config};
use tracing::info;

use crate::error::{Error, Result};

/// Build a client from kubeconfig, once, for explicit reuse afterwards.
///
/// Without a context name the current kubeconfig context is used, falling
/// back to in-cluster configuration.
pub async fn client_for_context(context: Option<&str>) -> Result<Client> {
    let config = match context {
        None => {
            let config = config::Config::infer()
                .await
                .map_err(|e| Error::Config(Box::new(e)))?;
            info!("Using inferred cluster config for {}", config.cluster_url);
            config
        }
        Some(ctx) => {
            let config = config::Config::from_kubeconfig(&config::KubeConfigOptions {
                context: Some(ctx.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| {
                Error::Config(format!("context '{}' not found in kubeconfig: {}", ctx, e).into())
            })?;
            info!("Initialized client for context: {}", ctx);
            config
        }
    };
    Client::try_from(config).map_err(|e| Error::Config(Box::new(e)))
}
