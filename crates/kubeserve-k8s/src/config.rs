use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::{debug, warn};

/// Where to look for cluster credentials outside a pod
#[derive(Clone, Debug, Default)]
pub struct ConnectOptions {
    /// Explicit kubeconfig path; falls back to `$KUBECONFIG` or `~/.kube/config`
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of `current-context`
    pub context: Option<String>,
}

/// Which configuration the client ended up using
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    InCluster,
    Kubeconfig { path: Option<PathBuf> },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InCluster => f.write_str("in-cluster service account"),
            Self::Kubeconfig { path: Some(path) } => write!(f, "kubeconfig {}", path.display()),
            Self::Kubeconfig { path: None } => f.write_str("default kubeconfig"),
        }
    }
}

/// Load cluster configuration
///
/// In-cluster service-account credentials win when they are present. Otherwise
/// the kubeconfig file is read, honouring the path and context overrides.
pub async fn load_config(options: &ConnectOptions) -> Result<(kube::Config, ConfigSource)> {
    let in_cluster_err = match kube::Config::incluster() {
        Ok(config) => {
            warn_ignored_overrides(options);
            return Ok((config, ConfigSource::InCluster));
        }
        Err(e) => e,
    };
    debug!("In-cluster config unavailable: {}", in_cluster_err);

    from_kubeconfig(options).await.map_err(|e| {
        anyhow!(
            "no usable cluster configuration (in-cluster: {}; kubeconfig: {:#})",
            in_cluster_err,
            e
        )
    })
}

/// Kubeconfig settings only apply outside a pod; say so when they are dropped
fn warn_ignored_overrides(options: &ConnectOptions) -> bool {
    let ignored = options.kubeconfig.is_some() || options.context.is_some();
    if ignored {
        warn!(
            kubeconfig = ?options.kubeconfig,
            context = ?options.context,
            "Running in-cluster; ignoring kubeconfig and context settings"
        );
    }
    ignored
}

async fn from_kubeconfig(options: &ConnectOptions) -> Result<(kube::Config, ConfigSource)> {
    let kubeconfig = match &options.kubeconfig {
        Some(path) => Kubeconfig::read_from(path)
            .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?,
        None => Kubeconfig::read().context("Failed to read kubeconfig. Is kubectl configured?")?,
    };

    let config = kube::Config::from_custom_kubeconfig(
        kubeconfig,
        &KubeConfigOptions {
            context: options.context.clone(),
            ..Default::default()
        },
    )
    .await
    .context(match &options.context {
        Some(context) => format!("Failed to create config for context: {}", context),
        None => "Failed to create config for current context".to_string(),
    })?;

    Ok((
        config,
        ConfigSource::Kubeconfig {
            path: options.kubeconfig.clone(),
        },
    ))
}
