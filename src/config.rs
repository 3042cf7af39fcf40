//! Server configuration
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, and command-line flags.

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kubeserve_k8s::ConnectOptions;
use kubeserve_types::DEFAULT_PORT;
use serde::Deserialize;

/// Default location of the landing page, relative to the working directory
const DEFAULT_INDEX_FILE: &str = "static/index.html";

/// Config file contents
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    pub index_file: PathBuf,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            kubeconfig: None,
            context: None,
        }
    }
}

/// Command-line flags that override the config file
#[derive(clap::Args, Clone, Debug, Default)]
pub struct Overrides {
    /// Address to bind the HTTP listener to
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// HTML file served on `/`
    #[arg(long, value_name = "PATH")]
    pub index_file: Option<PathBuf>,

    /// Kubeconfig to use when not running inside a cluster
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context (defaults to current-context)
    #[arg(long)]
    pub context: Option<String>,
}

impl Config {
    /// Read a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line flags on top of this config
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(index_file) = overrides.index_file {
            self.index_file = index_file;
        }
        if overrides.kubeconfig.is_some() {
            self.kubeconfig = overrides.kubeconfig;
        }
        if overrides.context.is_some() {
            self.context = overrides.context;
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.index_file, PathBuf::from("static/index.html"));
        assert!(config.kubeconfig.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("port = 5050\ncontext = \"kind-dev\"\n").unwrap();
        assert_eq!(config.port, 5050);
        assert_eq!(config.context.as_deref(), Some("kind-dev"));
        assert_eq!(config.bind, Config::default().bind);
        assert_eq!(config.index_file, Config::default().index_file);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("prot = 5050\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind = \"127.0.0.1\"").unwrap();
        writeln!(file, "index_file = \"/srv/www/index.html\"").unwrap();
        writeln!(file, "kubeconfig = \"/etc/kube/config\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.index_file, PathBuf::from("/srv/www/index.html"));

        let options = config.connect_options();
        assert_eq!(options.kubeconfig, Some(PathBuf::from("/etc/kube/config")));
        assert!(options.context.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("kubeserve.toml")).unwrap_err();
        assert!(err.to_string().contains("kubeserve.toml"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = Config::from_toml("port = 5050\ncontext = \"kind-dev\"\n").unwrap();
        config.apply(Overrides {
            port: Some(8080),
            kubeconfig: Some(PathBuf::from("/tmp/kubeconfig")),
            ..Default::default()
        });

        assert_eq!(config.port, 8080);
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/tmp/kubeconfig")));
        // Flags that weren't given leave the file value alone
        assert_eq!(config.context.as_deref(), Some("kind-dev"));
    }
}
