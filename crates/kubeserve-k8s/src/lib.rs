//! Kubernetes client for kubeserve
//!
//! This crate loads cluster configuration, builds the client, and exposes the
//! four list calls the HTTP server forwards.

mod api;
mod client;
mod config;

pub use api::{ClusterApi, DEPLOYMENT_LABEL, app_selector};
pub use client::KubeClient;
pub use config::{ConfigSource, ConnectOptions, load_config};

// Re-export the list wrapper so callers don't need a direct kube dependency
pub use kube::api::ObjectList;
