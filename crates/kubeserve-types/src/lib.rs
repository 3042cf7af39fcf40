//! Shared types for kubeserve
//!
//! This crate contains the resource kinds and route table used by both the
//! cluster client and the HTTP server.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Routes
// ============================================================================

/// Static HTML landing page
pub const INDEX_PATH: &str = "/";

/// Static map of the resource routes
pub const LINKS_PATH: &str = "/links";

/// Pods selected by the `app` label of a deployment
pub const PODS_FROM_DEPLOYMENT_PATH: &str = "/pods-from-deployment";

/// Liveness probe, never touches the cluster
pub const HEALTH_PATH: &str = "/healthz";

/// Port used when nothing else is configured
pub const DEFAULT_PORT: u16 = 9000;

// ============================================================================
// Kubernetes Resource Types
// ============================================================================

/// A cluster resource kind served by kubeserve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Namespace,
    Deployment,
    Pod,
    Service,
}

impl ResourceKind {
    /// All kinds, in route order
    pub const ALL: [ResourceKind; 4] = [
        Self::Namespace,
        Self::Deployment,
        Self::Pod,
        Self::Service,
    ];

    /// Lowercase plural, as used by the Kubernetes API and our routes
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Namespace => "namespaces",
            Self::Deployment => "deployments",
            Self::Pod => "pods",
            Self::Service => "services",
        }
    }

    /// HTTP route listing this kind
    pub fn path(&self) -> &'static str {
        match self {
            Self::Namespace => "/namespaces",
            Self::Deployment => "/deployments",
            Self::Pod => "/pods",
            Self::Service => "/services",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

// ============================================================================
// Links
// ============================================================================

/// The route table served by `GET /links`
///
/// Serializes as a flat JSON object keyed by route name. Keys come out sorted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<&'static str, String>);

impl Links {
    pub fn new() -> Self {
        let mut links: BTreeMap<&'static str, String> = ResourceKind::ALL
            .iter()
            .map(|kind| (kind.plural(), kind.path().to_string()))
            .collect();

        links.insert(
            "pods-from-deployment",
            format!("{}?id={{deployment}}", PODS_FROM_DEPLOYMENT_PATH),
        );

        Self(links)
    }

    /// Look up a route by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl Default for Links {
    fn default() -> Self {
        Self::new()
    }
}
