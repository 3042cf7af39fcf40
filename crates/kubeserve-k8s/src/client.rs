use std::fmt::Debug;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use kube::Api;
use kube::api::{ListParams, ObjectList};
use kubeserve_types::ResourceKind;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::ClusterApi;
use crate::config::{ConfigSource, ConnectOptions, load_config};

/// Kubernetes client wrapper
#[derive(Clone)]
pub struct KubeClient {
    client: kube::Client,
    source: ConfigSource,
}

impl KubeClient {
    /// Load cluster configuration and build a client from it
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let (config, source) = load_config(options).await?;

        let client = kube::Client::try_from(config)
            .context(format!("Failed to create client from {}", source))?;

        Ok(Self { client, source })
    }

    /// Where the configuration came from
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// List one kind across the whole cluster
    async fn list_all<K>(&self, kind: ResourceKind, params: &ListParams) -> Result<ObjectList<K>>
    where
        K: kube::Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
    {
        let api: Api<K> = Api::all(self.client.clone());
        let list = api.list(params).await?;

        debug!(
            kind = %kind,
            selector = params.label_selector.as_deref().unwrap_or(""),
            count = list.items.len(),
            "listed resources"
        );

        Ok(list)
    }
}

#[async_trait]
impl ClusterApi for KubeClient {
    async fn list_namespaces(&self) -> Result<ObjectList<Namespace>> {
        self.list_all(ResourceKind::Namespace, &ListParams::default())
            .await
    }

    async fn list_deployments(&self) -> Result<ObjectList<Deployment>> {
        self.list_all(ResourceKind::Deployment, &ListParams::default())
            .await
    }

    async fn list_pods(&self, selector: Option<&str>) -> Result<ObjectList<Pod>> {
        let params = match selector {
            Some(selector) => ListParams::default().labels(selector),
            None => ListParams::default(),
        };
        self.list_all(ResourceKind::Pod, &params).await
    }

    async fn list_services(&self) -> Result<ObjectList<Service>> {
        self.list_all(ResourceKind::Service, &ListParams::default())
            .await
    }
}
