use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use kube::api::ObjectList;

/// Label a pod must carry, set to the deployment name, to show up in
/// `/pods-from-deployment`
pub const DEPLOYMENT_LABEL: &str = "app";

/// Label selector matching the pods of a deployment
///
/// This relies on the `app=<name>` labelling convention. Pods whose owner
/// chain leads to the deployment but carry another label are not matched.
/// The name is not escaped, so a value such as `a,tier=db` adds further
/// selector terms.
pub fn app_selector(deployment: &str) -> String {
    format!("{}={}", DEPLOYMENT_LABEL, deployment)
}

/// The list calls the server forwards to the control plane
///
/// Each call is a single request with no retry or pagination; the upstream
/// list comes back untouched.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// All namespaces
    async fn list_namespaces(&self) -> Result<ObjectList<Namespace>>;

    /// Deployments across all namespaces
    async fn list_deployments(&self) -> Result<ObjectList<Deployment>>;

    /// Pods across all namespaces, optionally filtered by a label selector
    async fn list_pods(&self, selector: Option<&str>) -> Result<ObjectList<Pod>>;

    /// Services across all namespaces
    async fn list_services(&self) -> Result<ObjectList<Service>>;
}
