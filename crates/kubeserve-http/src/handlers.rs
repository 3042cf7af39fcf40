//! Route handlers
//!
//! Every list handler makes exactly one call through [`ClusterApi`] and
//! writes the upstream list back as JSON.

use axum::Json;
use axum::extract::{Query, State};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use kubeserve_k8s::{ObjectList, app_selector};
use kubeserve_types::{Links, ResourceKind};
use tracing::debug;

use crate::error::ApiError;
use crate::server::AppState;

type ListResult<K> = Result<Json<ObjectList<K>>, ApiError>;

/// Name of the deployment query parameter
const ID_PARAM: &str = "id";

pub async fn namespaces(State(state): State<AppState>) -> ListResult<Namespace> {
    state
        .cluster
        .list_namespaces()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(ResourceKind::Namespace, e))
}

pub async fn deployments(State(state): State<AppState>) -> ListResult<Deployment> {
    state
        .cluster
        .list_deployments()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(ResourceKind::Deployment, e))
}

pub async fn pods(State(state): State<AppState>) -> ListResult<Pod> {
    state
        .cluster
        .list_pods(None)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(ResourceKind::Pod, e))
}

/// First value of `id`, if any; repeated `id` parameters are not an error
fn deployment_id(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(key, _)| key == ID_PARAM)
        .map(|(_, value)| value)
}

/// Pods labelled `app=<id>`; a missing or empty `id` never reaches the cluster
pub async fn pods_from_deployment(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ListResult<Pod> {
    let id = deployment_id(params)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingDeploymentId)?;

    let selector = app_selector(&id);
    debug!(deployment = %id, %selector, "listing pods for deployment");

    state
        .cluster
        .list_pods(Some(&selector))
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(ResourceKind::Pod, e))
}

pub async fn services(State(state): State<AppState>) -> ListResult<Service> {
    state
        .cluster
        .list_services()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(ResourceKind::Service, e))
}

pub async fn links() -> Json<Links> {
    Json(Links::new())
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_deployment_id_takes_first_value() {
        assert_eq!(
            deployment_id(params(&[("id", "nginx"), ("id", "web")])),
            Some("nginx".to_string())
        );
        assert_eq!(
            deployment_id(params(&[("name", "x"), ("id", "web")])),
            Some("web".to_string())
        );
        // An empty first value wins, like a plain query lookup
        assert_eq!(
            deployment_id(params(&[("id", ""), ("id", "web")])),
            Some(String::new())
        );
        assert_eq!(deployment_id(params(&[("name", "nginx")])), None);
    }
}
