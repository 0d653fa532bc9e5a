use tracing::warn;

use crate::prom::Labels;
use crate::types::{ContainerInfo, EntityInfo, EntityType};

/// Chart label keys in priority order; the legacy key wins when both exist.
const CHART_LABEL_KEYS: [&str; 2] = ["label_chart", "label_helm_sh_chart"];

const DOCKER_HUB_PREFIX: &str = "docker.io/";

/// The metric families the inventory understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetricKind {
    PodContainerInfo,
    DeploymentLabels,
    DaemonSetLabels,
    StatefulSetLabels,
}

impl MetricKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "kube_pod_container_info" => Some(Self::PodContainerInfo),
            "kube_deployment_labels" => Some(Self::DeploymentLabels),
            "kube_daemonset_labels" => Some(Self::DaemonSetLabels),
            "kube_statefulset_labels" => Some(Self::StatefulSetLabels),
            _ => None,
        }
    }
}

/// Maps one raw sample to a typed entity. Samples with an unknown metric name
/// are skipped with a warning; missing labels become empty fields.
pub fn classify_sample(labels: &Labels) -> Option<EntityInfo> {
    let metric = labels.get("__name__").map(String::as_str).unwrap_or_default();
    let Some(kind) = MetricKind::from_name(metric) else {
        warn!("ignoring unexpected metric name: {metric:?}");
        return None;
    };

    let entity = match kind {
        MetricKind::PodContainerInfo => EntityInfo {
            name: label_value(labels, "pod"),
            entity_type: EntityType::Pod,
            chart_name: String::new(),
            container: Some(ContainerInfo {
                name: label_value(labels, "container"),
                image: strip_registry_prefix(&label_value(labels, "image")),
            }),
        },
        MetricKind::DeploymentLabels => workload(labels, EntityType::Deployment, "deployment"),
        MetricKind::DaemonSetLabels => workload(labels, EntityType::DaemonSet, "daemonset"),
        MetricKind::StatefulSetLabels => workload(labels, EntityType::StatefulSet, "statefulset"),
    };
    Some(entity)
}

/// Resolves the Helm chart name attached to a workload, if any.
pub fn chart_name(labels: &Labels) -> String {
    for key in CHART_LABEL_KEYS {
        if let Some(name) = labels.get(key) {
            return name.clone();
        }
    }
    String::new()
}

fn workload(labels: &Labels, entity_type: EntityType, name_key: &str) -> EntityInfo {
    EntityInfo {
        name: label_value(labels, name_key),
        entity_type,
        chart_name: chart_name(labels),
        container: None,
    }
}

fn label_value(labels: &Labels, key: &str) -> String {
    labels.get(key).cloned().unwrap_or_default()
}

fn strip_registry_prefix(image: &str) -> String {
    image.strip_prefix(DOCKER_HUB_PREFIX).unwrap_or(image).to_string()
}
