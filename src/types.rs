use std::fmt;

#[derive(Debug, Clone)]
pub struct Config {
    pub prom_url: String,
    pub namespace: String,
    pub clusters: Vec<String>,
    pub timeout_seconds: u64,
    pub include_config_maps: bool,
}

/// Kubernetes object kinds recognized in the metric stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Pod,
    Deployment,
    DaemonSet,
    StatefulSet,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Pod => "Pod",
            EntityType::Deployment => "Deployment",
            EntityType::DaemonSet => "DaemonSet",
            EntityType::StatefulSet => "StatefulSet",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub name: String,
    pub image: String,
}

/// One inventoried object. `container` is set only for pods; `chart_name`
/// only for deployment-like kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    pub name: String,
    pub entity_type: EntityType,
    pub chart_name: String,
    pub container: Option<ContainerInfo>,
}

impl EntityInfo {
    /// Display ordering key: kind name first, entity name second.
    pub fn sort_key(&self) -> (&'static str, &str) {
        (self.entity_type.as_str(), self.name.as_str())
    }
}
