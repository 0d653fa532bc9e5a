use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use crate::classify::classify_sample;
use crate::filter::ClusterFilter;
use crate::prom::{inventory_query, Labels, PromClient};
use crate::types::{EntityInfo, EntityType};

/// One cluster's inventory; entries are in display order once sorted.
#[derive(Debug, Default)]
pub struct ClusterEntry {
    pub cluster_name: String,
    pub entries: Vec<EntityInfo>,
}

/// Inventory of every retained cluster, keyed by cluster name.
#[derive(Debug, Default)]
pub struct ClusterResultSet {
    clusters: HashMap<String, ClusterEntry>,
}

impl ClusterResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cluster_name: &str) -> Option<&ClusterEntry> {
        self.clusters.get(cluster_name)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Appends an entity to its cluster, creating the cluster entry on first
    /// sight.
    pub fn push(&mut self, cluster_name: &str, entity: EntityInfo) {
        self.clusters
            .entry(cluster_name.to_string())
            .or_insert_with(|| ClusterEntry {
                cluster_name: cluster_name.to_string(),
                entries: Vec::new(),
            })
            .entries
            .push(entity);
    }

    /// Sorts every cluster's entries by kind name, then entity name.
    pub fn sort_entries(&mut self) {
        for entry in self.clusters.values_mut() {
            entry.entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        }
    }

    /// Cluster names in ascending order, for deterministic display grouping.
    pub fn sorted_cluster_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clusters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// True if any retained entity is a pod.
    pub fn has_pods(&self) -> bool {
        self.clusters
            .values()
            .flat_map(|c| c.entries.iter())
            .any(|e| e.entity_type == EntityType::Pod)
    }

    /// True if any retained entity is a deployment-like kind.
    pub fn has_deploys(&self) -> bool {
        self.clusters
            .values()
            .flat_map(|c| c.entries.iter())
            .any(|e| e.entity_type != EntityType::Pod)
    }
}

/// Groups classified samples by cluster, dropping those the filter rejects,
/// and returns the set with each cluster's entries in display order.
pub fn aggregate_samples(samples: &[Labels], filter: &ClusterFilter) -> ClusterResultSet {
    let mut out = ClusterResultSet::new();
    for labels in samples {
        let cluster_name = labels
            .get("cluster_name")
            .map(String::as_str)
            .unwrap_or_default();
        if !filter.matches(cluster_name) {
            continue;
        }
        if let Some(entity) = classify_sample(labels) {
            out.push(cluster_name, entity);
        }
    }
    out.sort_entries();
    out
}

/// Queries the backend for one namespace and builds the cluster inventory.
pub async fn collect_inventory(
    client: &PromClient,
    namespace: &str,
    filter: &ClusterFilter,
) -> Result<ClusterResultSet> {
    let query = inventory_query(namespace);
    debug!("using prom query: {query}");
    let samples = client.query(&query).await?;
    Ok(aggregate_samples(&samples, filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pod_sample(cluster: &str, pod: &str) -> Labels {
        labels(&[
            ("__name__", "kube_pod_container_info"),
            ("cluster_name", cluster),
            ("pod", pod),
            ("container", "app"),
            ("image", "app:1"),
        ])
    }

    fn deploy_sample(cluster: &str, deployment: &str) -> Labels {
        labels(&[
            ("__name__", "kube_deployment_labels"),
            ("cluster_name", cluster),
            ("deployment", deployment),
        ])
    }

    #[test]
    fn test_grouping_by_cluster() {
        let samples = vec![
            pod_sample("prod", "a"),
            deploy_sample("prod", "b"),
            pod_sample("dev", "c"),
        ];
        let data = aggregate_samples(&samples, &ClusterFilter::new());

        assert_eq!(data.len(), 2);
        assert_eq!(data.sorted_cluster_names(), vec!["dev", "prod"]);
        assert_eq!(data.get("prod").unwrap().entries.len(), 2);
        assert_eq!(data.get("dev").unwrap().entries.len(), 1);
        assert!(data.get("staging").is_none());
    }

    #[test]
    fn test_filter_rejects_clusters() {
        let samples = vec![pod_sample("prod", "a"), pod_sample("dev", "c")];
        let mut filter = ClusterFilter::new();
        filter.add("^prod$").unwrap();
        let data = aggregate_samples(&samples, &filter);

        assert_eq!(data.sorted_cluster_names(), vec!["prod"]);
        assert!(data.get("dev").is_none());
    }

    #[test]
    fn test_unknown_metrics_do_not_abort_aggregation() {
        let samples = vec![
            pod_sample("prod", "a"),
            labels(&[("__name__", "kube_node_info"), ("cluster_name", "prod")]),
            deploy_sample("prod", "b"),
        ];
        let data = aggregate_samples(&samples, &ClusterFilter::new());
        assert_eq!(data.get("prod").unwrap().entries.len(), 2);
    }

    #[test]
    fn test_entries_sorted_by_kind_then_name() {
        let samples = vec![
            labels(&[
                ("__name__", "kube_statefulset_labels"),
                ("cluster_name", "prod"),
                ("statefulset", "etcd"),
            ]),
            pod_sample("prod", "zz"),
            pod_sample("prod", "aa"),
            deploy_sample("prod", "web"),
            labels(&[
                ("__name__", "kube_daemonset_labels"),
                ("cluster_name", "prod"),
                ("daemonset", "node-exporter"),
            ]),
        ];
        let data = aggregate_samples(&samples, &ClusterFilter::new());
        let keys: Vec<(&str, &str)> = data
            .get("prod")
            .unwrap()
            .entries
            .iter()
            .map(|e| e.sort_key())
            .collect();
        // Lexicographic over the kind strings: DaemonSet < Deployment < Pod
        // < StatefulSet.
        assert_eq!(
            keys,
            vec![
                ("DaemonSet", "node-exporter"),
                ("Deployment", "web"),
                ("Pod", "aa"),
                ("Pod", "zz"),
                ("StatefulSet", "etcd"),
            ]
        );
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let samples = vec![
            pod_sample("prod", "b"),
            pod_sample("prod", "a"),
            deploy_sample("prod", "web"),
        ];
        let mut data = aggregate_samples(&samples, &ClusterFilter::new());
        let once: Vec<EntityInfo> = data.get("prod").unwrap().entries.clone();
        data.sort_entries();
        assert_eq!(data.get("prod").unwrap().entries, once);
    }

    #[test]
    fn test_has_pods_and_has_deploys() {
        let empty = aggregate_samples(&[], &ClusterFilter::new());
        assert!(empty.is_empty());
        assert!(!empty.has_pods());
        assert!(!empty.has_deploys());

        let pods_only = aggregate_samples(&[pod_sample("prod", "a")], &ClusterFilter::new());
        assert!(pods_only.has_pods());
        assert!(!pods_only.has_deploys());

        let deploys_only =
            aggregate_samples(&[deploy_sample("prod", "web")], &ClusterFilter::new());
        assert!(!deploys_only.has_pods());
        assert!(deploys_only.has_deploys());
    }
}
