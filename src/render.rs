use comfy_table::{Cell, ContentArrangement};

use crate::inventory::ClusterResultSet;
use crate::types::EntityType;

/// Renders the pod image table. Clusters appear in sorted order and a
/// cluster's name is printed only on its first row.
pub fn render_pods(data: &ClusterResultSet) -> String {
    let mut rows = Vec::new();
    for cluster_name in data.sorted_cluster_names() {
        let Some(cluster) = data.get(cluster_name) else {
            continue;
        };
        let mut shown = cluster_name;
        for e in &cluster.entries {
            if e.entity_type != EntityType::Pod {
                continue;
            }
            let (container, image) = match &e.container {
                Some(c) => (c.name.as_str(), c.image.as_str()),
                None => ("", ""),
            };
            rows.push([
                Cell::new(shown),
                Cell::new(&e.name),
                Cell::new(container),
                Cell::new(image),
            ]);
            shown = "";
        }
    }

    comfy_table::Table::new()
        .load_preset(comfy_table::presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["CLUSTER", "POD", "CONTAINER", "IMAGE"])
        .add_rows(rows)
        .to_string()
}

/// Renders the deployment-like object table, one row per workload with its
/// chart version.
pub fn render_deploys(data: &ClusterResultSet) -> String {
    let mut rows = Vec::new();
    for cluster_name in data.sorted_cluster_names() {
        let Some(cluster) = data.get(cluster_name) else {
            continue;
        };
        let mut shown = cluster_name;
        for e in &cluster.entries {
            if e.entity_type == EntityType::Pod {
                continue;
            }
            rows.push([
                Cell::new(shown),
                Cell::new(e.entity_type.as_str()),
                Cell::new(&e.name),
                Cell::new(&e.chart_name),
            ]);
            shown = "";
        }
    }

    comfy_table::Table::new()
        .load_preset(comfy_table::presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["CLUSTER", "TYPE", "NAME", "CHART"])
        .add_rows(rows)
        .to_string()
}
