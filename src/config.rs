use clap::Parser;

use crate::types::Config;

const HELP_TEXT: &str = "\
Shows a table of pods with their image versions and a table of deployment-like
objects with chart versions.

NOTE: By default, both \"--pods\" and \"--deploys\" are implied. But if any one of
them is specified, the other is not shown unless specifically specified.";

#[derive(Debug, Parser)]
#[command(name = "kube-version-reporter", version, about = HELP_TEXT)]
pub struct Cli {
    /// URL of the Prometheus API server
    #[arg(short = 'p', long = "prom-api", default_value = "localhost:9090")]
    pub prom_api: String,

    /// Namespace for the app
    #[arg(short = 'n', long, default_value = "default")]
    pub namespace: String,

    /// Regex of clusters to select. Can be repeated
    #[arg(short = 'c', long = "clusters")]
    pub clusters: Vec<String>,

    /// Timeout in seconds for the query
    #[arg(short = 't', long, default_value_t = 10)]
    pub timeout: u64,

    /// Show pods
    #[arg(long)]
    pub pods: bool,

    /// Show deployments, daemonsets and statefulsets
    #[arg(long)]
    pub deploys: bool,

    /// Show chart versions for configmaps as well
    #[arg(long = "config-maps")]
    pub config_maps: bool,

    /// Debug level logging
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    fn show_all(&self) -> bool {
        !self.pods && !self.deploys
    }

    /// True if the pods table should be printed.
    pub fn show_pods(&self) -> bool {
        self.show_all() || self.pods
    }

    /// True if the deployables table should be printed.
    pub fn show_deploys(&self) -> bool {
        self.show_all() || self.deploys
    }

    pub fn into_config(self) -> Config {
        Config {
            prom_url: normalize_server_url(&self.prom_api),
            namespace: self.namespace,
            clusters: self.clusters,
            timeout_seconds: self.timeout,
            include_config_maps: self.config_maps,
        }
    }
}

fn normalize_server_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
