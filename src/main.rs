use anyhow::Result;
use clap::Parser;
use tracing::debug;

use kube_version_reporter::config::Cli;
use kube_version_reporter::filter::ClusterFilter;
use kube_version_reporter::inventory::collect_inventory;
use kube_version_reporter::prom::PromClient;
use kube_version_reporter::render::{render_deploys, render_pods};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let show_pods = cli.show_pods();
    let show_deploys = cli.show_deploys();
    let cfg = cli.into_config();

    debug!("using prometheus server: {:?}", cfg.prom_url);
    debug!("searching in namespace: {:?}", cfg.namespace);

    let mut filter = ClusterFilter::new();
    if !cfg.clusters.is_empty() {
        debug!("filtering by clusters: {:?}", cfg.clusters);
        for pattern in &cfg.clusters {
            filter.add(pattern)?;
        }
    }
    filter.include_config_maps = cfg.include_config_maps;

    let client = PromClient::new(&cfg.prom_url)?.with_timeout(cfg.timeout_seconds);
    let data = collect_inventory(&client, &cfg.namespace, &filter).await?;

    if data.has_pods() && show_pods {
        println!("PODS\n");
        println!("{}", render_pods(&data));
        println!();
    }

    if data.has_deploys() && show_deploys {
        println!("DEPLOYS\n");
        println!("{}", render_deploys(&data));
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
