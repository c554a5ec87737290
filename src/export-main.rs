extern crate kubeconfig_export;

use clap::{App, Arg};
use kubeconfig_export::{docker::DockerRuntime, get_kubeconfig_path, prelude::*, Cluster, Config};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log_errors(&e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = App::new("kubeconfig-export")
        .about("Writes kubeconfig of a k3d cluster to a file or stdout")
        .arg(
            Arg::with_name("cluster")
                .value_name("CLUSTER")
                .help("Cluster name")
                .required(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("PATH")
                .help("Output file, '-' for stdout. Defaults to $KUBECONFIG_EXPORT_DIR/kubeconfig-<CLUSTER>.yaml")
                .takes_value(true),
        )
        .get_matches();

    let cluster = Cluster::new(matches.value_of("cluster").unwrap_or_default());
    let output = matches.value_of("output").unwrap_or_default();
    let config = Config::from_env();

    let runtime = DockerRuntime::connect_with_local_defaults()?
        .with_kubeconfig_path(config.container_kubeconfig_path.as_str());

    let path = get_kubeconfig_path(&runtime, &cluster, output, &config)
        .await
        .with_context(|| format!("Failed to get kubeconfig of cluster '{}'", cluster.name))?;
    if path != kubeconfig_export::output::STDOUT_SENTINEL {
        println!("{}", path);
    }
    Ok(())
}
