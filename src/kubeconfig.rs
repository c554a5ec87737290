//! Kubeconfig extraction from a cluster master node
//!
//! Master node containers generate kubeconfig at startup. The runtime hands it out as a single
//! file tar archive: 512 bytes header block followed by the file content padded with NUL bytes
//! up to the block boundary (plus archive trailer).
use crate::config::Config;
use crate::errors::{KubeconfigError, KubeconfigResult};
use crate::output;
use crate::prelude::*;
use crate::runtime::Runtime;
use crate::types::{Cluster, Node};
use std::fs;
use tokio::io::AsyncReadExt;

/// Size of tar header preceding file content
pub const HEADER_SIZE: usize = 512;

/// Fetches kubeconfig of the given cluster with header and padding stripped.
///
/// When there are several master nodes, the one with the smallest name is used.
pub async fn get_kubeconfig(
    runtime: &dyn Runtime,
    cluster: &Cluster,
) -> KubeconfigResult<Vec<u8>> {
    let nodes = runtime
        .get_nodes_by_label(&cluster.control_plane_labels())
        .await
        .map_err(|source| KubeconfigError::NodeLookup {
            cluster: cluster.name.clone(),
            source,
        })?;
    let node = select_master(&nodes)
        .ok_or_else(|| KubeconfigError::NoControlPlaneNode(cluster.name.clone()))?;
    debug!(
        "Reading kubeconfig of cluster '{}' from node '{}' ({} master nodes)",
        cluster.name,
        node.name,
        nodes.len()
    );

    let raw = {
        let mut reader = runtime.get_kubeconfig(node).await.map_err(|source| {
            KubeconfigError::PayloadRetrieval {
                node: node.name.clone(),
                source,
            }
        })?;
        let mut raw = vec![];
        reader
            .read_to_end(&mut raw)
            .await
            .map_err(|source| KubeconfigError::StreamRead {
                node: node.name.clone(),
                source,
            })?;
        raw
    };

    let kubeconfig = trim_payload(&raw).ok_or_else(|| KubeconfigError::MalformedPayload {
        node: node.name.clone(),
        len: raw.len(),
    })?;
    trace!(
        "Kubeconfig archive of {} bytes trimmed to {} bytes",
        raw.len(),
        kubeconfig.len()
    );
    Ok(kubeconfig.to_vec())
}

/// Fetches kubeconfig of the given cluster and writes it to `path`.
///
/// `path` is either `-` for stdout, an empty string for [Config::default_kubeconfig_path] or
/// an explicit file path. Returns the absolute path of the written file or `-`.
pub async fn get_kubeconfig_path(
    runtime: &dyn Runtime,
    cluster: &Cluster,
    path: &str,
    config: &Config,
) -> KubeconfigResult<String> {
    let kubeconfig = get_kubeconfig(runtime, cluster).await?;

    let default = config.default_kubeconfig_path(cluster);
    if path.is_empty() {
        fs::create_dir_all(&config.output_dir).map_err(|source| {
            KubeconfigError::DestinationCreate {
                path: config.output_dir.clone(),
                source,
            }
        })?;
    }
    output::write_config(&kubeconfig, path, &default)
}

/// Strips tar header and trailing NUL padding. `None` if payload is shorter than the header.
pub fn trim_payload(payload: &[u8]) -> Option<&[u8]> {
    if payload.len() < HEADER_SIZE {
        return None;
    }
    let content = &payload[HEADER_SIZE..];
    let end = content
        .iter()
        .rposition(|b| *b != 0)
        .map_or(0, |last| last + 1);
    Some(&content[..end])
}

fn select_master(nodes: &[Node]) -> Option<&Node> {
    nodes.iter().min_by(|a, b| a.name.cmp(&b.name))
}
