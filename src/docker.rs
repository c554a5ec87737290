//! Docker runtime
//!
//! Docker integration module provides following capabilities:
//!
//! * listing cluster node containers by labels;
//! * downloading generated kubeconfig from a node container
use crate::config::CONTAINER_KUBECONFIG_PATH;
use crate::prelude::*;
use crate::runtime::{ArchiveReader, Runtime};
use crate::types::{LabelSet, Node};
use async_trait::async_trait;
use bollard::{
    container::{DownloadFromContainerOptions, ListContainersOptions},
    Docker,
};
use futures::{stream, StreamExt};
use std::{collections::HashMap, io};
use tokio_util::io::StreamReader;

pub struct DockerRuntime {
    docker: Docker,
    kubeconfig_path: String,
}

impl DockerRuntime {
    pub fn new(docker: Docker) -> Self {
        Self {
            docker,
            kubeconfig_path: CONTAINER_KUBECONFIG_PATH.into(),
        }
    }

    pub fn connect_with_local_defaults() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().context("Unable to connect to Docker")?;
        Ok(Self::new(docker))
    }

    /// Overrides location of the kubeconfig inside node containers
    pub fn with_kubeconfig_path(mut self, path: impl Into<String>) -> Self {
        self.kubeconfig_path = path.into();
        self
    }
}

#[async_trait]
impl Runtime for DockerRuntime {
    /// Lists containers (running or not) having all the given labels.
    ///
    /// Nodes are sorted by name.
    async fn get_nodes_by_label(&self, labels: &LabelSet) -> Result<Vec<Node>> {
        let mut filters = HashMap::new();
        filters.insert("label".to_string(), label_filters(labels));
        let options = ListContainersOptions {
            all: true,
            filters,
            ..Default::default()
        };

        let mut nodes = self
            .docker
            .list_containers(Some(options))
            .await
            .context("Unable to list containers")?
            .into_iter()
            .filter_map(|c| into_node(c.id, c.names, c.labels))
            .collect::<Vec<_>>();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        trace!("Found {} nodes for labels {:?}", nodes.len(), labels);

        Ok(nodes)
    }

    /// Downloads kubeconfig as a tar archive.
    ///
    /// First chunk is awaited before returning, so missing container or file is reported here
    /// rather than on read.
    async fn get_kubeconfig(&self, node: &Node) -> Result<ArchiveReader> {
        let options = DownloadFromContainerOptions {
            path: self.kubeconfig_path.clone(),
        };
        let mut archive = self
            .docker
            .download_from_container(&node.name, Some(options))
            .boxed();

        let first = match archive.next().await {
            Some(batch) => Some(batch.with_context(|| {
                format!(
                    "Unable to download {} from container {}",
                    self.kubeconfig_path, node.name
                )
            })?),
            None => None,
        };

        let archive = stream::iter(first.map(Ok))
            .chain(archive)
            .map(|batch| batch.map_err(|e| io::Error::new(io::ErrorKind::Other, e)))
            .boxed();

        Ok(Box::new(StreamReader::new(archive)))
    }
}

/// Docker label filters in `key=value` form
fn label_filters(labels: &LabelSet) -> Vec<String> {
    labels
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect()
}

fn into_node(
    id: Option<String>,
    names: Option<Vec<String>>,
    labels: Option<HashMap<String, String>>,
) -> Option<Node> {
    let name = names.and_then(|names| names.into_iter().next()).or(id)?;
    let labels = labels.unwrap_or_default().into_iter().collect();

    Some(Node::new(name.trim_start_matches('/'), labels))
}
