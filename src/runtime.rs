//! Container runtime capabilities required by the kubeconfig extractor
use crate::prelude::*;
use crate::types::{LabelSet, Node};
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Streaming handle to a single-file archive. Dropping it releases the underlying stream.
pub type ArchiveReader = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait Runtime: Send + Sync {
    /// Lists nodes carrying every label of the given set.
    ///
    /// Order of the returned nodes is runtime specific.
    async fn get_nodes_by_label(&self, labels: &LabelSet) -> Result<Vec<Node>>;

    /// Opens the generated kubeconfig of a node as a tar archive stream.
    async fn get_kubeconfig(&self, node: &Node) -> Result<ArchiveReader>;
}
