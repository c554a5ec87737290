use crate::kubeconfig::HEADER_SIZE;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures of kubeconfig extraction and export. None of them is retried.
#[derive(Error, Debug)]
pub enum KubeconfigError {
    #[error("Failed to get master nodes of cluster '{cluster}'")]
    NodeLookup {
        cluster: String,
        source: anyhow::Error,
    },

    #[error("No master node found for cluster '{0}'")]
    NoControlPlaneNode(String),

    #[error("Failed to get kubeconfig from node '{node}'")]
    PayloadRetrieval {
        node: String,
        source: anyhow::Error,
    },

    #[error("Couldn't read kubeconfig from node '{node}'")]
    StreamRead { node: String, source: io::Error },

    #[error(
        "Kubeconfig archive from node '{node}' is {len} bytes, shorter than {} bytes header",
        HEADER_SIZE
    )]
    MalformedPayload { node: String, len: usize },

    #[error("Failed to create file '{}'", .path.display())]
    DestinationCreate { path: PathBuf, source: io::Error },

    #[error("Failed to write kubeconfig to '{destination}'")]
    Write {
        destination: String,
        source: io::Error,
    },
}

pub type KubeconfigResult<T> = std::result::Result<T, KubeconfigError>;
