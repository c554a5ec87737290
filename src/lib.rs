//! Export of kubeconfig generated inside k3d cluster master nodes
pub mod config;
pub mod docker;
pub mod errors;
pub mod kubeconfig;
pub mod output;
pub mod prelude;
pub mod runtime;
pub mod types;

pub use config::Config;
pub use errors::KubeconfigError;
pub use kubeconfig::{get_kubeconfig, get_kubeconfig_path};
pub use output::{write_config, Destination};
pub use runtime::Runtime;
pub use types::{Cluster, Node};
