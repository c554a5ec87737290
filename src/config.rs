use crate::types::Cluster;
use std::{env, ffi::OsString, path::PathBuf};

/// Overrides the directory kubeconfigs are written to when no output path is given
pub const OUTPUT_DIR_ENV: &str = "KUBECONFIG_EXPORT_DIR";

/// Overrides the location of the generated kubeconfig inside master node containers
pub const CONTAINER_PATH_ENV: &str = "KUBECONFIG_EXPORT_CONTAINER_PATH";

/// Location of the generated kubeconfig inside a master node container
pub const CONTAINER_KUBECONFIG_PATH: &str = "/output/kubeconfig.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory for [Config::default_kubeconfig_path]. Created on demand.
    pub output_dir: PathBuf,
    pub container_kubeconfig_path: String,
}

impl Config {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            container_kubeconfig_path: CONTAINER_KUBECONFIG_PATH.into(),
        }
    }

    /// Reads configuration from the process environment, see [Config::from_vars].
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var_os(name))
    }

    /// Output directory is taken from `KUBECONFIG_EXPORT_DIR`, then `$HOME/.k3d`, then the
    /// system temporary directory. Container path is taken from
    /// `KUBECONFIG_EXPORT_CONTAINER_PATH`. Empty values are ignored.
    pub fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |name: &str| var(name).filter(|value| !value.is_empty());

        let output_dir = var(OUTPUT_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".k3d")))
            .unwrap_or_else(env::temp_dir);
        let mut config = Self::new(output_dir);
        if let Some(path) = var(CONTAINER_PATH_ENV) {
            config.container_kubeconfig_path = path.to_string_lossy().into_owned();
        }
        config
    }

    /// Destination used when the caller gives an empty output path
    pub fn default_kubeconfig_path(&self, cluster: &Cluster) -> PathBuf {
        self.output_dir
            .join(format!("kubeconfig-{}.yaml", cluster.name))
    }
}
