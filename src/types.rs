//! Cluster and node model shared by runtimes and the extractor
use std::collections::BTreeMap;

/// Label carrying the name of the cluster a node container belongs to
pub const CLUSTER_LABEL: &str = "k3d.cluster";

/// Label carrying the node role
pub const ROLE_LABEL: &str = "k3d.role";

/// Role of control-plane nodes. These hold the generated kubeconfig.
pub const MASTER_ROLE: &str = "master";

/// Exact label set used to filter nodes. All pairs must match.
pub type LabelSet = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Labels selecting the control-plane nodes of this cluster
    pub fn control_plane_labels(&self) -> LabelSet {
        let mut labels = LabelSet::new();
        labels.insert(CLUSTER_LABEL.into(), self.name.clone());
        labels.insert(ROLE_LABEL.into(), MASTER_ROLE.into());
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub labels: LabelSet,
}

impl Node {
    pub fn new(name: impl Into<String>, labels: LabelSet) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    /// `true` if every pair of `labels` is present on the node
    pub fn matches(&self, labels: &LabelSet) -> bool {
        labels
            .iter()
            .all(|(key, value)| self.labels.get(key) == Some(value))
    }
}
