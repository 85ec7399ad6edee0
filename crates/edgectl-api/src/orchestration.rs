use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Deployment flavour of the controller backend.
///
/// Selects the path prefix for policy endpoints and which policy
/// document shape (native traffic rules vs. Kube-OVN network rules)
/// the controller speaks.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OrchestrationMode {
    #[default]
    Native,
    Kubernetes,
    KubernetesOvn,
}

impl OrchestrationMode {
    /// Prefix inserted before `/policies` and before the trailing
    /// `/policy` of assignment sub-resources.
    pub fn path_prefix(self) -> &'static str {
        match self {
            Self::Native | Self::Kubernetes => "",
            Self::KubernetesOvn => "/kube_ovn",
        }
    }

    /// Whether policies use the Kube-OVN ingress/egress document.
    pub fn uses_kube_ovn_policies(self) -> bool {
        matches!(self, Self::KubernetesOvn)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn prefixes_per_mode() {
        assert_eq!(OrchestrationMode::Native.path_prefix(), "");
        assert_eq!(OrchestrationMode::Kubernetes.path_prefix(), "");
        assert_eq!(OrchestrationMode::KubernetesOvn.path_prefix(), "/kube_ovn");
    }

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            OrchestrationMode::from_str("kubernetes-ovn").unwrap(),
            OrchestrationMode::KubernetesOvn
        );
        assert_eq!(OrchestrationMode::KubernetesOvn.to_string(), "kubernetes-ovn");
        assert!(OrchestrationMode::from_str("swarm").is_err());
    }
}
