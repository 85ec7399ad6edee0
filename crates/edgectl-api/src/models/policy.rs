use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::app::PortProtocol;
use crate::orchestration::OrchestrationMode;

// ── Native traffic policies ─────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetAction {
    #[default]
    Accept,
    Reject,
    Drop,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FilterProtocol {
    #[default]
    All,
    Tcp,
    Udp,
    Icmp,
    Sctp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacFilter {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub mac_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpFilter {
    #[serde(default)]
    pub address: String,
    /// Prefix length, 0..=128.
    #[serde(default)]
    pub mask: u8,
    #[serde(default)]
    pub begin_port: u16,
    #[serde(default)]
    pub end_port: u16,
    #[serde(default)]
    pub protocol: FilterProtocol,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtpFilter {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub mask: u8,
    /// 14 or 15 digit subscriber identities.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub imsis: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSelector {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macs: Option<MacFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtp: Option<GtpFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacModifier {
    pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpModifier {
    pub address: String,
    #[serde(default)]
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTarget {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: TargetAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<MacModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpModifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficRule {
    #[serde(default)]
    pub description: String,
    /// 1..=65536, lower runs first.
    #[serde(default)]
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TrafficSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<TrafficSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TrafficTarget>,
}

/// Native traffic policy: an ordered list of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficPolicy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub traffic_rules: Vec<TrafficRule>,
}

// ── Kube-OVN network policies ───────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpBlock {
    pub cidr: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub except: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubePort {
    pub port: u16,
    #[serde(default)]
    pub protocol: PortProtocol,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub from: Vec<IpBlock>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub ports: Vec<KubePort>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressRule {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub to: Vec<IpBlock>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub ports: Vec<KubePort>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubeOvnPolicy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub ingress_rules: Vec<IngressRule>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub egress_rules: Vec<EgressRule>,
}

// ── Either flavour ──────────────────────────────────────────────────

/// A policy document in whichever shape the orchestration mode uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PolicyDocument {
    Native(TrafficPolicy),
    KubeOvn(KubeOvnPolicy),
}

impl PolicyDocument {
    pub fn id(&self) -> &str {
        match self {
            Self::Native(p) => &p.id,
            Self::KubeOvn(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Native(p) => &p.name,
            Self::KubeOvn(p) => &p.name,
        }
    }

    /// Number of rules (ingress plus egress for Kube-OVN).
    pub fn rule_count(&self) -> usize {
        match self {
            Self::Native(p) => p.traffic_rules.len(),
            Self::KubeOvn(p) => p.ingress_rules.len() + p.egress_rules.len(),
        }
    }

    /// Parse a document in the shape `mode` expects.
    pub fn from_value(
        mode: OrchestrationMode,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        if mode.uses_kube_ovn_policies() {
            serde_json::from_value(value).map(Self::KubeOvn)
        } else {
            serde_json::from_value(value).map(Self::Native)
        }
    }
}

/// Row in a policy listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PolicyList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub policies: Vec<PolicySummary>,
}

/// Body of a policy-assignment PATCH, and the shape GET returns.
pub type PolicyAssignment = super::IdBody;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn native_policy_parses_nested_rule() {
        let raw = r#"{
            "id": "p1",
            "name": "block-gtp",
            "traffic_rules": [{
                "description": "drop subscriber",
                "priority": 10,
                "source": {"gtp": {"address": "10.0.0.0", "mask": 8, "imsis": ["123456789012345"]}},
                "target": {"action": "drop"}
            }]
        }"#;
        let policy: TrafficPolicy = serde_json::from_str(raw).unwrap();
        let rule = &policy.traffic_rules[0];

        assert_eq!(rule.priority, 10);
        assert_eq!(rule.target.as_ref().unwrap().action, TargetAction::Drop);
        assert_eq!(
            rule.source.as_ref().unwrap().gtp.as_ref().unwrap().imsis,
            vec!["123456789012345".to_owned()]
        );
        assert!(rule.destination.is_none());
    }

    #[test]
    fn document_serializes_without_wrapper() {
        let doc = PolicyDocument::KubeOvn(KubeOvnPolicy {
            name: "deny-all".into(),
            ..KubeOvnPolicy::default()
        });
        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v["name"], "deny-all");
        assert!(v.get("KubeOvn").is_none());
        assert_eq!(doc.rule_count(), 0);
    }

    #[test]
    fn mode_picks_document_shape() {
        let raw = serde_json::json!({"name": "p", "ingress_rules": [{"from": [{"cidr": "10.0.0.0/8"}]}]});
        let doc = PolicyDocument::from_value(OrchestrationMode::KubernetesOvn, raw.clone()).unwrap();
        assert!(matches!(doc, PolicyDocument::KubeOvn(_)));
        assert_eq!(doc.rule_count(), 1);

        let doc = PolicyDocument::from_value(OrchestrationMode::Native, raw).unwrap();
        assert!(matches!(doc, PolicyDocument::Native(_)));
        assert_eq!(doc.rule_count(), 0);
    }
}
