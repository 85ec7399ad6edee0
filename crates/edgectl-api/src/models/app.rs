use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

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
pub enum AppType {
    #[default]
    Container,
    Vm,
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
pub enum PortProtocol {
    #[default]
    Tcp,
    Udp,
    Icmp,
    Sctp,
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub port: u32,
    #[serde(default)]
    pub protocol: PortProtocol,
}

/// An application in the controller's catalog.
///
/// List responses carry the summary fields only; the resource limits,
/// ports, and source default when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: AppType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cores: u32,
    /// Megabytes.
    #[serde(default)]
    pub memory: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub ports: Vec<PortSpec>,
    #[serde(default)]
    pub source: String,
    #[serde(
        rename = "epafeatures",
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub epa_features: Vec<EpaFeature>,
}

/// Enhanced Platform Awareness request, e.g. `{key: "hugepages", value: "2"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpaFeature {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub apps: Vec<App>,
}

// ── Node apps ───────────────────────────────────────────────────────

/// Lifecycle status reported for an app deployed on a node.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AppStatus {
    Deploying,
    Deployed,
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Commands accepted by `PATCH /nodes/{n}/apps/{a}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LifecycleCommand {
    Start,
    Stop,
    Restart,
}

/// An app deployed on a node, as returned by the per-app status call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeApp {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: AppStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeAppList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub apps: Vec<NodeApp>,
}

#[derive(Serialize)]
pub(crate) struct CommandBody {
    pub command: LifecycleCommand,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unrecognised_status_maps_to_unknown() {
        let app: NodeApp = serde_json::from_str(r#"{"id":"x","status":"hibernating"}"#).unwrap();
        assert_eq!(app.status, AppStatus::Unknown);

        let running: NodeApp = serde_json::from_str(r#"{"id":"x","status":"running"}"#).unwrap();
        assert_eq!(running.status, AppStatus::Running);

        let missing: NodeApp = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(missing.status, AppStatus::Unknown);
        assert_eq!(AppStatus::default(), AppStatus::Unknown);
    }

    #[test]
    fn summary_app_fills_defaults() {
        let app: App = serde_json::from_str(
            r#"{"id":"a1","type":"vm","name":"ubuntu","version":"18.04","vendor":"canonical"}"#,
        )
        .unwrap();
        assert_eq!(app.kind, AppType::Vm);
        assert_eq!(app.cores, 0);
        assert!(app.ports.is_empty());
    }
}
