use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::is_default;

/// An edge node registered with the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub serial: String,
}

/// Body of `POST /nodes`. The controller assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNode {
    pub name: String,
    pub location: String,
    pub serial: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct NodeList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub nodes: Vec<Node>,
}

// ── Interfaces ──────────────────────────────────────────────────────

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
pub enum InterfaceDriver {
    #[default]
    Kernel,
    Userspace,
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
pub enum InterfaceType {
    #[default]
    None,
    Upstream,
    Downstream,
    Bidirectional,
    Breakout,
}

/// A network interface on an edge node.
///
/// `mac_address` and `vlan` are reported by the node and read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub driver: InterfaceDriver,
    #[serde(rename = "type", default)]
    pub kind: InterfaceType,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub vlan: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub zones: Vec<String>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub fallback_interface: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct InterfaceList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub interfaces: Vec<Interface>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn interface_type_field_is_renamed() {
        let iface: Interface = serde_json::from_str(
            r#"{"id":"0000:00:1f.6","driver":"userspace","type":"breakout","mac_address":"aa:bb","vlan":3}"#,
        )
        .unwrap();

        assert_eq!(iface.kind, InterfaceType::Breakout);
        assert_eq!(iface.driver, InterfaceDriver::Userspace);
        assert!(iface.zones.is_empty());

        let back = serde_json::to_value(&iface).unwrap();
        assert_eq!(back["type"], "breakout");
        assert!(back.get("fallback_interface").is_none());
    }

    #[test]
    fn null_zones_and_empty_fallback_are_accepted() {
        let list: InterfaceList = serde_json::from_str(
            r#"{"interfaces":[
                {"id":"if0","description":"interface0","driver":"userspace","type":"upstream",
                 "mac_address":"mac0","vlan":50,"zones":null,"fallback_interface":""},
                {"id":"if1","description":"interface1","driver":"kernel","type":"none",
                 "mac_address":"mac1","vlan":1,"zones":null,"fallback_interface":""}
            ]}"#,
        )
        .unwrap();

        assert_eq!(list.interfaces.len(), 2);
        assert!(list.interfaces[0].zones.is_empty());
        assert_eq!(list.interfaces[0].kind, InterfaceType::Upstream);
        assert_eq!(list.interfaces[1].vlan, 1);

        let empty: InterfaceList = serde_json::from_str(r#"{"interfaces":null}"#).unwrap();
        assert!(empty.interfaces.is_empty());
    }

    #[test]
    fn node_without_id_serializes_without_it() {
        let node = Node {
            name: "n1".into(),
            ..Node::default()
        };
        let v = serde_json::to_value(&node).unwrap();
        assert!(v.get("id").is_none());
    }
}
