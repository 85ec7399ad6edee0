use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ARecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alias: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecords {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub a: Vec<ARecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forwarder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfigurations {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub forwarders: Vec<Forwarder>,
}

/// Per-node DNS configuration. A node has at most one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub records: DnsRecords,
    #[serde(default)]
    pub configurations: DnsConfigurations,
}

impl DnsConfig {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.records.a.is_empty() && self.configurations.forwarders.is_empty()
    }
}

/// Feature-discovery tag reported by a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfdTag {
    pub id: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct NfdList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub nodenfds: Vec<NfdTag>,
}
