// 3GPP AF traffic-influence and PFD management shapes (camelCase on the wire).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snssai {
    pub sst: u8,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sd: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInfo {
    pub flow_id: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub flow_descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthFlowDescription {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dest_mac_addr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub eth_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub f_desc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub f_dir: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_mac_addr: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub vlan_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInformation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv4_addr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv6_addr: String,
    pub port_number: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteToLocation {
    pub dnai: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_info: Option<RouteInformation>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub route_prof_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalValidity {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stop_time: String,
}

/// AF traffic-influence subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Resource link assigned by the AF; the subscription id is its last segment.
    #[serde(rename = "self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub af_service_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub af_app_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub af_trans_id: String,
    #[serde(default)]
    pub app_relo_ind: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dnn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snssai: Option<Snssai>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_group_id: String,
    #[serde(default)]
    pub any_ue_ind: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gpsi: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv4_addr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv6_addr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mac_addr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dnai_chg_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notification_destination: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub traffic_filters: Vec<FlowInfo>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub eth_traffic_filters: Vec<EthFlowDescription>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub traffic_routes: Vec<RouteToLocation>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub temp_validities: Vec<TemporalValidity>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub valid_geo_zone_ids: Vec<String>,
}

impl Subscription {
    /// Id parsed from the trailing segment of the `self` link.
    pub fn id(&self) -> Option<&str> {
        resource_id(&self.self_link)
    }
}

// ── PFD management ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pfd {
    #[serde(rename = "pfdID")]
    pub pfd_id: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub flow_descriptions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub urls: Vec<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub domain_names: Vec<String>,
}

/// PFDs for one external application within a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PfdData {
    #[serde(rename = "externalAppID")]
    pub external_app_id: String,
    #[serde(rename = "self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pfds: Vec<Pfd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caching_time: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PfdReport {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub external_app_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub failure_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PfdTransaction {
    #[serde(rename = "self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub supp_feat: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pfd_datas: Vec<PfdData>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pfd_reports: Vec<PfdReport>,
}

impl PfdTransaction {
    pub fn id(&self) -> Option<&str> {
        resource_id(&self.self_link)
    }
}

fn resource_id(link: &str) -> Option<&str> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}
