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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum UserplaneFunction {
    #[default]
    None,
    Sgwu,
    Pgwu,
    Saegwu,
}

/// Control-plane / user-plane address pair (Sxa, Sxb).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpUpEndpoint {
    #[serde(default)]
    pub cp_ip_address: String,
    #[serde(default)]
    pub up_ip_address: String,
}

/// User-plane-only address (S1-U, S5-U, SGi, breakout, DNS).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpEndpoint {
    #[serde(default)]
    pub up_ip_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserplaneConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sxa: Option<CpUpEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sxb: Option<CpUpEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s1u: Option<UpEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s5u_sgw: Option<UpEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s5u_pgw: Option<UpEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sgi: Option<UpEndpoint>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub breakout: Vec<UpEndpoint>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub dns: Vec<UpEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlmnNetwork {
    pub mcc: String,
    pub mnc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tai {
    pub tac: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ecgi {
    pub eci: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uli {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tai: Option<Tai>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecgi: Option<Ecgi>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pdn {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub apns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<PlmnNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uli: Option<Uli>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdn: Option<Pdn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImsiRange {
    pub begin: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub apns: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub imsis: Vec<ImsiRange>,
}

/// A CUPS user-plane function instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Userplane {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub function: UserplaneFunction,
    #[serde(default)]
    pub config: UserplaneConfig,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub selectors: Vec<Selector>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub entitlements: Vec<Entitlement>,
}
