// Wire types for the controller, CUPS, and CNCA REST APIs.
//
// Records mirror backend responses field-for-field. Optional and
// defaulted fields tolerate the summary shapes list endpoints return.

pub mod app;
pub mod cnca;
pub mod cups;
pub mod dns;
pub mod node;
pub mod policy;

pub use app::{
    App, AppList, AppStatus, AppType, EpaFeature, LifecycleCommand, NodeApp, NodeAppList,
    PortProtocol, PortSpec,
};
pub use cnca::{PfdData, PfdTransaction, Subscription};
pub use cups::{Userplane, UserplaneFunction};
pub use dns::{DnsConfig, NfdTag};
pub use node::{Interface, InterfaceDriver, InterfaceType, NewNode, Node};
pub use policy::{KubeOvnPolicy, PolicyAssignment, PolicyDocument, PolicySummary, TrafficPolicy};

use serde::{Deserialize, Deserializer, Serialize};

/// Generic `{ "id": ... }` body used for deployments and policy
/// assignments, and returned by some create endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdBody {
    pub id: String,
}

pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Reads an explicit `null` as the type's default. The controller
/// encodes empty lists as `null`, which plain `#[serde(default)]`
/// rejects.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
