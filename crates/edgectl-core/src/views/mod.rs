// Resource views: one per console screen.
//
// Each view owns a client handle and a `ViewState`. `load` always leaves
// the state settled; mutations return an `Outcome` with the toast text
// and, where the console navigates, a redirect.

mod apps;
mod dns;
mod interfaces;
mod nfd;
mod node;
mod node_apps;
mod nodes;
mod pfd;
mod policies;
mod policy_controls;
mod subscriptions;
mod userplanes;

pub use apps::{AppView, AppsView};
pub use dns::DnsView;
pub use interfaces::InterfacesView;
pub use nfd::NfdView;
pub use node::NodeView;
pub use node_apps::{NodeAppRow, NodeAppsData, NodeAppsView};
pub use nodes::{NODES_LOAD_ERROR, NodesView};
pub use pfd::PfdView;
pub use policies::{PoliciesView, PolicyEditView};
pub use policy_controls::PolicyControls;
pub use subscriptions::SubscriptionsView;
pub use userplanes::UserplanesView;

use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema::{self, FormDescriptor};

/// Check `value` against a descriptor before sending it. Returns a
/// failed outcome listing the first few problems, or `None` if clean.
pub(crate) fn precheck<T: serde::Serialize>(descriptor: &FormDescriptor, value: &T) -> Option<Outcome> {
    let json = match serde_json::to_value(value) {
        Ok(json) => json,
        Err(e) => return Some(Outcome::failure(&CoreError::Internal(e.to_string()), None)),
    };

    let errors = schema::validate(descriptor, &json);
    if errors.is_empty() {
        return None;
    }

    let message = errors
        .iter()
        .take(3)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Some(Outcome::failure(&CoreError::Validation { message }, None))
}
