use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::Interface;

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, report, settle};

/// `/nodes/:id` interfaces tab.
///
/// Edits are staged locally one interface at a time and sent together
/// by [`commit`](Self::commit).
#[derive(Clone)]
pub struct InterfacesView {
    client: Arc<ApiClient>,
    node_id: String,
    state: ViewState<Vec<Interface>>,
    dirty: bool,
}

impl InterfacesView {
    pub fn new(client: Arc<ApiClient>, node_id: impl Into<String>) -> Self {
        Self {
            client,
            node_id: node_id.into(),
            state: ViewState::Loading,
            dirty: false,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn state(&self) -> &ViewState<Vec<Interface>> {
        &self.state
    }

    pub fn interfaces(&self) -> &[Interface] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    /// Staged changes not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .list_interfaces(&self.node_id)
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        self.dirty = false;
        outcome
    }

    /// Replace one interface in the local list. Read-only fields (MAC,
    /// VLAN) keep the values the node reported.
    pub fn stage(&mut self, edited: Interface) -> Outcome {
        if let Some(rejected) = precheck(&schema::interface(), &edited) {
            return rejected;
        }

        let current = self.interfaces();
        let Some(original) = current.iter().find(|i| i.id == edited.id) else {
            return Outcome::failure(
                &CoreError::NotFound {
                    message: format!("Interface {} not found on node {}", edited.id, self.node_id),
                },
                None,
            );
        };

        let staged = Interface {
            mac_address: original.mac_address.clone(),
            vlan: original.vlan,
            ..edited
        };
        let next: Vec<Interface> = current
            .iter()
            .map(|i| if i.id == staged.id { staged.clone() } else { i.clone() })
            .collect();

        self.state = self.state.with_data(next);
        self.dirty = true;
        Outcome::success(
            "Successfully staged node interface change, Please remember to Commit the changes",
        )
    }

    /// PATCH the whole interface list.
    pub async fn commit(&mut self) -> Outcome {
        let result = self
            .client
            .update_interfaces(&self.node_id, self.interfaces())
            .await
            .map_err(CoreError::from);
        if result.is_ok() {
            self.dirty = false;
        }
        report(result, "Successfully updated node interfaces")
    }
}
