use std::sync::Arc;

use edgectl_api::models::PolicySummary;
use edgectl_api::{ApiClient, OrchestrationMode, PolicyResource};

use crate::error::{CoreError, TRY_AGAIN_LATER};
use crate::notify::Outcome;
use crate::view::{ViewState, report};

/// Assign/remove control for the traffic policy on one node resource
/// (an interface or a deployed app).
///
/// A missing assignment (404) is a normal state, not an error.
#[derive(Clone)]
pub struct PolicyControls {
    client: Arc<ApiClient>,
    mode: OrchestrationMode,
    node_id: String,
    resource: PolicyResource,
    resource_id: String,
    state: ViewState<Option<String>>,
}

impl PolicyControls {
    pub fn new(
        client: Arc<ApiClient>,
        mode: OrchestrationMode,
        node_id: impl Into<String>,
        resource: PolicyResource,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            mode,
            node_id: node_id.into(),
            resource,
            resource_id: resource_id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Option<String>> {
        &self.state
    }

    /// Id of the assigned policy, if any.
    pub fn policy_id(&self) -> Option<&str> {
        self.state.data().and_then(|id| id.as_deref())
    }

    /// Label for the assign button.
    pub fn label(&self) -> &'static str {
        if self.policy_id().is_some() {
            "Edit"
        } else {
            "Add"
        }
    }

    pub fn can_remove(&self) -> bool {
        self.policy_id().is_some()
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .get_resource_policy(self.mode, &self.node_id, self.resource, &self.resource_id)
            .await
            .map_err(CoreError::from);

        match result {
            Ok(assigned) => {
                self.state = ViewState::Loaded(assigned);
                Outcome::none()
            }
            Err(e) => {
                self.state = ViewState::LoadedWithError(None);
                let text = format!(
                    "Error fetching Node {} Policy: {e}. {TRY_AGAIN_LATER}",
                    self.resource
                );
                Outcome::failure(&e, Some(&text))
            }
        }
    }

    pub async fn assign(&mut self, policy_id: &str) -> Outcome {
        let result = self
            .client
            .assign_resource_policy(
                self.mode,
                &self.node_id,
                self.resource,
                &self.resource_id,
                policy_id,
            )
            .await
            .map_err(CoreError::from);
        if result.is_ok() {
            self.state = ViewState::Loaded(Some(policy_id.to_owned()));
        }
        report(result, format!("Successfully added policy on {}", self.resource))
    }

    /// Remove the assignment. A 404 means there was none: the control
    /// drops back to "Add" without reporting an error.
    pub async fn remove(&mut self) -> Outcome {
        let result = self
            .client
            .remove_resource_policy(self.mode, &self.node_id, self.resource, &self.resource_id)
            .await
            .map_err(CoreError::from);

        match result {
            Ok(true) => {
                self.state = ViewState::Loaded(None);
                Outcome::success(format!("Successfully deleted policy on {}", self.resource))
            }
            Ok(false) => {
                self.state = ViewState::Loaded(None);
                Outcome::none()
            }
            Err(e) => Outcome::failure(&e, None),
        }
    }

    /// Policies offered in the assign picker.
    pub async fn choices(&self) -> Result<Vec<PolicySummary>, CoreError> {
        Ok(self.client.list_policies(self.mode).await?)
    }
}
