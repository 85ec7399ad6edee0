use std::sync::Arc;

use edgectl_api::models::{KubeOvnPolicy, PolicyDocument, PolicySummary, TrafficPolicy};
use edgectl_api::{ApiClient, OrchestrationMode};

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::route::Route;
use crate::schema;
use crate::view::{ViewState, settle};

/// `/policies`: every policy for the current orchestration mode.
#[derive(Clone)]
pub struct PoliciesView {
    client: Arc<ApiClient>,
    mode: OrchestrationMode,
    state: ViewState<Vec<PolicySummary>>,
}

impl PoliciesView {
    pub fn new(client: Arc<ApiClient>, mode: OrchestrationMode) -> Self {
        Self {
            client,
            mode,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<PolicySummary>> {
        &self.state
    }

    pub fn policies(&self) -> &[PolicySummary] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .list_policies(self.mode)
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    pub async fn delete(&mut self, policy_id: &str) -> Outcome {
        match self.client.delete_policy(self.mode, policy_id).await {
            Ok(()) => {
                Outcome::success(format!("Deleted policy {policy_id}.")).merge(self.load().await)
            }
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}

/// `/policies/add` and `/policies/:id/edit`.
///
/// With no id the view starts from an empty document of the mode's
/// shape and `save` creates instead of updating.
#[derive(Clone)]
pub struct PolicyEditView {
    client: Arc<ApiClient>,
    mode: OrchestrationMode,
    policy_id: Option<String>,
    state: ViewState<PolicyDocument>,
}

impl PolicyEditView {
    pub fn new(client: Arc<ApiClient>, mode: OrchestrationMode, policy_id: Option<String>) -> Self {
        Self {
            client,
            mode,
            policy_id,
            state: ViewState::Loading,
        }
    }

    pub fn is_new(&self) -> bool {
        self.policy_id.is_none()
    }

    pub fn state(&self) -> &ViewState<PolicyDocument> {
        &self.state
    }

    /// Empty document in the shape this mode expects.
    pub fn blank(mode: OrchestrationMode) -> PolicyDocument {
        if mode.uses_kube_ovn_policies() {
            PolicyDocument::KubeOvn(KubeOvnPolicy::default())
        } else {
            PolicyDocument::Native(TrafficPolicy::default())
        }
    }

    pub async fn load(&mut self) -> Outcome {
        let Some(id) = self.policy_id.clone() else {
            self.state = ViewState::Loaded(Self::blank(self.mode));
            return Outcome::none();
        };

        self.state = ViewState::Loading;
        match self.client.get_policy(self.mode, &id).await {
            Ok(doc) => {
                self.state = ViewState::Loaded(doc);
                Outcome::none()
            }
            Err(e) => {
                self.state = ViewState::LoadedWithError(Self::blank(self.mode));
                Outcome::failure(&CoreError::from(e), None)
            }
        }
    }

    /// Create or update, depending on whether this view has an id.
    /// Creating navigates back to the policy list.
    pub async fn save(&mut self, doc: PolicyDocument) -> Outcome {
        let descriptor = schema::policy_for(self.mode);
        if let Some(rejected) = precheck(&descriptor, &doc) {
            return rejected;
        }

        match self.policy_id.clone() {
            Some(id) => {
                let doc = with_id(doc, &id);
                match self.client.update_policy(self.mode, &doc).await {
                    Ok(()) => {
                        self.state = self.state.with_data(doc);
                        Outcome::success("Successfully updated policy.")
                    }
                    Err(e) => Outcome::failure(&e.into(), None),
                }
            }
            None => match self.client.create_policy(self.mode, &doc).await {
                Ok(()) => {
                    Outcome::success("Successfully created policy.").with_redirect(Route::Policies)
                }
                Err(e) => Outcome::failure(&e.into(), None),
            },
        }
    }

    pub async fn delete(&mut self) -> Outcome {
        let Some(id) = self.policy_id.clone() else {
            return Outcome::none();
        };

        match self.client.delete_policy(self.mode, &id).await {
            Ok(()) => {
                Outcome::success(format!("Deleted policy {id}.")).with_redirect(Route::Policies)
            }
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}

fn with_id(doc: PolicyDocument, id: &str) -> PolicyDocument {
    match doc {
        PolicyDocument::Native(p) => PolicyDocument::Native(TrafficPolicy {
            id: id.to_owned(),
            ..p
        }),
        PolicyDocument::KubeOvn(p) => PolicyDocument::KubeOvn(KubeOvnPolicy {
            id: id.to_owned(),
            ..p
        }),
    }
}
