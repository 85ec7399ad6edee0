use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::Subscription;

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, report, settle};

/// `/subscriptions`: AF traffic-influence subscriptions on the CNCA server.
#[derive(Clone)]
pub struct SubscriptionsView {
    client: Arc<ApiClient>,
    state: ViewState<Vec<Subscription>>,
}

impl SubscriptionsView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Subscription>> {
        &self.state
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .list_subscriptions()
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    pub async fn get(&self, id: &str) -> Result<Subscription, CoreError> {
        Ok(self.client.get_subscription(id).await?)
    }

    /// Create, then re-fetch. The AF's `Location` (when sent) is logged.
    pub async fn create(&mut self, sub: &Subscription) -> Outcome {
        if let Some(rejected) = precheck(&schema::subscription(), sub) {
            return rejected;
        }

        match self.client.create_subscription(sub).await {
            Ok(location) => {
                if let Some(location) = location {
                    tracing::debug!(%location, "subscription created");
                }
                Outcome::success("Successfully created subscription.").merge(self.load().await)
            }
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    /// Full replacement (PUT).
    pub async fn update(&mut self, id: &str, sub: &Subscription) -> Outcome {
        if let Some(rejected) = precheck(&schema::subscription(), sub) {
            return rejected;
        }

        let result = self
            .client
            .update_subscription(id, sub)
            .await
            .map_err(CoreError::from);
        report(result, "Successfully updated subscription.")
    }

    /// Partial update (PATCH) with only the fields present in `patch`.
    pub async fn patch(&mut self, id: &str, patch: &serde_json::Value) -> Outcome {
        if !patch.is_object() {
            let err = CoreError::Validation {
                message: "patch body must be a JSON object".into(),
            };
            return Outcome::failure(&err, None);
        }

        let result = self
            .client
            .patch_subscription(id, patch)
            .await
            .map_err(CoreError::from);
        report(result, "Successfully patched subscription.")
    }

    pub async fn delete(&mut self, id: &str) -> Outcome {
        match self.client.delete_subscription(id).await {
            Ok(()) => {
                Outcome::success(format!("Deleted subscription {id}.")).merge(self.load().await)
            }
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}
