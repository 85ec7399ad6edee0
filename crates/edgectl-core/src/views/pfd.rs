use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::{PfdData, PfdTransaction};

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, report, settle};

/// `/services`: PFD transactions and their per-application entries.
#[derive(Clone)]
pub struct PfdView {
    client: Arc<ApiClient>,
    state: ViewState<Vec<PfdTransaction>>,
}

impl PfdView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<PfdTransaction>> {
        &self.state
    }

    pub fn transactions(&self) -> &[PfdTransaction] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .list_pfd_transactions()
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    pub async fn get(&self, id: &str) -> Result<PfdTransaction, CoreError> {
        Ok(self.client.get_pfd_transaction(id).await?)
    }

    pub async fn create(&mut self, tx: &PfdTransaction) -> Outcome {
        if let Some(rejected) = precheck(&schema::pfd_transaction(), tx) {
            return rejected;
        }

        match self.client.create_pfd_transaction(tx).await {
            Ok(_) => {
                Outcome::success("Successfully created PFD transaction.").merge(self.load().await)
            }
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    pub async fn update(&mut self, id: &str, tx: &PfdTransaction) -> Outcome {
        if let Some(rejected) = precheck(&schema::pfd_transaction(), tx) {
            return rejected;
        }

        let result = self
            .client
            .update_pfd_transaction(id, tx)
            .await
            .map_err(CoreError::from);
        report(result, "Successfully updated PFD transaction.")
    }

    pub async fn delete(&mut self, id: &str) -> Outcome {
        match self.client.delete_pfd_transaction(id).await {
            Ok(()) => {
                Outcome::success(format!("Deleted PFD transaction {id}.")).merge(self.load().await)
            }
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    // ── Applications within a transaction ────────────────────────────

    pub async fn get_app(&self, tx_id: &str, app_id: &str) -> Result<PfdData, CoreError> {
        Ok(self.client.get_pfd_application(tx_id, app_id).await?)
    }

    pub async fn update_app(&mut self, tx_id: &str, app_id: &str, data: &PfdData) -> Outcome {
        if let Some(rejected) = precheck(&schema::pfd_application(), data) {
            return rejected;
        }

        let result = self
            .client
            .update_pfd_application(tx_id, app_id, data)
            .await
            .map_err(CoreError::from);
        report(result, "Successfully updated PFD application.")
    }

    pub async fn delete_app(&mut self, tx_id: &str, app_id: &str) -> Outcome {
        let result = self
            .client
            .delete_pfd_application(tx_id, app_id)
            .await
            .map_err(CoreError::from);
        report(result, format!("Deleted PFD application {app_id}."))
    }
}
