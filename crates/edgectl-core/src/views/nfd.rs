use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::NfdTag;

use crate::error::CoreError;
use crate::notify::Outcome;
use crate::view::{ViewState, settle};

/// Feature-discovery tags shown on the node dashboard.
#[derive(Clone)]
pub struct NfdView {
    client: Arc<ApiClient>,
    node_id: String,
    state: ViewState<Vec<NfdTag>>,
}

impl NfdView {
    pub fn new(client: Arc<ApiClient>, node_id: impl Into<String>) -> Self {
        Self {
            client,
            node_id: node_id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<NfdTag>> {
        &self.state
    }

    pub fn tags(&self) -> &[NfdTag] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .list_nfd(&self.node_id)
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }
}
