use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::DnsConfig;

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, report, settle};

/// `/nodes/:id` DNS tab. A node without a config shows an empty one.
#[derive(Clone)]
pub struct DnsView {
    client: Arc<ApiClient>,
    node_id: String,
    state: ViewState<DnsConfig>,
}

impl DnsView {
    pub fn new(client: Arc<ApiClient>, node_id: impl Into<String>) -> Self {
        Self {
            client,
            node_id: node_id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<DnsConfig> {
        &self.state
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .get_dns(&self.node_id)
            .await
            .map(Option::unwrap_or_default)
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    pub async fn apply(&mut self, config: DnsConfig) -> Outcome {
        if let Some(rejected) = precheck(&schema::dns_config_apply(), &config) {
            return rejected;
        }

        let result = self
            .client
            .apply_dns(&self.node_id, &config)
            .await
            .map_err(CoreError::from);
        if result.is_ok() {
            self.state = self.state.with_data(config);
        }
        report(result, "Successfully applied DNS Config to node")
    }

    pub async fn delete(&mut self) -> Outcome {
        let result = self
            .client
            .delete_dns(&self.node_id)
            .await
            .map_err(CoreError::from);
        if result.is_ok() {
            self.state = ViewState::Loaded(DnsConfig::default());
        }
        report(result, "Successfully deleted DNS Config on node")
    }
}
