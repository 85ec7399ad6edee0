use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::Node;

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, report, settle};

/// `/nodes/:id` dashboard tab: the node record itself.
#[derive(Clone)]
pub struct NodeView {
    client: Arc<ApiClient>,
    node_id: String,
    state: ViewState<Node>,
}

impl NodeView {
    pub fn new(client: Arc<ApiClient>, node_id: impl Into<String>) -> Self {
        Self {
            client,
            node_id: node_id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn state(&self) -> &ViewState<Node> {
        &self.state
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .get_node(&self.node_id)
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    /// PATCH the edited node. The id is pinned to this view's node.
    pub async fn save(&mut self, edited: Node) -> Outcome {
        let node = Node {
            id: self.node_id.clone(),
            ..edited
        };
        if let Some(rejected) = precheck(&schema::node(), &node) {
            return rejected;
        }

        let result = self.client.update_node(&node).await.map_err(CoreError::from);
        if result.is_ok() {
            self.state = self.state.with_data(node);
        }
        report(result, "Successfully updated node.")
    }
}
