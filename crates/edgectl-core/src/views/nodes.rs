use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::{NewNode, Node};

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, settle};

/// Fixed toast for a failed node listing.
pub const NODES_LOAD_ERROR: &str = "Error loading edge nodes. Please try again later.";

/// `/nodes`: every registered edge node, plus the add-node dialog.
#[derive(Clone)]
pub struct NodesView {
    client: Arc<ApiClient>,
    state: ViewState<Vec<Node>>,
}

impl NodesView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Node>> {
        &self.state
    }

    pub fn nodes(&self) -> &[Node] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self.client.list_nodes().await.map_err(CoreError::from);
        let (state, outcome) = settle(result, Some(NODES_LOAD_ERROR));
        self.state = state;
        outcome
    }

    /// Register a node, then re-fetch the list.
    pub async fn add(&mut self, node: &NewNode) -> Outcome {
        if let Some(rejected) = precheck(&schema::node_add(), node) {
            return rejected;
        }

        match self.client.create_node(node).await {
            Ok(()) => Outcome::success(format!("Successfully added edge node {}.", node.serial))
                .merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}
