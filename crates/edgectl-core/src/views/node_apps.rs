use std::sync::Arc;

use edgectl_api::models::{App, AppStatus, AppType, LifecycleCommand, NodeApp, PolicySummary};
use edgectl_api::{ApiClient, OrchestrationMode};
use futures::future::{join_all, join3};
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::notify::Outcome;
use crate::view::{ViewState, settle};

/// One deployed app, joined with its catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeAppRow {
    pub id: String,
    pub name: String,
    pub version: String,
    pub vendor: String,
    #[serde(rename = "type")]
    pub kind: Option<AppType>,
    pub status: AppStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAppsData {
    pub rows: Vec<NodeAppRow>,
    /// Catalog, for the deploy picker.
    pub catalog: Vec<App>,
    /// Policies, for the per-app policy picker.
    pub policies: Vec<PolicySummary>,
}

/// `/nodes/:id` apps tab.
#[derive(Clone)]
pub struct NodeAppsView {
    client: Arc<ApiClient>,
    mode: OrchestrationMode,
    node_id: String,
    state: ViewState<NodeAppsData>,
}

impl NodeAppsView {
    pub fn new(client: Arc<ApiClient>, mode: OrchestrationMode, node_id: impl Into<String>) -> Self {
        Self {
            client,
            mode,
            node_id: node_id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn state(&self) -> &ViewState<NodeAppsData> {
        &self.state
    }

    pub fn rows(&self) -> &[NodeAppRow] {
        self.state.data().map_or(&[], |d| d.rows.as_slice())
    }

    /// Catalog, deployed apps, and policies in parallel; then every
    /// deployed app's status in a second parallel burst. A failed
    /// status call degrades that row to `unknown`.
    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self.fetch().await;
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    async fn fetch(&self) -> Result<NodeAppsData, CoreError> {
        let (catalog, deployed, policies) = join3(
            self.client.list_apps(),
            self.client.list_node_apps(&self.node_id),
            self.client.list_policies(self.mode),
        )
        .await;
        let catalog = catalog?;
        let deployed = deployed?;
        let policies = policies?;

        let statuses = join_all(
            deployed
                .iter()
                .map(|app| self.client.get_node_app(&self.node_id, &app.id)),
        )
        .await;

        let rows = deployed
            .iter()
            .zip(statuses)
            .map(|(app, status)| {
                let status = status.map_or_else(
                    |e| {
                        debug!(app = %app.id, error = %e, "status unavailable");
                        AppStatus::Unknown
                    },
                    |detail| detail.status,
                );
                join_row(app, status, &catalog)
            })
            .collect();

        Ok(NodeAppsData {
            rows,
            catalog,
            policies,
        })
    }

    pub async fn deploy(&mut self, app_id: &str) -> Outcome {
        match self.client.deploy_app(&self.node_id, app_id).await {
            Ok(()) => Outcome::success(format!("Successfully deployed app {app_id}."))
                .merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    /// Send a lifecycle command, then refresh that app's status.
    pub async fn command(&mut self, app_id: &str, command: LifecycleCommand) -> Outcome {
        if let Err(e) = self
            .client
            .command_node_app(&self.node_id, app_id, command)
            .await
        {
            return Outcome::failure(&e.into(), None);
        }

        if let Ok(detail) = self.client.get_node_app(&self.node_id, app_id).await {
            self.state = self.state.clone().map(|data| with_status(data, &detail));
        }
        Outcome::success(format!("Application {command} was successful"))
    }

    pub async fn remove(&mut self, app_id: &str) -> Outcome {
        match self.client.remove_node_app(&self.node_id, app_id).await {
            Ok(()) => Outcome::success("Application has been removed from edge node")
                .merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}

fn join_row(app: &NodeApp, status: AppStatus, catalog: &[App]) -> NodeAppRow {
    let entry = catalog.iter().find(|c| c.id == app.id);
    NodeAppRow {
        id: app.id.clone(),
        name: entry.map(|c| c.name.clone()).unwrap_or_default(),
        version: entry.map(|c| c.version.clone()).unwrap_or_default(),
        vendor: entry.map(|c| c.vendor.clone()).unwrap_or_default(),
        kind: entry.map(|c| c.kind),
        status,
    }
}

fn with_status(data: NodeAppsData, detail: &NodeApp) -> NodeAppsData {
    let rows = data
        .rows
        .into_iter()
        .map(|row| {
            if row.id == detail.id {
                NodeAppRow {
                    status: detail.status,
                    ..row
                }
            } else {
                row
            }
        })
        .collect();
    NodeAppsData { rows, ..data }
}
