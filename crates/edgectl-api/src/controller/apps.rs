use crate::client::ApiClient;
use crate::error::Error;
use crate::models::app::CommandBody;
use crate::models::{App, AppList, IdBody, LifecycleCommand, NodeApp, NodeAppList};

impl ApiClient {
    // ── Catalog ──────────────────────────────────────────────────────

    pub async fn list_apps(&self) -> Result<Vec<App>, Error> {
        let list: AppList = self.get("/apps").await?;
        Ok(list.apps)
    }

    pub async fn get_app(&self, app_id: &str) -> Result<App, Error> {
        self.get(&format!("/apps/{app_id}")).await
    }

    /// Returns the new id when the controller echoes one back.
    pub async fn create_app(&self, app: &App) -> Result<Option<String>, Error> {
        let created: Option<IdBody> = self.post("/apps", app).await?;
        Ok(created.map(|c| c.id).filter(|id| !id.is_empty()))
    }

    pub async fn update_app(&self, app: &App) -> Result<(), Error> {
        self.patch_no_response(&format!("/apps/{}", app.id), app)
            .await
    }

    pub async fn delete_app(&self, app_id: &str) -> Result<(), Error> {
        self.delete(&format!("/apps/{app_id}")).await
    }

    // ── Deployed on a node ───────────────────────────────────────────

    pub async fn list_node_apps(&self, node_id: &str) -> Result<Vec<NodeApp>, Error> {
        let list: NodeAppList = self.get(&format!("/nodes/{node_id}/apps")).await?;
        Ok(list.apps)
    }

    pub async fn deploy_app(&self, node_id: &str, app_id: &str) -> Result<(), Error> {
        let body = IdBody {
            id: app_id.to_owned(),
        };
        self.post_no_response(&format!("/nodes/{node_id}/apps"), &body)
            .await
    }

    /// Current lifecycle status of one deployed app.
    pub async fn get_node_app(&self, node_id: &str, app_id: &str) -> Result<NodeApp, Error> {
        let mut app: NodeApp = self.get(&format!("/nodes/{node_id}/apps/{app_id}")).await?;
        if app.id.is_empty() {
            app.id = app_id.to_owned();
        }
        Ok(app)
    }

    pub async fn command_node_app(
        &self,
        node_id: &str,
        app_id: &str,
        command: LifecycleCommand,
    ) -> Result<(), Error> {
        self.patch_no_response(
            &format!("/nodes/{node_id}/apps/{app_id}"),
            &CommandBody { command },
        )
        .await
    }

    pub async fn remove_node_app(&self, node_id: &str, app_id: &str) -> Result<(), Error> {
        self.delete(&format!("/nodes/{node_id}/apps/{app_id}"))
            .await
    }
}
