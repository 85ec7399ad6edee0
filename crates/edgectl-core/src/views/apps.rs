use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::App;

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, report, settle};

/// `/apps`: the application catalog.
#[derive(Clone)]
pub struct AppsView {
    client: Arc<ApiClient>,
    state: ViewState<Vec<App>>,
}

impl AppsView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<App>> {
        &self.state
    }

    pub fn apps(&self) -> &[App] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self.client.list_apps().await.map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    /// Add an app to the catalog, then re-fetch.
    pub async fn create(&mut self, app: &App) -> Outcome {
        if let Some(rejected) = precheck(&schema::app(), app) {
            return rejected;
        }

        match self.client.create_app(app).await {
            Ok(_) => Outcome::success("Successfully created application.").merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    pub async fn delete(&mut self, app_id: &str) -> Outcome {
        match self.client.delete_app(app_id).await {
            Ok(()) => Outcome::success(format!("Deleted application {app_id}."))
                .merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}

/// `/apps/:id`: one catalog entry, editable.
#[derive(Clone)]
pub struct AppView {
    client: Arc<ApiClient>,
    app_id: String,
    state: ViewState<App>,
}

impl AppView {
    pub fn new(client: Arc<ApiClient>, app_id: impl Into<String>) -> Self {
        Self {
            client,
            app_id: app_id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn state(&self) -> &ViewState<App> {
        &self.state
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self
            .client
            .get_app(&self.app_id)
            .await
            .map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    pub async fn save(&mut self, edited: App) -> Outcome {
        let app = App {
            id: self.app_id.clone(),
            ..edited
        };
        if let Some(rejected) = precheck(&schema::app(), &app) {
            return rejected;
        }

        let result = self.client.update_app(&app).await.map_err(CoreError::from);
        if result.is_ok() {
            self.state = self.state.with_data(app);
        }
        report(result, "Successfully updated application.")
    }
}
