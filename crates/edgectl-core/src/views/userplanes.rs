use std::sync::Arc;

use edgectl_api::ApiClient;
use edgectl_api::models::Userplane;

use super::precheck;
use crate::error::CoreError;
use crate::notify::Outcome;
use crate::schema;
use crate::view::{ViewState, settle};

/// `/userplanes`: CUPS userplane records. Needs the CUPS client.
#[derive(Clone)]
pub struct UserplanesView {
    client: Arc<ApiClient>,
    state: ViewState<Vec<Userplane>>,
}

impl UserplanesView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Userplane>> {
        &self.state
    }

    pub fn userplanes(&self) -> &[Userplane] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    pub async fn load(&mut self) -> Outcome {
        self.state = ViewState::Loading;
        let result = self.client.list_userplanes().await.map_err(CoreError::from);
        let (state, outcome) = settle(result, None);
        self.state = state;
        outcome
    }

    pub async fn get(&self, id: &str) -> Result<Userplane, CoreError> {
        Ok(self.client.get_userplane(id).await?)
    }

    pub async fn create(&mut self, userplane: &Userplane) -> Outcome {
        if let Some(rejected) = precheck(&schema::userplane(), userplane) {
            return rejected;
        }

        match self.client.create_userplane(userplane).await {
            Ok(()) => Outcome::success("Successfully created userplane.").merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    pub async fn update(&mut self, userplane: &Userplane) -> Outcome {
        if let Some(rejected) = precheck(&schema::userplane(), userplane) {
            return rejected;
        }

        match self.client.update_userplane(userplane).await {
            Ok(()) => Outcome::success("Successfully updated userplane.").merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Outcome {
        match self.client.delete_userplane(id).await {
            Ok(()) => Outcome::success(format!("Deleted userplane {id}.")).merge(self.load().await),
            Err(e) => Outcome::failure(&e.into(), None),
        }
    }
}
