// CNCA console endpoints (AF traffic influence + PFD management).

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::cnca::PfdData;
use crate::models::{PfdTransaction, Subscription};

/// API root on the AF server.
pub const CNCA_ROOT: &str = "/CNCA/1.0.1";

fn subscriptions() -> String {
    format!("{CNCA_ROOT}/subscriptions")
}

fn transactions() -> String {
    format!("{CNCA_ROOT}/pfd/transactions")
}

impl ApiClient {
    // ── Traffic-influence subscriptions ──────────────────────────────

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        let list: Option<Vec<Subscription>> = self.get(&subscriptions()).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn get_subscription(&self, id: &str) -> Result<Subscription, Error> {
        self.get(&format!("{}/{id}", subscriptions())).await
    }

    /// Returns the `Location` of the new subscription when the AF sends one.
    pub async fn create_subscription(&self, sub: &Subscription) -> Result<Option<String>, Error> {
        self.post_location(&subscriptions(), sub).await
    }

    /// Full replacement.
    pub async fn update_subscription(&self, id: &str, sub: &Subscription) -> Result<(), Error> {
        self.put_no_response(&format!("{}/{id}", subscriptions()), sub)
            .await
    }

    /// Partial update; only the fields set in `patch` are sent.
    pub async fn patch_subscription(
        &self,
        id: &str,
        patch: &serde_json::Value,
    ) -> Result<(), Error> {
        self.patch_no_response(&format!("{}/{id}", subscriptions()), patch)
            .await
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("{}/{id}", subscriptions())).await
    }

    // ── PFD transactions ─────────────────────────────────────────────

    pub async fn list_pfd_transactions(&self) -> Result<Vec<PfdTransaction>, Error> {
        let list: Option<Vec<PfdTransaction>> = self.get(&transactions()).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn get_pfd_transaction(&self, id: &str) -> Result<PfdTransaction, Error> {
        self.get(&format!("{}/{id}", transactions())).await
    }

    pub async fn create_pfd_transaction(
        &self,
        tx: &PfdTransaction,
    ) -> Result<Option<String>, Error> {
        self.post_location(&transactions(), tx).await
    }

    pub async fn update_pfd_transaction(&self, id: &str, tx: &PfdTransaction) -> Result<(), Error> {
        self.put_no_response(&format!("{}/{id}", transactions()), tx)
            .await
    }

    pub async fn delete_pfd_transaction(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("{}/{id}", transactions())).await
    }

    // ── PFD applications within a transaction ────────────────────────

    pub async fn get_pfd_application(&self, tx_id: &str, app_id: &str) -> Result<PfdData, Error> {
        self.get(&format!("{}/{tx_id}/applications/{app_id}", transactions()))
            .await
    }

    pub async fn update_pfd_application(
        &self,
        tx_id: &str,
        app_id: &str,
        data: &PfdData,
    ) -> Result<(), Error> {
        self.put_no_response(
            &format!("{}/{tx_id}/applications/{app_id}", transactions()),
            data,
        )
        .await
    }

    pub async fn delete_pfd_application(&self, tx_id: &str, app_id: &str) -> Result<(), Error> {
        self.delete(&format!("{}/{tx_id}/applications/{app_id}", transactions()))
            .await
    }
}
