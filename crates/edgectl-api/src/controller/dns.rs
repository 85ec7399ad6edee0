use crate::client::ApiClient;
use crate::error::Error;
use crate::models::DnsConfig;

impl ApiClient {
    /// `None` when the node has no DNS configuration (404).
    pub async fn get_dns(&self, node_id: &str) -> Result<Option<DnsConfig>, Error> {
        self.get_optional(&format!("/nodes/{node_id}/dns")).await
    }

    pub async fn apply_dns(&self, node_id: &str, config: &DnsConfig) -> Result<(), Error> {
        self.patch_no_response(&format!("/nodes/{node_id}/dns"), config)
            .await
    }

    /// Returns `false` if there was nothing to delete.
    pub async fn delete_dns(&self, node_id: &str) -> Result<bool, Error> {
        self.delete_optional(&format!("/nodes/{node_id}/dns")).await
    }
}
