// CUPS console endpoints. The userplane list is a bare JSON array.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Userplane;

impl ApiClient {
    pub async fn list_userplanes(&self) -> Result<Vec<Userplane>, Error> {
        let list: Option<Vec<Userplane>> = self.get("/userplanes").await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn get_userplane(&self, id: &str) -> Result<Userplane, Error> {
        self.get(&format!("/userplanes/{id}")).await
    }

    pub async fn create_userplane(&self, userplane: &Userplane) -> Result<(), Error> {
        self.post_no_response("/userplanes", userplane).await
    }

    pub async fn update_userplane(&self, userplane: &Userplane) -> Result<(), Error> {
        self.patch_no_response(&format!("/userplanes/{}", userplane.id), userplane)
            .await
    }

    pub async fn delete_userplane(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/userplanes/{id}")).await
    }
}
