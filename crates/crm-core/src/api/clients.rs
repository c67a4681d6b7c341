//! Client (account) endpoints.

use crate::models::{Client, ClientPatch, Contact, NewClient, NewContact, Page};

use super::{ApiClient, ApiError, ApiRequest, ListParams};

impl ApiClient {
    /// Fetch one page of clients.
    pub async fn list_clients(&self, params: &ListParams) -> Result<Page<Client>, ApiError> {
        self.fetch(params.apply(ApiRequest::get("clients/"))).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, ApiError> {
        self.get(&format!("clients/{id}/")).await
    }

    pub async fn create_client(&self, client: &NewClient) -> Result<Client, ApiError> {
        self.post("clients/", client).await
    }

    pub async fn update_client(&self, id: i64, patch: &ClientPatch) -> Result<Client, ApiError> {
        self.patch(&format!("clients/{id}/"), patch).await
    }

    pub async fn delete_client(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("clients/{id}/")).await
    }

    pub async fn add_client_contact(
        &self,
        id: i64,
        contact: &NewContact,
    ) -> Result<Contact, ApiError> {
        self.post(&format!("clients/{id}/add-contact/"), contact)
            .await
    }

    pub async fn list_client_contacts(&self, id: i64) -> Result<Vec<Contact>, ApiError> {
        self.get(&format!("clients/{id}/contacts/")).await
    }
}
