//! Lead endpoints.

use serde_json::json;

use crate::models::{Activity, Client, Lead, LeadPatch, NewActivity, NewLead, Page};

use super::{ApiClient, ApiError, ApiRequest, ListParams};

impl ApiClient {
    /// Fetch one page of leads.
    pub async fn list_leads(&self, params: &ListParams) -> Result<Page<Lead>, ApiError> {
        self.fetch(params.apply(ApiRequest::get("leads/"))).await
    }

    pub async fn get_lead(&self, id: i64) -> Result<Lead, ApiError> {
        self.get(&format!("leads/{id}/")).await
    }

    pub async fn create_lead(&self, lead: &NewLead) -> Result<Lead, ApiError> {
        self.post("leads/", lead).await
    }

    pub async fn update_lead(&self, id: i64, patch: &LeadPatch) -> Result<Lead, ApiError> {
        self.patch(&format!("leads/{id}/"), patch).await
    }

    pub async fn delete_lead(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("leads/{id}/")).await
    }

    /// Promote a lead into a client. The backend creates the client record
    /// and marks the lead converted.
    pub async fn convert_lead_to_client(&self, id: i64) -> Result<Client, ApiError> {
        self.post(&format!("leads/{id}/convert-to-client/"), &json!({}))
            .await
    }

    /// Record an activity (call, email, meeting, ...) against a lead.
    pub async fn log_lead_activity(
        &self,
        id: i64,
        activity: &NewActivity,
    ) -> Result<Activity, ApiError> {
        self.post(&format!("leads/{id}/log-activity/"), activity)
            .await
    }

    pub async fn list_lead_activities(
        &self,
        id: i64,
        params: &ListParams,
    ) -> Result<Page<Activity>, ApiError> {
        self.fetch(params.apply(ApiRequest::get(format!("leads/{id}/activities/"))))
            .await
    }
}
