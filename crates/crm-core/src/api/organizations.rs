//! Organization and membership endpoints.

use crate::models::{
    InviteMember, NewMember, NewOrganization, OrgMember, Organization, OrganizationPatch, Page,
};

use super::{ApiClient, ApiError, ApiRequest, ListParams};

impl ApiClient {
    pub async fn list_organizations(
        &self,
        params: &ListParams,
    ) -> Result<Page<Organization>, ApiError> {
        self.fetch(params.apply(ApiRequest::get("organizations/")))
            .await
    }

    pub async fn get_organization(&self, id: i64) -> Result<Organization, ApiError> {
        self.get(&format!("organizations/{id}/")).await
    }

    pub async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, ApiError> {
        self.post("organizations/", organization).await
    }

    pub async fn update_organization(
        &self,
        id: i64,
        patch: &OrganizationPatch,
    ) -> Result<Organization, ApiError> {
        self.patch(&format!("organizations/{id}/"), patch).await
    }

    pub async fn list_members(
        &self,
        org_id: i64,
        params: &ListParams,
    ) -> Result<Page<OrgMember>, ApiError> {
        self.fetch(params.apply(ApiRequest::get(format!("organizations/{org_id}/members/"))))
            .await
    }

    pub async fn add_member(&self, org_id: i64, member: &NewMember) -> Result<OrgMember, ApiError> {
        self.post(&format!("organizations/{org_id}/add-member/"), member)
            .await
    }

    pub async fn remove_member(&self, org_id: i64, member_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("organizations/{org_id}/members/{member_id}/"))
            .await
    }

    /// Send a membership invitation by email.
    pub async fn invite_member(
        &self,
        org_id: i64,
        invite: &InviteMember,
    ) -> Result<(), ApiError> {
        self.post_empty(&format!("organizations/{org_id}/invite-member/"), invite)
            .await
    }
}
