//! Data models for the CRM backend.
//!
//! This module contains the structures exchanged with the REST API:
//!
//! - `User`: account profiles and roles
//! - `Lead`, `Activity`: the sales pipeline
//! - `Client`, `Contact`: converted accounts
//! - `Organization`, `OrgMember`, `Team`, `Subscription`: workspace structure
//! - `Page`: the paginated list envelope the backend wraps collections in

pub mod client;
pub mod common;
pub mod lead;
pub mod organization;
pub mod user;

pub use client::{Client, ClientPatch, Contact, NewClient, NewContact};
pub use common::Page;
pub use lead::{Activity, ActivityType, Lead, LeadPatch, LeadStatus, NewActivity, NewLead};
pub use organization::{
    InviteMember, NewMember, NewOrganization, OrgMember, Organization, OrganizationPatch,
    Subscription, SubscriptionPlan, Team,
};
pub use user::{User, UserRole};
