//! Admin Moderation Endpoints
//!
//! Approval queues for owner accounts and venue listings, plus the full
//! venue list.

use serde::Serialize;

use super::{success_message, ApiClient, ApiError, Method};
use crate::models::{User, Venue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn path(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Reject => "Reject",
        }
    }
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl ApiClient {
    pub async fn admin_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.get_collection("/admin/venues", "venues").await
    }

    pub async fn admin_delete_venue(&self, id: &str) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Delete, &format!("/admin/venues/{}", id)).await?;
        Ok(success_message(&body))
    }

    pub async fn pending_owners(&self) -> Result<Vec<User>, ApiError> {
        self.get_collection("/admin/owners/pending", "owners").await
    }

    pub async fn decide_owner(&self, id: &str, decision: Decision) -> Result<String, ApiError> {
        let body = self
            .send_empty(Method::Patch, &format!("/admin/owners/{}/{}", id, decision.path()))
            .await?;
        Ok(success_message(&body))
    }

    pub async fn pending_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.get_collection("/admin/venues/pending", "venues").await
    }

    pub async fn decide_venue(&self, id: &str, decision: Decision, reason: Option<&str>) -> Result<String, ApiError> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        let body = self
            .send_json(
                Method::Patch,
                &format!("/admin/venues/{}/{}", id, decision.path()),
                &ReasonBody { reason },
            )
            .await?;
        Ok(success_message(&body))
    }
}
