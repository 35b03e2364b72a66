//! Review Endpoints

use serde::Serialize;

use super::{success_message, ApiClient, ApiError, Method};
use crate::models::Review;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub venue_id: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::Invalid("Choose a rating from 1 to 5 stars".to_string()));
        }
        if self.comment.trim().chars().count() < 5 {
            return Err(ApiError::Invalid("Write a few words about your experience".to_string()));
        }
        Ok(())
    }
}

impl ApiClient {
    pub async fn create_review(&self, request: &ReviewRequest) -> Result<String, ApiError> {
        request.validate()?;
        let body = self.send_json(Method::Post, "/review/create", request).await?;
        Ok(success_message(&body))
    }

    pub async fn venue_reviews(&self, venue_id: &str) -> Result<Vec<Review>, ApiError> {
        self.get_collection(&format!("/review/venue/{}", venue_id), "reviews").await
    }

    pub async fn owner_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get_collection("/owner/reviews", "reviews").await
    }

    pub async fn admin_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get_collection("/admin/reviews", "reviews").await
    }

    pub async fn delete_review(&self, id: &str) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Delete, &format!("/admin/reviews/{}", id)).await?;
        Ok(success_message(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_validation() {
        let review = ReviewRequest {
            venue_id: "v1".into(),
            rating: 5,
            comment: "Lovely lawn, great staff".into(),
        };
        assert!(review.validate().is_ok());
        assert!(ReviewRequest { rating: 0, ..review.clone() }.validate().is_err());
        assert!(ReviewRequest { comment: " ok ".into(), ..review }.validate().is_err());
    }
}
