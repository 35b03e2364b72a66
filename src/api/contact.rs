//! Contact Form Endpoints
//!
//! Messages from the public contact page, read by admins on the inquiries
//! dashboard.

use serde::Serialize;

use super::{required, success_message, valid_email, ApiClient, ApiError, Method};
use crate::models::ContactMessage;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        required(&self.name, "Name")?;
        valid_email(&self.email)?;
        required(&self.message, "Message")
    }
}

impl ApiClient {
    pub async fn send_contact(&self, request: &ContactRequest) -> Result<String, ApiError> {
        request.validate()?;
        let body = self.send_json(Method::Post, "/contact/send", request).await?;
        Ok(success_message(&body))
    }

    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>, ApiError> {
        self.get_collection("/admin/contacts", "messages").await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Delete, &format!("/admin/contacts/{}", id)).await?;
        Ok(success_message(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_requires_name_email_message() {
        let mut request = ContactRequest::default();
        assert_eq!(request.validate().unwrap_err(), ApiError::Invalid("Name is required".to_string()));
        request.name = "Meera".into();
        request.email = "meera".into();
        assert!(request.validate().is_err());
        request.email = "meera@example.com".into();
        request.message = "Do you list farmhouses?".into();
        assert!(request.validate().is_ok());

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("subject").is_none());
    }
}
