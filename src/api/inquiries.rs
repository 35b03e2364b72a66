//! Inquiry Endpoints

use chrono::NaiveDate;
use serde::Serialize;

use super::{required, success_message, valid_email, ApiClient, ApiError, Method};
use crate::models::Inquiry;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub venue_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
}

impl InquiryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        required(&self.name, "Name")?;
        valid_email(&self.email)?;
        required(&self.message, "Message")?;
        if let Some(phone) = &self.phone {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            if digits < 10 {
                return Err(ApiError::Invalid("Phone number needs at least 10 digits".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ReplyBody<'a> {
    reply: &'a str,
}

impl ApiClient {
    pub async fn create_inquiry(&self, request: &InquiryRequest) -> Result<String, ApiError> {
        request.validate()?;
        let body = self.send_json(Method::Post, "/inquiry/create", request).await?;
        Ok(success_message(&body))
    }

    pub async fn owner_inquiries(&self) -> Result<Vec<Inquiry>, ApiError> {
        self.get_collection("/owner/inquiries", "inquiries").await
    }

    pub async fn reply_inquiry(&self, id: &str, reply: &str) -> Result<String, ApiError> {
        required(reply, "Reply")?;
        let body = self
            .send_json(
                Method::Patch,
                &format!("/owner/inquiries/{}/reply", id),
                &ReplyBody { reply: reply.trim() },
            )
            .await?;
        Ok(success_message(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InquiryRequest {
        InquiryRequest {
            venue_id: "v1".into(),
            name: "Ravi".into(),
            email: "ravi@example.in".into(),
            message: "Is the hall free in December?".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_inquiry_validation() {
        assert!(request().validate().is_ok());
        let no_message = InquiryRequest { message: "".into(), ..request() };
        assert_eq!(no_message.validate().unwrap_err(), ApiError::Invalid("Message is required".to_string()));
        let short_phone = InquiryRequest { phone: Some("98-76".into()), ..request() };
        assert!(short_phone.validate().is_err());
        let phone = InquiryRequest { phone: Some("+91 98765 43210".into()), ..request() };
        assert!(phone.validate().is_ok());
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("phone").is_none());
        assert!(json.get("eventDate").is_none());
        assert_eq!(json["venueId"], "v1");
    }
}
