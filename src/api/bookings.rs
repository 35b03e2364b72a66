//! Booking and Payment Endpoints

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{extract_one, required, success_message, ApiClient, ApiError, Method};
use crate::models::{Booking, BookingStatus, PaymentOrder, Venue};

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub venue_id: String,
    pub event_date: NaiveDate,
    pub guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Parse the raw form inputs and check them against the venue
    pub fn from_form(venue: &Venue, date: &str, guests: &str, notes: &str, today: NaiveDate) -> Result<Self, ApiError> {
        required(date, "Event date")?;
        let event_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ApiError::Invalid("Pick a valid event date".to_string()))?;
        if event_date < today {
            return Err(ApiError::Invalid("Event date cannot be in the past".to_string()));
        }
        if venue.is_reserved(event_date) {
            return Err(ApiError::Invalid("This date is not available".to_string()));
        }

        required(guests, "Guest count")?;
        let guests: u32 = guests
            .trim()
            .parse()
            .map_err(|_| ApiError::Invalid("Guest count must be a whole number".to_string()))?;
        if guests == 0 {
            return Err(ApiError::Invalid("At least one guest is required".to_string()));
        }
        if venue.capacity > 0 && guests > venue.capacity {
            return Err(ApiError::Invalid(format!("This venue holds at most {} guests", venue.capacity)));
        }

        let notes = notes.trim();
        Ok(Self {
            venue_id: venue.id.clone(),
            event_date,
            guests,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentOrderBody<'a> {
    booking_id: &'a str,
}

/// Identifiers the payment provider hands back after checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub booking_id: String,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentConfirmation {
    pub fn validate(&self) -> Result<(), ApiError> {
        required(&self.order_id, "Order id")?;
        required(&self.payment_id, "Payment id")?;
        required(&self.signature, "Payment signature")
    }
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

// ========================
// Commands
// ========================

impl ApiClient {
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        let body = self.send_json(Method::Post, "/booking/create", request).await?;
        extract_one(&body, "booking")
    }

    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_collection("/booking/mine", "bookings").await
    }

    pub async fn cancel_booking(&self, id: &str) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Patch, &format!("/booking/{}/cancel", id)).await?;
        Ok(success_message(&body))
    }

    pub async fn create_payment_order(&self, booking_id: &str) -> Result<PaymentOrder, ApiError> {
        let body = self
            .send_json(Method::Post, "/payment/order", &PaymentOrderBody { booking_id })
            .await?;
        let order = body
            .get("order")
            .ok_or_else(|| ApiError::Decode("missing 'order'".to_string()))?;
        Ok(serde_json::from_value(order.clone())?)
    }

    pub async fn verify_payment(&self, confirmation: &PaymentConfirmation) -> Result<String, ApiError> {
        confirmation.validate()?;
        let body = self.send_json(Method::Post, "/payment/verify", confirmation).await?;
        Ok(success_message(&body))
    }

    pub async fn owner_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_collection("/owner/bookings", "bookings").await
    }

    /// Owner confirms or declines a booking request
    pub async fn set_booking_status(&self, id: &str, status: BookingStatus) -> Result<String, ApiError> {
        let body = self
            .send_json(
                Method::Patch,
                &format!("/owner/bookings/{}/status", id),
                &StatusBody { status: status.as_str() },
            )
            .await?;
        Ok(success_message(&body))
    }

    pub async fn admin_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_collection("/admin/bookings", "bookings").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> Venue {
        serde_json::from_value(serde_json::json!({
            "_id": "v1",
            "name": "Lotus Hall",
            "capacity": 100,
            "reservedDates": ["2024-06-10"]
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_booking_form() {
        let request = BookingRequest::from_form(&venue(), "2024-06-15", " 80 ", "  ", today()).unwrap();
        assert_eq!(request.guests, 80);
        assert_eq!(request.notes, None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["eventDate"], "2024-06-15");
        assert_eq!(json["venueId"], "v1");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_booking_form_rejections() {
        let v = venue();
        let err = |date: &str, guests: &str| BookingRequest::from_form(&v, date, guests, "", today()).unwrap_err();

        assert_eq!(err("", "10"), ApiError::Invalid("Event date is required".to_string()));
        assert_eq!(err("2024-05-31", "10"), ApiError::Invalid("Event date cannot be in the past".to_string()));
        assert_eq!(err("2024-06-10", "10"), ApiError::Invalid("This date is not available".to_string()));
        assert_eq!(err("2024-06-15", "0"), ApiError::Invalid("At least one guest is required".to_string()));
        assert_eq!(err("2024-06-15", "ten"), ApiError::Invalid("Guest count must be a whole number".to_string()));
        assert_eq!(err("2024-06-15", "101"), ApiError::Invalid("This venue holds at most 100 guests".to_string()));
    }

    #[test]
    fn test_booking_today_is_allowed() {
        assert!(BookingRequest::from_form(&venue(), "2024-06-01", "1", "", today()).is_ok());
    }

    #[test]
    fn test_payment_confirmation_requires_all_ids() {
        let confirmation = PaymentConfirmation {
            booking_id: "b1".into(),
            order_id: "order_1".into(),
            payment_id: "pay_1".into(),
            signature: String::new(),
        };
        assert_eq!(
            confirmation.validate().unwrap_err(),
            ApiError::Invalid("Payment signature is required".to_string())
        );
    }
}
