//! Frontend Models
//!
//! Data structures matching backend entities. Wire format is camelCase JSON
//! with Mongo-style `_id` identifiers. Every listing type is validated when
//! it crosses the fetch boundary; invalid records are dropped and logged.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use leptos_listing::ListingItem;
use serde::{Deserialize, Deserializer, Serialize};

/// Checks a decoded record before it is shown
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Local wall-clock view of a UTC timestamp, as used by date filters
pub fn local_time(at: &DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&Local).naive_local()
}

pub fn start_of_day(day: NaiveDate) -> Option<NaiveDateTime> {
    day.and_hms_opt(0, 0, 0)
}

/// Accept `"2024-05-15"` as well as full timestamps like `"2024-05-15T00:00:00.000Z"`
fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", raw, e))
}

fn de_day<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    parse_day(&raw).map_err(serde::de::Error::custom)
}

fn de_opt_day<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(d)? {
        Some(raw) if !raw.trim().is_empty() => parse_day(&raw).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn de_days<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<NaiveDate>, D::Error> {
    Option::<Vec<String>>::deserialize(d)?
        .unwrap_or_default()
        .iter()
        .map(|raw| parse_day(raw).map_err(serde::de::Error::custom))
        .collect()
}

fn require_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        Err("missing id".to_string())
    } else {
        Ok(())
    }
}

// ========================
// Venue
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VenueStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VenueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueStatus::Pending => "pending",
            VenueStatus::Approved => "approved",
            VenueStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "type")]
    pub venue_type: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub status: VenueStatus,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "de_days")]
    pub reserved_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Venue {
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn is_reserved(&self, day: NaiveDate) -> bool {
        self.reserved_dates.contains(&day)
    }
}

impl Validate for Venue {
    fn validate(&self) -> Result<(), String> {
        require_id(&self.id)?;
        if self.name.trim().is_empty() {
            return Err(format!("venue {} has no name", self.id));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("venue {} has invalid price {}", self.id, self.price));
        }
        Ok(())
    }
}

impl ListingItem for Venue {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

// ========================
// Booking
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(deserialize_with = "de_day")]
    pub event_date: NaiveDate,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Pending or confirmed bookings whose date has not passed can be cancelled
    pub fn can_cancel(&self, today: NaiveDate) -> bool {
        matches!(self.status, BookingStatus::Pending | BookingStatus::Confirmed) && self.event_date >= today
    }

    pub fn awaiting_payment(&self) -> bool {
        self.status != BookingStatus::Cancelled && self.payment_status == PaymentStatus::Pending
    }
}

impl Validate for Booking {
    fn validate(&self) -> Result<(), String> {
        require_id(&self.id)?;
        if self.guests == 0 {
            return Err(format!("booking {} has no guests", self.id));
        }
        Ok(())
    }
}

impl ListingItem for Booking {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

// ========================
// Inquiry
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default, deserialize_with = "de_opt_day")]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Inquiry {
    pub fn is_replied(&self) -> bool {
        self.reply.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

impl Validate for Inquiry {
    fn validate(&self) -> Result<(), String> {
        require_id(&self.id)
    }
}

impl ListingItem for Inquiry {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

// ========================
// Review
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl Validate for Review {
    fn validate(&self) -> Result<(), String> {
        require_id(&self.id)?;
        if !(1..=5).contains(&self.rating) {
            return Err(format!("review {} has rating {}", self.id, self.rating));
        }
        Ok(())
    }
}

impl ListingItem for Review {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

// ========================
// User
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }
}

/// Account record. Role flags come from the backend; the client only uses
/// them to pick which dashboard to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
    /// Owners need admin approval before they can list venues
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else if self.is_owner {
            Role::Owner
        } else {
            Role::User
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::User => true,
            Role::Owner => self.is_owner && self.is_approved,
            Role::Admin => self.is_admin,
        }
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), String> {
        require_id(&self.id)?;
        if !self.email.contains('@') {
            return Err(format!("user {} has invalid email", self.id));
        }
        Ok(())
    }
}

impl ListingItem for User {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

// ========================
// Contact Message
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<(), String> {
        require_id(&self.id)
    }
}

impl ListingItem for ContactMessage {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

// ========================
// Payment
// ========================

/// Order created by the backend for the payment provider checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

pub fn format_price(amount: f64) -> String {
    format!("₹{:.0}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_decodes_mongo_shape() {
        let venue: Venue = serde_json::from_str(
            r#"{
                "_id": "v1",
                "name": "Lotus Hall",
                "city": "Surat",
                "type": "banquet",
                "price": 25000,
                "capacity": 300,
                "reservedDates": ["2024-06-01T00:00:00.000Z", "2024-06-02"],
                "status": "approved",
                "createdAt": "2024-05-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(venue.id, "v1");
        assert_eq!(venue.venue_type.as_deref(), Some("banquet"));
        assert_eq!(venue.status, VenueStatus::Approved);
        assert!(venue.is_reserved(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()));
        assert!(venue.validate().is_ok());
    }

    #[test]
    fn test_venue_validation_rejects_blank_name() {
        let venue: Venue = serde_json::from_str(r#"{"_id": "v1", "name": " "}"#).unwrap();
        assert!(venue.validate().is_err());
    }

    #[test]
    fn test_booking_date_accepts_timestamp() {
        let booking: Booking = serde_json::from_str(
            r#"{"_id": "b1", "eventDate": "2024-07-04T18:30:00.000Z", "guests": 50, "status": "confirmed"}"#,
        )
        .unwrap();
        assert_eq!(booking.event_date, NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert!(booking.awaiting_payment());
        assert!(booking.can_cancel(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
        assert!(!booking.can_cancel(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()));
    }

    #[test]
    fn test_review_rating_must_be_in_range() {
        let review: Review = serde_json::from_str(r#"{"_id": "r1", "rating": 6}"#).unwrap();
        assert!(review.validate().is_err());
        let review: Review = serde_json::from_str(r#"{"_id": "r1", "rating": 4}"#).unwrap();
        assert_eq!(review.stars(), "★★★★☆");
    }

    #[test]
    fn test_user_roles_from_flags() {
        let owner: User = serde_json::from_str(
            r#"{"_id": "u1", "name": "Asha", "email": "asha@example.com", "isOwner": true}"#,
        )
        .unwrap();
        assert_eq!(owner.role(), Role::Owner);
        assert!(!owner.has_role(Role::Owner), "unapproved owners have no dashboard");
        assert!(owner.has_role(Role::User));

        let admin = User { is_admin: true, ..owner };
        assert_eq!(admin.role(), Role::Admin);
        assert!(admin.has_role(Role::Admin));
    }

    #[test]
    fn test_inquiry_reply_detection() {
        let inquiry: Inquiry = serde_json::from_str(
            r#"{"_id": "i1", "name": "Ravi", "email": "r@x.in", "message": "Free on Sunday?", "reply": "  ", "eventDate": null}"#,
        )
        .unwrap();
        assert!(!inquiry.is_replied());
        assert!(inquiry.event_date.is_none());
    }
}
