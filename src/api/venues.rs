//! Venue Endpoints
//!
//! Public browsing, the paged Explore feed and owner venue management.

use chrono::NaiveDate;
use leptos_listing::FilterState;
use serde::Serialize;
use web_sys::{FileList, FormData};

use super::{extract_page, required, success_message, ApiClient, ApiError, Method, PageChunk};
use crate::models::Venue;

// ========================
// Request Bodies
// ========================

/// Body of the paged Explore request: `{ page, limit, ...filters }`.
/// Filters set to "all" are left out so the server applies no predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub filters: FilterState,
}

impl ExploreQuery {
    fn to_body(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut body = serde_json::Map::new();
        body.insert("page".into(), self.page.into());
        body.insert("limit".into(), self.limit.into());
        let search = self.search.trim();
        if !search.is_empty() {
            body.insert("search".into(), search.into());
        }
        for (key, value) in self.filters.to_query() {
            body.insert(key, value.into());
        }
        body
    }
}

/// Add/edit venue form. Sent as multipart so images can ride along.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueForm {
    pub name: String,
    pub description: String,
    pub city: String,
    pub address: String,
    pub venue_type: String,
    pub price: String,
    pub capacity: String,
    /// Comma separated
    pub amenities: String,
}

impl VenueForm {
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            description: venue.description.clone(),
            city: venue.city.clone().unwrap_or_default(),
            address: venue.address.clone().unwrap_or_default(),
            venue_type: venue.venue_type.clone().unwrap_or_default(),
            price: venue.price.to_string(),
            capacity: venue.capacity.to_string(),
            amenities: venue.amenities.join(", "),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        required(&self.name, "Venue name")?;
        required(&self.city, "City")?;
        required(&self.venue_type, "Venue type")?;
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| ApiError::Invalid("Price must be a number".to_string()))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(ApiError::Invalid("Price must be greater than zero".to_string()));
        }
        let capacity: u32 = self
            .capacity
            .trim()
            .parse()
            .map_err(|_| ApiError::Invalid("Capacity must be a whole number".to_string()))?;
        if capacity == 0 {
            return Err(ApiError::Invalid("Capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn amenity_list(&self) -> Vec<String> {
        self.amenities
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.trim().to_string()),
            ("description", self.description.trim().to_string()),
            ("city", self.city.trim().to_string()),
            ("address", self.address.trim().to_string()),
            ("type", self.venue_type.trim().to_string()),
            ("price", self.price.trim().to_string()),
            ("capacity", self.capacity.trim().to_string()),
            ("amenities", self.amenity_list().join(",")),
        ]
    }

    fn to_form_data(&self, images: Option<&FileList>) -> Result<FormData, ApiError> {
        let js_err = |e: wasm_bindgen::JsValue| ApiError::Invalid(format!("Could not build form: {:?}", e));
        let form = FormData::new().map_err(js_err)?;
        for (name, value) in self.fields() {
            form.append_with_str(name, &value).map_err(js_err)?;
        }
        if let Some(files) = images {
            for i in 0..files.length() {
                if let Some(file) = files.item(i) {
                    form.append_with_blob_and_filename("images", &file, &file.name())
                        .map_err(js_err)?;
                }
            }
        }
        Ok(form)
    }
}

#[derive(Serialize)]
struct ReserveBody<'a> {
    dates: &'a [NaiveDate],
}

// ========================
// Commands
// ========================

impl ApiClient {
    pub async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.get_collection("/venue/list", "venues").await
    }

    pub async fn explore_venues(&self, query: &ExploreQuery) -> Result<PageChunk<Venue>, ApiError> {
        let body = self.send_json(Method::Post, "/venue/explore", &query.to_body()).await?;
        extract_page(&body, "venues")
    }

    pub async fn fetch_venue(&self, id: &str) -> Result<Venue, ApiError> {
        self.get_one(&format!("/venue/fetch/{}", id), "venue").await
    }

    pub async fn owner_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.get_collection("/owner/venues", "venues").await
    }

    pub async fn create_venue(&self, form: &VenueForm, images: Option<&FileList>) -> Result<String, ApiError> {
        form.validate()?;
        let body = self.send_form(Method::Post, "/owner/venues", form.to_form_data(images)?).await?;
        Ok(success_message(&body))
    }

    pub async fn update_venue(&self, id: &str, form: &VenueForm, images: Option<&FileList>) -> Result<String, ApiError> {
        form.validate()?;
        let body = self
            .send_form(Method::Put, &format!("/owner/venues/{}", id), form.to_form_data(images)?)
            .await?;
        Ok(success_message(&body))
    }

    pub async fn delete_venue(&self, id: &str) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Delete, &format!("/owner/venues/{}", id)).await?;
        Ok(success_message(&body))
    }

    /// Replace the owner-blocked dates of a venue
    pub async fn reserve_dates(&self, id: &str, dates: &[NaiveDate]) -> Result<String, ApiError> {
        let body = self
            .send_json(Method::Put, &format!("/owner/venues/{}/reserve", id), &ReserveBody { dates })
            .await?;
        Ok(success_message(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> VenueForm {
        VenueForm {
            name: "Lotus Hall".into(),
            city: "Surat".into(),
            venue_type: "banquet".into(),
            price: "25000".into(),
            capacity: "300".into(),
            amenities: "parking, ac, , catering".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_explore_body_omits_all_filters() {
        let query = ExploreQuery {
            page: 2,
            limit: 10,
            search: "  lotus ".into(),
            filters: FilterState::new().with("city", "Surat").with("type", "all"),
        };
        let body = serde_json::Value::Object(query.to_body());
        assert_eq!(body, json!({"page": 2, "limit": 10, "search": "lotus", "city": "Surat"}));
    }

    #[test]
    fn test_venue_form_validation() {
        assert!(form().validate().is_ok());

        let bad_price = VenueForm { price: "free".into(), ..form() };
        assert_eq!(
            bad_price.validate().unwrap_err(),
            ApiError::Invalid("Price must be a number".to_string())
        );

        let no_city = VenueForm { city: " ".into(), ..form() };
        assert_eq!(no_city.validate().unwrap_err(), ApiError::Invalid("City is required".to_string()));

        let empty_hall = VenueForm { capacity: "0".into(), ..form() };
        assert!(empty_hall.validate().is_err());
    }

    #[test]
    fn test_amenities_are_split_and_trimmed() {
        assert_eq!(form().amenity_list(), vec!["parking", "ac", "catering"]);
        let fields = form().fields();
        assert!(fields.contains(&("amenities", "parking,ac,catering".to_string())));
    }

    #[test]
    fn test_reserve_body_serializes_plain_dates() {
        let dates = [NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()];
        let body = serde_json::to_value(ReserveBody { dates: &dates }).unwrap();
        assert_eq!(body, json!({"dates": ["2024-06-01"]}));
    }
}
