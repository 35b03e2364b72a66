//! Per-page filter configuration
//!
//! One `FilterSpec` per listing page plus the select controls shown above
//! its table. Option values are the strings the specs understand: bucket
//! names for dates, `"min-max"` style ranges, lowercase status names.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use leptos_listing::{DateBucket, FilterSpec, ALL, SORT_KEY};

use crate::models::{local_time, start_of_day, Booking, ContactMessage, Inquiry, Review, User, Venue};

pub const VENUE_TYPES: [&str; 6] = ["banquet", "lawn", "hotel", "farmhouse", "resort", "conference"];

// ========================
// Controls
// ========================

/// One select box in a filter bar
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControl {
    pub key: &'static str,
    pub label: &'static str,
    /// `(value, label)`; the first entry is always the "all" sentinel
    pub options: Vec<(String, String)>,
}

impl FilterControl {
    fn new(key: &'static str, label: &'static str, all_label: &str) -> Self {
        Self {
            key,
            label,
            options: vec![(ALL.to_string(), all_label.to_string())],
        }
    }

    fn option(mut self, value: &str, label: &str) -> Self {
        self.options.push((value.to_string(), label.to_string()));
        self
    }

    fn options<'a>(self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        pairs.into_iter().fold(self, |c, (v, l)| c.option(v, l))
    }

    fn date(key: &'static str, label: &'static str, buckets: &[DateBucket]) -> Self {
        buckets
            .iter()
            .fold(Self::new(key, label, "Any time"), |c, b| c.option(b.as_str(), b.label()))
    }
}

/// Current options of the control named `key`. Empty when the page has no
/// such control.
pub fn options_for(controls: &[FilterControl], key: &str) -> Vec<(String, String)> {
    controls
        .iter()
        .find(|c| c.key == key)
        .map(|c| c.options.clone())
        .unwrap_or_default()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// City select built from the loaded items. `selected` is kept even when no
/// loaded item carries it, so the select never loses its value.
pub fn city_control(venues: &[Venue], selected: &str) -> FilterControl {
    let mut cities: BTreeSet<String> = venues
        .iter()
        .filter_map(|v| v.city.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(capitalize)
        .collect();
    if !leptos_listing::is_all(selected) {
        cities.insert(selected.to_string());
    }
    cities
        .iter()
        .fold(FilterControl::new("city", "City", "All cities"), |c, city| c.option(city, city))
}

fn type_control() -> FilterControl {
    VENUE_TYPES
        .iter()
        .fold(FilterControl::new("type", "Type", "All types"), |c, t| c.option(t, &capitalize(t)))
}

fn price_control() -> FilterControl {
    FilterControl::new("price", "Price", "Any price").options([
        ("-10000", "Under ₹10,000"),
        ("10000-25000", "₹10,000 - ₹25,000"),
        ("25000-50000", "₹25,000 - ₹50,000"),
        ("50000+", "₹50,000 and above"),
    ])
}

fn capacity_control() -> FilterControl {
    FilterControl::new("capacity", "Guests", "Any size").options([
        ("-100", "Up to 100"),
        ("100-300", "100 - 300"),
        ("300-500", "300 - 500"),
        ("500+", "500+"),
    ])
}

fn venue_status_control() -> FilterControl {
    FilterControl::new("status", "Status", "All statuses").options([
        ("pending", "Pending"),
        ("approved", "Approved"),
        ("rejected", "Rejected"),
    ])
}

fn booking_status_control() -> FilterControl {
    FilterControl::new("status", "Status", "All statuses").options([
        ("pending", "Pending"),
        ("confirmed", "Confirmed"),
        ("cancelled", "Cancelled"),
        ("completed", "Completed"),
    ])
}

fn payment_control() -> FilterControl {
    FilterControl::new("payment", "Payment", "All payments").options([
        ("pending", "Pending"),
        ("paid", "Paid"),
        ("failed", "Failed"),
        ("refunded", "Refunded"),
    ])
}

fn rating_control() -> FilterControl {
    FilterControl::new("rating", "Rating", "All ratings").options([
        ("5-5", "5 stars"),
        ("4+", "4 stars and up"),
        ("3-3", "3 stars"),
        ("-2", "2 stars or less"),
    ])
}

const CREATED_BUCKETS: [DateBucket; 5] = [
    DateBucket::Today,
    DateBucket::Yesterday,
    DateBucket::LastWeek,
    DateBucket::LastMonth,
    DateBucket::Past,
];

const EVENT_BUCKETS: [DateBucket; 5] = [
    DateBucket::Today,
    DateBucket::ThisWeek,
    DateBucket::ThisMonth,
    DateBucket::Upcoming,
    DateBucket::Past,
];

fn created_control() -> FilterControl {
    FilterControl::date("created", "Created", &CREATED_BUCKETS)
}

fn sort_control(pairs: &[(&str, &str)]) -> FilterControl {
    FilterControl::new(SORT_KEY, "Sort", "Default order").options(pairs.iter().copied())
}

const VENUE_SORTS: [(&str, &str); 5] = [
    ("priceAsc", "Price: low to high"),
    ("priceDesc", "Price: high to low"),
    ("rating", "Top rated"),
    ("newest", "Newest"),
    ("name", "Name"),
];

// ========================
// Venues
// ========================

fn created(at: &Option<chrono::DateTime<chrono::Utc>>) -> Option<NaiveDateTime> {
    at.as_ref().map(local_time)
}

fn venue_spec() -> FilterSpec<Venue> {
    FilterSpec::<Venue>::new()
        .search(|v: &Venue| Some(v.name.as_str()))
        .search(|v: &Venue| v.city.as_deref())
        .search(|v: &Venue| v.address.as_deref())
        .equals("city", |v: &Venue| v.city.as_deref())
        .equals("type", |v: &Venue| v.venue_type.as_deref())
        .equals("status", |v: &Venue| Some(v.status.as_str()))
        .range("price", |v: &Venue| Some(v.price))
        .range("capacity", |v: &Venue| Some(f64::from(v.capacity)))
        .date("created", |v: &Venue| created(&v.created_at))
        .sort("priceAsc", |a: &Venue, b: &Venue| a.price.total_cmp(&b.price))
        .sort("priceDesc", |a: &Venue, b: &Venue| b.price.total_cmp(&a.price))
        .sort("rating", |a: &Venue, b: &Venue| {
            b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0))
        })
        .sort("newest", |a: &Venue, b: &Venue| b.created_at.cmp(&a.created_at))
        .sort("name", |a: &Venue, b: &Venue| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Explore filters run on the server; only the controls live here
pub fn explore_controls(loaded: &[Venue], selected_city: &str) -> Vec<FilterControl> {
    vec![
        city_control(loaded, selected_city),
        type_control(),
        price_control(),
        capacity_control(),
        sort_control(&VENUE_SORTS),
    ]
}

pub fn favorites_spec() -> FilterSpec<Venue> {
    venue_spec()
}

pub fn favorites_controls(loaded: &[Venue], selected_city: &str) -> Vec<FilterControl> {
    vec![
        city_control(loaded, selected_city),
        type_control(),
        price_control(),
        sort_control(&VENUE_SORTS),
    ]
}

pub fn owner_venues_spec() -> FilterSpec<Venue> {
    venue_spec()
}

pub fn owner_venues_controls() -> Vec<FilterControl> {
    vec![venue_status_control(), type_control(), created_control(), sort_control(&VENUE_SORTS)]
}

pub fn admin_venues_spec() -> FilterSpec<Venue> {
    venue_spec().search(|v: &Venue| v.owner_name.as_deref())
}

pub fn admin_venues_controls(loaded: &[Venue], selected_city: &str) -> Vec<FilterControl> {
    vec![
        venue_status_control(),
        city_control(loaded, selected_city),
        type_control(),
        created_control(),
        sort_control(&VENUE_SORTS),
    ]
}

pub fn pending_venues_spec() -> FilterSpec<Venue> {
    admin_venues_spec()
}

pub fn pending_venues_controls(loaded: &[Venue], selected_city: &str) -> Vec<FilterControl> {
    vec![city_control(loaded, selected_city), type_control(), created_control()]
}

// ========================
// Bookings
// ========================

pub fn bookings_spec() -> FilterSpec<Booking> {
    FilterSpec::<Booking>::new()
        .search(|b: &Booking| b.venue_name.as_deref())
        .search(|b: &Booking| b.user_name.as_deref())
        .search(|b: &Booking| b.user_email.as_deref())
        .equals("status", |b: &Booking| Some(b.status.as_str()))
        .equals("payment", |b: &Booking| Some(b.payment_status.as_str()))
        .date("eventDate", |b: &Booking| start_of_day(b.event_date))
        .date("created", |b: &Booking| created(&b.created_at))
        .sort("eventDate", |a: &Booking, b: &Booking| a.event_date.cmp(&b.event_date))
        .sort("newest", |a: &Booking, b: &Booking| b.created_at.cmp(&a.created_at))
        .sort("amount", |a: &Booking, b: &Booking| b.total_amount.total_cmp(&a.total_amount))
}

const BOOKING_SORTS: [(&str, &str); 3] = [
    ("eventDate", "Event date"),
    ("newest", "Newest"),
    ("amount", "Amount"),
];

pub fn my_bookings_controls() -> Vec<FilterControl> {
    vec![
        booking_status_control(),
        FilterControl::date("eventDate", "Event date", &EVENT_BUCKETS),
    ]
}

pub fn owner_bookings_controls() -> Vec<FilterControl> {
    vec![
        booking_status_control(),
        payment_control(),
        FilterControl::date("eventDate", "Event date", &EVENT_BUCKETS),
        sort_control(&BOOKING_SORTS),
    ]
}

pub fn admin_bookings_controls() -> Vec<FilterControl> {
    vec![
        booking_status_control(),
        payment_control(),
        FilterControl::date("eventDate", "Event date", &EVENT_BUCKETS),
        created_control(),
        sort_control(&BOOKING_SORTS),
    ]
}

// ========================
// Inquiries and Contact Messages
// ========================

pub fn owner_inquiries_spec() -> FilterSpec<Inquiry> {
    FilterSpec::<Inquiry>::new()
        .search(|i: &Inquiry| Some(i.name.as_str()))
        .search(|i: &Inquiry| Some(i.email.as_str()))
        .search(|i: &Inquiry| i.venue_name.as_deref())
        .search(|i: &Inquiry| Some(i.message.as_str()))
        .flag("replied", Inquiry::is_replied)
        .date("created", |i: &Inquiry| created(&i.created_at))
        .sort("newest", |a: &Inquiry, b: &Inquiry| b.created_at.cmp(&a.created_at))
}

pub fn owner_inquiries_controls() -> Vec<FilterControl> {
    vec![
        FilterControl::new("replied", "Reply", "All inquiries").options([("false", "Awaiting reply"), ("true", "Replied")]),
        FilterControl::date("created", "Received", &CREATED_BUCKETS),
    ]
}

pub fn contact_messages_spec() -> FilterSpec<ContactMessage> {
    FilterSpec::<ContactMessage>::new()
        .search(|m: &ContactMessage| Some(m.name.as_str()))
        .search(|m: &ContactMessage| Some(m.email.as_str()))
        .search(|m: &ContactMessage| m.subject.as_deref())
        .search(|m: &ContactMessage| Some(m.message.as_str()))
        .date("created", |m: &ContactMessage| created(&m.created_at))
        .sort("newest", |a: &ContactMessage, b: &ContactMessage| b.created_at.cmp(&a.created_at))
}

pub fn contact_messages_controls() -> Vec<FilterControl> {
    vec![FilterControl::date("created", "Received", &CREATED_BUCKETS)]
}

// ========================
// Reviews
// ========================

pub fn reviews_spec() -> FilterSpec<Review> {
    FilterSpec::<Review>::new()
        .search(|r: &Review| r.venue_name.as_deref())
        .search(|r: &Review| r.user_name.as_deref())
        .search(|r: &Review| Some(r.comment.as_str()))
        .range("rating", |r: &Review| Some(f64::from(r.rating)))
        .date("created", |r: &Review| created(&r.created_at))
        .sort("newest", |a: &Review, b: &Review| b.created_at.cmp(&a.created_at))
        .sort("highest", |a: &Review, b: &Review| b.rating.cmp(&a.rating))
        .sort("lowest", |a: &Review, b: &Review| a.rating.cmp(&b.rating))
}

pub fn reviews_controls() -> Vec<FilterControl> {
    vec![
        rating_control(),
        created_control(),
        sort_control(&[("newest", "Newest"), ("highest", "Highest rated"), ("lowest", "Lowest rated")]),
    ]
}

// ========================
// Users and Owners
// ========================

pub fn users_spec() -> FilterSpec<User> {
    FilterSpec::<User>::new()
        .search(|u: &User| Some(u.name.as_str()))
        .search(|u: &User| Some(u.email.as_str()))
        .search(|u: &User| u.phone.as_deref())
        .equals("role", |u: &User| Some(u.role().as_str()))
        .flag("blocked", |u: &User| u.is_blocked)
        .date("created", |u: &User| created(&u.created_at))
        .sort("name", |a: &User, b: &User| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .sort("newest", |a: &User, b: &User| b.created_at.cmp(&a.created_at))
}

pub fn users_controls() -> Vec<FilterControl> {
    vec![
        FilterControl::new("role", "Role", "All roles").options([("user", "Users"), ("owner", "Owners"), ("admin", "Admins")]),
        FilterControl::new("blocked", "Access", "Everyone").options([("false", "Active"), ("true", "Blocked")]),
        created_control(),
        sort_control(&[("name", "Name"), ("newest", "Newest")]),
    ]
}

pub fn pending_owners_spec() -> FilterSpec<User> {
    users_spec()
}

pub fn pending_owners_controls() -> Vec<FilterControl> {
    vec![
        FilterControl::date("created", "Registered", &CREATED_BUCKETS),
        sort_control(&[("newest", "Newest"), ("name", "Name")]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use leptos_listing::FilterState;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn venue(id: &str, city: &str, kind: &str, price: f64, capacity: u32) -> Venue {
        serde_json::from_value(json!({
            "_id": id,
            "name": format!("Hall {}", id),
            "city": city,
            "type": kind,
            "price": price,
            "capacity": capacity,
        }))
        .unwrap()
    }

    fn venues() -> Vec<Venue> {
        vec![
            venue("a", "Surat", "banquet", 30000.0, 400),
            venue("b", "Ahemdabad", "lawn", 8000.0, 150),
            venue("c", "surat", "Lawn", 12000.0, 90),
        ]
    }

    fn ids<T: leptos_listing::ListingItem<Id = String>>(items: &[T]) -> Vec<String> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_city_options_follow_loaded_items() {
        let before = options_for(&explore_controls(&[], ALL), "city");
        assert_eq!(before.len(), 1);

        let after = options_for(&explore_controls(&venues(), ALL), "city");
        let values: Vec<&str> = after.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, vec![ALL, "Ahemdabad", "Surat"]);
        assert!(options_for(&explore_controls(&venues(), ALL), "missing").is_empty());
    }

    #[test]
    fn test_city_filter_is_case_insensitive() {
        let state = FilterState::new().with("city", "Surat");
        let result = favorites_spec().apply(&venues(), &state, "", now());
        assert_eq!(ids(&result), vec!["a", "c"]);
    }

    #[test]
    fn test_price_and_capacity_ranges() {
        let state = FilterState::new().with("price", "10000-25000");
        assert_eq!(ids(&favorites_spec().apply(&venues(), &state, "", now())), vec!["c"]);

        let state = FilterState::new().with("capacity", "100-300").with("type", "lawn");
        assert_eq!(ids(&favorites_spec().apply(&venues(), &state, "", now())), vec!["b"]);
    }

    #[test]
    fn test_venue_sorts() {
        let state = FilterState::new().with(SORT_KEY, "priceAsc");
        assert_eq!(ids(&favorites_spec().apply(&venues(), &state, "", now())), vec!["b", "c", "a"]);
        let state = FilterState::new().with(SORT_KEY, "priceDesc").with("city", "surat");
        assert_eq!(ids(&favorites_spec().apply(&venues(), &state, "", now())), vec!["a", "c"]);
    }

    #[test]
    fn test_city_control_dedupes_and_keeps_selection() {
        let control = city_control(&venues(), "Vadodara");
        let values: Vec<_> = control.options.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, vec!["all", "Ahemdabad", "Surat", "Vadodara"]);
    }

    #[test]
    fn test_every_control_starts_with_all() {
        let pages = [
            explore_controls(&[], ALL),
            owner_venues_controls(),
            admin_bookings_controls(),
            owner_inquiries_controls(),
            reviews_controls(),
            users_controls(),
            pending_owners_controls(),
        ];
        for control in pages.iter().flatten() {
            assert_eq!(control.options[0].0, ALL, "control {}", control.key);
        }
    }

    #[test]
    fn test_controls_match_spec_keys() {
        let spec_keys: Vec<_> = bookings_spec().keys().collect();
        for control in owner_bookings_controls() {
            assert!(
                control.key == SORT_KEY || spec_keys.contains(&control.key),
                "unknown key {}",
                control.key
            );
        }
        let spec_keys: Vec<_> = users_spec().keys().collect();
        for control in users_controls() {
            assert!(control.key == SORT_KEY || spec_keys.contains(&control.key));
        }
    }

    #[test]
    fn test_booking_event_date_buckets() {
        let booking = |id: &str, day: u32| -> Booking {
            serde_json::from_value(json!({
                "_id": id,
                "eventDate": format!("2024-05-{:02}", day),
                "guests": 10
            }))
            .unwrap()
        };
        let items = vec![booking("past", 10), booking("today", 15), booking("later", 28)];
        let upcoming = FilterState::new().with("eventDate", "upcoming");
        assert_eq!(ids(&bookings_spec().apply(&items, &upcoming, "", now())), vec!["today", "later"]);
        let past = FilterState::new().with("eventDate", "past");
        assert_eq!(ids(&bookings_spec().apply(&items, &past, "", now())), vec!["past"]);
    }

    #[test]
    fn test_review_rating_range() {
        let review = |id: &str, rating: u8| -> Review {
            serde_json::from_value(json!({"_id": id, "rating": rating, "comment": "fine"})).unwrap()
        };
        let items = vec![review("r1", 5), review("r2", 4), review("r3", 2)];
        let state = FilterState::new().with("rating", "4+");
        assert_eq!(ids(&reviews_spec().apply(&items, &state, "", now())), vec!["r1", "r2"]);
        let state = FilterState::new().with("rating", "-2");
        assert_eq!(ids(&reviews_spec().apply(&items, &state, "", now())), vec!["r3"]);
    }

    #[test]
    fn test_users_by_role_and_blocked() {
        let user = |id: &str, owner: bool, blocked: bool| -> User {
            serde_json::from_value(json!({
                "_id": id,
                "name": id,
                "email": format!("{}@example.com", id),
                "isOwner": owner,
                "isBlocked": blocked
            }))
            .unwrap()
        };
        let items = vec![user("u1", false, false), user("o1", true, true), user("o2", true, false)];
        let state = FilterState::new().with("role", "owner").with("blocked", "false");
        assert_eq!(ids(&users_spec().apply(&items, &state, "", now())), vec!["o2"]);
    }

    #[test]
    fn test_created_bucket_uses_local_time() {
        let mut v = venue("a", "Surat", "lawn", 1.0, 1);
        let local_noon = chrono::Local
            .from_local_datetime(&now())
            .single()
            .unwrap()
            .with_timezone(&Utc);
        v.created_at = Some(local_noon);
        let state = FilterState::new().with("created", "today");
        assert_eq!(owner_venues_spec().apply(&[v], &state, "", now()).len(), 1);
    }

    #[test]
    fn test_inquiry_reply_flag() {
        let inquiry = |id: &str, reply: Option<&str>| -> Inquiry {
            serde_json::from_value(json!({
                "_id": id, "name": "N", "email": "n@x.in", "message": "m", "reply": reply
            }))
            .unwrap()
        };
        let items = vec![inquiry("i1", None), inquiry("i2", Some("Yes, available"))];
        let state = FilterState::new().with("replied", "false");
        assert_eq!(ids(&owner_inquiries_spec().apply(&items, &state, "", now())), vec!["i1"]);
    }
}
