//! Routed pages
//!
//! Every listing page builds on [`crate::listing::use_listing`] and
//! [`crate::components::ListingShell`]; Explore is the infinite-scroll
//! exception.

pub mod admin;
mod contact;
mod explore;
mod favorites;
mod login;
mod my_bookings;
pub mod owner;
mod venue_detail;

pub use contact::ContactPage;
pub use explore::ExplorePage;
pub use favorites::FavoritesPage;
pub use login::LoginPage;
pub use my_bookings::MyBookingsPage;
pub use venue_detail::VenueDetailPage;

use chrono::{DateTime, NaiveDate, Utc};
use leptos::prelude::*;
use leptos_listing::local_now;

use crate::models::local_time;

pub(crate) fn today() -> NaiveDate {
    local_now().date()
}

/// `15 Jun 2024`
pub(crate) fn fmt_day(day: NaiveDate) -> String {
    day.format("%d %b %Y").to_string()
}

pub(crate) fn fmt_created(at: Option<&DateTime<Utc>>) -> String {
    at.map(|at| fmt_day(local_time(at).date()))
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn status_badge(status: &'static str) -> impl IntoView {
    view! { <span class=format!("badge badge-{}", status)>{status}</span> }
}

/// Optional text field: blank means absent
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="page not-found">
            <h1>"Page not found"</h1>
            <a href="/">"Back to venues"</a>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(fmt_day(day), "05 Jun 2024");
        assert_eq!(fmt_created(None), "-");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" 98765 "), Some("98765".to_string()));
    }
}
