//! Owner Reviews Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use super::OwnerTabs;
use crate::components::ListingShell;
use crate::filters::{reviews_controls, reviews_spec};
use crate::listing::use_listing;
use crate::models::Review;
use crate::pages::fmt_created;

/// Read-only list of reviews left on the owner's venues
#[component]
pub fn OwnerReviewsPage() -> impl IntoView {
    let (listing, reload) = use_listing(reviews_spec(), FilterState::new(), |api| async move { api.owner_reviews().await });

    let row = |review: Review| {
        view! {
            <tr>
                <td>{review.venue_name.clone().unwrap_or_default()}</td>
                <td>{review.user_name.clone().unwrap_or_else(|| "Guest".to_string())}</td>
                <td class="stars">{review.stars()}</td>
                <td>{review.comment.clone()}</td>
                <td>{fmt_created(review.created_at.as_ref())}</td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <OwnerTabs />
            <h1>"Reviews"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(reviews_controls)
                on_retry=reload
                row=row
                headers=vec!["Venue", "Guest", "Rating", "Comment", "Date"]
                empty_text="No reviews on your venues yet."
                placeholder="Search reviews"
            />
        </section>
    }
}
