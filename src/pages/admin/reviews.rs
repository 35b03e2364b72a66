//! Admin Reviews Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use super::AdminTabs;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{reviews_controls, reviews_spec};
use crate::listing::{run_action, use_listing};
use crate::models::Review;
use crate::pages::fmt_created;
use crate::store::use_app_store;

#[component]
pub fn AdminReviewsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) = use_listing(reviews_spec(), FilterState::new(), |api| async move { api.admin_reviews().await });

    let delete = Callback::new(move |id: String| {
        let api = ctx.api.clone();
        let target = id.clone();
        run_action(store, async move { api.delete_review(&id).await }, move || listing.remove(&target));
    });

    let row = move |review: Review| {
        let id = review.id.clone();
        view! {
            <tr>
                <td>{review.venue_name.clone().unwrap_or_default()}</td>
                <td>{review.user_name.clone().unwrap_or_else(|| "Guest".to_string())}</td>
                <td class="stars">{review.stars()}</td>
                <td>{review.comment.clone()}</td>
                <td>{fmt_created(review.created_at.as_ref())}</td>
                <td class="row-actions">
                    <ConfirmButton
                        label="Delete"
                        prompt="Remove this review?"
                        on_confirm=Callback::new(move |_| delete.run(id.clone()))
                    />
                </td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"Reviews"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(reviews_controls)
                on_retry=reload
                row=row
                headers=vec!["Venue", "Guest", "Rating", "Comment", "Date", ""]
                empty_text="No reviews yet."
                placeholder="Search reviews"
            />
        </section>
    }
}
