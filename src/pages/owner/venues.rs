//! Owner Venues Page

use leptos::prelude::*;
use leptos_listing::FilterState;
use leptos_router::components::A;

use super::OwnerTabs;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{owner_venues_controls, owner_venues_spec};
use crate::listing::{run_action, use_listing};
use crate::models::{format_price, Venue};
use crate::pages::{fmt_created, status_badge};
use crate::store::use_app_store;

#[component]
pub fn OwnerVenuesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) = use_listing(owner_venues_spec(), FilterState::new(), |api| async move { api.owner_venues().await });

    let delete = Callback::new(move |id: String| {
        let api = ctx.api.clone();
        let target = id.clone();
        run_action(store, async move { api.delete_venue(&id).await }, move || listing.remove(&target));
    });

    let row = move |venue: Venue| {
        let id = venue.id.clone();
        view! {
            <tr>
                <td><A href=format!("/venue/{}", venue.id)>{venue.name.clone()}</A></td>
                <td>{venue.city.clone().unwrap_or_default()}</td>
                <td>{venue.venue_type.clone().unwrap_or_default()}</td>
                <td>{format_price(venue.price)}</td>
                <td>{venue.capacity}</td>
                <td>{status_badge(venue.status.as_str())}</td>
                <td>{fmt_created(venue.created_at.as_ref())}</td>
                <td class="row-actions">
                    <A href=format!("/owner/venues/{}/edit", venue.id) attr:class="btn">"Edit"</A>
                    <A href=format!("/owner/venues/{}/reserve", venue.id) attr:class="btn">"Dates"</A>
                    <ConfirmButton
                        label="Delete"
                        prompt="Delete this venue?"
                        on_confirm=Callback::new(move |_| delete.run(id.clone()))
                    />
                </td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <OwnerTabs />
            <header class="page-header">
                <h1>"My venues"</h1>
                <A href="/owner/venues/new" attr:class="btn btn-primary">"Add venue"</A>
            </header>
            <ListingShell
                listing=listing
                controls=Signal::derive(owner_venues_controls)
                on_retry=reload
                row=row
                headers=vec!["Name", "City", "Type", "Price", "Capacity", "Status", "Added", ""]
                empty_text="You have not listed any venues yet."
                placeholder="Search your venues"
            />
        </section>
    }
}
