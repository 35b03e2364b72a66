//! Admin Venues Page

use leptos::prelude::*;
use leptos_listing::FilterState;
use leptos_router::components::A;

use super::AdminTabs;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{admin_venues_controls, admin_venues_spec};
use crate::listing::{run_action, use_listing};
use crate::models::{format_price, Venue};
use crate::pages::{fmt_created, status_badge};
use crate::store::use_app_store;

#[component]
pub fn AdminVenuesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) = use_listing(admin_venues_spec(), FilterState::new(), |api| async move { api.admin_venues().await });

    let delete = Callback::new(move |id: String| {
        let api = ctx.api.clone();
        let target = id.clone();
        run_action(store, async move { api.admin_delete_venue(&id).await }, move || listing.remove(&target));
    });

    let controls = Signal::derive(move || {
        let city = listing.filter_value("city");
        listing.collection.with(|c| admin_venues_controls(&c.items, &city))
    });

    let row = move |venue: Venue| {
        let id = venue.id.clone();
        view! {
            <tr>
                <td><A href=format!("/venue/{}", venue.id)>{venue.name.clone()}</A></td>
                <td>{venue.owner_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                <td>{venue.city.clone().unwrap_or_default()}</td>
                <td>{venue.venue_type.clone().unwrap_or_default()}</td>
                <td>{format_price(venue.price)}</td>
                <td>{status_badge(venue.status.as_str())}</td>
                <td>{fmt_created(venue.created_at.as_ref())}</td>
                <td class="row-actions">
                    <ConfirmButton
                        label="Delete"
                        prompt="Delete this venue for good?"
                        on_confirm=Callback::new(move |_| delete.run(id.clone()))
                    />
                </td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"All venues"</h1>
            <ListingShell
                listing=listing
                controls=controls
                on_retry=reload
                row=row
                headers=vec!["Name", "Owner", "City", "Type", "Price", "Status", "Added", ""]
                empty_text="No venues have been listed yet."
                placeholder="Search by venue, city or owner"
            />
        </section>
    }
}
