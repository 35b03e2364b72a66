//! Approval Queues
//!
//! Owner accounts and venue listings waiting for an admin decision. A
//! decided row leaves the queue.

use leptos::prelude::*;
use leptos_listing::FilterState;
use leptos_router::components::A;

use super::AdminTabs;
use crate::api::Decision;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{pending_owners_controls, pending_owners_spec, pending_venues_controls, pending_venues_spec};
use crate::listing::{run_action, use_listing};
use crate::models::{format_price, User, Venue};
use crate::pages::{fmt_created, non_empty};
use crate::store::use_app_store;

#[component]
pub fn PendingOwnersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) =
        use_listing(pending_owners_spec(), FilterState::new(), |api| async move { api.pending_owners().await });

    let decide = Callback::new(move |(id, decision): (String, Decision)| {
        let api = ctx.api.clone();
        let target = id.clone();
        log::info!("[approvals] owner {} -> {}", id, decision.label());
        run_action(store, async move { api.decide_owner(&id, decision).await }, move || listing.remove(&target));
    });

    let row = move |owner: User| {
        let approve_id = owner.id.clone();
        let reject_id = owner.id.clone();
        view! {
            <tr>
                <td>{owner.name.clone()}</td>
                <td>{owner.email.clone()}</td>
                <td>{owner.phone.clone().unwrap_or_default()}</td>
                <td>{fmt_created(owner.created_at.as_ref())}</td>
                <td class="row-actions">
                    <button class="btn btn-primary" on:click=move |_| decide.run((approve_id.clone(), Decision::Approve))>
                        {Decision::Approve.label()}
                    </button>
                    <ConfirmButton
                        label=Decision::Reject.label()
                        prompt="Reject this owner?"
                        on_confirm=Callback::new(move |_| decide.run((reject_id.clone(), Decision::Reject)))
                    />
                </td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"Owner approvals"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(pending_owners_controls)
                on_retry=reload
                row=row
                headers=vec!["Name", "Email", "Phone", "Registered", ""]
                empty_text="No owners are waiting for approval."
                placeholder="Search by name, email or phone"
            />
        </section>
    }
}

#[component]
pub fn PendingVenuesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) =
        use_listing(pending_venues_spec(), FilterState::new(), |api| async move { api.pending_venues().await });

    let decide = Callback::new(move |(id, decision, reason): (String, Decision, Option<String>)| {
        let api = ctx.api.clone();
        let target = id.clone();
        log::info!("[approvals] venue {} -> {}", id, decision.label());
        run_action(
            store,
            async move { api.decide_venue(&id, decision, reason.as_deref()).await },
            move || listing.remove(&target),
        );
    });

    let controls = Signal::derive(move || {
        let city = listing.filter_value("city");
        listing.collection.with(|c| pending_venues_controls(&c.items, &city))
    });

    let row = move |venue: Venue| view! { <PendingVenueCard venue=venue on_decide=decide /> };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"Venue approvals"</h1>
            <ListingShell
                listing=listing
                controls=controls
                on_retry=reload
                row=row
                empty_text="No venues are waiting for approval."
                placeholder="Search by venue, city or owner"
            />
        </section>
    }
}

#[component]
fn PendingVenueCard(venue: Venue, on_decide: Callback<(String, Decision, Option<String>)>) -> impl IntoView {
    let reason = RwSignal::new(String::new());
    let id = StoredValue::new(venue.id.clone());

    view! {
        <article class="approval-card">
            <header>
                <A href=format!("/venue/{}", venue.id)>{venue.name.clone()}</A>
                <span class="muted">{venue.owner_name.clone().unwrap_or_default()}</span>
            </header>
            <p>
                {venue.city.clone().unwrap_or_default()} " · "
                {venue.venue_type.clone().unwrap_or_default()} " · "
                {format_price(venue.price)} " · "
                {format!("{} guests", venue.capacity)}
            </p>
            <p class="muted">"Submitted " {fmt_created(venue.created_at.as_ref())}</p>
            <input
                placeholder="Reason (sent to the owner on rejection)"
                prop:value=move || reason.get()
                on:input=move |ev| reason.set(event_target_value(&ev))
            />
            <div class="row-actions">
                <button class="btn btn-primary" on:click=move |_| on_decide.run((id.get_value(), Decision::Approve, None))>
                    {Decision::Approve.label()}
                </button>
                <ConfirmButton
                    label=Decision::Reject.label()
                    prompt="Reject this venue?"
                    on_confirm=Callback::new(move |_| {
                        on_decide.run((id.get_value(), Decision::Reject, non_empty(&reason.get_untracked())))
                    })
                />
            </div>
        </article>
    }
}
