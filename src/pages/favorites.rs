//! Favorites Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use crate::components::{ListingShell, VenueCard};
use crate::filters::{favorites_controls, favorites_spec};
use crate::listing::use_listing;
use crate::models::Venue;
use crate::store::{use_app_store, AppStateStoreFields};

/// Venues the visitor hearted. Works without an account; the ids live in
/// local storage and the venues are resolved against the public list.
#[component]
pub fn FavoritesPage() -> impl IntoView {
    let store = use_app_store();

    let (listing, reload) = use_listing(favorites_spec(), FilterState::new(), move |api| {
        let ids = store.favorites().get_untracked();
        async move {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            let venues = api.list_venues().await?;
            Ok(venues.into_iter().filter(|v| ids.contains(&v.id)).collect::<Vec<Venue>>())
        }
    });

    // Unhearting drops the card locally; a new id (another tab) needs a fetch
    Effect::new(move |prev: Option<Vec<String>>| {
        let ids = store.favorites().get();
        if let Some(prev) = prev {
            if ids.iter().any(|id| !prev.contains(id)) {
                reload.run(());
            } else {
                listing.update_items(|items| items.retain(|v| ids.contains(&v.id)));
            }
        }
        ids
    });

    let controls = Signal::derive(move || {
        let city = listing.filter_value("city");
        listing.collection.with(|c| favorites_controls(&c.items, &city))
    });

    view! {
        <section class="page favorites-page">
            <h1>"Favorite venues"</h1>
            <ListingShell
                listing=listing
                controls=controls
                on_retry=reload
                row=|venue: Venue| view! { <VenueCard venue=venue /> }
                empty_text="You have no favorite venues yet."
                placeholder="Search favorites"
            />
        </section>
    }
}
