//! Favorite Button Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::favorites::toggle_favorite;
use crate::store::{toast_success, use_app_store, AppStateStoreFields};

/// Heart toggle for one venue. State comes from the app store, which the
/// favorites store keeps in sync, so every button for the same venue agrees.
#[component]
pub fn FavoriteButton(#[prop(into)] venue_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = StoredValue::new(venue_id);
    let is_favorite = move || id.with_value(|id| store.favorites().with(|favs| favs.contains(id)));

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let venue_id = id.get_value();
        match toggle_favorite(&ctx, &store, &venue_id) {
            Some(true) => toast_success(&store, "Added to favorites"),
            Some(false) => toast_success(&store, "Removed from favorites"),
            None => {}
        }
    };

    view! {
        <button
            class="favorite-btn"
            class:active=is_favorite
            title=move || if is_favorite() { "Remove from favorites" } else { "Add to favorites" }
            on:click=on_click
        >
            {move || if is_favorite() { "♥" } else { "♡" }}
        </button>
    }
}
