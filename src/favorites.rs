//! Favorites wiring
//!
//! Backs the shared favorites store with `localStorage`, mirrors it into the
//! app store and follows writes made by other tabs.

use leptos_listing::{KeyValueStore, StoreError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Storage, StorageEvent};

use crate::context::AppContext;
use crate::store::{store_set_favorites, toast_error, AppStore};

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Read(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}

/// Mirror the favorites store into `AppState::favorites` and reload it when
/// another tab changes the stored value.
pub fn install(ctx: &AppContext, store: AppStore) {
    let favorites = ctx.favorites.clone();
    store_set_favorites(&store, favorites.ids());

    favorites.subscribe(move |set| {
        store_set_favorites(&store, set.as_slice().to_vec());
    });

    let Some(window) = web_sys::window() else {
        return;
    };
    let watched = favorites.clone();
    let on_storage = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let Some(ev) = ev.dyn_ref::<StorageEvent>() else {
            return;
        };
        // key is None when another tab cleared all of storage
        let ours = ev.key().map_or(true, |k| k == leptos_listing::FAVORITES_KEY);
        if ours {
            let fresh = watched.reload();
            log::info!("[favorites] reloaded {} ids after external change", fresh.len());
        }
    });
    if let Err(e) = window.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref()) {
        log::warn!("[favorites] could not watch other tabs: {:?}", e);
    }
    on_storage.forget();
}

/// Flip a venue in or out of the favorites. Failures are toasted.
pub fn toggle_favorite(ctx: &AppContext, store: &AppStore, venue_id: &str) -> Option<bool> {
    match ctx.favorites.toggle(venue_id) {
        Ok(now_favorite) => Some(now_favorite),
        Err(e) => {
            log::error!("[favorites] toggle {} failed: {}", venue_id, e);
            toast_error(store, format!("Could not update favorites: {}", e));
            None
        }
    }
}
