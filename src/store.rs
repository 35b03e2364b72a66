//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Role, User};
use crate::toast::{enqueue, Toast, ToastLevel, TOAST_TIMEOUT_MS};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user, if any
    pub session: Option<User>,
    /// Set once the initial session check has answered
    pub session_checked: bool,
    /// Favorite venue ids, mirrored from the favorites store
    pub favorites: Vec<String>,
    /// Toasts currently on screen
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
    /// Bumped after a payment is verified so booking lists reload
    pub payments_version: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_session(store: &AppStore, user: Option<User>) {
    store.session().set(user);
    store.session_checked().set(true);
}

pub fn store_has_role(store: &AppStore, role: Role) -> bool {
    store.session().with(|s| s.as_ref().is_some_and(|u| u.has_role(role)))
}

pub fn store_payment_verified(store: &AppStore) {
    store.payments_version().update(|v| *v += 1);
}

pub fn store_set_favorites(store: &AppStore, ids: Vec<String>) {
    store.favorites().set(ids);
}

/// Show a toast and schedule its removal
pub fn store_push_toast(store: &AppStore, level: ToastLevel, message: impl Into<String>) {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id + 1);
    store.toasts().update(|toasts| enqueue(toasts, Toast::new(id, message, level)));

    let store = *store;
    Timeout::new(TOAST_TIMEOUT_MS, move || store_dismiss_toast(&store, id)).forget();
}

pub fn store_dismiss_toast(store: &AppStore, id: u64) {
    store.toasts().try_update(|toasts| toasts.retain(|t| t.id != id));
}

pub fn toast_success(store: &AppStore, message: impl Into<String>) {
    store_push_toast(store, ToastLevel::Success, message);
}

pub fn toast_error(store: &AppStore, message: impl Into<String>) {
    store_push_toast(store, ToastLevel::Error, message);
}
