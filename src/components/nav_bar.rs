//! Navigation Bar Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::APP_NAME;
use crate::context::use_app_context;
use crate::models::Role;
use crate::store::{store_set_session, toast_error, toast_success, use_app_store, AppStateStoreFields};

/// Top navigation. Dashboard links appear only for the matching role flag.
#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = StoredValue::new(use_navigate());

    let role = move || store.session().with(|s| s.as_ref().map(|u| u.role()));
    let is_approved_owner = move || store.session().with(|s| s.as_ref().is_some_and(|u| u.has_role(Role::Owner)));
    let favorite_count = move || store.favorites().with(Vec::len);

    let logout = move |_| {
        let api = ctx.api.clone();
        spawn_local(async move {
            match api.logout().await {
                Ok(_) => {
                    store_set_session(&store, None);
                    toast_success(&store, "Logged out");
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(e) => toast_error(&store, e.to_string()),
            }
        });
    };

    view! {
        <header class="nav-bar">
            <A href="/" attr:class="brand">{APP_NAME}</A>
            <nav class="nav-links">
                <A href="/">"Explore"</A>
                <A href="/favorites">
                    "Favorites"
                    <Show when=move || { favorite_count() > 0 }>
                        <span class="badge">{favorite_count}</span>
                    </Show>
                </A>
                <A href="/contact">"Contact"</A>
                <Show when=move || role().is_some()>
                    <A href="/bookings">"My Bookings"</A>
                </Show>
                <Show when=is_approved_owner>
                    <A href="/owner/venues">"Owner Dashboard"</A>
                </Show>
                <Show when=move || role() == Some(Role::Admin)>
                    <A href="/admin/venues">"Admin"</A>
                </Show>
            </nav>
            <div class="nav-session">
                {move || match store.session().get() {
                    Some(user) => view! {
                        <span class="nav-user">{user.name}</span>
                        <button class="btn btn-link" on:click=logout.clone()>"Log out"</button>
                    }.into_any(),
                    None => view! { <A href="/login">"Log in"</A> }.into_any(),
                }}
            </div>
        </header>
    }
}
