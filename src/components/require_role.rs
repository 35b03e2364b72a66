//! Role Guard Component

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::models::Role;
use crate::store::{store_has_role, use_app_store, AppStateStoreFields};

/// Render `children` only for a session carrying `role`; otherwise send the
/// visitor to `/login`. Waits for the initial session check first.
#[component]
pub fn RequireRole(role: Role, children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();
    let checked = move || store.session_checked().get();
    let allowed = move || store_has_role(&store, role);
    let children = StoredValue::new(children);

    view! {
        <Show
            when=checked
            fallback=|| view! { <div class="loading-placeholder">"Checking session..."</div> }
        >
            <Show
                when=allowed
                fallback=move || {
                    log::info!("[guard] {} route needs a matching session", role.as_str());
                    view! { <Redirect path="/login" /> }
                }
            >
                {children.read_value()()}
            </Show>
        </Show>
    }
}
