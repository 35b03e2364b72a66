//! Admin Users Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listing::FilterState;

use super::AdminTabs;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{users_controls, users_spec};
use crate::listing::{run_action, use_listing};
use crate::models::User;
use crate::pages::{fmt_created, status_badge};
use crate::store::{toast_error, toast_success, use_app_store};

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = StoredValue::new(ctx.api.clone());
    let (listing, reload) = use_listing(users_spec(), FilterState::new(), |api| async move { api.admin_users().await });

    let toggle_block = Callback::new(move |id: String| {
        let api = api.get_value();
        spawn_local(async move {
            match api.toggle_block(&id).await {
                Ok(updated) => {
                    let verb = if updated.is_blocked { "blocked" } else { "unblocked" };
                    toast_success(&store, format!("{} {}", updated.name, verb));
                    listing.update_items(|items| {
                        if let Some(u) = items.iter_mut().find(|u| u.id == updated.id) {
                            *u = updated;
                        }
                    });
                }
                Err(e) => {
                    log::error!("[users] block toggle {} failed: {}", id, e);
                    toast_error(&store, e.to_string());
                }
            }
        });
    });

    let delete = Callback::new(move |id: String| {
        let api = api.get_value();
        let target = id.clone();
        run_action(store, async move { api.delete_user(&id).await }, move || listing.remove(&target));
    });

    let row = move |user: User| {
        let block_id = user.id.clone();
        let delete_id = user.id.clone();
        let is_admin = user.is_admin;
        let block_label = if user.is_blocked { "Unblock" } else { "Block" };
        view! {
            <tr>
                <td>{user.name.clone()}</td>
                <td>{user.email.clone()}</td>
                <td>{user.phone.clone().unwrap_or_default()}</td>
                <td>{status_badge(user.role().as_str())}</td>
                <td>{status_badge(if user.is_blocked { "blocked" } else { "active" })}</td>
                <td>{fmt_created(user.created_at.as_ref())}</td>
                <td class="row-actions">
                    {(!is_admin).then(|| view! {
                        <button class="btn" on:click=move |_| toggle_block.run(block_id.clone())>{block_label}</button>
                        <ConfirmButton
                            label="Delete"
                            prompt="Delete this account?"
                            on_confirm=Callback::new(move |_| delete.run(delete_id.clone()))
                        />
                    })}
                </td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"Users"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(users_controls)
                on_retry=reload
                row=row
                headers=vec!["Name", "Email", "Phone", "Role", "Access", "Joined", ""]
                empty_text="No users yet."
                placeholder="Search by name, email or phone"
            />
        </section>
    }
}
