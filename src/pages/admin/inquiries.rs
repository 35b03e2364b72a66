//! Admin Inquiries Page
//!
//! Messages sent through the public contact form.

use leptos::prelude::*;
use leptos_listing::FilterState;

use super::AdminTabs;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{contact_messages_controls, contact_messages_spec};
use crate::listing::{run_action, use_listing};
use crate::models::ContactMessage;
use crate::pages::fmt_created;
use crate::store::use_app_store;

#[component]
pub fn AdminInquiriesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) =
        use_listing(contact_messages_spec(), FilterState::new(), |api| async move { api.contact_messages().await });

    let delete = Callback::new(move |id: String| {
        let api = ctx.api.clone();
        let target = id.clone();
        run_action(store, async move { api.delete_contact(&id).await }, move || listing.remove(&target));
    });

    let row = move |message: ContactMessage| {
        let id = message.id.clone();
        let mailto = format!("mailto:{}", message.email);
        view! {
            <article class="message-card">
                <header>
                    <strong>{message.name.clone()}</strong>
                    <a class="muted" href=mailto>{message.email.clone()}</a>
                    <span class="message-date">{fmt_created(message.created_at.as_ref())}</span>
                </header>
                {message.subject.clone().map(|s| view! { <h3>{s}</h3> })}
                <p>{message.message.clone()}</p>
                <ConfirmButton
                    label="Delete"
                    prompt="Delete this message?"
                    on_confirm=Callback::new(move |_| delete.run(id.clone()))
                />
            </article>
        }
    };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"Inquiries"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(contact_messages_controls)
                on_retry=reload
                row=row
                empty_text="No messages yet."
                placeholder="Search messages"
            />
        </section>
    }
}
