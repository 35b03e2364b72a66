//! Owner Inquiries Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use super::OwnerTabs;
use crate::components::ListingShell;
use crate::context::use_app_context;
use crate::filters::{owner_inquiries_controls, owner_inquiries_spec};
use crate::listing::{run_action, use_listing};
use crate::models::Inquiry;
use crate::pages::{fmt_created, fmt_day};
use crate::store::use_app_store;

#[component]
pub fn OwnerInquiriesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) =
        use_listing(owner_inquiries_spec(), FilterState::new(), |api| async move { api.owner_inquiries().await });

    let reply = Callback::new(move |(id, text): (String, String)| {
        let api = ctx.api.clone();
        let target = id.clone();
        let saved = text.trim().to_string();
        run_action(store, async move { api.reply_inquiry(&id, &text).await }, move || {
            listing.update_items(|items| {
                if let Some(i) = items.iter_mut().find(|i| i.id == target) {
                    i.reply = Some(saved);
                }
            });
        });
    });

    let row = move |inquiry: Inquiry| view! { <InquiryCard inquiry=inquiry on_reply=reply /> };

    view! {
        <section class="page dashboard-page">
            <OwnerTabs />
            <h1>"Inquiries"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(owner_inquiries_controls)
                on_retry=reload
                row=row
                empty_text="No inquiries yet."
                placeholder="Search inquiries"
            />
        </section>
    }
}

#[component]
fn InquiryCard(inquiry: Inquiry, on_reply: Callback<(String, String)>) -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let replied = inquiry.is_replied();
    let id = StoredValue::new(inquiry.id.clone());

    view! {
        <article class="inquiry-card">
            <header>
                <strong>{inquiry.name.clone()}</strong>
                <span class="muted">{inquiry.email.clone()}</span>
                {inquiry.phone.clone().map(|p| view! { <span class="muted">{p}</span> })}
                <span class="inquiry-date">{fmt_created(inquiry.created_at.as_ref())}</span>
            </header>
            <p class="inquiry-venue">
                {inquiry.venue_name.clone().unwrap_or_default()}
                {inquiry.event_date.map(|d| format!(" · event on {}", fmt_day(d)))}
            </p>
            <p>{inquiry.message.clone()}</p>
            {if replied {
                view! { <blockquote class="inquiry-reply">{inquiry.reply.clone()}</blockquote> }.into_any()
            } else {
                view! {
                    <form
                        class="reply-form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            on_reply.run((id.get_value(), draft.get_untracked()));
                        }
                    >
                        <textarea
                            placeholder="Write a reply"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                        />
                        <button type="submit" class="btn" disabled=move || draft.with(|d| d.trim().is_empty())>"Reply"</button>
                    </form>
                }
                .into_any()
            }}
        </article>
    }
}
