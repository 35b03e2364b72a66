//! Contact Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ContactRequest;
use crate::context::use_app_context;
use crate::store::{toast_success, use_app_store, AppStateStoreFields};

#[component]
pub fn ContactPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let session = store.session().get_untracked();
    let name = RwSignal::new(session.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = RwSignal::new(session.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let (sending, set_sending) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = ContactRequest {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            subject: subject.get_untracked().trim().to_string(),
            message: message.get_untracked().trim().to_string(),
        };
        if let Err(e) = request.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);
        set_sending.set(true);

        let api = ctx.api.clone();
        spawn_local(async move {
            match api.send_contact(&request).await {
                Ok(reply) => {
                    toast_success(&store, reply);
                    subject.try_set(String::new());
                    message.try_set(String::new());
                }
                Err(e) => {
                    log::error!("[contact] send failed: {}", e);
                    form_error.try_set(Some(e.to_string()));
                }
            }
            set_sending.try_set(false);
        });
    };

    view! {
        <section class="page contact-page">
            <h1>"Contact us"</h1>
            <p class="hint">"Questions about listing your venue or a booking? Send us a message."</p>
            <form class="contact-form" on:submit=submit>
                <label>
                    "Name"
                    <input prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Email"
                    <input type="email" prop:value=move || email.get() on:input=move |ev| email.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Subject"
                    <input prop:value=move || subject.get() on:input=move |ev| subject.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Message"
                    <textarea rows="6" prop:value=move || message.get() on:input=move |ev| message.set(event_target_value(&ev)) />
                </label>
                {move || form_error.get().map(|m| view! { <p class="form-error">{m}</p> })}
                <button type="submit" class="btn btn-primary" disabled=move || sending.get()>
                    {move || if sending.get() { "Sending..." } else { "Send message" }}
                </button>
            </form>
        </section>
    }
}
