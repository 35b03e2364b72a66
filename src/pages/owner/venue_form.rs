//! Add / Edit Venue Page

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

use super::OwnerTabs;
use crate::api::VenueForm;
use crate::context::use_app_context;
use crate::filters::VENUE_TYPES;
use crate::store::{toast_error, toast_success, use_app_store};

#[derive(Params, PartialEq, Clone, Debug)]
pub struct VenueFormParams {
    pub id: Option<String>,
}

type Getter = fn(&VenueForm) -> String;
type Setter = fn(&mut VenueForm, String);

fn text_field(form: RwSignal<VenueForm>, label: &'static str, kind: &'static str, get: Getter, set: Setter) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}

/// Create a venue, or edit one when the route carries an id
#[component]
pub fn VenueFormPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<VenueFormParams>();
    let editing = Memo::new(move |_| params.get().ok().and_then(|p| p.id));

    let form = RwSignal::new(VenueForm::default());
    let form_error = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(false);
    let (saving, set_saving) = signal(false);
    let images = NodeRef::<Input>::new();

    let load_api = ctx.api.clone();
    Effect::new(move |_| {
        let Some(id) = editing.get() else {
            form.set(VenueForm::default());
            return;
        };
        set_loading.set(true);
        let api = load_api.clone();
        spawn_local(async move {
            match api.fetch_venue(&id).await {
                Ok(venue) => {
                    form.try_set(VenueForm::from_venue(&venue));
                }
                Err(e) => {
                    log::error!("[venue-form] load {} failed: {}", id, e);
                    toast_error(&store, e.to_string());
                }
            }
            set_loading.try_set(false);
        });
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);
        set_saving.set(true);

        let files = images.get_untracked().and_then(|input| input.files());
        let id = editing.get_untracked();
        let api = ctx.api.clone();
        spawn_local(async move {
            let result = match &id {
                Some(id) => api.update_venue(id, &current, files.as_ref()).await,
                None => api.create_venue(&current, files.as_ref()).await,
            };
            match result {
                Ok(message) => {
                    toast_success(&store, message);
                    navigate.with_value(|nav| nav("/owner/venues", Default::default()));
                }
                Err(e) => {
                    log::error!("[venue-form] save failed: {}", e);
                    form_error.try_set(Some(e.to_string()));
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="page dashboard-page">
            <OwnerTabs />
            <h1>{move || if editing.get().is_some() { "Edit venue" } else { "Add venue" }}</h1>
            <Show when=move || loading.get()>
                <div class="loading-placeholder">"Loading venue..."</div>
            </Show>
            <form class="venue-form" on:submit=submit>
                {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                <label>
                    "Description"
                    <textarea
                        rows="5"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.description = value);
                        }
                    />
                </label>
                {text_field(form, "City", "text", |f| f.city.clone(), |f, v| f.city = v)}
                {text_field(form, "Address", "text", |f| f.address.clone(), |f, v| f.address = v)}
                <label>
                    "Type"
                    <select
                        prop:value=move || form.with(|f| f.venue_type.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.venue_type = value);
                        }
                    >
                        <option value="">"Choose a type"</option>
                        {VENUE_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                    </select>
                </label>
                {text_field(form, "Price per day", "number", |f| f.price.clone(), |f, v| f.price = v)}
                {text_field(form, "Capacity", "number", |f| f.capacity.clone(), |f, v| f.capacity = v)}
                {text_field(form, "Amenities (comma separated)", "text", |f| f.amenities.clone(), |f, v| f.amenities = v)}
                <label>
                    "Photos"
                    <input type="file" accept="image/*" multiple node_ref=images />
                </label>
                {move || form_error.get().map(|m| view! { <p class="form-error">{m}</p> })}
                <button type="submit" class="btn btn-primary" disabled=move || saving.get() || loading.get()>
                    {move || if saving.get() { "Saving..." } else { "Save venue" }}
                </button>
            </form>
        </section>
    }
}
