//! Login / Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{ApiClient, ApiError, LoginRequest, RegisterRequest};
use crate::context::use_app_context;
use crate::models::{Role, User};
use crate::store::{store_set_session, toast_success, use_app_store};

/// Where a freshly logged-in user lands. Owners still awaiting approval
/// browse like any visitor.
pub fn landing_path(user: &User) -> &'static str {
    if user.has_role(Role::Admin) {
        "/admin/venues"
    } else if user.has_role(Role::Owner) {
        "/owner/venues"
    } else {
        "/"
    }
}

enum Credentials {
    Login(LoginRequest),
    Register(RegisterRequest),
}

impl Credentials {
    fn validate(&self) -> Result<(), ApiError> {
        match self {
            Credentials::Login(r) => r.validate(),
            Credentials::Register(r) => r.validate(),
        }
    }

    async fn submit(self, api: ApiClient) -> Result<User, ApiError> {
        match self {
            Credentials::Login(r) => api.login(&r).await,
            Credentials::Register(r) => api.register(&r).await,
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = StoredValue::new(use_navigate());

    let (registering, set_registering) = signal(false);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_owner = RwSignal::new(false);
    let form_error = RwSignal::new(None::<String>);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        let credentials = if registering.get_untracked() {
            Credentials::Register(RegisterRequest {
                name: name.get_untracked().trim().to_string(),
                email,
                password,
                is_owner: is_owner.get_untracked(),
            })
        } else {
            Credentials::Login(LoginRequest { email, password })
        };
        if let Err(e) = credentials.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);
        set_busy.set(true);

        let api = ctx.api.clone();
        spawn_local(async move {
            match credentials.submit(api).await {
                Ok(user) => {
                    log::info!("[session] logged in as {}", user.role().as_str());
                    let target = landing_path(&user);
                    if user.is_owner && !user.is_approved {
                        toast_success(&store, "Account created. An admin will review your owner request.");
                    } else {
                        toast_success(&store, format!("Welcome, {}", user.name));
                    }
                    store_set_session(&store, Some(user));
                    navigate.with_value(|nav| nav(target, Default::default()));
                }
                Err(e) => {
                    log::warn!("[session] login failed: {}", e);
                    form_error.try_set(Some(e.to_string()));
                }
            }
            set_busy.try_set(false);
        });
    };

    view! {
        <section class="page login-page">
            <div class="auth-tabs">
                <button class:active=move || !registering.get() on:click=move |_| set_registering.set(false)>"Log in"</button>
                <button class:active=move || registering.get() on:click=move |_| set_registering.set(true)>"Register"</button>
            </div>
            <form class="auth-form" on:submit=submit>
                <Show when=move || registering.get()>
                    <label>
                        "Name"
                        <input prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                    </label>
                </Show>
                <label>
                    "Email"
                    <input type="email" prop:value=move || email.get() on:input=move |ev| email.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Password"
                    <input type="password" prop:value=move || password.get() on:input=move |ev| password.set(event_target_value(&ev)) />
                </label>
                <Show when=move || registering.get()>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || is_owner.get()
                            on:change=move |ev| is_owner.set(event_target_checked(&ev))
                        />
                        "I want to list my venues"
                    </label>
                </Show>
                {move || form_error.get().map(|m| view! { <p class="form-error">{m}</p> })}
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || match (registering.get(), busy.get()) {
                        (_, true) => "Please wait...",
                        (true, false) => "Create account",
                        (false, false) => "Log in",
                    }}
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(json: serde_json::Value) -> User {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_landing_path_by_role() {
        let admin = user(serde_json::json!({"_id": "u1", "name": "A", "email": "a@x.io", "isAdmin": true}));
        assert_eq!(landing_path(&admin), "/admin/venues");

        let owner = user(serde_json::json!({"_id": "u2", "name": "O", "email": "o@x.io", "isOwner": true, "isApproved": true}));
        assert_eq!(landing_path(&owner), "/owner/venues");

        let waiting = user(serde_json::json!({"_id": "u3", "name": "W", "email": "w@x.io", "isOwner": true}));
        assert_eq!(landing_path(&waiting), "/");
    }
}
