//! VenueHub App
//!
//! Root component: shared services, session check and routes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::api::ApiError;
use crate::components::{NavBar, RequireRole, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::Role;
use crate::pages::admin::{
    AdminBookingsPage, AdminInquiriesPage, AdminLogsPage, AdminReviewsPage, AdminUsersPage, AdminVenuesPage, PendingOwnersPage,
    PendingVenuesPage,
};
use crate::pages::owner::{
    OwnerBookingsPage, OwnerInquiriesPage, OwnerReviewsPage, ReserveDatesPage, VenueFormPage, OwnerVenuesPage,
};
use crate::pages::{
    ContactPage, ExplorePage, FavoritesPage, LoginPage, MyBookingsPage, NotFoundPage, VenueDetailPage,
};
use crate::store::{store_set_session, AppState, AppStore};
use crate::{favorites, payment};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(AppConfig::from_env());
    let store: AppStore = Store::new(AppState::default());

    provide_context(ctx.clone());
    provide_context(store);

    favorites::install(&ctx, store);
    payment::install(&ctx, store);

    // Ask the backend who is logged in (cookie session)
    let api = ctx.api.clone();
    spawn_local(async move {
        match api.current_user().await {
            Ok(user) => {
                log::info!("[session] restored {} session", user.role().as_str());
                store_set_session(&store, Some(user));
            }
            Err(ApiError::Unauthorized(_)) | Err(ApiError::NotFound(_)) => store_set_session(&store, None),
            Err(e) => {
                log::warn!("[session] check failed: {}", e);
                store_set_session(&store, None);
            }
        }
    });

    view! {
        <Router>
            <NavBar />
            <ToastHost />
            <main class="main-content">
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=ExplorePage />
                    <Route path=path!("/venue/:id") view=VenueDetailPage />
                    <Route path=path!("/favorites") view=FavoritesPage />
                    <Route path=path!("/contact") view=ContactPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route
                        path=path!("/bookings")
                        view=|| view! { <RequireRole role=Role::User><MyBookingsPage /></RequireRole> }
                    />

                    <Route
                        path=path!("/owner/venues")
                        view=|| view! { <RequireRole role=Role::Owner><OwnerVenuesPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/owner/venues/new")
                        view=|| view! { <RequireRole role=Role::Owner><VenueFormPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/owner/venues/:id/edit")
                        view=|| view! { <RequireRole role=Role::Owner><VenueFormPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/owner/venues/:id/reserve")
                        view=|| view! { <RequireRole role=Role::Owner><ReserveDatesPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/owner/bookings")
                        view=|| view! { <RequireRole role=Role::Owner><OwnerBookingsPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/owner/inquiries")
                        view=|| view! { <RequireRole role=Role::Owner><OwnerInquiriesPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/owner/reviews")
                        view=|| view! { <RequireRole role=Role::Owner><OwnerReviewsPage /></RequireRole> }
                    />

                    <Route
                        path=path!("/admin/venues")
                        view=|| view! { <RequireRole role=Role::Admin><AdminVenuesPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/venues/pending")
                        view=|| view! { <RequireRole role=Role::Admin><PendingVenuesPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/owners/pending")
                        view=|| view! { <RequireRole role=Role::Admin><PendingOwnersPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/bookings")
                        view=|| view! { <RequireRole role=Role::Admin><AdminBookingsPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/users")
                        view=|| view! { <RequireRole role=Role::Admin><AdminUsersPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/reviews")
                        view=|| view! { <RequireRole role=Role::Admin><AdminReviewsPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/inquiries")
                        view=|| view! { <RequireRole role=Role::Admin><AdminInquiriesPage /></RequireRole> }
                    />
                    <Route
                        path=path!("/admin/logs")
                        view=|| view! { <RequireRole role=Role::Admin><AdminLogsPage /></RequireRole> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
