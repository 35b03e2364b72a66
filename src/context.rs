//! Application Context
//!
//! Shared services provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_listing::FavoritesStore;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::favorites::BrowserStorage;

/// App-wide services provided via context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub api: ApiClient,
    pub favorites: Arc<FavoritesStore<BrowserStorage>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        Self {
            config: Arc::new(config),
            api,
            favorites: Arc::new(FavoritesStore::new(BrowserStorage)),
        }
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
