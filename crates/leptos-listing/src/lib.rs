//! Leptos Listing Utilities
//!
//! The pieces every listing page is made of: a filter composer over an
//! in-memory snapshot, a paginator, an infinite-scroll loader, a
//! stale-response guard for fetches and a shared favorites store, plus the
//! Leptos glue that wires them to signals and the DOM.
//!
//! Everything outside `signals` and `observer` is plain Rust and has no
//! browser dependency.

pub mod favorites;
pub mod fetch;
pub mod filter;
pub mod item;
pub mod observer;
pub mod paginate;
pub mod scroll;
pub mod signals;

pub use favorites::{FavoriteSet, FavoritesStore, KeyValueStore, MemoryStore, StoreError, SubscriptionId, FAVORITES_KEY};
pub use fetch::{Collection, FetchFailure, RequestGuard, RequestToken, Settled};
pub use filter::{is_all, local_now, DateBucket, FilterSpec, FilterState, RangeBounds, ALL, SORT_KEY};
pub use item::ListingItem;
pub use observer::{use_sentinel, SentinelHandle};
pub use paginate::{clamp_page, paginate, total_pages, ListingQuery, Page, DEFAULT_PAGE_SIZE};
pub use scroll::{InfiniteLoader, LoadTicket, LoaderPhase, SCROLL_DEBOUNCE_MS};
pub use signals::{create_listing, create_listing_with, ListingSignals};
