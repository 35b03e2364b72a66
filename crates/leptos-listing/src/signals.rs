//! Leptos signal bundle for one listing page.
//!
//! Mirrors the pure listing types into reactive state: the remote collection,
//! the user's query and the derived visible page.

use leptos::prelude::*;

use crate::fetch::{Collection, FetchFailure, RequestToken, Settled};
use crate::filter::{local_now, FilterSpec, FilterState};
use crate::item::ListingItem;
use crate::paginate::{ListingQuery, Page};

/// Reactive state of one listing page
pub struct ListingSignals<T: Send + Sync + 'static> {
    pub collection: RwSignal<Collection<T>>,
    pub query: RwSignal<ListingQuery>,
    /// Filtered, paginated view; recomputed when the collection or query changes
    pub page: Memo<Page<T>>,
}

impl<T: Send + Sync + 'static> Clone for ListingSignals<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListingSignals<T> {}

pub fn create_listing<T>(spec: FilterSpec<T>, page_size: usize) -> ListingSignals<T>
where
    T: ListingItem + PartialEq,
{
    create_listing_with(spec, page_size, FilterState::new())
}

/// Like [`create_listing`] with preselected filters (e.g. `status = pending`)
pub fn create_listing_with<T>(spec: FilterSpec<T>, page_size: usize, filters: FilterState) -> ListingSignals<T>
where
    T: ListingItem + PartialEq,
{
    let collection = RwSignal::new(Collection::<T>::new());
    let query = RwSignal::new(ListingQuery::new(filters));
    let page = Memo::new(move |_| {
        query.with(|q| collection.with(|c| q.view(&spec, &c.items, page_size, local_now())))
    });

    ListingSignals { collection, query, page }
}

impl<T: ListingItem> ListingSignals<T> {
    pub fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) {
        self.query.update(|q| q.set_filter(key, value));
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.query.update(|q| q.set_search(search));
    }

    pub fn clear_filters(&self) {
        self.query.update(ListingQuery::clear);
    }

    pub fn goto(&self, page: usize) {
        self.query.update(|q| q.goto(page));
    }

    pub fn filter_value(&self, key: &'static str) -> String {
        self.query.with(|q| q.filters.get(key).to_string())
    }

    pub fn search(&self) -> String {
        self.query.with(|q| q.search.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.collection.with(|c| c.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.collection.with(|c| c.error.clone())
    }

    /// Number of items in the unfiltered snapshot
    pub fn len(&self) -> usize {
        self.collection.with(|c| c.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a request. `None` once the owning component is gone.
    pub fn begin(&self) -> Option<RequestToken> {
        self.collection.try_update(Collection::begin)
    }

    /// Apply a replacing response. A disposed listing reports `Stale`.
    pub fn settle<E: FetchFailure>(&self, token: RequestToken, result: Result<Vec<T>, E>) -> Settled {
        self.collection
            .try_update(|c| c.settle(token, result))
            .unwrap_or(Settled::Stale)
    }

    /// Apply an additive response. A disposed listing reports `Stale`.
    pub fn append<E: FetchFailure>(&self, token: RequestToken, result: Result<Vec<T>, E>) -> Settled {
        self.collection
            .try_update(|c| c.append(token, result))
            .unwrap_or(Settled::Stale)
    }

    /// Patch the local snapshot after a successful mutation
    pub fn update_items(&self, change: impl FnOnce(&mut Vec<T>)) {
        self.collection.update(|c| change(&mut c.items));
    }

    pub fn remove(&self, id: &T::Id) {
        self.update_items(|items| items.retain(|item| &item.id() != id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    struct Hall {
        id: u32,
        city: String,
    }

    impl ListingItem for Hall {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug)]
    struct Down;

    impl fmt::Display for Down {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "server unreachable")
        }
    }

    impl FetchFailure for Down {
        fn is_empty_collection(&self) -> bool {
            false
        }
    }

    fn halls() -> Vec<Hall> {
        ["Surat", "Vadodara", "Surat", "Rajkot", "Surat"]
            .iter()
            .enumerate()
            .map(|(i, city)| Hall {
                id: i as u32 + 1,
                city: city.to_string(),
            })
            .collect()
    }

    fn spec() -> FilterSpec<Hall> {
        FilterSpec::<Hall>::new().equals("city", |h: &Hall| Some(h.city.as_str()))
    }

    #[test]
    fn test_filter_change_sends_page_back_to_one() {
        let owner = Owner::new();
        owner.with(|| {
            let listing = create_listing(spec(), 2);
            let token = listing.begin().unwrap();
            assert!(listing.is_loading());
            assert_eq!(listing.settle::<Down>(token, Ok(halls())), Settled::Applied);

            listing.goto(3);
            listing.page.with_untracked(|p| {
                assert_eq!(p.number, 3);
                assert_eq!(p.items.len(), 1);
            });

            listing.set_filter("city", "Surat");
            assert_eq!(listing.query.with_untracked(|q| q.page), 1);
            listing.page.with_untracked(|p| {
                assert_eq!(p.number, 1);
                assert_eq!(p.total_items, 3);
                assert_eq!(p.total_pages, 2);
            });
        });
    }

    #[test]
    fn test_remove_patches_snapshot() {
        let owner = Owner::new();
        owner.with(|| {
            let listing = create_listing(spec(), 10);
            let token = listing.begin().unwrap();
            listing.settle::<Down>(token, Ok(halls()));
            listing.remove(&2);
            assert_eq!(listing.len(), 4);
            listing.page.with_untracked(|p| assert!(p.items.iter().all(|h| h.id != 2)));
        });
    }

    #[test]
    fn test_failure_keeps_items_and_sets_error() {
        let owner = Owner::new();
        owner.with(|| {
            let listing = create_listing(spec(), 10);
            let token = listing.begin().unwrap();
            listing.settle::<Down>(token, Ok(halls()));

            let token = listing.begin().unwrap();
            assert_eq!(listing.settle(token, Err(Down)), Settled::Failed("server unreachable".to_string()));
            assert_eq!(listing.error().as_deref(), Some("server unreachable"));
            assert_eq!(listing.len(), 5);
        });
    }

    #[test]
    fn test_disposed_listing_reports_stale() {
        let owner = Owner::new();
        let listing = owner.with(|| create_listing(spec(), 2));
        let token = owner.with(|| listing.begin()).unwrap();

        owner.cleanup();

        assert_eq!(listing.settle::<Down>(token, Ok(halls())), Settled::Stale);
        assert_eq!(listing.append::<Down>(token, Ok(halls())), Settled::Stale);
        assert_eq!(listing.begin(), None);
    }
}
