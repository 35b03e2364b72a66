//! Remote Collection Fetcher
//!
//! Bookkeeping for one listing's remote collection: loading flag, error
//! message and stale-response protection. The actual HTTP call is the
//! caller's; this module only decides what its result does to the state.

use std::collections::HashSet;
use std::fmt::Display;

use crate::item::ListingItem;

/// Failure reported by a collection request.
///
/// Implemented by the app's API error type.
pub trait FetchFailure: Display {
    /// True when the server answered "no such collection" (HTTP 404 on a
    /// listing). Treated as an empty list, not as an error.
    fn is_empty_collection(&self) -> bool;
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Generation counter: only the most recently issued token is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGuard {
    current: u64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestToken {
        self.current = self.current.wrapping_add(1);
        RequestToken(self.current)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }

    /// Invalidate whatever is in flight without starting a new request
    pub fn cancel(&mut self) {
        self.current = self.current.wrapping_add(1);
    }
}

/// What a settled response did to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// Items replaced (or appended) and error cleared
    Applied,
    /// Newer request outstanding; response dropped
    Stale,
    /// Request failed; previous items kept. Carries the message to toast.
    Failed(String),
}

/// Client-side snapshot of one remote collection
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    guard: RequestGuard,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            guard: RequestGuard::new(),
        }
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started and return its token
    pub fn begin(&mut self) -> RequestToken {
        self.loading = true;
        self.guard.begin()
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.guard.is_current(token)
    }

    /// Drop any in-flight response and clear the loading flag
    pub fn cancel(&mut self) {
        self.guard.cancel();
        self.loading = false;
    }

    /// Apply a replacing response
    pub fn settle<E: FetchFailure>(&mut self, token: RequestToken, result: Result<Vec<T>, E>) -> Settled {
        self.resolve(token, result, |items, incoming| *items = incoming)
    }

    /// `merge` folds the received items into the snapshot. A 404 merges an
    /// empty list.
    fn resolve<E, M>(&mut self, token: RequestToken, result: Result<Vec<T>, E>, merge: M) -> Settled
    where
        E: FetchFailure,
        M: FnOnce(&mut Vec<T>, Vec<T>),
    {
        if !self.guard.is_current(token) {
            return Settled::Stale;
        }
        self.loading = false;

        match result {
            Ok(items) => {
                merge(&mut self.items, items);
                self.error = None;
                Settled::Applied
            }
            Err(e) if e.is_empty_collection() => {
                merge(&mut self.items, Vec::new());
                self.error = None;
                Settled::Applied
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                Settled::Failed(message)
            }
        }
    }
}

impl<T: ListingItem> Collection<T> {
    /// Apply an additive response (infinite scroll). Items whose id is
    /// already in the snapshot are skipped, since offset pages overlap when
    /// the server list shifts between fetches.
    pub fn append<E: FetchFailure>(&mut self, token: RequestToken, result: Result<Vec<T>, E>) -> Settled {
        self.resolve(token, result, |items, incoming| {
            let mut seen: HashSet<T::Id> = items.iter().map(ListingItem::id).collect();
            items.extend(incoming.into_iter().filter(|item| seen.insert(item.id())));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    enum TestError {
        Down,
        NotFound,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TestError::Down => write!(f, "server unreachable"),
                TestError::NotFound => write!(f, "not found"),
            }
        }
    }

    impl FetchFailure for TestError {
        fn is_empty_collection(&self) -> bool {
            matches!(self, TestError::NotFound)
        }
    }

    impl ListingItem for i32 {
        type Id = i32;

        fn id(&self) -> i32 {
            *self
        }
    }

    #[test]
    fn test_success_replaces_and_clears_error() {
        let mut c = Collection::new();
        let t = c.begin();
        assert!(c.loading);
        c.settle::<TestError>(t, Err(TestError::Down));
        assert_eq!(c.error.as_deref(), Some("server unreachable"));

        let t = c.begin();
        assert_eq!(c.settle::<TestError>(t, Ok(vec![1, 2])), Settled::Applied);
        assert_eq!(c.items, vec![1, 2]);
        assert!(c.error.is_none());
        assert!(!c.loading);
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut c = Collection::new();
        let t = c.begin();
        c.settle::<TestError>(t, Ok(vec![1, 2, 3]));

        let t = c.begin();
        let outcome = c.settle(t, Err(TestError::Down));
        assert_eq!(outcome, Settled::Failed("server unreachable".to_string()));
        assert_eq!(c.items, vec![1, 2, 3]);
        assert!(!c.loading);
    }

    #[test]
    fn test_not_found_is_empty_not_error() {
        let mut c = Collection::new();
        let t = c.begin();
        c.settle::<TestError>(t, Ok(vec![7]));

        let t = c.begin();
        assert_eq!(c.settle(t, Err(TestError::NotFound)), Settled::Applied);
        assert!(c.items.is_empty());
        assert!(c.error.is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut c = Collection::new();
        let slow = c.begin();
        let fast = c.begin();
        assert_eq!(c.settle::<TestError>(fast, Ok(vec![2])), Settled::Applied);
        assert_eq!(c.settle::<TestError>(slow, Ok(vec![1])), Settled::Stale);
        assert_eq!(c.items, vec![2]);
    }

    #[test]
    fn test_append_extends_items() {
        let mut c = Collection::new();
        let t = c.begin();
        c.settle::<TestError>(t, Ok(vec![1, 2]));
        let t = c.begin();
        c.append::<TestError>(t, Ok(vec![3]));
        assert_eq!(c.items, vec![1, 2, 3]);
    }

    #[test]
    fn test_append_skips_ids_already_loaded() {
        let mut c = Collection::new();
        let t = c.begin();
        c.settle::<TestError>(t, Ok(vec![1, 2, 3]));
        let t = c.begin();
        assert_eq!(c.append::<TestError>(t, Ok(vec![3, 4, 4])), Settled::Applied);
        assert_eq!(c.items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_append_not_found_keeps_items() {
        let mut c = Collection::new();
        let t = c.begin();
        c.settle::<TestError>(t, Ok(vec![1, 2]));
        let t = c.begin();
        assert_eq!(c.append(t, Err(TestError::NotFound)), Settled::Applied);
        assert_eq!(c.items, vec![1, 2]);
    }

    #[test]
    fn test_cancel_drops_in_flight_response() {
        let mut c = Collection::<u8>::new();
        let t = c.begin();
        c.cancel();
        assert!(!c.loading);
        assert_eq!(c.settle::<TestError>(t, Ok(vec![1])), Settled::Stale);
        assert!(c.items.is_empty());
    }
}
