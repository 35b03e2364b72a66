//! Infinite-Scroll Loader
//!
//! State machine behind the Explore page's "load more on scroll". The DOM
//! side (sentinel observer and debounce) lives in [`crate::observer`].

/// Quiet window applied to sentinel visibility events
pub const SCROLL_DEBOUNCE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Idle,
    Loading,
    /// The server reported no further pages
    Exhausted,
}

/// Handed out by [`InfiniteLoader::begin`]; identifies one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub page: u32,
    generation: u64,
}

impl LoadTicket {
    /// The first page replaces the current items, later pages append
    pub fn replaces(&self) -> bool {
        self.page <= 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfiniteLoader {
    phase: LoaderPhase,
    next_page: u32,
    limit: u32,
    generation: u64,
}

impl InfiniteLoader {
    pub fn new(limit: u32) -> Self {
        Self {
            phase: LoaderPhase::Idle,
            next_page: 1,
            limit: limit.max(1),
            generation: 0,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoaderPhase::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == LoaderPhase::Exhausted
    }

    /// Start the next page request. Returns `None` while a request is in
    /// flight or once the server has run out of pages.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if self.phase != LoaderPhase::Idle {
            return None;
        }
        self.phase = LoaderPhase::Loading;
        Some(LoadTicket {
            page: self.next_page,
            generation: self.generation,
        })
    }

    /// Record a successful response. Returns false for tickets issued before
    /// the last [`reset`](Self::reset); their items must be dropped.
    pub fn finish(&mut self, ticket: LoadTicket, has_more: bool) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.next_page = ticket.page + 1;
        self.phase = if has_more {
            LoaderPhase::Idle
        } else {
            LoaderPhase::Exhausted
        };
        true
    }

    /// Record a failed request. The loader goes back to idle so the next
    /// visibility event retries the same page.
    pub fn fail(&mut self, ticket: LoadTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.phase = LoaderPhase::Idle;
        true
    }

    /// Start over from page 1, invalidating any request in flight
    pub fn reset(&mut self) {
        self.generation += 1;
        self.next_page = 1;
        self.phase = LoaderPhase::Idle;
    }

    fn accepts(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && self.phase == LoaderPhase::Loading
    }
}

impl Default for InfiniteLoader {
    fn default() -> Self {
        Self::new(crate::paginate::DEFAULT_PAGE_SIZE as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_advance_until_exhausted() {
        let mut loader = InfiniteLoader::new(10);
        let first = loader.begin().unwrap();
        assert_eq!(first.page, 1);
        assert!(first.replaces());
        assert!(loader.finish(first, true));

        let second = loader.begin().unwrap();
        assert_eq!(second.page, 2);
        assert!(!second.replaces());
        assert!(loader.finish(second, false));
        assert!(loader.is_exhausted());

        // Further visibility events never issue requests
        assert!(loader.begin().is_none());
        assert!(loader.begin().is_none());
    }

    #[test]
    fn test_no_duplicate_request_while_loading() {
        let mut loader = InfiniteLoader::default();
        let ticket = loader.begin().unwrap();
        assert!(loader.is_loading());
        assert!(loader.begin().is_none());
        loader.finish(ticket, true);
        assert!(loader.begin().is_some());
    }

    #[test]
    fn test_failure_allows_retry_of_same_page() {
        let mut loader = InfiniteLoader::new(10);
        let first = loader.begin().unwrap();
        loader.finish(first, true);

        let second = loader.begin().unwrap();
        assert!(loader.fail(second));
        assert_eq!(loader.phase(), LoaderPhase::Idle);

        let retry = loader.begin().unwrap();
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn test_reset_discards_in_flight_ticket() {
        let mut loader = InfiniteLoader::new(10);
        let first = loader.begin().unwrap();
        loader.finish(first, true);
        let stale = loader.begin().unwrap();

        loader.reset();
        let fresh = loader.begin().unwrap();
        assert_eq!(fresh.page, 1);

        assert!(!loader.finish(stale, false));
        assert!(loader.is_loading());
        assert!(loader.finish(fresh, true));
        assert_eq!(loader.begin().map(|t| t.page), Some(2));
    }

    #[test]
    fn test_reset_revives_exhausted_loader() {
        let mut loader = InfiniteLoader::new(10);
        let ticket = loader.begin().unwrap();
        loader.finish(ticket, false);
        assert!(loader.begin().is_none());

        loader.reset();
        assert_eq!(loader.begin().map(|t| t.page), Some(1));
    }
}
