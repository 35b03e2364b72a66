//! Predicate Filter Composer
//!
//! Filter state, date buckets and the `FilterSpec` builder each listing page
//! configures with its own field accessors.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDateTime};

/// Sentinel value meaning "predicate always passes"
pub const ALL: &str = "all";

/// Filter key that selects one of the registered orderings
pub const SORT_KEY: &str = "sort";

/// True for the pass-everything sentinels (`"all"` and the empty string)
pub fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

/// Current local wall-clock time, used as `now` by [`FilterSpec::apply_now`]
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ========================
// Filter State
// ========================

/// Currently selected value per filter key.
///
/// Keys that were never set read as [`ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for initial states
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or(ALL)
    }

    /// Set a filter value. Returns true when the effective value changed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        let before = self.get(&key).to_string();
        let changed = !(is_all(&before) && is_all(&value)) && before != value;
        if is_all(&value) {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
        changed
    }

    pub fn is_active(&self, key: &str) -> bool {
        !is_all(self.get(key))
    }

    /// Number of filters not set to a sentinel
    pub fn active_count(&self) -> usize {
        self.values.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Non-sentinel pairs, in key order, for server-side filtering
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// ========================
// Date Buckets
// ========================

/// Relative date windows offered by the date filters.
///
/// Evaluated against local time; day boundaries fall on local midnight and
/// weeks start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    /// The last 7 days up to now
    LastWeek,
    /// The last 30 days up to now
    LastMonth,
    /// Today or later
    Upcoming,
    /// Before today
    Past,
}

impl DateBucket {
    pub const VARIANTS: [DateBucket; 8] = [
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::ThisWeek,
        DateBucket::ThisMonth,
        DateBucket::LastWeek,
        DateBucket::LastMonth,
        DateBucket::Upcoming,
        DateBucket::Past,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Yesterday => "yesterday",
            DateBucket::ThisWeek => "thisWeek",
            DateBucket::ThisMonth => "thisMonth",
            DateBucket::LastWeek => "lastWeek",
            DateBucket::LastMonth => "lastMonth",
            DateBucket::Upcoming => "upcoming",
            DateBucket::Past => "past",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::VARIANTS.into_iter().find(|b| b.as_str() == s.trim())
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateBucket::Today => "Today",
            DateBucket::Yesterday => "Yesterday",
            DateBucket::ThisWeek => "This week",
            DateBucket::ThisMonth => "This month",
            DateBucket::LastWeek => "Last 7 days",
            DateBucket::LastMonth => "Last 30 days",
            DateBucket::Upcoming => "Upcoming",
            DateBucket::Past => "Past",
        }
    }

    pub fn contains(&self, at: NaiveDateTime, now: NaiveDateTime) -> bool {
        let today = now.date();
        let day = at.date();
        match self {
            DateBucket::Today => day == today,
            DateBucket::Yesterday => today.pred_opt() == Some(day),
            DateBucket::ThisWeek => {
                let offset = i64::from(today.weekday().num_days_from_sunday());
                let start = today - Duration::days(offset);
                day >= start && day < start + Duration::days(7)
            }
            DateBucket::ThisMonth => day.year() == today.year() && day.month() == today.month(),
            DateBucket::LastWeek => day >= today - Duration::days(7) && at <= now,
            DateBucket::LastMonth => day >= today - Duration::days(30) && at <= now,
            DateBucket::Upcoming => day >= today,
            DateBucket::Past => day < today,
        }
    }
}

// ========================
// Numeric Ranges
// ========================

/// Inclusive numeric range parsed from `"min-max"`, `"min+"` or `"-max"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeBounds {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(min) = value.strip_suffix('+') {
            let min = min.trim().parse().ok()?;
            return Some(Self { min: Some(min), max: None });
        }
        if let Some(max) = value.strip_prefix('-') {
            let max = max.trim().parse().ok()?;
            return Some(Self { min: None, max: Some(max) });
        }
        let (lo, hi) = value.split_once('-')?;
        let min: f64 = lo.trim().parse().ok()?;
        let max: f64 = hi.trim().parse().ok()?;
        (min <= max).then_some(Self { min: Some(min), max: Some(max) })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

// ========================
// Filter Spec
// ========================

pub type TextField<T> = fn(&T) -> Option<&str>;
pub type DateField<T> = fn(&T) -> Option<NaiveDateTime>;
pub type NumberField<T> = fn(&T) -> Option<f64>;
pub type FlagField<T> = fn(&T) -> bool;
pub type Comparator<T> = fn(&T, &T) -> Ordering;

enum Predicate<T> {
    Equals(TextField<T>),
    Date(DateField<T>),
    Range(NumberField<T>),
    Flag(FlagField<T>),
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Predicate<T> {}

impl<T> Predicate<T> {
    fn passes(&self, item: &T, selected: &str, now: NaiveDateTime) -> bool {
        match self {
            Predicate::Equals(field) => field(item)
                .map_or(false, |v| v.trim().to_lowercase() == selected.trim().to_lowercase()),
            Predicate::Date(field) => match DateBucket::parse(selected) {
                Some(bucket) => field(item).map_or(false, |at| bucket.contains(at, now)),
                None => true,
            },
            Predicate::Range(field) => match RangeBounds::parse(selected) {
                Some(range) => field(item).map_or(false, |v| range.contains(v)),
                None => true,
            },
            Predicate::Flag(field) => match selected.trim() {
                "true" | "yes" => field(item),
                "false" | "no" => !field(item),
                _ => true,
            },
        }
    }
}

/// Per-page filter configuration.
///
/// Search fields are OR-combined; the search term and every active predicate
/// are AND-combined. A predicate whose key is set to a sentinel passes
/// everything.
pub struct FilterSpec<T> {
    search: Vec<TextField<T>>,
    predicates: Vec<(&'static str, Predicate<T>)>,
    sorts: Vec<(&'static str, Comparator<T>)>,
}

impl<T> Clone for FilterSpec<T> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            predicates: self.predicates.clone(),
            sorts: self.sorts.clone(),
        }
    }
}

impl<T> Default for FilterSpec<T> {
    fn default() -> Self {
        Self {
            search: Vec::new(),
            predicates: Vec::new(),
            sorts: Vec::new(),
        }
    }
}

impl<T: Clone> FilterSpec<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, field: TextField<T>) -> Self {
        self.search.push(field);
        self
    }

    /// Case-insensitive equality against the selected value
    pub fn equals(mut self, key: &'static str, field: TextField<T>) -> Self {
        self.predicates.push((key, Predicate::Equals(field)));
        self
    }

    pub fn date(mut self, key: &'static str, field: DateField<T>) -> Self {
        self.predicates.push((key, Predicate::Date(field)));
        self
    }

    pub fn range(mut self, key: &'static str, field: NumberField<T>) -> Self {
        self.predicates.push((key, Predicate::Range(field)));
        self
    }

    pub fn flag(mut self, key: &'static str, field: FlagField<T>) -> Self {
        self.predicates.push((key, Predicate::Flag(field)));
        self
    }

    /// Register an ordering selected by `state[SORT_KEY] == name`
    pub fn sort(mut self, name: &'static str, cmp: Comparator<T>) -> Self {
        self.sorts.push((name, cmp));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.predicates.iter().map(|(key, _)| *key)
    }

    pub fn matches(&self, item: &T, state: &FilterState, search: &str, now: NaiveDateTime) -> bool {
        self.matches_search(item, &search.trim().to_lowercase())
            && self.predicates.iter().all(|(key, predicate)| {
                let selected = state.get(key);
                is_all(selected) || predicate.passes(item, selected, now)
            })
    }

    fn matches_search(&self, item: &T, needle: &str) -> bool {
        if needle.is_empty() || self.search.is_empty() {
            return true;
        }
        self.search
            .iter()
            .any(|field| field(item).unwrap_or("").to_lowercase().contains(needle))
    }

    pub fn apply(&self, items: &[T], state: &FilterState, search: &str, now: NaiveDateTime) -> Vec<T> {
        let mut filtered: Vec<T> = items
            .iter()
            .filter(|item| self.matches(item, state, search, now))
            .cloned()
            .collect();

        let selected = state.get(SORT_KEY);
        if let Some((_, cmp)) = self.sorts.iter().find(|(name, _)| *name == selected) {
            filtered.sort_by(*cmp);
        }
        filtered
    }

    pub fn apply_now(&self, items: &[T], state: &FilterState, search: &str) -> Vec<T> {
        self.apply(items, state, search, local_now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        city: Option<String>,
        status: String,
        price: f64,
        active: bool,
        created_at: Option<NaiveDateTime>,
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn row(id: u32, city: Option<&str>, status: &str, price: f64, created_at: Option<NaiveDateTime>) -> Row {
        Row {
            id,
            name: format!("Hall {}", id),
            city: city.map(str::to_string),
            status: status.to_string(),
            price,
            active: id % 2 == 0,
            created_at,
        }
    }

    fn spec() -> FilterSpec<Row> {
        FilterSpec::<Row>::new()
            .search(|r: &Row| Some(r.name.as_str()))
            .search(|r: &Row| r.city.as_deref())
            .equals("status", |r: &Row| Some(r.status.as_str()))
            .date("dateRange", |r: &Row| r.created_at)
            .range("price", |r: &Row| Some(r.price))
            .flag("active", |r: &Row| r.active)
            .sort("priceAsc", |a: &Row, b: &Row| a.price.total_cmp(&b.price))
    }

    // Wednesday
    fn now() -> NaiveDateTime {
        at(2024, 5, 15, 12)
    }

    fn sample() -> Vec<Row> {
        vec![
            row(1, Some("Surat"), "approved", 5000.0, Some(at(2024, 5, 15, 9))),
            row(2, Some("Ahemdabad"), "pending", 12000.0, Some(at(2024, 5, 14, 18))),
            row(3, None, "approved", 800.0, Some(at(2024, 4, 2, 10))),
            row(4, Some("Vadodara"), "rejected", 10000.0, None),
        ]
    }

    #[test]
    fn test_all_sentinels_are_identity() {
        let items = sample();
        let state = FilterState::new()
            .with("status", "all")
            .with("dateRange", "")
            .with("price", "all");
        assert_eq!(spec().apply(&items, &state, "", now()), items);
        assert_eq!(spec().apply(&items, &FilterState::new(), "   ", now()), items);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let items = sample();
        let state = FilterState::new().with("status", "approved").with("sort", "priceAsc");
        let once = spec().apply(&items, &state, "hall", now());
        let twice = spec().apply(&once, &state, "hall", now());
        assert_eq!(once, twice);
        assert_eq!(once.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = vec![
            row(1, Some("Surat"), "approved", 1.0, None),
            row(2, Some("Ahemdabad"), "approved", 1.0, None),
        ];
        let result = spec().apply(&items, &FilterState::new(), "surat", now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_search_treats_missing_field_as_empty() {
        let items = sample();
        // Row 3 has no city but its name still matches
        let result = spec().apply(&items, &FilterState::new(), "HALL 3", now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn test_today_bucket() {
        let today = row(1, None, "approved", 1.0, Some(at(2024, 5, 15, 0)));
        let yesterday = row(2, None, "approved", 1.0, Some(at(2024, 5, 14, 23)));
        let state = FilterState::new().with("dateRange", "today");
        let result = spec().apply(&[today, yesterday], &state, "", now());
        assert_eq!(result.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_date_buckets_relative_to_now() {
        let n = now();
        assert!(DateBucket::Yesterday.contains(at(2024, 5, 14, 0), n));
        assert!(!DateBucket::Yesterday.contains(at(2024, 5, 15, 0), n));
        // Week of Sunday 12th to Saturday 18th
        assert!(DateBucket::ThisWeek.contains(at(2024, 5, 12, 0), n));
        assert!(DateBucket::ThisWeek.contains(at(2024, 5, 18, 23), n));
        assert!(!DateBucket::ThisWeek.contains(at(2024, 5, 11, 23), n));
        assert!(DateBucket::ThisMonth.contains(at(2024, 5, 1, 0), n));
        assert!(!DateBucket::ThisMonth.contains(at(2023, 5, 1, 0), n));
        assert!(DateBucket::LastWeek.contains(at(2024, 5, 8, 0), n));
        assert!(!DateBucket::LastWeek.contains(at(2024, 5, 7, 23), n));
        assert!(!DateBucket::LastWeek.contains(at(2024, 5, 15, 13), n));
        assert!(DateBucket::LastMonth.contains(at(2024, 4, 15, 8), n));
        assert!(DateBucket::Upcoming.contains(at(2024, 5, 15, 1), n));
        assert!(DateBucket::Past.contains(at(2024, 5, 14, 23), n));
        assert!(!DateBucket::Past.contains(at(2024, 5, 15, 0), n));
    }

    #[test]
    fn test_active_date_bucket_excludes_undated_items() {
        let state = FilterState::new().with("dateRange", "past");
        let result = spec().apply(&sample(), &state, "", now());
        assert_eq!(result.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_unknown_bucket_passes_everything() {
        let state = FilterState::new().with("dateRange", "someday");
        assert_eq!(spec().apply(&sample(), &state, "", now()).len(), 4);
    }

    #[test]
    fn test_range_is_inclusive() {
        let state = FilterState::new().with("price", "800-10000");
        let result = spec().apply(&sample(), &state, "", now());
        assert_eq!(result.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 4]);

        let state = FilterState::new().with("price", "10000+");
        let result = spec().apply(&sample(), &state, "", now());
        assert_eq!(result.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_range_parse() {
        assert_eq!(RangeBounds::parse("-500"), Some(RangeBounds { min: None, max: Some(500.0) }));
        assert_eq!(RangeBounds::parse("10 - 20"), Some(RangeBounds { min: Some(10.0), max: Some(20.0) }));
        assert_eq!(RangeBounds::parse("20-10"), None);
        assert_eq!(RangeBounds::parse("cheap"), None);
    }

    #[test]
    fn test_equals_ignores_case() {
        let state = FilterState::new().with("status", "APPROVED");
        assert_eq!(spec().apply(&sample(), &state, "", now()).len(), 2);
    }

    #[test]
    fn test_flag_predicate() {
        let state = FilterState::new().with("active", "true");
        let result = spec().apply(&sample(), &state, "", now());
        assert_eq!(result.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_search_and_filters_combine_with_and() {
        let state = FilterState::new().with("status", "pending");
        assert!(spec().apply(&sample(), &state, "surat", now()).is_empty());
    }

    #[test]
    fn test_filter_state_set_reports_changes() {
        let mut state = FilterState::new();
        assert!(!state.set("city", "all"));
        assert!(state.set("city", "Surat"));
        assert!(!state.set("city", "Surat"));
        assert!(state.is_active("city"));
        assert!(state.set("city", ""));
        assert_eq!(state.get("city"), ALL);
        assert_eq!(state.active_count(), 0);
    }

    #[test]
    fn test_to_query_skips_sentinels() {
        let state = FilterState::new()
            .with("city", "Surat")
            .with("type", "all")
            .with("capacity", "100-500");
        assert_eq!(
            state.to_query(),
            vec![
                ("capacity".to_string(), "100-500".to_string()),
                ("city".to_string(), "Surat".to_string()),
            ]
        );
    }
}
