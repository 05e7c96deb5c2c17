use crate::config::ViewConfig;
use crate::core::{FieldPath, Record, Result};
use crate::query::{FilterCriterion, FilterSet, PageWindow, SortSpec, ViewQuery};
use std::collections::{HashMap, HashSet};

/// Interactive state of one screen: filters, search, sort and page.
///
/// Any change to a filter or to the search term sends the user back to page
/// 1. Changing only the page, the sort or the page size does not touch the
/// filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    filters: FilterSet,
    search_term: String,
    sort: Option<SortSpec>,
    page: PageWindow,
}

impl ViewState {
    pub fn from_config(config: &ViewConfig) -> Self {
        let query = config.initial_query();
        Self {
            filters: query.filters,
            search_term: query.search_term,
            sort: query.sort,
            page: query.page,
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> PageWindow {
        self.page
    }

    /// Returns whether the filter set changed.
    pub fn set_filter(&mut self, criterion: FilterCriterion) -> bool {
        let changed = self.filters.set(criterion);
        if changed {
            self.reset_page();
        }
        changed
    }

    /// Set a filter control from its raw input. A known control keeps its
    /// comparison kind; an unknown name becomes an equality filter on the
    /// field of the same name.
    pub fn set_filter_value(&mut self, name: &str, raw: &str) -> Result<bool> {
        let criterion = match self.filters.get(name) {
            Some(existing) => FilterCriterion {
                name: existing.name.clone(),
                field: existing.field.clone(),
                comparison: existing.comparison.rebind(&existing.name, raw)?,
            },
            None => FilterCriterion::equals(name, raw),
        };
        Ok(self.set_filter(criterion))
    }

    pub fn clear_filter(&mut self, name: &str) -> bool {
        let changed = self.filters.remove(name);
        if changed {
            self.reset_page();
        }
        changed
    }

    pub fn reset_filters(&mut self, defaults: &FilterSet) -> bool {
        if self.filters == *defaults {
            return false;
        }
        self.filters = defaults.clone();
        self.reset_page();
        true
    }

    pub fn set_search(&mut self, term: &str) -> bool {
        if self.search_term == term {
            return false;
        }
        self.search_term = term.to_string();
        self.reset_page();
        true
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = Some(sort);
    }

    /// Header click on `field`.
    pub fn toggle_sort(&mut self, field: impl Into<FieldPath>) {
        let field = field.into();
        self.sort = Some(match &self.sort {
            Some(current) => current.toggled(field),
            None => SortSpec::asc(field),
        });
    }

    /// Page numbers below 1 are treated as 1.
    pub fn set_page(&mut self, number: usize) {
        self.page.number = number.max(1);
    }

    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        if self.page.size != size {
            self.page = PageWindow { number: 1, size };
        }
    }

    /// Pull the page back inside `total` items, e.g. after a refetch shrank
    /// the set.
    pub fn clamp_page(&mut self, total: usize) {
        let last = self.page.page_count(total);
        if self.page.number > last {
            self.page.number = last;
        }
    }

    pub fn query(&self, config: &ViewConfig) -> ViewQuery {
        ViewQuery {
            filters: self.filters.clone(),
            search_term: self.search_term.clone(),
            search_fields: config.search_fields.clone(),
            sort: self.sort.clone(),
            page: self.page,
            metrics: config.metrics.clone(),
        }
    }

    fn reset_page(&mut self) {
        self.page.number = 1;
    }
}

/// Per-row boolean UI state (revealed secrets, expanded rows) keyed by
/// record id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowToggles {
    toggles: HashMap<String, bool>,
}

impl RowToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip and return the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let entry = self.toggles.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set(&mut self, id: &str, on: bool) {
        self.toggles.insert(id.to_string(), on);
    }

    pub fn is_on(&self, id: &str) -> bool {
        self.toggles.get(id).copied().unwrap_or(false)
    }

    /// Forget toggles of records that are no longer in the snapshot.
    pub fn retain_present(&mut self, records: &[Record]) {
        let present: HashSet<String> = records.iter().filter_map(Record::id).collect();
        self.toggles.retain(|id, _| present.contains(id));
    }

    pub fn clear(&mut self) {
        self.toggles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use crate::query::Comparison;
    use serde_json::json;

    fn state_on_page(page: usize) -> ViewState {
        let mut state = ViewState::from_config(&presets::transactions());
        state.set_page(page);
        state
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = state_on_page(3);
        assert!(state.set_filter_value("status", "pending").unwrap());
        assert_eq!(state.page().number, 1);
    }

    #[test]
    fn test_unchanged_filter_keeps_page() {
        let mut state = state_on_page(3);
        assert!(!state.set_filter_value("status", "all").unwrap());
        assert_eq!(state.page().number, 3);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = state_on_page(2);
        assert!(state.set_search("acme"));
        assert_eq!(state.page().number, 1);

        state.set_page(2);
        assert!(!state.set_search("acme"));
        assert_eq!(state.page().number, 2);
    }

    #[test]
    fn test_page_and_sort_changes_keep_filters() {
        let mut state = state_on_page(1);
        state.set_filter_value("status", "pending").unwrap();
        state.set_page(4);
        state.toggle_sort("amount");
        assert_eq!(state.page().number, 4);
        assert_eq!(
            state.filters().get("status").map(|c| &c.comparison),
            Some(&Comparison::Equals("pending".into()))
        );
    }

    #[test]
    fn test_known_filter_keeps_its_kind() {
        let mut state = state_on_page(1);
        state.set_filter_value("dateFrom", "2025-01-02").unwrap();
        assert_eq!(
            state.filters().get("dateFrom").map(|c| &c.comparison),
            Some(&Comparison::DateFrom("2025-01-02".into()))
        );

        state.set_filter_value("currency", "EUR").unwrap();
        assert_eq!(
            state.filters().get("currency").map(|c| c.field.as_str()),
            Some("currency")
        );
    }

    #[test]
    fn test_clearing_a_range_control_keeps_it() {
        let config = presets::companies();
        let mut state = ViewState::from_config(&config);
        assert!(state.set_filter_value("creditLimit", "1000..5000").unwrap());
        assert!(state.filters().has_active());

        assert!(state.set_filter_value("creditLimit", "").unwrap());
        assert_eq!(
            state.filters().get("creditLimit").map(|c| &c.comparison),
            Some(&Comparison::Range { min: None, max: None })
        );
        assert!(!state.filters().has_active());

        match state.set_filter_value("creditLimit", "lots") {
            Err(crate::core::ViewError::InvalidCriterion { name, .. }) => assert_eq!(name, "creditLimit"),
            other => panic!("expected InvalidCriterion, got {:?}", other),
        }
    }

    #[test]
    fn test_clamp_page() {
        let mut state = state_on_page(5);
        state.clamp_page(25);
        assert_eq!(state.page().number, 3);
        state.clamp_page(0);
        assert_eq!(state.page().number, 1);
    }

    #[test]
    fn test_row_toggles() {
        let mut toggles = RowToggles::new();
        assert!(toggles.toggle("key-1"));
        assert!(toggles.is_on("key-1"));
        assert!(!toggles.toggle("key-1"));
        toggles.set("key-2", true);

        toggles.retain_present(&[Record::new(json!({"_id": "key-2"}))]);
        assert!(toggles.is_on("key-2"));
        assert!(!toggles.is_on("key-1"));
    }
}
