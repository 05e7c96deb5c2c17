pub mod presets;

use crate::core::{FieldPath, Result, ViewError};
use crate::evaluator::MissingDatePolicy;
use crate::query::{DEFAULT_PAGE_SIZE, FilterCriterion, FilterSet, MetricSpec, PageWindow, SortSpec, ViewQuery};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-screen configuration of a collection view
///
/// Each admin screen (transactions, API keys, bookings...) differs only in
/// this data: which fields are searchable, how the list is sorted by default,
/// which filter controls exist and which metric cards are shown.
///
/// Loadable from JSON:
///
/// ```json
/// {
///   "name": "transactions",
///   "search_fields": ["reference", "company.name"],
///   "default_sort": { "field": "timestamps.created", "direction": "desc" },
///   "page_size": 20,
///   "metrics": [{ "name": "total", "metric": { "kind": "sum", "field": "amount" } }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Screen name, used in logs
    pub name: String,

    /// Fields the free-text search looks at
    pub search_fields: Vec<FieldPath>,

    /// Sort applied until the user picks another one
    pub default_sort: Option<SortSpec>,

    /// Rows per page
    pub page_size: usize,

    /// Metric cards computed over the filtered set
    pub metrics: Vec<MetricSpec>,

    /// Date filters and records without a usable date
    pub missing_dates: MissingDatePolicy,

    /// Filter controls with their initial (usually inactive) values
    pub default_filters: FilterSet,

    /// Columns shown by table renderers
    pub columns: Vec<FieldPath>,
}

impl ViewConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            search_fields: Vec::new(),
            default_sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            metrics: Vec::new(),
            missing_dates: MissingDatePolicy::default(),
            default_filters: FilterSet::new(),
            columns: Vec::new(),
        }
    }

    /// Set the searchable fields
    pub fn search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|f| FieldPath::new(*f)).collect();
        self
    }

    /// Set the default sort
    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Set rows per page
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Add a metric card
    pub fn metric(mut self, metric: MetricSpec) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Set the missing-date policy
    pub fn missing_dates(mut self, policy: MissingDatePolicy) -> Self {
        self.missing_dates = policy;
        self
    }

    /// Add a filter control
    pub fn filter(mut self, criterion: FilterCriterion) -> Self {
        self.default_filters.set(criterion);
        self
    }

    /// Set the displayed columns
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| FieldPath::new(*c)).collect();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Structural checks only; criterion values are checked per pipeline pass.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ViewError::Config(format!(
                "view '{}': page_size must be positive",
                self.name
            )));
        }
        for field in self.search_fields.iter().chain(&self.columns) {
            field.validate()?;
        }
        if let Some(sort) = &self.default_sort {
            sort.field.validate()?;
        }
        for criterion in self.default_filters.iter() {
            criterion.field.validate()?;
        }
        Ok(())
    }

    /// First page with the default filters and sort.
    pub fn initial_query(&self) -> ViewQuery {
        ViewQuery {
            filters: self.default_filters.clone(),
            search_term: String::new(),
            search_fields: self.search_fields.clone(),
            sort: self.default_sort.clone(),
            page: PageWindow {
                number: 1,
                size: self.page_size.max(1),
            },
            metrics: self.metrics.clone(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new("default")
    }
}
