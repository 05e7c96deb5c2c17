//! Plain data describing one pass of the view pipeline: which records to
//! keep, how to order them, which page to show and which metrics to compute.

pub mod filter;
pub mod metric;
pub mod page;
pub mod sort;

pub use filter::{Comparison, FilterCriterion, FilterSet};
pub use metric::{MetricKind, MetricSpec};
pub use page::{DEFAULT_PAGE_SIZE, PageWindow};
pub use sort::{Direction, SortSpec};

/// Everything the pipeline needs besides the records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub filters: FilterSet,
    pub search_term: String,
    pub search_fields: Vec<crate::core::FieldPath>,
    pub sort: Option<SortSpec>,
    pub page: PageWindow,
    pub metrics: Vec<MetricSpec>,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self {
            filters: FilterSet::new(),
            search_term: String::new(),
            search_fields: Vec::new(),
            sort: None,
            page: PageWindow::all(),
            metrics: Vec::new(),
        }
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn filter(mut self, criterion: FilterCriterion) -> Self {
        self.filters.set(criterion);
        self
    }

    pub fn search<I, P>(mut self, term: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<crate::core::FieldPath>,
    {
        self.search_term = term.to_string();
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: PageWindow) -> Self {
        self.page = page;
        self
    }

    pub fn metric(mut self, metric: MetricSpec) -> Self {
        self.metrics.push(metric);
        self
    }
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self::new()
    }
}
