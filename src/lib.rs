// ============================================================================
// Collection View Library
// ============================================================================
//
// Fetched record lists go through one pipeline:
//
//   filter -> search -> sort -> page, plus metrics over the filtered set
//
// Screens differ only in configuration (searchable fields, filter controls,
// default sort, metric cards), see `config`.
//
// ============================================================================

pub mod config;
pub mod core;
pub mod evaluator;
pub mod executor;
pub mod expression;
pub mod prelude;
pub mod query;
pub mod result;
pub mod screen;

// Re-export main types for convenience
pub use crate::core::{FieldPath, Record, Result, Value, ViewError};
pub use crate::config::ViewConfig;
pub use crate::evaluator::{CriterionEvaluator, EvaluationContext, EvaluatorRegistry, MissingDatePolicy};
pub use crate::executor::{
    Metrics, ViewPipeline, aggregate, build_comparator, matches_filters, matches_search, view,
};
pub use crate::expression::extract;
pub use crate::query::{
    Comparison, Direction, FilterCriterion, FilterSet, MetricKind, MetricSpec, PageWindow,
    SortSpec, ViewQuery,
};
pub use crate::result::{PageInfo, ViewOutcome, ViewPage};
pub use crate::screen::{CollectionScreen, ScreenStatus, ScreenView};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scenario_filter_then_sum() {
        let records = vec![
            Record::new(json!({"status": "pending", "amount": 100})),
            Record::new(json!({"status": "approved", "amount": 200})),
        ];
        let query = ViewQuery::new()
            .filter(FilterCriterion::equals("status", "pending"))
            .metric(MetricSpec::sum("amount", "amount"));

        let page = view(&records, &query).into_page();
        assert_eq!(page.items, vec![records[0].clone()]);
        assert_eq!(page.metrics["amount"], 100.0);
    }
}
