use super::aggregate::SummaryAggregator;
use super::filter::FilterExecutor;
use super::sort::SortExecutor;
use crate::core::{Record, Result};
use crate::evaluator::{EvaluationContext, EvaluatorRegistry, MissingDatePolicy};
use crate::query::ViewQuery;
use crate::result::{PageInfo, ViewOutcome, ViewPage};
use tracing::{debug, warn};

/// Filter → search → sort → page, plus metrics over the filtered set.
///
/// Pure over its inputs: the same records and query always give the same
/// page. Resetting the page number when filters change is the caller's job.
pub struct ViewPipeline {
    registry: EvaluatorRegistry,
    missing_dates: MissingDatePolicy,
}

impl ViewPipeline {
    pub fn new() -> Self {
        Self::with_registry(EvaluatorRegistry::with_default_evaluators())
    }

    pub fn with_registry(registry: EvaluatorRegistry) -> Self {
        Self {
            registry,
            missing_dates: MissingDatePolicy::default(),
        }
    }

    pub fn missing_dates(mut self, policy: MissingDatePolicy) -> Self {
        self.missing_dates = policy;
        self
    }

    /// Run one pass. Configuration faults (bad paths, invalid criteria, an
    /// invalid page window) degrade to an empty page instead of failing.
    pub fn run(&self, records: &[Record], query: &ViewQuery) -> ViewOutcome {
        match self.try_run(records, query) {
            Ok(page) => ViewOutcome::Ready(page),
            Err(error) => {
                warn!(error = %error, "view pipeline degraded to an empty result");
                ViewOutcome::Degraded {
                    error,
                    page: ViewPage::empty(query.page),
                }
            }
        }
    }

    pub fn try_run(&self, records: &[Record], query: &ViewQuery) -> Result<ViewPage> {
        let context = EvaluationContext::new(&self.registry).with_missing_dates(self.missing_dates);
        let aggregator = SummaryAggregator::new(&context);

        query.page.validate()?;
        for criterion in query.filters.iter() {
            context.validate(criterion)?;
        }
        for field in &query.search_fields {
            field.validate()?;
        }
        if let Some(sort) = &query.sort {
            sort.field.validate()?;
        }
        aggregator.validate(&query.metrics)?;

        let filter = FilterExecutor::new(&context);
        let mut skipped = 0usize;

        let mut survivors: Vec<&Record> = records
            .iter()
            .filter(|record| {
                let well_formed = record.is_well_formed();
                if !well_formed {
                    skipped += 1;
                }
                well_formed
            })
            .filter(|record| filter.matches_filters(record, &query.filters))
            .filter(|record| filter.matches_search(record, &query.search_term, &query.search_fields))
            .collect();

        if skipped > 0 {
            debug!(skipped, "skipped malformed records");
        }

        if let Some(sort) = &query.sort {
            SortExecutor::sort(&mut survivors, sort);
        }

        let total_count = survivors.len();
        let metrics = aggregator.aggregate(&survivors, &query.metrics);
        let items = survivors[query.page.range(total_count)]
            .iter()
            .map(|record| (*record).clone())
            .collect();

        debug!(
            input = records.len(),
            total_count,
            page = query.page.number,
            "view pipeline pass complete"
        );

        Ok(ViewPage {
            items,
            total_count,
            page: PageInfo::new(query.page, total_count),
            metrics,
            skipped,
        })
    }
}

impl Default for ViewPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// One pass with the default pipeline.
pub fn view(records: &[Record], query: &ViewQuery) -> ViewOutcome {
    ViewPipeline::new().run(records, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViewError;
    use crate::query::{Comparison, FilterCriterion, MetricSpec, PageWindow, SortSpec};
    use serde_json::json;

    fn transactions() -> Vec<Record> {
        vec![
            Record::new(json!({"_id": "t1", "status": "pending", "amount": 100})),
            Record::new(json!({"_id": "t2", "status": "approved", "amount": 200})),
            Record::new(json!(["not", "a", "record"])),
            Record::new(json!({"_id": "t3", "status": "pending", "amount": 50})),
        ]
    }

    #[test]
    fn test_filter_sort_and_metrics() {
        let query = ViewQuery::new()
            .filter(FilterCriterion::equals("status", "pending"))
            .sort(SortSpec::desc("amount"))
            .metric(MetricSpec::sum("total", "amount"));

        let outcome = view(&transactions(), &query);
        assert!(!outcome.is_degraded());
        let page = outcome.page();
        assert_eq!(page.ids(), vec!["t1", "t3"]);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.metrics["total"], 150.0);
        assert_eq!(page.skipped, 1);
    }

    #[test]
    fn test_metrics_ignore_the_page_window() {
        let query = ViewQuery::new()
            .sort(SortSpec::asc("amount"))
            .page(PageWindow::new(1, 1).unwrap())
            .metric(MetricSpec::count("count"));

        let page = view(&transactions(), &query).into_page();
        assert_eq!(page.ids(), vec!["t3"]);
        assert_eq!(page.metrics["count"], 3.0);
        assert!(page.page.has_next);
    }

    #[test]
    fn test_invalid_criterion_degrades() {
        let query = ViewQuery::new().filter(FilterCriterion::new(
            "amount",
            "amount",
            Comparison::Range { min: Some(10.0), max: Some(1.0) },
        ));

        let outcome = view(&transactions(), &query);
        assert!(outcome.is_degraded());
        assert!(matches!(outcome.error(), Some(ViewError::InvalidCriterion { .. })));
        assert!(outcome.page().is_empty());
        assert_eq!(outcome.page().total_count, 0);
    }

    #[test]
    fn test_invalid_page_degrades() {
        let query = ViewQuery::new().page(PageWindow { number: 0, size: 10 });
        assert!(view(&transactions(), &query).is_degraded());
    }

    #[test]
    fn test_empty_input() {
        let outcome = view(&[], &ViewQuery::new().sort(SortSpec::asc("amount")));
        assert!(!outcome.is_degraded());
        assert!(outcome.page().is_empty());
        assert_eq!(outcome.page().page.page_count, 1);
    }
}
