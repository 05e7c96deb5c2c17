use crate::core::{FieldPath, Record};
use crate::evaluator::{EvaluationContext, EvaluatorRegistry};
use crate::expression::{extract, pattern::contains_ignore_case};
use crate::query::FilterSet;
use tracing::debug;

/// Applies filter sets and search terms to single records.
pub struct FilterExecutor<'a> {
    context: &'a EvaluationContext<'a>,
}

impl<'a> FilterExecutor<'a> {
    pub fn new(context: &'a EvaluationContext<'a>) -> Self {
        Self { context }
    }

    /// True when every active criterion holds. A criterion that fails to
    /// evaluate counts as a non-match for this record only.
    pub fn matches_filters(&self, record: &Record, filters: &FilterSet) -> bool {
        filters.active().all(|criterion| {
            self.context
                .matches(record, criterion)
                .unwrap_or_else(|err| {
                    debug!(criterion = %criterion.name, error = %err, "criterion failed on record");
                    false
                })
        })
    }

    pub fn matches_search(&self, record: &Record, term: &str, fields: &[FieldPath]) -> bool {
        matches_search(record, term, fields)
    }
}

/// Case-insensitive substring search over `fields`. A blank term matches
/// every record.
pub fn matches_search(record: &Record, term: &str, fields: &[FieldPath]) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| contains_ignore_case(&extract(record, field).to_text(), &needle))
}

/// [`FilterExecutor::matches_filters`] with the built-in evaluators and the
/// default missing-date policy.
pub fn matches_filters(record: &Record, filters: &FilterSet) -> bool {
    let registry = EvaluatorRegistry::with_default_evaluators();
    let context = EvaluationContext::new(&registry);
    FilterExecutor::new(&context).matches_filters(record, filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterCriterion;
    use serde_json::json;

    fn fields() -> Vec<FieldPath> {
        vec!["name".into(), "email".into()]
    }

    #[test]
    fn test_search_matches_any_field() {
        let hit = Record::new(json!({"name": "Test Co", "email": "x@y.com"}));
        let miss = Record::new(json!({"name": "Other", "email": "a@b.com"}));
        assert!(matches_search(&hit, "test", &fields()));
        assert!(!matches_search(&miss, "test", &fields()));
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let record = Record::new(json!({"name": "Other"}));
        assert!(matches_search(&record, "", &fields()));
        assert!(matches_search(&record, "   ", &fields()));
    }

    #[test]
    fn test_search_tolerates_missing_and_nested_fields() {
        let record = Record::new(json!({"company": {"name": "Grand Plaza"}, "email": null}));
        let fields: Vec<FieldPath> = vec!["email".into(), "company".into(), "nope.deeper".into()];
        assert!(matches_search(&record, "PLAZA", &fields));
        assert!(!matches_search(&record, "null", &fields));
    }

    #[test]
    fn test_all_active_filters_must_hold() {
        let record = Record::new(json!({"status": "pending", "type": "credit"}));
        let filters = FilterSet::new()
            .with(FilterCriterion::equals("status", "pending"))
            .with(FilterCriterion::equals("type", "all"));
        assert!(matches_filters(&record, &filters));

        let filters = filters.with(FilterCriterion::equals("type", "debit"));
        assert!(!matches_filters(&record, &filters));
    }

    #[test]
    fn test_empty_filter_set_matches() {
        let record = Record::new(json!("malformed"));
        assert!(matches_filters(&record, &FilterSet::new()));
    }
}
