use super::super::{CriterionEvaluator, EvaluationContext, MissingDatePolicy};
use crate::core::dates::{parse_date, parse_end_bound, value_to_millis};
use crate::core::{Result, Value, ViewError};
use crate::query::{Comparison, FilterCriterion};

/// `date_from` / `date_to`. Records without a usable date follow the
/// context's [`MissingDatePolicy`].
pub struct DateRangeEvaluator;

impl DateRangeEvaluator {
    fn bound_millis(criterion: &FilterCriterion) -> Result<i64> {
        let parsed = match &criterion.comparison {
            Comparison::DateFrom(bound) => parse_date(bound),
            Comparison::DateTo(bound) => parse_end_bound(bound),
            _ => unreachable!(),
        };
        parsed.map(|dt| dt.timestamp_millis()).ok_or_else(|| {
            ViewError::invalid_criterion(&criterion.name, "date bound is not a recognised date")
        })
    }
}

impl CriterionEvaluator for DateRangeEvaluator {
    fn name(&self) -> &'static str {
        "DATE_RANGE"
    }

    fn can_evaluate(&self, comparison: &Comparison) -> bool {
        matches!(comparison, Comparison::DateFrom(_) | Comparison::DateTo(_))
    }

    fn validate(&self, criterion: &FilterCriterion) -> Result<()> {
        Self::bound_millis(criterion).map(|_| ())
    }

    fn matches(
        &self,
        criterion: &FilterCriterion,
        value: &Value,
        context: &EvaluationContext<'_>,
    ) -> Result<bool> {
        let bound = Self::bound_millis(criterion)?;
        let Some(millis) = value_to_millis(value, criterion.field.is_date_hint()) else {
            return Ok(context.missing_dates() == MissingDatePolicy::Include);
        };
        Ok(match criterion.comparison {
            Comparison::DateFrom(_) => millis >= bound,
            _ => millis <= bound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;
    use crate::evaluator::EvaluatorRegistry;
    use serde_json::json;

    #[test]
    fn test_date_from_excludes_earlier_days() {
        let registry = EvaluatorRegistry::default();
        let ctx = EvaluationContext::new(&registry);
        let from = FilterCriterion::date_from("date", "2025-01-02");

        assert!(!ctx.matches(&Record::new(json!({"date": "2025-01-01"})), &from).unwrap());
        assert!(ctx.matches(&Record::new(json!({"date": "2025-01-02"})), &from).unwrap());
        assert!(ctx.matches(&Record::new(json!({"date": "2025-01-03"})), &from).unwrap());
    }

    #[test]
    fn test_date_to_includes_whole_day() {
        let registry = EvaluatorRegistry::default();
        let ctx = EvaluationContext::new(&registry);
        let to = FilterCriterion::date_to("createdAt", "2025-01-02");

        let late = Record::new(json!({"createdAt": "2025-01-02T23:59:59Z"}));
        let next = Record::new(json!({"createdAt": "2025-01-03T00:00:00Z"}));
        assert!(ctx.matches(&late, &to).unwrap());
        assert!(!ctx.matches(&next, &to).unwrap());
    }

    #[test]
    fn test_missing_date_policy() {
        let registry = EvaluatorRegistry::default();
        let from = FilterCriterion::date_from("date", "2025-01-02");
        let undated = Record::new(json!({"name": "no date"}));
        let garbled = Record::new(json!({"date": "soon"}));

        let include = EvaluationContext::new(&registry);
        assert!(include.matches(&undated, &from).unwrap());
        assert!(include.matches(&garbled, &from).unwrap());

        let exclude = EvaluationContext::new(&registry).with_missing_dates(MissingDatePolicy::Exclude);
        assert!(!exclude.matches(&undated, &from).unwrap());
        assert!(!exclude.matches(&garbled, &from).unwrap());
    }

    #[test]
    fn test_epoch_millis_in_date_field() {
        let registry = EvaluatorRegistry::default();
        let ctx = EvaluationContext::new(&registry);
        let from = FilterCriterion::date_from("createdAt", "2025-01-02");
        // 2025-01-03T00:00:00Z
        let record = Record::new(json!({"createdAt": 1_735_862_400_000_i64}));
        assert!(ctx.matches(&record, &from).unwrap());
    }

    #[test]
    fn test_unparseable_bound_is_invalid() {
        let registry = EvaluatorRegistry::default();
        let ctx = EvaluationContext::new(&registry);
        assert!(ctx.validate(&FilterCriterion::date_from("date", "next tuesday")).is_err());
    }
}
