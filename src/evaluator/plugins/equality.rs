use super::super::{CriterionEvaluator, EvaluationContext};
use crate::core::{Result, Value};
use crate::query::{Comparison, FilterCriterion};

/// `equals` and `one_of`.
pub struct EqualityEvaluator;

impl CriterionEvaluator for EqualityEvaluator {
    fn name(&self) -> &'static str {
        "EQUALITY"
    }

    fn can_evaluate(&self, comparison: &Comparison) -> bool {
        matches!(comparison, Comparison::Equals(_) | Comparison::OneOf(_))
    }

    fn matches(
        &self,
        criterion: &FilterCriterion,
        value: &Value,
        _context: &EvaluationContext<'_>,
    ) -> Result<bool> {
        Ok(match &criterion.comparison {
            Comparison::Equals(expected) => value.loose_eq(expected),
            Comparison::OneOf(options) => options
                .iter()
                .filter(|option| !option.is_inactive_sentinel())
                .any(|option| value.loose_eq(option)),
            _ => unreachable!(),
        })
    }
}
