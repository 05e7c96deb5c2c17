use super::super::{CriterionEvaluator, EvaluationContext};
use crate::core::{Result, Value};
use crate::expression::pattern::{eval_like, validate_like};
use crate::query::{Comparison, FilterCriterion};

pub struct LikeEvaluator;

impl CriterionEvaluator for LikeEvaluator {
    fn name(&self) -> &'static str {
        "LIKE"
    }

    fn can_evaluate(&self, comparison: &Comparison) -> bool {
        matches!(comparison, Comparison::Like(_))
    }

    fn validate(&self, criterion: &FilterCriterion) -> Result<()> {
        let Comparison::Like(pattern) = &criterion.comparison else {
            unreachable!();
        };
        validate_like(pattern)
    }

    fn matches(
        &self,
        criterion: &FilterCriterion,
        value: &Value,
        _context: &EvaluationContext<'_>,
    ) -> Result<bool> {
        let Comparison::Like(pattern) = &criterion.comparison else {
            unreachable!();
        };
        eval_like(&value.to_text(), pattern)
    }
}
