use super::super::{CriterionEvaluator, EvaluationContext};
use crate::core::{Result, Value};
use crate::expression::pattern::contains_ignore_case;
use crate::query::{Comparison, FilterCriterion};

pub struct ContainsEvaluator;

impl CriterionEvaluator for ContainsEvaluator {
    fn name(&self) -> &'static str {
        "CONTAINS"
    }

    fn can_evaluate(&self, comparison: &Comparison) -> bool {
        matches!(comparison, Comparison::Contains(_))
    }

    fn matches(
        &self,
        criterion: &FilterCriterion,
        value: &Value,
        _context: &EvaluationContext<'_>,
    ) -> Result<bool> {
        let Comparison::Contains(needle) = &criterion.comparison else {
            unreachable!();
        };
        Ok(contains_ignore_case(&value.to_text(), needle.trim()))
    }
}
