use super::super::{CriterionEvaluator, EvaluationContext};
use crate::core::{Result, Value, ViewError};
use crate::query::{Comparison, FilterCriterion};

/// Inclusive numeric bounds. Values that are not numbers fail an active range.
pub struct RangeEvaluator;

impl CriterionEvaluator for RangeEvaluator {
    fn name(&self) -> &'static str {
        "RANGE"
    }

    fn can_evaluate(&self, comparison: &Comparison) -> bool {
        matches!(comparison, Comparison::Range { .. })
    }

    fn validate(&self, criterion: &FilterCriterion) -> Result<()> {
        let Comparison::Range { min, max } = criterion.comparison else {
            unreachable!();
        };
        if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
            return Err(ViewError::invalid_criterion(&criterion.name, "range bound is NaN"));
        }
        if let (Some(low), Some(high)) = (min, max) {
            if low > high {
                return Err(ViewError::invalid_criterion(
                    &criterion.name,
                    format!("min {} is greater than max {}", low, high),
                ));
            }
        }
        Ok(())
    }

    fn matches(
        &self,
        criterion: &FilterCriterion,
        value: &Value,
        _context: &EvaluationContext<'_>,
    ) -> Result<bool> {
        let Comparison::Range { min, max } = criterion.comparison else {
            unreachable!();
        };
        let Some(number) = value.as_number() else {
            return Ok(false);
        };
        Ok(min.is_none_or(|low| number >= low) && max.is_none_or(|high| number <= high))
    }
}
