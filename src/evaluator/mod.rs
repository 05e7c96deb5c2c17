pub mod plugins;

use crate::core::{Record, Result, Value, ViewError};
use crate::expression::extract;
use crate::query::{Comparison, FilterCriterion};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a date filter does with a record whose date is absent or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingDatePolicy {
    /// The record passes the bound (fail-open).
    #[default]
    Include,
    /// The record fails the bound.
    Exclude,
}

/// Evaluates one comparison kind against an extracted field value.
pub trait CriterionEvaluator: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_evaluate(&self, comparison: &Comparison) -> bool;

    /// Reject criteria that can never be evaluated (bad pattern, inverted
    /// range...). Called once per pipeline pass, before any record is seen.
    fn validate(&self, _criterion: &FilterCriterion) -> Result<()> {
        Ok(())
    }

    fn matches(
        &self,
        criterion: &FilterCriterion,
        value: &Value,
        context: &EvaluationContext<'_>,
    ) -> Result<bool>;
}

/// Registry plus the per-pass policies evaluators consult.
pub struct EvaluationContext<'a> {
    registry: &'a EvaluatorRegistry,
    missing_dates: MissingDatePolicy,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(registry: &'a EvaluatorRegistry) -> Self {
        Self {
            registry,
            missing_dates: MissingDatePolicy::default(),
        }
    }

    pub fn with_missing_dates(mut self, policy: MissingDatePolicy) -> Self {
        self.missing_dates = policy;
        self
    }

    pub fn missing_dates(&self) -> MissingDatePolicy {
        self.missing_dates
    }

    pub fn validate(&self, criterion: &FilterCriterion) -> Result<()> {
        criterion.field.validate()?;
        if !criterion.is_active() {
            return Ok(());
        }
        self.evaluator_for(&criterion.comparison)?.validate(criterion)
    }

    /// Inactive criteria always pass.
    pub fn matches(&self, record: &Record, criterion: &FilterCriterion) -> Result<bool> {
        if !criterion.is_active() {
            return Ok(true);
        }
        let value = extract(record, &criterion.field);
        self.evaluator_for(&criterion.comparison)?
            .matches(criterion, &value, self)
    }

    fn evaluator_for(&self, comparison: &Comparison) -> Result<&'a dyn CriterionEvaluator> {
        self.registry
            .find_evaluator(comparison)
            .ok_or_else(|| ViewError::UnsupportedComparison(comparison.kind_name().to_string()))
    }
}

pub struct EvaluatorRegistry {
    evaluators: Vec<Box<dyn CriterionEvaluator>>,
}

impl EvaluatorRegistry {
    pub fn new() -> Self {
        Self {
            evaluators: Vec::new(),
        }
    }

    pub fn register(&mut self, evaluator: Box<dyn CriterionEvaluator>) {
        debug!(evaluator = evaluator.name(), "registered criterion evaluator");
        self.evaluators.push(evaluator);
    }

    pub fn with_default_evaluators() -> Self {
        use plugins::*;

        let mut registry = Self::new();

        registry.register(Box::new(equality::EqualityEvaluator));
        registry.register(Box::new(contains::ContainsEvaluator));
        registry.register(Box::new(like::LikeEvaluator));
        registry.register(Box::new(range::RangeEvaluator));
        registry.register(Box::new(date_range::DateRangeEvaluator));

        registry
    }

    fn find_evaluator(&self, comparison: &Comparison) -> Option<&dyn CriterionEvaluator> {
        self.evaluators
            .iter()
            .find(|ev| ev.can_evaluate(comparison))
            .map(|boxed| &**boxed)
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        Self::with_default_evaluators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_registry_rejects_active_criteria() {
        let registry = EvaluatorRegistry::new();
        let ctx = EvaluationContext::new(&registry);
        let record = Record::new(json!({"status": "pending"}));

        let active = FilterCriterion::equals("status", "pending");
        assert!(matches!(
            ctx.matches(&record, &active),
            Err(ViewError::UnsupportedComparison(_))
        ));

        let inactive = FilterCriterion::equals("status", "all");
        assert!(ctx.matches(&record, &inactive).unwrap());
    }

    #[test]
    fn test_validate_checks_field_path() {
        let registry = EvaluatorRegistry::default();
        let ctx = EvaluationContext::new(&registry);
        let bad = FilterCriterion::new("status", "", Comparison::Equals("x".into()));
        assert!(matches!(ctx.validate(&bad), Err(ViewError::InvalidFieldPath(_))));
    }
}
