use crate::core::{FieldPath, Record, Result};
use crate::evaluator::{EvaluationContext, EvaluatorRegistry};
use crate::expression::{extract, extract_text};
use crate::query::{MetricKind, MetricSpec};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Metric name to value, ordered by name.
pub type Metrics = BTreeMap<String, f64>;

const UNKNOWN_CATEGORY: &str = "unknown";

/// Reduces a filtered record set into metric-card numbers.
pub struct SummaryAggregator<'a> {
    context: &'a EvaluationContext<'a>,
}

impl<'a> SummaryAggregator<'a> {
    pub fn new(context: &'a EvaluationContext<'a>) -> Self {
        Self { context }
    }

    /// Check field paths and `count_where` criteria before aggregating.
    pub fn validate(&self, specs: &[MetricSpec]) -> Result<()> {
        for spec in specs {
            match &spec.metric {
                MetricKind::Count => {}
                MetricKind::CountWhere { criteria } => {
                    for criterion in criteria {
                        self.context.validate(criterion)?;
                    }
                }
                MetricKind::Sum { field }
                | MetricKind::Average { field }
                | MetricKind::Min { field }
                | MetricKind::Max { field }
                | MetricKind::CountBy { field } => field.validate()?,
            }
        }
        Ok(())
    }

    pub fn aggregate<T: Borrow<Record>>(&self, records: &[T], specs: &[MetricSpec]) -> Metrics {
        let mut metrics = Metrics::new();
        for spec in specs {
            match &spec.metric {
                MetricKind::Count => {
                    metrics.insert(spec.name.clone(), records.len() as f64);
                }
                MetricKind::CountWhere { criteria } => {
                    let count = records
                        .iter()
                        .filter(|record| {
                            criteria.iter().all(|criterion| {
                                self.context
                                    .matches((*record).borrow(), criterion)
                                    .unwrap_or(false)
                            })
                        })
                        .count();
                    metrics.insert(spec.name.clone(), count as f64);
                }
                MetricKind::Sum { field } => {
                    let sum = numbers(records, field).sum();
                    metrics.insert(spec.name.clone(), sum);
                }
                MetricKind::Average { field } => {
                    let (sum, count) = numbers(records, field)
                        .fold((0.0, 0usize), |(sum, count), n| (sum + n, count + 1));
                    let average = if count == 0 { 0.0 } else { sum / count as f64 };
                    metrics.insert(spec.name.clone(), average);
                }
                MetricKind::Min { field } => {
                    let min = numbers(records, field).reduce(f64::min).unwrap_or(0.0);
                    metrics.insert(spec.name.clone(), min);
                }
                MetricKind::Max { field } => {
                    let max = numbers(records, field).reduce(f64::max).unwrap_or(0.0);
                    metrics.insert(spec.name.clone(), max);
                }
                MetricKind::CountBy { field } => {
                    for record in records {
                        let category = extract_text(record.borrow(), field);
                        let category = if category.is_empty() {
                            UNKNOWN_CATEGORY.to_string()
                        } else {
                            category
                        };
                        *metrics
                            .entry(format!("{}.{}", spec.name, category))
                            .or_insert(0.0) += 1.0;
                    }
                }
            }
        }
        metrics
    }
}

/// Numeric values of `field`, skipping absent and non-numeric ones.
fn numbers<'r, T: Borrow<Record>>(
    records: &'r [T],
    field: &'r FieldPath,
) -> impl Iterator<Item = f64> + 'r {
    records
        .iter()
        .filter_map(move |record| extract(record.borrow(), field).as_number())
}

/// [`SummaryAggregator::aggregate`] with the built-in evaluators.
pub fn aggregate<T: Borrow<Record>>(records: &[T], specs: &[MetricSpec]) -> Metrics {
    let registry = EvaluatorRegistry::with_default_evaluators();
    let context = EvaluationContext::new(&registry);
    SummaryAggregator::new(&context).aggregate(records, specs)
}
