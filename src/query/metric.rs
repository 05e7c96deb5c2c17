use super::FilterCriterion;
use crate::core::FieldPath;
use serde::{Deserialize, Serialize};

/// Reduction computed over the full filtered set for a metric card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricKind {
    Count,
    CountWhere { criteria: Vec<FilterCriterion> },
    Sum { field: FieldPath },
    Average { field: FieldPath },
    Min { field: FieldPath },
    Max { field: FieldPath },
    /// One entry per distinct value, named `{metric}.{value}`.
    CountBy { field: FieldPath },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub metric: MetricKind,
}

impl MetricSpec {
    pub fn new(name: impl Into<String>, metric: MetricKind) -> Self {
        Self {
            name: name.into(),
            metric,
        }
    }

    pub fn count(name: impl Into<String>) -> Self {
        Self::new(name, MetricKind::Count)
    }

    pub fn count_where(name: impl Into<String>, criteria: Vec<FilterCriterion>) -> Self {
        Self::new(name, MetricKind::CountWhere { criteria })
    }

    pub fn sum(name: impl Into<String>, field: impl Into<FieldPath>) -> Self {
        Self::new(name, MetricKind::Sum { field: field.into() })
    }

    pub fn average(name: impl Into<String>, field: impl Into<FieldPath>) -> Self {
        Self::new(name, MetricKind::Average { field: field.into() })
    }

    pub fn min(name: impl Into<String>, field: impl Into<FieldPath>) -> Self {
        Self::new(name, MetricKind::Min { field: field.into() })
    }

    pub fn max(name: impl Into<String>, field: impl Into<FieldPath>) -> Self {
        Self::new(name, MetricKind::Max { field: field.into() })
    }

    pub fn count_by(name: impl Into<String>, field: impl Into<FieldPath>) -> Self {
        Self::new(name, MetricKind::CountBy { field: field.into() })
    }
}
