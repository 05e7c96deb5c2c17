use crate::core::{FieldPath, Result, Value, ViewError};
use serde::{Deserialize, Serialize};

/// How a criterion compares the record's field against its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Comparison {
    /// Case-sensitive exact match. `"all"` or `""` is inactive.
    Equals(Value),
    /// Equality against any of the listed values. Empty list is inactive.
    OneOf(Vec<Value>),
    /// Case-insensitive substring.
    Contains(String),
    /// Case-insensitive LIKE pattern (`%`, `_`).
    Like(String),
    /// Inclusive numeric bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Record date must be on or after the bound.
    DateFrom(String),
    /// Record date must be on or before the bound; bare dates cover the whole day.
    DateTo(String),
}

impl Comparison {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Equals(_) => "equals",
            Self::OneOf(_) => "one_of",
            Self::Contains(_) => "contains",
            Self::Like(_) => "like",
            Self::Range { .. } => "range",
            Self::DateFrom(_) => "date_from",
            Self::DateTo(_) => "date_to",
        }
    }

    /// Inactive criteria match every record.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Equals(value) => !value.is_inactive_sentinel(),
            Self::OneOf(values) => values.iter().any(|v| !v.is_inactive_sentinel()),
            Self::Contains(s) | Self::Like(s) | Self::DateFrom(s) | Self::DateTo(s) => {
                !s.trim().is_empty() && s != "all"
            }
            Self::Range { min, max } => min.is_some() || max.is_some(),
        }
    }

    /// Same kind, new value, as typed into the control called `name`. Lists
    /// are comma separated and ranges are written `min..max` with either side
    /// optional. A blank value or `"all"` clears the control.
    pub fn rebind(&self, name: &str, raw: &str) -> Result<Self> {
        Ok(match self {
            Self::Equals(_) => Self::Equals(Value::Text(raw.to_string())),
            Self::OneOf(_) => Self::OneOf(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Value::from)
                    .collect(),
            ),
            Self::Contains(_) => Self::Contains(raw.to_string()),
            Self::Like(_) => Self::Like(raw.to_string()),
            Self::DateFrom(_) => Self::DateFrom(raw.to_string()),
            Self::DateTo(_) => Self::DateTo(raw.to_string()),
            Self::Range { .. } if raw.trim().is_empty() || raw.trim() == "all" => Self::Range {
                min: None,
                max: None,
            },
            Self::Range { .. } => {
                let (min, max) = raw.split_once("..").ok_or_else(|| {
                    ViewError::invalid_criterion(name, "range must be written as min..max")
                })?;
                Self::Range {
                    min: parse_bound(name, min)?,
                    max: parse_bound(name, max)?,
                }
            }
        })
    }
}

fn parse_bound(name: &str, raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| ViewError::invalid_criterion(name, format!("range bound '{}' is not a number", raw)))
}

/// A named constraint on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub name: String,
    pub field: FieldPath,
    pub comparison: Comparison,
}

impl FilterCriterion {
    pub fn new(name: impl Into<String>, field: impl Into<FieldPath>, comparison: Comparison) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            comparison,
        }
    }

    /// Equality filter named after its field.
    pub fn equals(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, field, Comparison::Equals(value.into()))
    }

    pub fn date_from(field: &str, bound: &str) -> Self {
        Self::new("dateFrom", field, Comparison::DateFrom(bound.to_string()))
    }

    pub fn date_to(field: &str, bound: &str) -> Self {
        Self::new("dateTo", field, Comparison::DateTo(bound.to_string()))
    }

    pub fn is_active(&self) -> bool {
        self.comparison.is_active()
    }
}

/// Ordered criteria, all of which must hold. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    criteria: Vec<FilterCriterion>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: FilterCriterion) -> Self {
        self.set(criterion);
        self
    }

    /// Insert or replace by name. Returns whether anything changed.
    pub fn set(&mut self, criterion: FilterCriterion) -> bool {
        match self.criteria.iter_mut().find(|c| c.name == criterion.name) {
            Some(existing) if *existing == criterion => false,
            Some(existing) => {
                *existing = criterion;
                true
            }
            None => {
                self.criteria.push(criterion);
                true
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.criteria.len();
        self.criteria.retain(|c| c.name != name);
        self.criteria.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&FilterCriterion> {
        self.criteria.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterCriterion> {
        self.criteria.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &FilterCriterion> {
        self.criteria.iter().filter(|c| c.is_active())
    }

    pub fn has_active(&self) -> bool {
        self.active().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl FromIterator<FilterCriterion> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterCriterion>>(iter: I) -> Self {
        let mut set = Self::new();
        for criterion in iter {
            set.set(criterion);
        }
        set
    }
}
