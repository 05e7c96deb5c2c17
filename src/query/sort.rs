use crate::core::{FieldPath, Result, ViewError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn is_descending(self) -> bool {
        matches!(self, Self::Desc)
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for Direction {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(ViewError::Config(format!("unknown sort direction '{}'", other))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Field plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: FieldPath,
    #[serde(default)]
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(field: impl Into<FieldPath>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<FieldPath>) -> Self {
        Self::new(field, Direction::Asc)
    }

    pub fn desc(field: impl Into<FieldPath>) -> Self {
        Self::new(field, Direction::Desc)
    }

    /// Column-header click: the same field flips direction, a new field
    /// starts ascending.
    pub fn toggled(&self, field: impl Into<FieldPath>) -> Self {
        let field = field.into();
        if field == self.field {
            Self::new(field, self.direction.reversed())
        } else {
            Self::asc(field)
        }
    }
}

/// Parses `field` or `field:asc|desc`.
impl FromStr for SortSpec {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, Direction::Asc),
        };
        let field = FieldPath::new(field.trim());
        field.validate()?;
        Ok(Self::new(field, direction))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_spec() {
        let spec: SortSpec = "timestamps.created:desc".parse().unwrap();
        assert_eq!(spec, SortSpec::desc("timestamps.created"));
        assert_eq!("amount".parse::<SortSpec>().unwrap(), SortSpec::asc("amount"));
        assert!("amount:sideways".parse::<SortSpec>().is_err());
        assert!(":desc".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_toggle() {
        let spec = SortSpec::desc("amount");
        assert_eq!(spec.toggled("amount"), SortSpec::asc("amount"));
        assert_eq!(spec.toggled("name"), SortSpec::asc("name"));
    }
}
