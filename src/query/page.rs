use crate::core::{Result, ViewError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub number: usize,
    pub size: usize,
}

impl PageWindow {
    pub fn new(number: usize, size: usize) -> Result<Self> {
        let window = Self { number, size };
        window.validate()?;
        Ok(window)
    }

    pub fn first(size: usize) -> Result<Self> {
        Self::new(1, size)
    }

    /// A single page holding everything.
    pub fn all() -> Self {
        Self {
            number: 1,
            size: usize::MAX,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.number == 0 {
            return Err(ViewError::InvalidPage("page numbers start at 1".into()));
        }
        if self.size == 0 {
            return Err(ViewError::InvalidPage("page size must be positive".into()));
        }
        Ok(())
    }

    pub fn with_number(self, number: usize) -> Self {
        Self { number, ..self }
    }

    /// Index range of this page within `total` items; empty past the end.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.number.saturating_sub(1).saturating_mul(self.size).min(total);
        let end = start.saturating_add(self.size).min(total);
        start..end
    }

    /// At least one page, even for an empty set.
    pub fn page_count(&self, total: usize) -> usize {
        if self.size == 0 {
            return 1;
        }
        total.div_ceil(self.size).max(1)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
