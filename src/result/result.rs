use crate::core::{FieldPath, Record, ViewError};
use crate::executor::aggregate::Metrics;
use crate::expression::extract_text;
use crate::query::PageWindow;
use serde::Serialize;

/// Where the visible page sits in the filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: usize,
    pub size: usize,
    pub total_count: usize,
    pub page_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(window: PageWindow, total_count: usize) -> Self {
        let page_count = window.page_count(total_count);
        Self {
            number: window.number,
            size: window.size,
            total_count,
            page_count,
            has_previous: window.number > 1,
            has_next: window.number < page_count,
        }
    }
}

/// One rendered page plus the metrics of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage {
    pub items: Vec<Record>,
    pub total_count: usize,
    pub page: PageInfo,
    pub metrics: Metrics,
    /// Malformed records dropped from the snapshot.
    pub skipped: usize,
}

impl ViewPage {
    pub fn empty(window: PageWindow) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: PageInfo::new(window, 0),
            metrics: Metrics::new(),
            skipped: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().filter_map(Record::id).collect()
    }

    /// Plain-text table of `columns`, followed by the paging line and the
    /// metrics.
    pub fn render_table(&self, columns: &[FieldPath]) -> String {
        let mut out = String::new();

        if columns.is_empty() || self.items.is_empty() {
            out.push_str("Empty result set\n");
        } else {
            let cells: Vec<Vec<String>> = self
                .items
                .iter()
                .map(|record| columns.iter().map(|c| extract_text(record, c)).collect())
                .collect();

            let mut widths: Vec<usize> = columns.iter().map(|c| c.as_str().chars().count()).collect();
            for row in &cells {
                for (i, cell) in row.iter().enumerate() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }

            let header: Vec<String> = columns
                .iter()
                .enumerate()
                .map(|(i, col)| format!("{:width$}", col.as_str(), width = widths[i]))
                .collect();
            out.push_str(header.join(" | ").trim_end());
            out.push('\n');

            let separator: String = widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-");
            out.push_str(&separator);
            out.push('\n');

            for row in &cells {
                let line: Vec<String> = row
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| format!("{:width$}", cell, width = widths[i]))
                    .collect();
                out.push_str(line.join(" | ").trim_end());
                out.push('\n');
            }
        }

        out.push_str(&format!(
            "\npage {}/{} - {} of {} row(s)\n",
            self.page.number,
            self.page.page_count,
            self.items.len(),
            self.total_count
        ));

        if !self.metrics.is_empty() {
            out.push('\n');
            for (name, value) in &self.metrics {
                out.push_str(&format!("{}: {}\n", name, value));
            }
        }

        out
    }

    pub fn print(&self, columns: &[FieldPath]) {
        print!("{}", self.render_table(columns));
    }
}

/// Result of one pipeline pass. A degraded pass renders as an empty page;
/// the error is kept for diagnostics, not for display.
#[derive(Debug)]
pub enum ViewOutcome {
    Ready(ViewPage),
    Degraded { error: ViewError, page: ViewPage },
}

impl ViewOutcome {
    pub fn page(&self) -> &ViewPage {
        match self {
            Self::Ready(page) | Self::Degraded { page, .. } => page,
        }
    }

    pub fn into_page(self) -> ViewPage {
        match self {
            Self::Ready(page) | Self::Degraded { page, .. } => page,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            Self::Ready(_) => None,
            Self::Degraded { error, .. } => Some(error),
        }
    }
}
