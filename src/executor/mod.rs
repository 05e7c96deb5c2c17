pub mod aggregate;
pub mod filter;
pub mod pipeline;
pub mod sort;

pub use aggregate::{Metrics, SummaryAggregator, aggregate};
pub use filter::{FilterExecutor, matches_filters, matches_search};
pub use pipeline::{ViewPipeline, view};
pub use sort::{RecordComparator, SortExecutor, SortKey, build_comparator};
