//! Everything a screen needs in one import.
//!
//! ```
//! use collection_view::prelude::*;
//! ```

pub use crate::config::{ViewConfig, presets};
pub use crate::core::{FieldPath, Record, Result, Value, ViewError};
pub use crate::evaluator::MissingDatePolicy;
pub use crate::executor::{Metrics, ViewPipeline, view};
pub use crate::query::{
    Comparison, Direction, FilterCriterion, FilterSet, MetricSpec, PageWindow, SortSpec,
    ViewQuery,
};
pub use crate::result::{ViewOutcome, ViewPage};
pub use crate::screen::source::{FetchResponse, JsonFileSource, RecordSource, StaticSource};
pub use crate::screen::state::{RowToggles, ViewState};
pub use crate::screen::{CollectionScreen, ScreenStatus, ScreenView};
