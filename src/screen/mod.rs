pub mod source;
pub mod state;

use crate::config::ViewConfig;
use crate::core::{Record, Result};
use crate::executor::ViewPipeline;
use crate::result::{ViewOutcome, ViewPage};
use source::{FetchResponse, RecordSource};
use state::{RowToggles, ViewState};
use tracing::{debug, info, warn};

/// What the display layer should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenStatus {
    /// Nothing fetched yet
    Idle,
    /// First fetch in flight
    Loading,
    /// Records to show
    Ready,
    /// Fetched fine, but nothing matches the current filters
    Empty,
    /// The view configuration could not be applied; shown as an empty list
    Degraded,
    /// The last fetch failed; the previous snapshot (if any) is still shown
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub status: ScreenStatus,
    pub page: ViewPage,
}

/// Handle for one fetch. Only the newest ticket's result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A collection screen: configuration, interactive state and the current
/// snapshot of its record source
///
/// Similar to the screens of an admin dashboard: fetch, then filter, search,
/// sort and page locally.
///
/// # Examples
///
/// ```
/// use collection_view::config::presets;
/// use collection_view::screen::{CollectionScreen, ScreenStatus, source::StaticSource};
/// use collection_view::core::Record;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> collection_view::Result<()> {
/// let source = StaticSource::new(vec![
///     Record::new(json!({"_id": "t1", "status": "pending", "amount": 100})),
///     Record::new(json!({"_id": "t2", "status": "approved", "amount": 200})),
/// ]);
/// let mut screen = CollectionScreen::new(presets::transactions(), source)?;
/// screen.refresh().await;
/// screen.state_mut().set_filter_value("status", "pending")?;
///
/// let view = screen.render();
/// assert_eq!(view.status, ScreenStatus::Ready);
/// assert_eq!(view.page.ids(), vec!["t1"]);
/// # Ok(())
/// # }
/// ```
pub struct CollectionScreen<S: RecordSource> {
    config: ViewConfig,
    source: S,
    pipeline: ViewPipeline,
    state: ViewState,
    toggles: RowToggles,
    snapshot: Vec<Record>,
    loaded: bool,
    generation: u64,
    in_flight: Option<u64>,
    last_error: Option<String>,
}

impl<S: RecordSource> CollectionScreen<S> {
    pub fn new(config: ViewConfig, source: S) -> Result<Self> {
        config.validate()?;
        let pipeline = ViewPipeline::new().missing_dates(config.missing_dates);
        let state = ViewState::from_config(&config);
        Ok(Self {
            config,
            source,
            pipeline,
            state,
            toggles: RowToggles::new(),
            snapshot: Vec::new(),
            loaded: false,
            generation: 0,
            in_flight: None,
            last_error: None,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn toggles(&self) -> &RowToggles {
        &self.toggles
    }

    pub fn toggles_mut(&mut self) -> &mut RowToggles {
        &mut self.toggles
    }

    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a fetch. Any ticket handed out earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result if `ticket` is still the newest one. Returns
    /// whether the result was applied.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<FetchResponse>) -> bool {
        if self.in_flight != Some(ticket.generation) {
            debug!(
                screen = %self.config.name,
                generation = ticket.generation,
                latest = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(response) => {
                info!(
                    screen = %self.config.name,
                    items = response.items.len(),
                    reported_total = ?response.total_count,
                    "snapshot replaced"
                );
                self.snapshot = response.items;
                self.loaded = true;
                self.last_error = None;
                self.toggles.retain_present(&self.snapshot);

                let total = self.run().page().total_count;
                self.state.clamp_page(total);
            }
            Err(err) => {
                warn!(screen = %self.config.name, error = %err, "fetch failed");
                self.last_error = Some(err.to_string());
            }
        }
        true
    }

    /// Fetch a fresh snapshot from the source. No retry on failure; call
    /// again to retry.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_fetch();
        let result = self.source.fetch().await;
        self.complete_fetch(ticket, result)
    }

    /// Run the pipeline over the current snapshot and state.
    pub fn run(&self) -> ViewOutcome {
        self.pipeline.run(&self.snapshot, &self.state.query(&self.config))
    }

    pub fn render(&self) -> ScreenView {
        if !self.loaded && self.last_error.is_none() {
            let status = if self.in_flight.is_some() {
                ScreenStatus::Loading
            } else {
                ScreenStatus::Idle
            };
            return ScreenView {
                status,
                page: ViewPage::empty(self.state.page()),
            };
        }

        let outcome = self.run();
        let status = match (&self.last_error, &outcome) {
            (Some(message), _) => ScreenStatus::Failed {
                message: message.clone(),
            },
            (None, ViewOutcome::Degraded { .. }) => ScreenStatus::Degraded,
            (None, ViewOutcome::Ready(page)) if page.total_count == 0 => ScreenStatus::Empty,
            (None, ViewOutcome::Ready(_)) => ScreenStatus::Ready,
        };

        ScreenView {
            status,
            page: outcome.into_page(),
        }
    }
}
