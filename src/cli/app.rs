use super::Cli;
use anyhow::{Context, Result, anyhow, bail};
use collection_view::config::{ViewConfig, presets};
use collection_view::core::FieldPath;
use collection_view::screen::source::JsonFileSource;
use collection_view::screen::{CollectionScreen, ScreenStatus, ScreenView};

pub struct App {
    cli: Cli,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        let source = JsonFileSource::new(&self.cli.records);
        let mut screen = CollectionScreen::new(config, source).context("Invalid view configuration")?;

        screen.refresh().await;
        if let ScreenStatus::Failed { message } = screen.render().status {
            bail!(
                "Failed to load records from '{}': {}",
                self.cli.records.display(),
                message
            );
        }

        self.apply_state(&mut screen)?;

        let view = screen.render();
        if self.cli.json {
            println!("{}", serde_json::to_string_pretty(&view.page)?);
        } else {
            let columns = columns_for(&screen.config().columns, &view);
            view.page.print(&columns);
            if view.status == ScreenStatus::Degraded {
                eprintln!("(view could not be applied, see log output)");
            }
        }
        Ok(())
    }

    fn load_config(&self) -> Result<ViewConfig> {
        let mut config = self.base_config()?;
        if !self.cli.search_fields.is_empty() {
            config.search_fields = self
                .cli
                .search_fields
                .iter()
                .map(|field| FieldPath::new(field.as_str()))
                .collect();
        }
        Ok(config)
    }

    fn base_config(&self) -> Result<ViewConfig> {
        if let Some(path) = &self.cli.config {
            return ViewConfig::from_file(path)
                .with_context(|| format!("Failed to load view config '{}'", path.display()));
        }
        match &self.cli.preset {
            Some(name) => presets::by_name(name).ok_or_else(|| {
                anyhow!(
                    "Unknown preset '{}', expected one of: {}",
                    name,
                    presets::PRESET_NAMES.join(", ")
                )
            }),
            None => Ok(ViewConfig::new("records")),
        }
    }

    /// Filters and search first: both send the view back to page 1.
    fn apply_state(&self, screen: &mut CollectionScreen<JsonFileSource>) -> Result<()> {
        let state = screen.state_mut();
        for (name, value) in &self.cli.filters {
            state
                .set_filter_value(name, value)
                .with_context(|| format!("Invalid value for filter '{}'", name))?;
        }
        if let Some(term) = &self.cli.search {
            state.set_search(term);
        }
        if let Some(sort) = &self.cli.sort {
            state.set_sort(sort.clone());
        }
        if let Some(size) = self.cli.page_size {
            state.set_page_size(size);
        }
        state.set_page(self.cli.page);
        Ok(())
    }
}

/// Configured columns, or the top-level keys of the first row.
fn columns_for(configured: &[FieldPath], view: &ScreenView) -> Vec<FieldPath> {
    if !configured.is_empty() {
        return configured.to_vec();
    }
    view.page
        .items
        .first()
        .and_then(|record| record.data().as_object())
        .map(|object| object.keys().map(|key| FieldPath::new(key.as_str())).collect())
        .unwrap_or_default()
}
