use std::time::{Duration, Instant};

use crate::action::Action;
use crate::domain::{select_granularity, Granularity, ScreenParameters};
use crate::host::{CatalogLocalizer, DataTable, MemoryDataTable};
use crate::view::{distinct_users, AuditRender, AuditView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    PendingG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reload,
    ReloadIfChanged,
    Quit,
}

/// Counts shown in the status bar for the loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub rows: usize,
    pub users: usize,
    pub granularity: Option<Granularity>,
}

pub struct App {
    // View state
    pub input_mode: InputMode,
    pub overlay: Overlay,
    pub scroll: u16,
    /// Height of the audit log area on the last draw.
    pub viewport_height: u16,

    // Source
    pub source: String,
    pub screen_parameters: ScreenParameters,
    pub localizer: CatalogLocalizer,

    // Data
    pub table: Option<MemoryDataTable>,
    pub rendered: LoadState<AuditRender>,
    pub stats: Option<TableStats>,

    // Watching
    pub watch: bool,
    pub watch_interval: Duration,
    pub last_reload: Option<Instant>,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        source: String,
        screen_parameters: ScreenParameters,
        localizer: CatalogLocalizer,
    ) -> Self {
        Self {
            input_mode: InputMode::Normal,
            overlay: Overlay::None,
            scroll: 0,
            viewport_height: 0,

            source,
            screen_parameters,
            localizer,

            table: None,
            rendered: LoadState::Loading,
            stats: None,

            watch: false,
            watch_interval: Duration::from_secs(2),
            last_reload: None,

            should_quit: false,
            last_error: None,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale error toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > Duration::from_secs(5) {
                self.last_error = None;
            }
        }

        match action {
            // Navigation
            Action::NavigateUp => {
                self.scroll = self.scroll.saturating_sub(1);
                vec![]
            }
            Action::NavigateDown => {
                self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
                vec![]
            }
            Action::NavigateTop => {
                self.input_mode = InputMode::Normal;
                self.scroll = 0;
                vec![]
            }
            Action::NavigateBottom => {
                self.scroll = self.max_scroll();
                vec![]
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(self.page_height());
                vec![]
            }
            Action::PageDown => {
                self.scroll = self
                    .scroll
                    .saturating_add(self.page_height())
                    .min(self.max_scroll());
                vec![]
            }

            // Vim chord
            Action::EnterPendingG => {
                self.input_mode = InputMode::PendingG;
                vec![]
            }

            // UI
            Action::CloseOverlay => {
                self.input_mode = InputMode::Normal;
                self.overlay = Overlay::None;
                vec![]
            }
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }

            // Data responses
            Action::DataLoaded(table) => {
                self.last_reload = Some(Instant::now());
                self.render_table(*table);
                vec![]
            }

            // App control
            Action::Reload => {
                self.last_reload = Some(Instant::now());
                vec![Effect::Reload]
            }
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => {
                if self.watch {
                    let due = self
                        .last_reload
                        .map(|t| t.elapsed() >= self.watch_interval)
                        .unwrap_or(true);
                    if due {
                        self.last_reload = Some(Instant::now());
                        return vec![Effect::ReloadIfChanged];
                    }
                }
                vec![]
            }
            Action::Error(msg) => {
                tracing::error!("{}", msg);
                if self.table.is_none() {
                    self.rendered = LoadState::Error(msg.clone());
                }
                self.last_error = Some((msg, Instant::now()));
                vec![]
            }
        }
    }

    /// Screen parameters in effect: the document's own, overridden by the
    /// command line. `None` when neither supplies any.
    pub fn effective_parameters(&self) -> Option<ScreenParameters> {
        self.parameters_for(self.table.as_ref())
    }

    fn parameters_for(&self, table: Option<&MemoryDataTable>) -> Option<ScreenParameters> {
        let mut parameters = table
            .map(|t| t.screen_parameters().clone())
            .unwrap_or_default();
        parameters.merge(self.screen_parameters.clone());
        (!parameters.is_empty()).then_some(parameters)
    }

    fn render_table(&mut self, table: MemoryDataTable) {
        let parameters = self.parameters_for(Some(&table));
        self.stats = Some(TableStats {
            rows: table.rows().len(),
            users: distinct_users(&table),
            granularity: select_granularity(parameters.as_ref()),
        });

        let result = AuditView::new(
            &table,
            self.localizer.clone(),
            Box::new(move || parameters.clone()),
        )
        .and_then(|view| view.render(&table));
        self.table = Some(table);

        match result {
            Ok(render) => {
                self.rendered = LoadState::Loaded(render);
                self.scroll = self.scroll.min(self.max_scroll());
            }
            Err(e) => {
                let msg = format!("cannot render {}: {}", self.source, e);
                tracing::error!("{}", msg);
                self.rendered = LoadState::Error(msg.clone());
                self.last_error = Some((msg, Instant::now()));
            }
        }
    }

    fn max_scroll(&self) -> u16 {
        self.rendered
            .data()
            .map(|render| render.line_count().saturating_sub(1))
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16
    }

    /// Rows of the audit log area as last drawn, at least one.
    fn page_height(&self) -> u16 {
        self.viewport_height.max(1)
    }
}
