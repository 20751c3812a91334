// src/app.rs

//! Table controller.
//!
//! Wires the store to its collaborators: the fragment source, the snapshot
//! store, the renderer and the display surface. Input events are applied one
//! at a time; each runs to completion before the next is looked at.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, Field, FilterState, TableView};
use crate::pipeline::{LoadOrigin, LoadPlan, load_records};
use crate::services::{LoadSource, RecordExtractor, Renderer, source};
use crate::storage::{LocalStorage, SnapshotStore};
use crate::store::TableState;
use crate::surface::{DisplaySurface, check_surface};

/// User input consumed by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SubmitSearch(String),
    ChangeCategory(String),
    ChangeStatus(String),
    ClickColumnHeader(Field),
    ClickPage(usize),
    ChangePageSize(usize),
    RequestReload,
}

/// The table and its collaborators.
pub struct TableApp {
    config: Config,
    state: TableState,
    renderer: Renderer,
    extractor: RecordExtractor,
    source: Box<dyn LoadSource>,
    snapshot: Option<Box<dyn SnapshotStore>>,
    load_error: Option<String>,
}

impl TableApp {
    /// Set up the table for `surface`. Fails with an initialization error
    /// when the surface lacks a required element or the table settings are
    /// unusable.
    pub fn new(
        config: Config,
        source: Box<dyn LoadSource>,
        snapshot: Option<Box<dyn SnapshotStore>>,
        surface: &dyn DisplaySurface,
    ) -> Result<Self> {
        check_surface(surface)?;
        config
            .table
            .validate()
            .map_err(|e| AppError::initialization(e.to_string()))?;
        let extractor = RecordExtractor::new(&config.source.record_tag)
            .map_err(|e| AppError::initialization(e.to_string()))?;

        Ok(Self {
            state: TableState::from_config(&config.table),
            renderer: Renderer::new(config.status_rules.clone()),
            extractor,
            source,
            snapshot,
            load_error: None,
            config,
        })
    }

    /// Build the source and snapshot store named by the configuration.
    pub fn from_config(config: Config, surface: &dyn DisplaySurface) -> Result<Self> {
        let source = source::from_config(&config.source)?;
        let snapshot: Option<Box<dyn SnapshotStore>> = if config.snapshot.enabled {
            Some(Box::new(LocalStorage::new(Path::new(&config.snapshot.path))))
        } else {
            None
        };
        Self::new(config, source, snapshot, surface)
    }

    /// Load (or reload) the records. On failure the previous records stay in
    /// place and a user-visible error is set.
    pub async fn reload(&mut self) -> Result<LoadOrigin> {
        let plan = LoadPlan {
            source: self.source.as_ref(),
            snapshot: self.snapshot.as_deref(),
            extractor: &self.extractor,
            root_tag: &self.config.source.root_tag,
            max_concurrent: self.config.source.max_concurrent,
        };

        match load_records(&plan).await {
            Ok(outcome) => {
                self.state.replace_records(outcome.extraction.records);
                self.load_error = match outcome.origin {
                    LoadOrigin::Source => None,
                    LoadOrigin::Snapshot => {
                        Some("Showing saved copy; the latest data could not be loaded".into())
                    }
                };
                Ok(outcome.origin)
            }
            Err(e) => {
                log::error!("Load failed: {}", e);
                self.load_error = Some(format!("Unable to load records: {e}"));
                Err(e)
            }
        }
    }

    /// Apply one input event.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        log::debug!("Event: {:?}", event);
        match event {
            UiEvent::SubmitSearch(term) => self.state.set_search(&term),
            UiEvent::ChangeCategory(category) => self.state.set_category(&category),
            UiEvent::ChangeStatus(status) => self.state.set_status(&status),
            UiEvent::ClickColumnHeader(column) => self.state.sort_by(column),
            UiEvent::ClickPage(page) => self.state.go_to_page(page),
            UiEvent::ChangePageSize(size) => self.state.set_page_size(size)?,
            UiEvent::RequestReload => {
                self.reload().await?;
            }
        }
        Ok(())
    }

    /// Replace all predicates at once.
    pub fn apply_filters(&mut self, filter: FilterState) {
        self.state.apply_filters(filter);
    }

    /// Everything the display surface needs for the current state.
    pub fn view(&self) -> TableView {
        let page = self.state.page_view();
        TableView {
            rows: self.renderer.render(self.state.current_page_records()),
            page_info: page.info,
            buttons: page.buttons,
            summary: self.state.summary().to_string(),
            pagination_visible: page.visible,
            sort: self.state.sort(),
            error: self.load_error.clone(),
        }
    }

    /// Draw the current view on `surface`.
    pub fn render_to(&self, surface: &mut dyn DisplaySurface) -> Result<()> {
        surface.show(&self.view())
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}
