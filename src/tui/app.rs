//! Application state for the TUI
//!
//! `ViewState` is the whole observable state of the viewer: the fetched
//! records, whether the fetch is still outstanding, and which record's detail
//! overlay is open. It is only changed through its methods so the load and
//! selection rules hold in one place. `App` wraps it with cursor, animation
//! and hit-testing state.

use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::ViewerError;
use crate::fetch::FetchOutcome;
use crate::models::ExpenseRecord;

use super::transition::RowTransitions;

/// Fetched records, load status and the open detail overlay
#[derive(Debug, Clone)]
pub struct ViewState {
    records: Vec<ExpenseRecord>,
    is_loading: bool,
    /// Index into `records` of the record whose details are open
    selected: Option<usize>,
    load_error: Option<ViewerError>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// State at session start: loading, nothing selected
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            is_loading: true,
            selected: None,
            load_error: None,
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn load_error(&self) -> Option<&ViewerError> {
        self.load_error.as_ref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ExpenseRecord> {
        self.selected.and_then(|index| self.records.get(index))
    }

    /// Loaded with nothing to show
    pub fn shows_empty_state(&self) -> bool {
        !self.is_loading && self.records.is_empty()
    }

    /// Apply the fetch result
    ///
    /// Only the first settlement counts; returns `false` for any later one.
    /// A failure leaves the list empty and records the error.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if !self.is_loading {
            return false;
        }

        match outcome {
            Ok(records) => {
                self.records = records;
                self.load_error = None;
            }
            Err(err) => {
                self.records = Vec::new();
                self.load_error = Some(err);
            }
        }
        self.is_loading = false;
        true
    }

    /// Open the detail overlay for the record at `index`
    ///
    /// Replaces any open overlay. Refuses indices that don't address a
    /// fetched record.
    pub fn open_detail(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

/// Vertical scroll of the detail overlay
///
/// The renderer reports how many content lines exist and how many fit, and
/// the offset is kept within that range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailScroll {
    /// First content line shown
    pub offset: u16,
    /// Largest offset the last frame allowed
    pub max: u16,
    /// Content lines visible in the last frame
    pub page: u16,
}

impl DetailScroll {
    pub fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.offset).saturating_add(delta);
        self.offset = target.clamp(0, i32::from(self.max)) as u16;
    }

    pub fn page_down(&mut self) {
        self.scroll_by(i32::from(self.page.max(1)));
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-i32::from(self.page.max(1)));
    }

    /// Record the limits of the frame being drawn
    pub fn fit(&mut self, content_lines: u16, page: u16) {
        self.page = page;
        self.max = content_lines.saturating_sub(page);
        self.offset = self.offset.min(self.max);
    }
}

/// Where a click landed while the detail overlay is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    /// The close button inside the panel
    Close,
    /// Anywhere else inside the panel
    Inside,
    /// The dimmed backdrop around the panel
    Backdrop,
}

/// Screen regions recorded during the last render, for mouse handling
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub detail_panel: Option<Rect>,
    pub close_button: Option<Rect>,
    /// Visible rows and the record index each one shows
    pub rows: Vec<(Rect, usize)>,
}

impl HitMap {
    /// Record index of the row under (`column`, `row`)
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, index)| *index)
    }

    pub fn overlay_click(&self, column: u16, row: u16) -> OverlayClick {
        if self.close_button.is_some_and(|area| contains(area, column, row)) {
            OverlayClick::Close
        } else if self.detail_panel.is_some_and(|area| contains(area, column, row)) {
            OverlayClick::Inside
        } else {
            OverlayClick::Backdrop
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Main application state
pub struct App<'a> {
    /// Application settings
    pub settings: &'a Settings,

    /// Where the expenses come from, for display
    pub source_label: String,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Records, load status and the open detail overlay
    pub view: ViewState,

    /// Highlighted record index in the list
    pub cursor: usize,

    /// First visible table row, kept between frames
    pub list_offset: usize,

    /// Row enter/exit animation state
    pub transitions: RowTransitions,

    /// Whether the help overlay is shown
    pub show_help: bool,

    /// Loading spinner frame
    pub spinner_frame: usize,

    /// Scroll position of the open detail overlay
    pub detail_scroll: DetailScroll,

    /// Clickable regions of the last frame
    pub hit_map: HitMap,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(settings: &'a Settings, source_label: impl Into<String>) -> Self {
        Self {
            settings,
            source_label: source_label.into(),
            should_quit: false,
            view: ViewState::new(),
            cursor: 0,
            list_offset: 0,
            transitions: RowTransitions::new(settings.transition_duration()),
            show_help: false,
            spinner_frame: 0,
            detail_scroll: DetailScroll::default(),
            hit_map: HitMap::default(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Apply the fetch result and start the row entrances
    pub fn on_fetch(&mut self, outcome: FetchOutcome, now: Instant) {
        if !self.view.apply_fetch(outcome) {
            debug!("ignoring repeated fetch settlement");
            return;
        }

        match self.view.load_error() {
            Some(err) => info!(error = %err, "showing empty list after failed fetch"),
            None => info!(count = self.view.records().len(), "showing expenses"),
        }

        self.transitions.sync(self.view.records(), now);
        self.cursor = 0;
        self.list_offset = 0;
    }

    /// Advance the spinner and settle finished transitions
    pub fn tick(&mut self, now: Instant) {
        if self.view.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        self.transitions.prune(now);
    }

    pub fn has_overlay(&self) -> bool {
        self.show_help || self.view.selected().is_some()
    }

    /// Move selection up in the list
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move selection down in the list
    pub fn move_down(&mut self) {
        let count = self.view.records().len();
        if self.cursor < count.saturating_sub(1) {
            self.cursor += 1;
        }
    }

    pub fn go_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_bottom(&mut self) {
        self.cursor = self.view.records().len().saturating_sub(1);
    }

    /// Open details for the record at `index` and move the cursor to it
    pub fn open_detail(&mut self, index: usize) -> bool {
        if !self.view.open_detail(index) {
            return false;
        }
        self.cursor = index;
        self.detail_scroll = DetailScroll::default();
        debug!(index, "opened expense details");
        true
    }

    /// Open details for the highlighted record
    pub fn open_highlighted(&mut self) -> bool {
        self.open_detail(self.cursor)
    }

    pub fn close_detail(&mut self) {
        if self.view.selected().is_some() {
            debug!("closed expense details");
        }
        self.view.close_detail();
        self.detail_scroll = DetailScroll::default();
    }

    /// Switch the open overlay to the next record
    pub fn next_detail(&mut self) {
        if let Some(index) = self.view.selected() {
            self.open_detail(index + 1);
        }
    }

    /// Switch the open overlay to the previous record
    pub fn prev_detail(&mut self) {
        if let Some(index) = self.view.selected() {
            if index > 0 {
                self.open_detail(index - 1);
            }
        }
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
