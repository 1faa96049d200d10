use tracing::{debug, info, warn};

use crate::core::pipeline::{load_calendar, MonthCalendar};
use crate::error::LoadError;
use crate::models::{Columns, DayCell};
use crate::source::{CsvSource, UploadSource};

/// What a presentation layer should show.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading,
    Ready(MonthCalendar),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    Initial,
    Upload,
}

/// Issued when a load starts; only the latest ticket may change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    kind: LoadKind,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer load was started after this one; its result was dropped.
    Stale,
}

/// Application state, passed into and returned from every load.
#[derive(Debug, Clone)]
pub struct AppState {
    view: View,
    banner: Option<String>,
    selected: Option<u32>,
    generation: u64,
    pending: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: View::Loading,
            banner: None,
            selected: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn calendar(&self) -> Option<&MonthCalendar> {
        match &self.view {
            View::Ready(calendar) => Some(calendar),
            _ => None,
        }
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a full load. Shows the loading view unless a calendar is already up.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.issue(LoadKind::Initial);
        if self.calendar().is_none() {
            self.view = View::Loading;
        }
        ticket
    }

    /// Start a re-upload. The current view stays up while it runs.
    pub fn begin_upload(&mut self) -> LoadTicket {
        self.issue(LoadKind::Upload)
    }

    fn issue(&mut self, kind: LoadKind) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        LoadTicket {
            generation: self.generation,
            kind,
        }
    }

    /// Apply the result of the load identified by `ticket`.
    pub fn finish(
        &mut self,
        ticket: LoadTicket,
        result: Result<MonthCalendar, LoadError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                "Dropping result of load #{} (latest is #{})",
                ticket.generation, self.generation
            );
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(calendar) => {
                info!("Showing {}", calendar.label);
                self.view = View::Ready(calendar);
                self.banner = None;
                self.selected = None;
                LoadOutcome::Applied
            }
            Err(err) => {
                let message = failure_message(&err);
                warn!("{}", message);
                if ticket.kind == LoadKind::Upload && self.calendar().is_some() {
                    self.banner = Some(message);
                } else {
                    self.view = View::Failed(message);
                }
                LoadOutcome::Failed
            }
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Record a day selection. Returns the cell when the day is on the grid.
    pub fn select_day(&mut self, day: u32) -> Option<&DayCell> {
        let found = self
            .calendar()
            .is_some_and(|calendar| calendar.select_day(day).is_some());
        self.selected = if found { Some(day) } else { None };
        self.selected_day()
    }

    pub fn selected_day(&self) -> Option<&DayCell> {
        let day = self.selected?;
        self.calendar()?.select_day(day)
    }
}

fn failure_message(err: &LoadError) -> String {
    if err.is_transport() {
        format!("Could not load trades: {}", err)
    } else {
        format!("Could not build the calendar: {}", err)
    }
}

/// Load `source` into `state` and hand the state back.
pub async fn render(mut state: AppState, source: &dyn CsvSource, columns: &Columns) -> AppState {
    let ticket = state.begin_load();
    let result = load_calendar(source, columns).await;
    state.finish(ticket, result);
    state
}

/// Replace the displayed calendar with the contents of an uploaded file.
pub async fn handle_upload(
    mut state: AppState,
    upload: UploadSource,
    columns: &Columns,
) -> AppState {
    let ticket = state.begin_upload();
    let result = load_calendar(&upload, columns).await;
    state.finish(ticket, result);
    state
}
