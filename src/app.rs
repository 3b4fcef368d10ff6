//! Application state and the transitions applied to it by the search, apply
//! and theme flows. Nothing here touches the terminal or the network: the
//! runtime executes the returned [`Effect`]s and feeds results back in.

use tracing::{debug, info, warn};

use crate::apply::{Confirmation, GENERATING_MESSAGE};
use crate::error::SearchError;
use crate::models::{JobListing, ModalState};
use crate::search::partition;
use crate::theme::{Theme, ThemeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the search query.
    Typing,
    /// Keystrokes move between cards and trigger actions.
    Browsing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Char(char),
    Backspace,
    /// Enter: runs the search while typing, applies to the selected card while browsing.
    Submit,
    FocusSearch,
    /// Leaves the search box without searching.
    Back,
    Next,
    Prev,
    Refresh,
    ToggleTheme,
    Dismiss,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyTicket {
    pub seq: u64,
    pub job: JobListing,
}

/// Work the runtime must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search(SearchTicket),
    Apply(ApplyTicket),
    Quit,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub theme: Theme,
    pub input_mode: InputMode,
    pub query: String,
    pub best_jobs: Vec<JobListing>,
    pub other_jobs: Vec<JobListing>,
    pub loading: bool,
    pub error: Option<String>,
    pub modal: ModalState,
    /// Index into `best_jobs` followed by `other_jobs`.
    pub selected: usize,
    search_seq: u64,
    apply_seq: u64,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            input_mode: InputMode::Typing,
            query: String::new(),
            best_jobs: Vec::new(),
            other_jobs: Vec::new(),
            loading: false,
            error: None,
            modal: ModalState::default(),
            selected: 0,
            search_seq: 0,
            apply_seq: 0,
        }
    }

    pub fn job_count(&self) -> usize {
        self.best_jobs.len() + self.other_jobs.len()
    }

    pub fn has_jobs(&self) -> bool {
        !self.best_jobs.is_empty()
    }

    pub fn job_at(&self, index: usize) -> Option<&JobListing> {
        if index < self.best_jobs.len() {
            self.best_jobs.get(index)
        } else {
            self.other_jobs.get(index - self.best_jobs.len())
        }
    }

    pub fn selected_job(&self) -> Option<&JobListing> {
        self.job_at(self.selected)
    }

    pub fn select_next(&mut self) {
        let count = self.job_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // --- Search flow ---

    pub fn begin_search(&mut self) -> SearchTicket {
        self.search_seq += 1;
        self.loading = true;
        self.error = None;
        info!(seq = self.search_seq, query = %self.query, "search issued");
        SearchTicket {
            seq: self.search_seq,
            query: self.query.clone(),
        }
    }

    /// Applies a search outcome. Returns false when a newer search has been
    /// issued since, in which case the outcome is dropped.
    pub fn finish_search(&mut self, seq: u64, result: Result<Vec<JobListing>, SearchError>) -> bool {
        if seq != self.search_seq {
            debug!(seq, latest = self.search_seq, "discarding stale search result");
            return false;
        }

        self.loading = false;
        self.selected = 0;
        match result {
            Ok(jobs) => {
                let (best, other) = partition(jobs);
                self.best_jobs = best;
                self.other_jobs = other;
                self.error = None;
            }
            Err(e) => {
                self.best_jobs.clear();
                self.other_jobs.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    // --- Apply flow ---

    pub fn begin_apply(&mut self, job: JobListing) -> ApplyTicket {
        self.apply_seq += 1;
        self.modal = ModalState {
            is_open: true,
            title: job.title.clone(),
            message: GENERATING_MESSAGE.to_string(),
            is_generating: true,
        };
        info!(seq = self.apply_seq, title = %job.title, "apply issued");
        ApplyTicket {
            seq: self.apply_seq,
            job,
        }
    }

    pub fn finish_apply(&mut self, seq: u64, confirmation: Confirmation) -> bool {
        if seq != self.apply_seq {
            debug!(seq, latest = self.apply_seq, "discarding stale confirmation");
            return false;
        }
        self.modal = ModalState {
            is_open: true,
            title: confirmation.title,
            message: confirmation.message,
            is_generating: false,
        };
        true
    }

    /// Closes the modal once its confirmation has arrived.
    pub fn dismiss_modal(&mut self) -> bool {
        if !self.modal.is_open || self.modal.is_generating {
            return false;
        }
        self.modal.is_open = false;
        true
    }

    // --- Theme ---

    pub fn toggle_theme(&mut self, store: &ThemeStore) {
        self.theme = self.theme.toggled();
        if let Err(e) = store.save(self.theme) {
            warn!(error = %e, "failed to persist theme preference");
        }
    }
}

/// Owns the state and the theme store; the single place events are applied.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    store: ThemeStore,
}

impl App {
    /// Reads the persisted theme once; `light` when nothing was saved.
    pub fn new(store: ThemeStore) -> Self {
        let theme = store.load().unwrap_or_default();
        Self {
            state: AppState::new(theme),
            store,
        }
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Effect> {
        if event == Event::Quit {
            return Some(Effect::Quit);
        }

        let state = &mut self.state;

        if state.modal.is_open {
            if matches!(event, Event::Dismiss | Event::Submit | Event::Back) {
                state.dismiss_modal();
            }
            return None;
        }

        match state.input_mode {
            InputMode::Typing => match event {
                Event::Char(c) => state.query.push(c),
                Event::Backspace => {
                    state.query.pop();
                }
                Event::Submit => {
                    state.input_mode = InputMode::Browsing;
                    return Some(Effect::Search(state.begin_search()));
                }
                Event::Back => state.input_mode = InputMode::Browsing,
                _ => {}
            },
            InputMode::Browsing => match event {
                Event::FocusSearch => state.input_mode = InputMode::Typing,
                // Cards are hidden while a search is in flight.
                Event::Next | Event::Prev | Event::Submit if state.loading => {}
                Event::Next => state.select_next(),
                Event::Prev => state.select_prev(),
                Event::Refresh => return Some(Effect::Search(state.begin_search())),
                Event::ToggleTheme => state.toggle_theme(&self.store),
                Event::Submit => {
                    let job = state.selected_job()?.clone();
                    return Some(Effect::Apply(state.begin_apply(job)));
                }
                _ => {}
            },
        }
        None
    }
}
