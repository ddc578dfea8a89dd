//! Application state management for the results board
//!
//! This module contains the main application state, handling keyboard input,
//! refresh messages, and transitions between the results and chart views.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::board::Board;
use crate::refresh::RefreshMessage;

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the first board
    Loading,
    /// Today's and yesterday's results for every game
    Results,
    /// The monthly chart
    Chart,
}

/// Main application struct managing state and data
#[derive(Debug)]
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Latest board from the refresh loop
    pub board: Option<Board>,
    /// First visible row in the current view
    pub scroll_offset: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Whether a refresh cycle is running
    pub refreshing: bool,
    /// Last refresh error, cleared by the next successful cycle
    pub last_error: Option<String>,
    /// When the last board arrived
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag to show help overlay
    pub show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            board: None,
            scroll_offset: 0,
            should_quit: false,
            refresh_requested: false,
            refreshing: false,
            last_error: None,
            last_refresh: None,
            show_help: false,
        }
    }

    /// Number of rows in the current view
    pub fn row_count(&self) -> usize {
        match (&self.board, self.state) {
            (Some(board), AppState::Results) => board.rows.len(),
            (Some(board), AppState::Chart) => board.chart.len(),
            _ => 0,
        }
    }

    /// Applies a message from the refresh loop
    pub fn apply(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::RefreshStarted => {
                self.refreshing = true;
                self.last_error = None;
            }
            RefreshMessage::BoardUpdated(board) => {
                self.board = Some(*board);
                self.last_refresh = Some(Local::now());
                if self.state == AppState::Loading {
                    self.state = AppState::Results;
                }
                self.clamp_scroll();
            }
            RefreshMessage::RefreshError(error) => {
                self.last_error = Some(error);
            }
            RefreshMessage::RefreshCompleted => {
                self.refreshing = false;
            }
        }
    }

    /// Handles a key press
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
            AppState::Results | AppState::Chart => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_offset += 1;
                    self.clamp_scroll();
                }
                KeyCode::Tab => {
                    self.state = match self.state {
                        AppState::Results => AppState::Chart,
                        _ => AppState::Results,
                    };
                    self.scroll_offset = 0;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    fn clamp_scroll(&mut self) {
        let last = self.row_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(last);
    }
}
