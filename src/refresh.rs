//! Background board refresh
//!
//! [`UpdateLoop`] runs one fetch-render-stamp cycle at a time. [`RefreshHandle`]
//! drives it from a tokio task: one cycle immediately, then one cycle per
//! interval, measured from the end of the previous cycle so cycles never
//! overlap. Updates reach the UI over a channel.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::board::Board;
use crate::clock::{Clock, Zone};
use crate::data::ResultFetcher;

/// Messages sent from background refresh to main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// Refresh started
    RefreshStarted,
    /// The board after a cycle
    BoardUpdated(Box<Board>),
    /// A cycle failed; the board was still stamped
    RefreshError(String),
    /// Refresh completed
    RefreshCompleted,
}

/// Errors that can occur during a cycle
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Fetching did not finish within the cycle timeout
    #[error("Refresh timed out after {0:?}")]
    TimedOut(Duration),

    /// The page snapshot could not be written
    #[error("Failed to write page snapshot: {0}")]
    Snapshot(#[from] std::io::Error),
}

/// Configuration for the refresh loop
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    /// Pause between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Upper bound on the fetch phase of a cycle
    pub cycle_timeout: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            cycle_timeout: Duration::from_secs(25),
            enabled: true,
        }
    }
}

/// Where the loop is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Refreshing,
}

/// Fetches, renders and stamps the board
pub struct UpdateLoop {
    fetcher: ResultFetcher,
    board: Board,
    clock: Arc<dyn Clock>,
    zone: Zone,
    cycle_timeout: Duration,
    snapshot: Option<PathBuf>,
    state: LoopState,
}

impl UpdateLoop {
    pub fn new(
        fetcher: ResultFetcher,
        board: Board,
        clock: Arc<dyn Clock>,
        zone: Zone,
        cycle_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            board,
            clock,
            zone,
            cycle_timeout,
            snapshot: None,
            state: LoopState::Idle,
        }
    }

    /// Writes the board as HTML to `path` after every cycle
    pub fn with_snapshot(mut self, path: PathBuf) -> Self {
        self.snapshot = Some(path);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs one cycle
    ///
    /// Fetches results then the chart, renders both, and stamps the board.
    /// The stamp is applied even when the cycle fails; the failure is logged
    /// and returned.
    pub async fn run_cycle(&mut self) -> Result<(), RefreshError> {
        self.state = LoopState::Refreshing;
        info!("Refreshing board");

        let today = self.zone.date_of(self.clock.now());
        if self.board.roll_month(today) {
            info!(month = %today.format("%B %Y"), "New month, chart reset");
        }

        let fetched = match tokio::time::timeout(self.cycle_timeout, self.fetch_and_render()).await
        {
            Ok(()) => Ok(()),
            Err(_) => Err(RefreshError::TimedOut(self.cycle_timeout)),
        };
        if let Err(ref e) = fetched {
            warn!(error = %e, "Refresh failed, stamping anyway");
        }

        self.board.stamp(self.clock.now(), &self.zone);
        let written = self.write_snapshot().await;
        if let Err(ref e) = written {
            warn!(error = %e, "Snapshot not written");
        }

        self.state = LoopState::Idle;
        fetched.and(written)
    }

    async fn fetch_and_render(&mut self) {
        let results = self.fetcher.get_results().await;
        let chart = self.fetcher.get_monthly_chart().await;

        let written = self.board.render_results(&results.data)
            + self.board.render_chart(&chart.data);
        self.board.results_source = Some(results.source);
        self.board.chart_source = Some(chart.source);

        info!(
            cells = written,
            results = ?results.source,
            chart = ?chart.source,
            "Board rendered"
        );
    }

    async fn write_snapshot(&self) -> Result<(), RefreshError> {
        if let Some(path) = &self.snapshot {
            tokio::fs::write(path, self.board.to_html()).await?;
        }
        Ok(())
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Signals an immediate refresh
    refresh_tx: mpsc::Sender<()>,
    /// Signals shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Spawns the refresh task for `update_loop`
    ///
    /// With refresh disabled, only the initial cycle runs. Dropping the
    /// handle stops the task at its next wait.
    pub fn spawn(mut update_loop: UpdateLoop, config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            loop {
                let _ = msg_tx.send(RefreshMessage::RefreshStarted).await;
                let outcome = update_loop.run_cycle().await;
                let _ = msg_tx
                    .send(RefreshMessage::BoardUpdated(Box::new(update_loop.board().clone())))
                    .await;
                if let Err(e) = outcome {
                    let _ = msg_tx.send(RefreshMessage::RefreshError(e.to_string())).await;
                }
                let _ = msg_tx.send(RefreshMessage::RefreshCompleted).await;

                let sleep = async {
                    if config.enabled {
                        tokio::time::sleep(config.interval).await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                };

                tokio::select! {
                    _ = sleep => {}
                    Some(()) = refresh_rx.recv() => {
                        info!("Refresh requested");
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
            info!("Refresh loop stopped");
        });

        Self {
            receiver: msg_rx,
            refresh_tx,
            shutdown_tx,
        }
    }

    /// Requests an immediate refresh
    ///
    /// Ignored while a request is already pending.
    pub fn request_refresh(&self) {
        let _ = self.refresh_tx.try_send(());
    }

    /// Shuts down the background refresh task
    ///
    /// The task stops at its next wait and closes the message channel.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Checks for pending refresh messages without blocking
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
