//! # Trip Monitor
//!
//! Owns the full polling lifecycle of one trip request. Views never fetch
//! request state themselves; they read the [`TripPhase`] this monitor
//! publishes and send it commands.
//!
//! The monitor runs on its own worker thread. It polls the backend on the
//! [`PollScheduler`] cadence, enforces that the lifecycle only moves
//! forward, counts down the driver-search window, and funnels every
//! cancellation (manual or timeout) through one idempotent path that also
//! clears the persisted request id.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::egui_app::api_client::ApiClient;
use crate::egui_app::session::SessionStore;
use crate::egui_app::trip::scheduler::PollScheduler;
use crate::shared::trip::{RequestStatus, TripRequest};

/// Worker loop tick
const TICK: Duration = Duration::from_millis(250);

/// Observable state of the trip, published over a watch channel
#[derive(Debug, Clone, PartialEq)]
pub enum TripPhase {
    /// Waiting for a driver, with seconds left before auto-cancel
    Searching { remaining_secs: u64 },
    /// A driver accepted the request
    DriverAssigned(TripRequest),
    /// Pickup happened, trip in progress
    Driving(TripRequest),
    /// Request was cancelled (by us, the driver, or the timeout)
    Canceled,
    /// Monitor stopped after the trip finished
    Ended,
}

impl TripPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripPhase::Canceled | TripPhase::Ended)
    }
}

enum Command {
    Cancel,
    Finish,
}

/// Background poller for one trip request
pub struct TripMonitor {
    request_id: String,
    phase_rx: watch::Receiver<TripPhase>,
    command_tx: Sender<Command>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TripMonitor {
    /// Spawn the monitor for a request id. `search_timeout` bounds how long
    /// the request may sit unanswered before it is cancelled automatically.
    pub fn start(
        client: ApiClient,
        store: Arc<SessionStore>,
        request_id: String,
        poll_interval: Duration,
        search_timeout: Duration,
    ) -> Self {
        let (phase_tx, phase_rx) = watch::channel(TripPhase::Searching {
            remaining_secs: search_timeout.as_secs(),
        });
        let (command_tx, command_rx) = channel();
        let stop = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            client,
            store,
            request_id: request_id.clone(),
            phase_tx,
            command_rx,
            stop: Arc::clone(&stop),
            scheduler: PollScheduler::new(poll_interval),
            search_timeout,
            best_rank: Some(0),
            cancel_sent: false,
        };

        let handle = std::thread::Builder::new()
            .name(format!("trip-monitor-{}", request_id))
            .spawn(move || worker.run())
            .expect("failed to spawn trip monitor thread");

        info!(%request_id, "trip monitor started");
        Self {
            request_id,
            phase_rx,
            command_tx,
            stop,
            handle: Some(handle),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Current phase snapshot.
    pub fn phase(&self) -> TripPhase {
        self.phase_rx.borrow().clone()
    }

    /// A receiver other components can hold to observe phase changes.
    pub fn subscribe(&self) -> watch::Receiver<TripPhase> {
        self.phase_rx.clone()
    }

    /// Request cancellation. Safe to call any number of times; once the
    /// trip is cancelled further calls are no-ops.
    pub fn cancel(&self) {
        let _ = self.command_tx.send(Command::Cancel);
    }

    /// Mark the trip as finished and wind the monitor down.
    pub fn finish(&self) {
        let _ = self.command_tx.send(Command::Finish);
    }

    /// Stop polling without touching the request.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TripMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker {
    client: ApiClient,
    store: Arc<SessionStore>,
    request_id: String,
    phase_tx: watch::Sender<TripPhase>,
    command_rx: Receiver<Command>,
    stop: Arc<AtomicBool>,
    scheduler: PollScheduler,
    search_timeout: Duration,
    /// Highest lifecycle rank observed so far; lower ranks are stale
    best_rank: Option<u8>,
    cancel_sent: bool,
}

impl Worker {
    fn run(mut self) {
        let started = Instant::now();

        loop {
            if self.stop.load(Ordering::SeqCst) {
                return;
            }

            match self.command_rx.try_recv() {
                Ok(Command::Cancel) => {
                    if self.cancel_request() {
                        return;
                    }
                }
                Ok(Command::Finish) => {
                    let _ = self.phase_tx.send(TripPhase::Ended);
                    let _ = self.store.clear_active_request_id();
                    return;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => return,
            }

            if self.searching() {
                let remaining = self.search_timeout.saturating_sub(started.elapsed());
                let _ = self.phase_tx.send(TripPhase::Searching {
                    remaining_secs: remaining.as_secs(),
                });

                if remaining.is_zero() {
                    info!(request_id = %self.request_id, "driver search timed out");
                    if self.cancel_request() {
                        return;
                    }
                }
            }

            if self.scheduler.should_poll() {
                self.scheduler.record_poll();
                if self.poll(started) {
                    return;
                }
            }

            std::thread::sleep(TICK);
        }
    }

    fn searching(&self) -> bool {
        matches!(*self.phase_tx.borrow(), TripPhase::Searching { .. })
    }

    /// One poll round. Returns true when the monitor should exit.
    fn poll(&mut self, started: Instant) -> bool {
        let request = match self.client.get_request(&self.request_id) {
            Ok(request) => {
                self.scheduler.record_success();
                request
            }
            Err(e) => {
                warn!(request_id = %self.request_id, error = %e, "trip poll failed");
                self.scheduler.record_failure();
                return false;
            }
        };

        let status = request.status.clone();
        if status == RequestStatus::Canceled {
            info!(request_id = %self.request_id, "request cancelled remotely");
            self.finish_cancelled();
            return true;
        }

        let Some(rank) = status.rank() else {
            debug!(request_id = %self.request_id, status = %status, "ignoring unknown status");
            return false;
        };

        // The lifecycle never moves backward; a poll that raced an older
        // snapshot is dropped on the floor.
        if self.best_rank.is_some_and(|best| rank < best) {
            debug!(request_id = %self.request_id, status = %status, "ignoring stale status");
            return false;
        }
        self.best_rank = Some(rank);

        let phase = match status {
            RequestStatus::Process => TripPhase::Searching {
                remaining_secs: self
                    .search_timeout
                    .saturating_sub(started.elapsed())
                    .as_secs(),
            },
            RequestStatus::Accepted => TripPhase::DriverAssigned(request),
            RequestStatus::PickUp => TripPhase::Driving(request),
            _ => return false,
        };
        let _ = self.phase_tx.send(phase);
        false
    }

    /// The one cancellation path. Returns true when the monitor is done.
    fn cancel_request(&mut self) -> bool {
        if self.cancel_sent {
            return false;
        }

        match self
            .client
            .update_request_status(&self.request_id, &RequestStatus::Canceled)
        {
            Ok(()) => {
                self.cancel_sent = true;
                self.finish_cancelled();
                true
            }
            Err(e) => {
                warn!(request_id = %self.request_id, error = %e, "cancel failed, will retry on next command");
                false
            }
        }
    }

    fn finish_cancelled(&mut self) {
        if let Err(e) = self.store.clear_active_request_id() {
            warn!(error = %e, "failed to clear persisted request id");
        }
        let _ = self.phase_tx.send(TripPhase::Canceled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_terminal() {
        assert!(TripPhase::Canceled.is_terminal());
        assert!(TripPhase::Ended.is_terminal());
        assert!(!TripPhase::Searching { remaining_secs: 10 }.is_terminal());
    }

    #[test]
    fn test_searching_carries_remaining() {
        let phase = TripPhase::Searching { remaining_secs: 299 };
        match phase {
            TripPhase::Searching { remaining_secs } => assert_eq!(remaining_secs, 299),
            _ => panic!("expected Searching"),
        }
    }

    #[test]
    fn test_phases_with_payloads_compare_by_request() {
        let request: TripRequest = serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "userId": "u1",
            "status": "accepted",
        }))
        .unwrap();
        let assigned = TripPhase::DriverAssigned(request.clone());
        assert_eq!(assigned, TripPhase::DriverAssigned(request.clone()));
        assert_ne!(assigned, TripPhase::Driving(request));
    }
}
