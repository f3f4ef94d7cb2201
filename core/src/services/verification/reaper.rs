//! Expiry reaper for pending verifications
//!
//! A single background task per registry keeps a min-heap of deadlines fed
//! through a channel. When a deadline (plus a short grace) passes, the reaper
//! re-checks the entry under the registry lock and removes it only if it is
//! still the same attempt and has expired. Firings for entries that were
//! consumed, removed or replaced in the meantime do nothing.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::PendingVerification;
use crate::domain::value_objects::UserId;

const MIN_REARM_DELAY: Duration = Duration::from_millis(1);

pub(crate) type PendingEntries = Arc<Mutex<HashMap<UserId, PendingVerification>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    deadline: Instant,
    user_id: UserId,
    id: Uuid,
}

/// Sender side used by the registry to schedule entries
#[derive(Debug, Clone)]
pub struct ReaperHandle {
    tx: mpsc::UnboundedSender<Scheduled>,
}

impl ReaperHandle {
    /// Schedule a re-check of `(user_id, id)` at `deadline`
    pub fn schedule(&self, user_id: UserId, id: Uuid, deadline: Instant) {
        if self.tx.send(Scheduled { deadline, user_id, id }).is_err() {
            warn!(
                user_id = %user_id,
                event = "reaper_unavailable",
                "Expiry reaper has stopped; entry will be removed lazily"
            );
        }
    }
}

/// Background task removing expired pending verifications
pub struct ExpiryReaper {
    entries: PendingEntries,
    rx: mpsc::UnboundedReceiver<Scheduled>,
    queue: BinaryHeap<Reverse<Scheduled>>,
    grace: Duration,
}

impl ExpiryReaper {
    /// Spawn the reaper on the current tokio runtime
    ///
    /// The task exits once every `ReaperHandle` has been dropped.
    pub(crate) fn spawn(entries: PendingEntries, grace: Duration) -> (ReaperHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let reaper = Self {
            entries,
            rx,
            queue: BinaryHeap::new(),
            grace,
        };
        let task = tokio::spawn(reaper.run());
        (ReaperHandle { tx }, task)
    }

    async fn run(mut self) {
        debug!(event = "reaper_started", "Expiry reaper started");
        loop {
            let next_wake = self
                .queue
                .peek()
                .and_then(|Reverse(s)| s.deadline.checked_add(self.grace));
            tokio::select! {
                request = self.rx.recv() => match request {
                    Some(scheduled) => self.queue.push(Reverse(scheduled)),
                    None => break,
                },
                _ = wait_until(next_wake) => {
                    let reaped = self.reap_due().await;
                    if reaped > 0 {
                        debug!(reaped, event = "reaper_cycle", "Removed expired verification codes");
                    }
                }
            }
        }
        debug!(event = "reaper_stopped", "Expiry reaper stopped");
    }

    /// Re-check every due entry, returning how many were removed
    async fn reap_due(&mut self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let mut reaped = 0;
        let mut rearm = Vec::new();

        while let Some(Reverse(scheduled)) = self.queue.peek().copied() {
            match scheduled.deadline.checked_add(self.grace) {
                Some(due) if due <= now => {}
                _ => break,
            }
            self.queue.pop();

            let Some(entry) = entries.get(&scheduled.user_id) else {
                continue;
            };
            if entry.id != scheduled.id {
                // Replaced by a newer code with its own schedule
                continue;
            }
            if entry.is_expired_at(now) {
                entries.remove(&scheduled.user_id);
                reaped += 1;
                debug!(
                    user_id = %scheduled.user_id,
                    event = "otp_reaped",
                    "Removed expired verification code"
                );
            } else {
                rearm.push(Scheduled {
                    deadline: entry.expires_at.max(now + MIN_REARM_DELAY),
                    ..scheduled
                });
            }
        }

        self.queue.extend(rearm.into_iter().map(Reverse));
        reaped
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
