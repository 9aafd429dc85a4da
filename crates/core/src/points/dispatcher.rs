//! Post-commit award queue.
//!
//! Handlers enqueue an award after their primary write commits and return
//! immediately. A single worker drains the queue into the ledger, so a slow or
//! failing points store never delays or fails a financial write.

use std::sync::Arc;

use kapsa_shared::types::UserId;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{info, warn};

use super::level::PointAction;
use super::service::PointsLedger;

/// An award waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardRequest {
    /// Recipient.
    pub user_id: UserId,
    /// Action that earned the points.
    pub action: PointAction,
}

/// Sending half of the award queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AwardDispatcher {
    tx: mpsc::Sender<AwardRequest>,
}

/// Receiving half of the award queue.
#[derive(Debug)]
pub struct AwardWorker {
    ledger: Arc<PointsLedger>,
    rx: mpsc::Receiver<AwardRequest>,
}

/// Counters reported when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Awards written to the store.
    pub applied: u64,
    /// Awards that failed or were rejected.
    pub failed: u64,
}

impl AwardDispatcher {
    /// Creates a queue of `capacity` pending awards feeding `ledger`.
    #[must_use]
    pub fn channel(ledger: Arc<PointsLedger>, capacity: usize) -> (Self, AwardWorker) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, AwardWorker { ledger, rx })
    }

    /// Enqueues an award without waiting.
    ///
    /// Returns false if the award was dropped because the queue is full or the
    /// worker has stopped.
    pub fn dispatch(&self, user_id: UserId, action: PointAction) -> bool {
        match self.tx.try_send(AwardRequest { user_id, action }) {
            Ok(()) => true,
            Err(TrySendError::Full(request)) => {
                warn!(
                    user_id = %request.user_id,
                    action = %request.action,
                    "Award queue full, dropping award"
                );
                false
            }
            Err(TrySendError::Closed(request)) => {
                warn!(
                    user_id = %request.user_id,
                    action = %request.action,
                    "Award worker stopped, dropping award"
                );
                false
            }
        }
    }
}

impl AwardWorker {
    /// Applies queued awards until every dispatcher has been dropped.
    ///
    /// Awards already queued at that point are still applied.
    pub async fn run(mut self) -> WorkerStats {
        let mut stats = WorkerStats::default();

        while let Some(request) = self.rx.recv().await {
            match self.ledger.award(request.user_id, request.action).await {
                Some(_) => stats.applied += 1,
                None => stats.failed += 1,
            }
        }

        info!(
            applied = stats.applied,
            failed = stats.failed,
            "Award worker stopped"
        );
        stats
    }
}
