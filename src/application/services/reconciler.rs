use crate::application::ports::{QueueStore, RemoteGateway, SessionProvider};
use crate::application::services::DashboardAggregator;
use crate::domain::entities::{ReconcileOutcome, ReconcileReport};
use crate::domain::value_objects::QueueKind;
use crate::shared::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Drains the durable queues against the remote service. Safe to invoke
/// from any number of triggers; overlapping calls are no-ops.
pub struct SyncReconciler {
    queues: Arc<dyn QueueStore>,
    remote: Arc<dyn RemoteGateway>,
    session: Arc<dyn SessionProvider>,
    dashboard: Arc<DashboardAggregator>,
    in_flight: AtomicBool,
    max_retries: u32,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SyncReconciler {
    pub fn new(
        queues: Arc<dyn QueueStore>,
        remote: Arc<dyn RemoteGateway>,
        session: Arc<dyn SessionProvider>,
        dashboard: Arc<DashboardAggregator>,
        max_retries: u32,
    ) -> Self {
        Self {
            queues,
            remote,
            session,
            dashboard,
            in_flight: AtomicBool::new(false),
            max_retries,
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// One reconciliation pass over every queue, FIFO within each. Each
    /// record is submitted independently; a failure never aborts the
    /// pass. The retained subset is re-persisted wholesale afterwards.
    pub async fn reconcile(&self) -> Result<ReconcileReport, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Reconciliation already in flight, skipping");
            return Ok(ReconcileReport::skipped(ReconcileOutcome::AlreadyRunning));
        }
        let _guard = InFlightGuard(&self.in_flight);

        if self.session.current_identity().await.is_none() {
            let mut still_pending = 0;
            for kind in QueueKind::ALL {
                still_pending += self.queues.load(kind).await?.len() as u32;
            }
            debug!(still_pending, "No authenticated identity, sync deferred");
            return Ok(ReconcileReport {
                committed: 0,
                still_pending,
                quarantined: 0,
                outcome: ReconcileOutcome::AuthUnavailable,
            });
        }

        let mut committed = 0;
        let mut still_pending = 0;
        let mut quarantined = 0;

        for kind in QueueKind::ALL {
            let snapshot = self.queues.load(kind).await?;
            if snapshot.is_empty() {
                continue;
            }

            let mut retained = Vec::new();
            for record in snapshot {
                if record.is_quarantined() {
                    quarantined += 1;
                    retained.push(record);
                    continue;
                }
                match self.remote.insert_record(&record).await {
                    Ok(confirmed) => {
                        committed += 1;
                        self.dashboard
                            .confirm_pending(&record.local_id, confirmed)
                            .await;
                    }
                    Err(AppError::ValidationError(reason)) => {
                        let next = record.rejected(self.max_retries, &reason);
                        if next.is_quarantined() {
                            quarantined += 1;
                            warn!(
                                local_id = %next.local_id,
                                %reason,
                                "Record quarantined after repeated rejection"
                            );
                        } else {
                            still_pending += 1;
                        }
                        self.dashboard.note_retry(&next).await;
                        retained.push(next);
                    }
                    Err(err) => {
                        still_pending += 1;
                        warn!(local_id = %record.local_id, error = %err, "Record not committed, will retry");
                        retained.push(record);
                    }
                }
            }
            self.queues.save(kind, &retained).await?;
        }

        debug!(committed, still_pending, quarantined, "Reconciliation pass complete");
        Ok(ReconcileReport {
            committed,
            still_pending,
            quarantined,
            outcome: ReconcileOutcome::Completed,
        })
    }

    /// Periodic trigger.
    pub fn schedule(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let reconciler = self;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(err) = reconciler.reconcile().await {
                    error!("Scheduled sync error: {}", err);
                }
            }
        })
    }

    /// Trigger driven by connectivity transitions (or any other signal
    /// source). Each received unit fires one pass.
    pub fn drive_on_signal(self: Arc<Self>, mut signals: UnboundedReceiver<()>) -> JoinHandle<()> {
        let reconciler = self;
        tokio::spawn(async move {
            while signals.recv().await.is_some() {
                match reconciler.reconcile().await {
                    Ok(report) => debug!(?report.outcome, "Signal-triggered sync finished"),
                    Err(err) => error!("Signal-triggered sync error: {}", err),
                }
            }
        })
    }
}
