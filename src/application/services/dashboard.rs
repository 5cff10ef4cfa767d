use crate::application::ports::RemoteGateway;
use crate::domain::entities::{
    ChangeEvent, DashboardEntry, DashboardSnapshot, PendingRecord, RemoteRecord, SurveyRecord,
};
use crate::domain::value_objects::LocalId;
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Projection {
    /// Newest first. Keyed by local id (pending) or server id (confirmed);
    /// a logical record never appears under both at once.
    entries: Vec<DashboardEntry>,
    surveys: Vec<SurveyRecord>,
    new_since_last_view: u32,
    last_update: Option<DateTime<Utc>>,
}

impl Projection {
    fn confirmed_position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(
            |entry| matches!(entry, DashboardEntry::Confirmed(record) if record.id == id),
        )
    }

    fn pending_position(&self, local_id: &LocalId) -> Option<usize> {
        self.entries.iter().position(
            |entry| matches!(entry, DashboardEntry::Pending(record) if &record.local_id == local_id),
        )
    }

    fn touch(&mut self) {
        self.last_update = Some(Utc::now());
    }

    /// Insert a confirmed record, replacing the matching optimistic entry
    /// when the echoed reconciliation key identifies one. This is the sole
    /// enforcement point of the no-duplicate invariant.
    fn insert_confirmed(&mut self, record: RemoteRecord) -> bool {
        if self.confirmed_position(&record.id).is_some() {
            return false;
        }
        if let Some(client_ref) = record.client_ref.clone() {
            if let Some(pos) = self.pending_position(&client_ref) {
                self.entries[pos] = DashboardEntry::Confirmed(record);
                self.touch();
                return true;
            }
        }
        self.entries.insert(0, DashboardEntry::Confirmed(record));
        self.touch();
        true
    }

    fn upsert_survey(&mut self, survey: SurveyRecord) {
        match self.surveys.iter().position(|s| s.id == survey.id) {
            Some(pos) => self.surveys[pos] = survey,
            None => self.surveys.insert(0, survey),
        }
        self.touch();
    }
}

/// Single read model merging realtime output with locally-queued records.
pub struct DashboardAggregator {
    remote: Arc<dyn RemoteGateway>,
    inner: RwLock<Projection>,
}

impl DashboardAggregator {
    pub fn new(remote: Arc<dyn RemoteGateway>) -> Self {
        Self {
            remote,
            inner: RwLock::new(Projection::default()),
        }
    }

    /// Seed the projection with queue contents loaded at startup.
    /// `records` arrive in FIFO capture order.
    pub async fn restore_pending(&self, records: Vec<PendingRecord>) {
        let mut inner = self.inner.write().await;
        for record in records {
            if inner.pending_position(&record.local_id).is_none() {
                inner.entries.insert(0, DashboardEntry::Pending(record));
            }
        }
        inner.touch();
    }

    /// Optimistic entry for a freshly captured record.
    pub async fn record_captured(&self, record: PendingRecord) {
        let mut inner = self.inner.write().await;
        inner.entries.insert(0, DashboardEntry::Pending(record));
        inner.touch();
    }

    /// Replace the optimistic entry once the reconciler gets the write
    /// acknowledgment. The realtime channel may have beaten us to it;
    /// falling through to plain insert semantics is normal, not an error.
    pub async fn confirm_pending(&self, local_id: &LocalId, confirmed: RemoteRecord) {
        let mut inner = self.inner.write().await;
        match inner.pending_position(local_id) {
            Some(pos) => {
                inner.entries[pos] = DashboardEntry::Confirmed(confirmed);
                inner.touch();
            }
            None => {
                inner.insert_confirmed(confirmed);
            }
        }
    }

    /// Reconciler bookkeeping: carry an advanced retry state into the
    /// projection so quarantined records show up in the counts.
    pub async fn note_retry(&self, record: &PendingRecord) {
        let mut inner = self.inner.write().await;
        if let Some(pos) = inner.pending_position(&record.local_id) {
            inner.entries[pos] = DashboardEntry::Pending(record.clone());
            inner.touch();
        }
    }

    pub async fn apply_event(&self, event: ChangeEvent) {
        let mut inner = self.inner.write().await;
        match event {
            ChangeEvent::ResponseInserted(record) => {
                if inner.insert_confirmed(record) {
                    inner.new_since_last_view += 1;
                }
            }
            ChangeEvent::ResponseUpdated(record) => {
                match inner.confirmed_position(&record.id) {
                    Some(pos) => inner.entries[pos] = DashboardEntry::Confirmed(record),
                    None => {
                        inner.entries.insert(0, DashboardEntry::Confirmed(record));
                    }
                }
                inner.touch();
            }
            ChangeEvent::ResponseDeleted { id } => {
                inner.entries.retain(
                    |entry| !matches!(entry, DashboardEntry::Confirmed(record) if record.id == id),
                );
                inner.touch();
            }
            ChangeEvent::SurveyInserted(survey) | ChangeEvent::SurveyUpdated(survey) => {
                inner.upsert_survey(survey);
            }
            ChangeEvent::SurveyDeleted { id } => {
                inner.surveys.retain(|survey| survey.id != id);
                inner.touch();
            }
        }
    }

    /// Resets the unseen counter. The only place it resets; arriving data
    /// never clears it silently.
    pub async fn acknowledge_new(&self) {
        let mut inner = self.inner.write().await;
        inner.new_since_last_view = 0;
    }

    /// Full refetch of both collections, used as the recovery path when
    /// the realtime channel is suspected stale. Pending entries whose
    /// reconciliation key shows up in the fetched set are dropped in favor
    /// of the confirmed rows; the rest survive untouched.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let surveys = self.remote.fetch_surveys().await?;
        let responses = self.remote.fetch_responses().await?;

        let confirmed_refs: HashSet<&str> = responses
            .iter()
            .filter_map(|record| record.client_ref.as_ref().map(|id| id.as_str()))
            .collect();

        let mut inner = self.inner.write().await;
        let mut rebuilt: Vec<DashboardEntry> = inner
            .entries
            .iter()
            .filter(|entry| match entry {
                DashboardEntry::Pending(record) => {
                    !confirmed_refs.contains(record.local_id.as_str())
                }
                DashboardEntry::Confirmed(_) => false,
            })
            .cloned()
            .collect();
        rebuilt.extend(responses.into_iter().map(DashboardEntry::Confirmed));

        inner.entries = rebuilt;
        inner.surveys = surveys;
        inner.touch();
        Ok(())
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let inner = self.inner.read().await;
        let mut pending_count = 0;
        let mut synced_count = 0;
        let mut quarantined_count = 0;
        for entry in &inner.entries {
            match entry {
                DashboardEntry::Pending(record) if record.is_quarantined() => {
                    quarantined_count += 1
                }
                DashboardEntry::Pending(_) => pending_count += 1,
                DashboardEntry::Confirmed(_) => synced_count += 1,
            }
        }
        DashboardSnapshot {
            records: inner.entries.clone(),
            surveys: inner.surveys.clone(),
            pending_count,
            synced_count,
            quarantined_count,
            new_since_last_view: inner.new_since_last_view,
            last_update: inner.last_update,
        }
    }

    pub async fn pending_count(&self) -> u32 {
        self.snapshot().await.pending_count
    }
}
