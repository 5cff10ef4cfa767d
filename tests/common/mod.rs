#![allow(dead_code)]

use async_trait::async_trait;
use canvass::application::ports::{
    ChangeStream, ChannelError, Geolocator, RealtimeChannel, RemoteGateway, SessionIdentity,
    SessionProvider,
};
use canvass::domain::entities::{ChangeEvent, PendingRecord, RemoteRecord, SurveyRecord};
use canvass::domain::value_objects::{
    Collection, GeoPoint, RecordPayload, SyncStatus, TargetId,
};
use canvass::shared::config::AppConfig;
use canvass::shared::error::AppError;
use chrono::Utc;
use futures::StreamExt;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Mutex;

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.sync.auto_sync = false;
    config.sync.settle_delay_ms = 10;
    config.sync.reconnect_delay_secs = 1;
    config.sync.refetch_interval_secs = 3600;
    config.sync.location_timeout_secs = 1;
    config
}

pub fn survey_id(value: &str) -> TargetId {
    TargetId::new(value.into()).expect("target id")
}

pub fn answers(json: &str) -> RecordPayload {
    RecordPayload::from_json_str(json).expect("payload")
}

/// Remote service double. Accepts everything unless the target id is in
/// the reject (validation) or unreachable (network) set; echoes the local
/// id back as the reconciliation key.
#[derive(Default)]
pub struct FakeRemote {
    pub reject: HashSet<String>,
    pub unreachable: HashSet<String>,
    pub inserted: Mutex<Vec<RemoteRecord>>,
    pub served_responses: Mutex<Vec<RemoteRecord>>,
    pub served_surveys: Mutex<Vec<SurveyRecord>>,
}

impl FakeRemote {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(targets: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            reject: targets.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        })
    }

    pub fn confirmation_of(record: &PendingRecord) -> RemoteRecord {
        RemoteRecord {
            id: format!("srv-{}", record.local_id),
            client_ref: Some(record.local_id.clone()),
            target_id: record.target_id.clone(),
            payload: record.payload.clone(),
            location: record.location,
            sync_status: SyncStatus::Synced,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl RemoteGateway for FakeRemote {
    async fn insert_record(&self, record: &PendingRecord) -> Result<RemoteRecord, AppError> {
        if self.reject.contains(record.target_id.as_str()) {
            return Err(AppError::ValidationError("rejected by server".into()));
        }
        if self.unreachable.contains(record.target_id.as_str()) {
            return Err(AppError::Network("connection refused".into()));
        }
        let confirmed = Self::confirmation_of(record);
        self.inserted.lock().await.push(confirmed.clone());
        Ok(confirmed)
    }

    async fn fetch_responses(&self) -> Result<Vec<RemoteRecord>, AppError> {
        Ok(self.served_responses.lock().await.clone())
    }

    async fn fetch_surveys(&self) -> Result<Vec<SurveyRecord>, AppError> {
        Ok(self.served_surveys.lock().await.clone())
    }
}

pub struct FakeSession(pub Option<SessionIdentity>);

impl FakeSession {
    pub fn signed_in() -> Arc<Self> {
        Arc::new(Self(Some(SessionIdentity {
            user_id: "surveyor-1".into(),
        })))
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self(None))
    }
}

#[async_trait]
impl SessionProvider for FakeSession {
    async fn current_identity(&self) -> Option<SessionIdentity> {
        self.0.clone()
    }
}

/// Push channel double: the test holds the sending half and injects
/// events; each subscribe call gets a fresh stream for its collection.
#[derive(Default)]
pub struct FakeChannel {
    senders: Mutex<Vec<(Collection, UnboundedSender<ChangeEvent>)>>,
}

impl FakeChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn push(&self, event: ChangeEvent) {
        let collection = event.collection();
        let senders = self.senders.lock().await;
        for (subscribed, tx) in senders.iter() {
            if *subscribed == collection {
                let _ = tx.send(event.clone());
            }
        }
    }
}

#[async_trait]
impl RealtimeChannel for FakeChannel {
    async fn subscribe(
        &self,
        collection: Collection,
        _filter: Option<TargetId>,
    ) -> Result<ChangeStream, ChannelError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().await.push((collection, tx));
        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });
        Ok(stream.boxed())
    }
}

pub struct FakeGeolocator(pub Option<GeoPoint>);

impl FakeGeolocator {
    pub fn fixed() -> Arc<Self> {
        Arc::new(Self(Some(
            GeoPoint::new(35.68, 139.69).expect("valid coordinates"),
        )))
    }
}

#[async_trait]
impl Geolocator for FakeGeolocator {
    async fn current_position(&self) -> Result<GeoPoint, AppError> {
        self.0
            .ok_or_else(|| AppError::Internal("no gps hardware".into()))
    }
}
