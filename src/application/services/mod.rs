pub mod capture;
pub mod dashboard;
pub mod listener;
pub mod reconciler;

pub use capture::CaptureService;
pub use dashboard::DashboardAggregator;
pub use listener::{RealtimeListener, SubscriptionState};
pub use reconciler::SyncReconciler;
