mod change_event;
mod dashboard;
mod pending_record;
mod reconcile_report;
mod remote_record;
mod survey_record;

pub use change_event::ChangeEvent;
pub use dashboard::{DashboardEntry, DashboardSnapshot};
pub use pending_record::PendingRecord;
pub use reconcile_report::{ReconcileOutcome, ReconcileReport};
pub use remote_record::RemoteRecord;
pub use survey_record::SurveyRecord;
