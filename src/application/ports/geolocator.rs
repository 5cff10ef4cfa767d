use crate::domain::value_objects::GeoPoint;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// On-demand best-effort coordinate fetch. The capture service bounds the
/// wait; implementations may block for as long as the platform does.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, AppError>;
}
