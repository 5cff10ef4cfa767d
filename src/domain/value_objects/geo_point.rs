use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("Latitude out of range: {latitude}"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("Longitude out of range: {longitude}"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}
