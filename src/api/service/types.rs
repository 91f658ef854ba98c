use serde::{Deserialize, Serialize};

use crate::dispatch::{Phase, PriorityLevel, StatusUpdate};
use crate::model::RankedHospital;

#[derive(Serialize, Deserialize)]
pub struct LocationUpdateRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize, Default)]
pub struct HospitalsQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Serialize, Deserialize)]
pub struct HospitalsResponse {
    pub hospitals: Vec<RankedHospital>,
}

#[derive(Serialize, Deserialize)]
pub struct DispatchStatusResponse {
    pub phase: Phase,
    pub priority: PriorityLevel,
    pub updates: Vec<StatusUpdate>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
