use std::sync::Arc;

use axum::extract::{Json, Query, State};

use crate::dispatch::PriorityFactors;
use crate::finder::HospitalFinder;
use crate::model::Coord;
use crate::state::AppState;

use super::types::*;

pub type Result<T> = std::result::Result<T, ErrorResponse>;

fn coord(lat: f64, lon: f64) -> Result<Coord> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ErrorResponse::new(format!("latitude {lat} is out of range")));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ErrorResponse::new(format!("longitude {lon} is out of range")));
    }

    Ok(Coord { lat, lon })
}

/// Hospitals around the query coordinate, or around the tracker's current
/// location when none is given. Remote failures never surface here: the
/// finder degrades to its fallback list.
pub async fn get_hospitals(
    State(app): State<Arc<AppState>>,
    State(finder): State<Arc<HospitalFinder>>,
    Query(q): Query<HospitalsQuery>,
) -> Result<Json<HospitalsResponse>> {
    let center = match (q.lat, q.lon) {
        (Some(lat), Some(lon)) => coord(lat, lon)?,
        (None, None) => app.tracker.current(),
        _ => return Err(ErrorResponse::new("lat and lon must be supplied together")),
    };

    let hospitals = finder.find(center, app.as_ref()).await;
    Ok(Json(HospitalsResponse { hospitals }))
}

pub async fn update_location(
    State(app): State<Arc<AppState>>,
    State(finder): State<Arc<HospitalFinder>>,
    Json(r): Json<LocationUpdateRequest>,
) -> Result<Json<HospitalsResponse>> {
    let at = coord(r.lat, r.lon)?;
    app.tracker.update(at);

    let hospitals = finder.find(at, app.as_ref()).await;
    Ok(Json(HospitalsResponse { hospitals }))
}

pub async fn start_emergency(
    State(app): State<Arc<AppState>>,
) -> Result<Json<DispatchStatusResponse>> {
    let factors = PriorityFactors::sample(jiff::Zoned::now().hour());

    let started = app.dispatcher.lock().unwrap().request(factors);
    if !started {
        return Err(ErrorResponse::new("emergency already in progress"));
    }

    log::info!("emergency started, priority {:?}", app.dispatcher.lock().unwrap().priority());
    spawn_timeline(app.clone());

    Ok(Json(status_of(&app)))
}

pub async fn trigger_sos(State(app): State<Arc<AppState>>) -> Json<DispatchStatusResponse> {
    app.dispatcher.lock().unwrap().sos();
    log::info!("SOS alert raised");

    Json(status_of(&app))
}

pub async fn get_status(State(app): State<Arc<AppState>>) -> Json<DispatchStatusResponse> {
    Json(status_of(&app))
}

fn status_of(app: &AppState) -> DispatchStatusResponse {
    let dispatcher = app.dispatcher.lock().unwrap();

    DispatchStatusResponse {
        phase: dispatcher.phase(),
        priority: dispatcher.priority(),
        updates: dispatcher.updates().to_vec(),
    }
}

/// Drives the dispatch timeline: sleeps until each queued event is due and
/// applies it, until the queue is dry.
fn spawn_timeline(app: Arc<AppState>) {
    tokio::spawn(async move {
        loop {
            let delay = app.dispatcher.lock().unwrap().next_delay();
            let Some(delay) = delay else { break };

            tokio::time::sleep(delay).await;

            let update = app.dispatcher.lock().unwrap().advance();
            if let Some(update) = update {
                log::info!("dispatch update: {} ({})", update.title, update.detail);
            }
        }
    });
}
