#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use axum::extract::Query;
use axum::response::Response;
use uuid::Uuid;

use resq_gateway::finder::HospitalDisplay;
use resq_gateway::model::{Coord, RankedHospital};

/// Spawns a local stand-in for the Overpass endpoint. `respond` receives the
/// raw `data` query parameter and produces the HTTP response.
pub async fn spawn_overpass<F, Fut>(respond: F) -> String
where
    F: Fn(String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let handler = move |Query(params): Query<HashMap<String, String>>| {
        let respond = respond.clone();
        async move { respond(params.get("data").cloned().unwrap_or_default()).await }
    };

    let app = axum::Router::new().route("/api/interpreter", axum::routing::get(handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/interpreter")
}

/// Overpass-shaped body of named hospital nodes.
pub fn overpass_body(nodes: &[(&str, f64, f64)]) -> serde_json::Value {
    let elements: Vec<_> = nodes
        .iter()
        .enumerate()
        .map(|(id, (name, lat, lon))| {
            serde_json::json!({
                "type": "node",
                "id": id + 1,
                "lat": lat,
                "lon": lon,
                "tags": { "name": name, "amenity": "hospital" }
            })
        })
        .collect();

    serde_json::json!({ "version": 0.6, "generator": "test", "elements": elements })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Loading,
    Rendered(Vec<String>),
    Empty,
}

/// Display collaborator that records what the finder asked it to show.
#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_rendered(&self) -> Option<Vec<String>> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                DisplayEvent::Rendered(names) => Some(names),
                _ => None,
            })
    }
}

impl HospitalDisplay for RecordingDisplay {
    fn render_loading(&self) {
        self.events.lock().unwrap().push(DisplayEvent::Loading);
    }

    fn render(&self, hospitals: &[RankedHospital]) {
        let names = hospitals.iter().map(|h| h.name.clone()).collect();
        self.events.lock().unwrap().push(DisplayEvent::Rendered(names));
    }

    fn render_empty(&self) {
        self.events.lock().unwrap().push(DisplayEvent::Empty);
    }

    fn place_marker(&self, _at: Coord, _label: &str) -> Uuid {
        Uuid::new_v4()
    }

    fn remove_marker(&self, _handle: Uuid) {}
}
