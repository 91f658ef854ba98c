use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

use crate::dispatch::Dispatcher;
use crate::finder::HospitalDisplay;
use crate::location::LocationTracker;
use crate::model::{Coord, RankedHospital};

/// A map marker placed for a rendered hospital.
#[derive(Serialize, Clone, Debug)]
pub struct Marker {
    pub at: Coord,
    pub label: String,
}

/// What the hospital panel currently shows.
#[derive(Serialize, Clone, Debug, Default)]
pub struct Panel {
    pub loading: bool,
    pub hospitals: Vec<RankedHospital>,
    pub markers: HashMap<Uuid, Marker>,
}

/// All mutable application state, passed explicitly through the router
/// instead of living on a long-lived global object. The state itself is the
/// display collaborator: lookups render into the panel and markers.
#[derive(Default)]
pub struct AppState {
    pub tracker: LocationTracker,
    pub dispatcher: Mutex<Dispatcher>,
    panel: Mutex<Panel>,
}

impl AppState {
    pub fn panel(&self) -> Panel {
        self.panel.lock().unwrap().clone()
    }
}

impl HospitalDisplay for AppState {
    fn render_loading(&self) {
        self.panel.lock().unwrap().loading = true;
    }

    fn render(&self, hospitals: &[RankedHospital]) {
        let mut panel = self.panel.lock().unwrap();

        // Replace, never append: loading indicator and old markers go first.
        panel.loading = false;
        panel.markers.clear();
        panel.hospitals = hospitals.to_vec();

        for hospital in hospitals {
            let marker = Marker {
                at: hospital.coords,
                label: hospital.name.clone(),
            };
            panel.markers.insert(Uuid::new_v4(), marker);
        }
    }

    fn render_empty(&self) {
        let mut panel = self.panel.lock().unwrap();

        panel.loading = false;
        panel.markers.clear();
        panel.hospitals.clear();
    }

    fn place_marker(&self, at: Coord, label: &str) -> Uuid {
        let handle = Uuid::new_v4();
        let marker = Marker { at, label: label.to_string() };

        self.panel.lock().unwrap().markers.insert(handle, marker);
        handle
    }

    fn remove_marker(&self, handle: Uuid) {
        self.panel.lock().unwrap().markers.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::fallback_hospitals;
    use crate::location::DEFAULT_COORD;

    #[test]
    fn render_replaces_list_and_markers() {
        let state = AppState::default();
        state.render_loading();
        assert!(state.panel().loading);

        let first = fallback_hospitals(DEFAULT_COORD);
        state.render(&first);

        let panel = state.panel();
        assert!(!panel.loading);
        assert_eq!(panel.hospitals.len(), 3);
        assert_eq!(panel.markers.len(), 3);

        let second = fallback_hospitals(Coord { lat: 13.0, lon: 77.6 });
        state.render(&second[..1]);

        let panel = state.panel();
        assert_eq!(panel.hospitals.len(), 1);
        assert_eq!(panel.markers.len(), 1);
    }

    #[test]
    fn render_empty_clears_everything() {
        let state = AppState::default();
        state.render(&fallback_hospitals(DEFAULT_COORD));

        state.render_empty();

        let panel = state.panel();
        assert!(!panel.loading);
        assert!(panel.hospitals.is_empty());
        assert!(panel.markers.is_empty());
    }

    #[test]
    fn markers_are_removable_by_handle() {
        let state = AppState::default();

        let handle = state.place_marker(DEFAULT_COORD, "Your Location");
        assert_eq!(state.panel().markers[&handle].label, "Your Location");

        state.remove_marker(handle);
        assert!(state.panel().markers.is_empty());
    }
}
