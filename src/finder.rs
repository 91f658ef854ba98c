use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::api::overpass;
use crate::cache::{self, HospitalCache};
use crate::model::{Candidate, Coord, RankedHospital};

pub const SEARCH_RADIUS_M: u32 = 3000;
pub const MAX_RESULTS: usize = 5;

const FALLBACK: [(&str, f64, f64); 3] = [
    ("General Hospital", 0.001, 0.001),
    ("City Medical Center", -0.001, -0.001),
    ("District Hospital", 0.002, -0.002),
];

/// Consumer of lookup results: the hospital list panel and the map markers.
/// `render` replaces the previous list and markers, it never appends.
pub trait HospitalDisplay: Send + Sync {
    fn render_loading(&self);
    fn render(&self, hospitals: &[RankedHospital]);
    fn render_empty(&self);
    fn place_marker(&self, at: Coord, label: &str) -> Uuid;
    fn remove_marker(&self, handle: Uuid);
}

/// Ranked hospital discovery around a coordinate. Lookups go to the Overpass
/// client with a bounded timeout; results are cached per grid cell, and any
/// failure or empty response degrades to the static fallback list. `find`
/// never returns an error.
pub struct HospitalFinder {
    client: overpass::Client,
    cache: HospitalCache,
    next_seq: AtomicU64,
    last_applied: AtomicU64,
}

impl HospitalFinder {
    pub fn new(client: overpass::Client, cache: HospitalCache) -> Self {
        Self {
            client,
            cache,
            next_seq: AtomicU64::new(0),
            last_applied: AtomicU64::new(0),
        }
    }

    pub async fn find(&self, center: Coord, display: &dyn HospitalDisplay) -> Vec<RankedHospital> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let key = cache::cell_key(center);

        // Stale-while-revalidate: a cached cell is shown right away and the
        // remote lookup still runs.
        if let Some(cached) = self.cache.get(&key) {
            self.apply(seq, &cached, display);
        }

        display.render_loading();

        let hospitals = match self.client.hospitals_around(center, SEARCH_RADIUS_M).await {
            Ok(elements) => {
                let ranked = rank(center, elements);
                if ranked.is_empty() {
                    log::info!("no usable hospitals around {key}, using fallback list");
                    fallback_hospitals(center)
                } else {
                    if let Err(e) = self.cache.put(&key, &ranked) {
                        log::warn!("hospital cache write failed for {key}: {e}");
                    }
                    ranked
                }
            }
            Err(e) => {
                log::warn!("hospital lookup failed around {key}: {e}");
                fallback_hospitals(center)
            }
        };

        self.apply(seq, &hospitals, display);
        hospitals
    }

    /// Results are applied only if no later lookup rendered first, so a
    /// superseded request resolving late cannot show a stale list.
    fn apply(&self, seq: u64, hospitals: &[RankedHospital], display: &dyn HospitalDisplay) {
        let newest = self.last_applied.fetch_max(seq, Ordering::SeqCst);
        if seq < newest {
            log::debug!("dropping result of superseded lookup #{seq}");
            return;
        }

        if hospitals.is_empty() {
            display.render_empty();
        } else {
            display.render(hospitals);
        }
    }
}

/// Resolve, measure, and order usable elements: ascending distance, ties in
/// discovery order, at most [`MAX_RESULTS`] entries.
pub fn rank(center: Coord, elements: Vec<overpass::types::Element>) -> Vec<RankedHospital> {
    let mut ranked: Vec<RankedHospital> = elements
        .into_iter()
        .filter_map(overpass::types::Element::into_candidate)
        .map(|candidate| candidate.ranked(center))
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(MAX_RESULTS);
    ranked
}

/// Synthetic hospitals offset from `center`, used whenever the live source
/// yields nothing. All are tagged as hospitals and therefore "Open".
pub fn fallback_hospitals(center: Coord) -> Vec<RankedHospital> {
    FALLBACK
        .iter()
        .filter_map(|&(name, d_lat, d_lon)| {
            let coords = Coord {
                lat: center.lat + d_lat,
                lon: center.lon + d_lon,
            };
            let tags = HashMap::from([("amenity".to_string(), "hospital".to_string())]);

            Candidate::new(name, coords, tags)
        })
        .map(|candidate| candidate.ranked(center))
        .collect()
}
