use std::collections::HashMap;

use serde::Deserialize;

use crate::model::{Candidate, Coord};

#[derive(Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One Overpass element. Nodes carry `lat`/`lon` directly; ways and
/// relations carry a `center` when the query asks for one.
#[derive(Deserialize)]
pub struct Element {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl Element {
    pub fn position(&self) -> Option<Coord> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coord { lat, lon }),
            _ => self.center.as_ref().map(|c| Coord { lat: c.lat, lon: c.lon }),
        }
    }

    /// Elements without a name or a resolvable position are not usable.
    pub fn into_candidate(self) -> Option<Candidate> {
        let coords = self.position()?;
        let name = self.tags.get("name")?.clone();

        Candidate::new(name, coords, self.tags)
    }
}
