use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo;

/// WGS-84 decimal degrees.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// A hospital as discovered (remote element or fallback entry), before
/// ranking. Construction guarantees a non-empty name and a resolved
/// coordinate.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub name: String,
    pub coords: Coord,
    pub tags: HashMap<String, String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, coords: Coord, tags: HashMap<String, String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }

        Some(Self { name, coords, tags })
    }

    pub fn status(&self) -> HospitalStatus {
        let tagged = |key: &str| self.tags.get(key).is_some_and(|v| v == "hospital");

        if tagged("amenity") || tagged("healthcare") {
            HospitalStatus::Open
        } else {
            HospitalStatus::Unknown
        }
    }

    pub fn ranked(self, from: Coord) -> RankedHospital {
        let status = self.status();

        RankedHospital {
            name: self.name,
            coords: self.coords,
            distance_km: geo::haversine_km(from, self.coords),
            status,
            tags: self.tags,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HospitalStatus {
    Open,
    #[serde(rename = "Status Unknown")]
    Unknown,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RankedHospital {
    pub name: String,
    pub coords: Coord,

    #[serde(rename = "distanceKm")]
    pub distance_km: f64,

    pub status: HospitalStatus,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const AT: Coord = Coord { lat: 12.97, lon: 77.59 };

    #[test]
    fn amenity_hospital_is_open() {
        let candidate = Candidate::new("A", AT, tags(&[("amenity", "hospital")])).unwrap();
        assert_eq!(candidate.status(), HospitalStatus::Open);
    }

    #[test]
    fn healthcare_hospital_is_open() {
        let candidate = Candidate::new("A", AT, tags(&[("healthcare", "hospital")])).unwrap();
        assert_eq!(candidate.status(), HospitalStatus::Open);
    }

    #[test]
    fn other_tags_are_status_unknown() {
        let candidate = Candidate::new("A", AT, tags(&[("amenity", "clinic")])).unwrap();
        assert_eq!(candidate.status(), HospitalStatus::Unknown);

        let untagged = Candidate::new("B", AT, HashMap::new()).unwrap();
        assert_eq!(untagged.status(), HospitalStatus::Unknown);
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(Candidate::new("", AT, HashMap::new()).is_none());
    }

    #[test]
    fn ranked_hospital_wire_format() {
        let ranked = Candidate::new("General Hospital", AT, tags(&[("amenity", "hospital")]))
            .unwrap()
            .ranked(AT);

        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["name"], "General Hospital");
        assert_eq!(json["distanceKm"], 0.0);
        assert_eq!(json["status"], "Open");
        assert_eq!(json["coords"]["lat"], 12.97);
    }

    #[test]
    fn status_unknown_label() {
        let json = serde_json::to_value(HospitalStatus::Unknown).unwrap();
        assert_eq!(json, "Status Unknown");
    }
}
