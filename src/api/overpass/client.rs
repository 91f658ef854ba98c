use std::time::Duration;

use anyhow::anyhow;
use reqwest::Url;

use super::types::*;
use crate::model::Coord;

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl Client {
    pub fn new(base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::new();
        let base = base
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        Ok(Self {
            inner: client,
            base,
            timeout,
        })
    }

    /// Named hospitals (nodes, ways, relations) within `radius_m` of
    /// `center`, with centroids for the non-node kinds.
    pub async fn hospitals_around(
        &self,
        center: Coord,
        radius_m: u32,
    ) -> anyhow::Result<Vec<Element>> {
        let query = around_query(center, radius_m);

        let response: QueryResponse = self
            .inner
            .get(self.base.clone())
            .query(&[("data", query.as_str())])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.elements)
    }
}

fn around_query(center: Coord, radius_m: u32) -> String {
    let around = format!("around:{},{},{}", radius_m, center.lat, center.lon);

    format!(
        "[out:json];(node[amenity=hospital][name]({around});\
         way[amenity=hospital][name]({around});\
         relation[amenity=hospital][name]({around}););out center;"
    )
}
