use std::env::VarError;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;

/// Environment variables the gateway reads. All of them have defaults.
pub const VARIABLES: &[&str] = &["PORT", "OVERPASS_URL", "OVERPASS_TIMEOUT_MS", "STATIC_ROOT"];

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_OVERPASS_TIMEOUT_MS: u64 = 8000;
pub const DEFAULT_STATIC_ROOT: &str = "public";

pub struct Config {
    pub listen_port: u16,
    pub overpass_url: String,
    pub overpass_timeout: Duration,
    pub static_root: PathBuf,
}

impl Config {
    pub fn env() -> anyhow::Result<Self> {
        let listen_port = match env("PORT")? {
            Some(port) => port
                .parse()
                .map_err(|e| anyhow!("PORT is not a valid port number: {e}"))?,
            None => DEFAULT_PORT,
        };

        let overpass_url = env("OVERPASS_URL")?.unwrap_or_else(|| DEFAULT_OVERPASS_URL.into());

        let overpass_timeout = match env("OVERPASS_TIMEOUT_MS")? {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .map_err(|e| anyhow!("OVERPASS_TIMEOUT_MS is not a valid duration: {e}"))?,
            ),
            None => Duration::from_millis(DEFAULT_OVERPASS_TIMEOUT_MS),
        };

        let static_root = env("STATIC_ROOT")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_ROOT));

        Ok(Self {
            listen_port,
            overpass_url,
            overpass_timeout,
            static_root,
        })
    }

    pub fn log(&self) {
        log::info!("listen port: {}", self.listen_port);
        log::info!("overpass endpoint: {}", self.overpass_url);
        log::info!("overpass timeout: {:?}", self.overpass_timeout);
        log::info!("static root: {}", self.static_root.display());
    }
}

fn env(name: &str) -> anyhow::Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(anyhow!("{name} value is not valid unicode")),
    }
}
