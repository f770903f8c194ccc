//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::formatting::DEFAULT_UTC_OFFSET_MINUTES;

fn default_utc_offset_minutes() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Offset, in minutes east of UTC, used to display order dates.
    #[serde(default = "default_utc_offset_minutes")]
    pub display_utc_offset_minutes: i32,
}
