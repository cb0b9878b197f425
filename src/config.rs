use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Storage
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: tracing::Level,

    // Geofence
    pub office_lat: f64,
    pub office_lng: f64,
    pub max_distance_m: f64,

    /// Arrivals strictly after this time of day are late
    pub late_cutoff: NaiveTime,

    pub cors_allowed_origins: Vec<String>,

    // Rate limiting
    pub rate_checkin_per_min: u32,
    pub rate_export_per_min: u32,

    pub max_payload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:8000".to_string(),
            api_prefix: String::new(),
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            log_level: tracing::Level::INFO,
            office_lat: 40.68560701258604,
            office_lng: 71.90455733991762,
            max_distance_m: 50.0,
            late_cutoff: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            cors_allowed_origins: Vec::new(),
            rate_checkin_per_min: 30,
            rate_export_per_min: 10,
            max_payload_bytes: 10 * 1024 * 1024, // 10 MiB, photos arrive base64-encoded
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),

            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,

            office_lat: parse_var("OFFICE_LAT", defaults.office_lat)?,
            office_lng: parse_var("OFFICE_LNG", defaults.office_lng)?,
            max_distance_m: parse_var("MAX_DISTANCE_METERS", defaults.max_distance_m)?,

            late_cutoff: match env::var("LATE_CUTOFF") {
                Ok(raw) => parse_cutoff(&raw)?,
                Err(_) => defaults.late_cutoff,
            },

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_allowed_origins),

            rate_checkin_per_min: parse_var("RATE_CHECKIN_PER_MIN", defaults.rate_checkin_per_min)?,
            rate_export_per_min: parse_var("RATE_EXPORT_PER_MIN", defaults.rate_export_per_min)?,

            max_payload_bytes: parse_var("MAX_PAYLOAD_BYTES", defaults.max_payload_bytes)?,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

/// Accepts `HH:MM` or `HH:MM:SS`
fn parse_cutoff(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .with_context(|| format!("LATE_CUTOFF has an invalid value {raw:?}, expected HH:MM"))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_accepts_minutes_and_seconds() {
        assert_eq!(
            parse_cutoff("08:00").unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(
            parse_cutoff(" 09:15:30 ").unwrap(),
            NaiveTime::from_hms_opt(9, 15, 30).unwrap()
        );
        assert!(parse_cutoff("8 o'clock").is_err());
    }

    #[test]
    fn origins_are_split_and_normalized() {
        let origins = parse_origins("https://a.example/, ,https://b.example");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn defaults_match_office_geofence() {
        let config = Config::default();
        assert_eq!(config.max_distance_m, 50.0);
        assert_eq!(config.late_cutoff, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }
}
