use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Arrival,
    Departure,
}

impl Mode {
    /// Label stored in the log and shown back to the client
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Arrival => "arrived",
            Mode::Departure => "departed",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    OnTime,
    Late,
    Departed,
}

impl Status {
    pub fn classify(mode: Mode, at: NaiveTime, late_cutoff: NaiveTime) -> Self {
        match mode {
            Mode::Arrival if at > late_cutoff => Status::Late,
            Mode::Arrival => Status::OnTime,
            Mode::Departure => Status::Departed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::OnTime => "on-time",
            Status::Late => "late",
            Status::Departed => "departed",
        }
    }

    pub fn is_late(&self) -> bool {
        *self == Status::Late
    }
}

/// Check-in request as submitted by the client
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckInRequest {
    /// Photo as base64, optionally a `data:image/...;base64,` URL
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQSkZJRg==")]
    pub image_base64: String,

    #[schema(example = "arrival")]
    pub mode: String,

    #[schema(example = 40.685607, nullable = true)]
    pub lat: Option<f64>,

    #[schema(example = 71.904557, nullable = true)]
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[schema(example = json!({
    "date": "2026-01-05",
    "time": "07:54:12",
    "mode_text": "arrived",
    "status": "on-time",
    "is_late": false,
    "image_url": "2026-01-05_07-54-12_a3f9c1.jpg",
    "distance_m": 12
}))]
pub struct CheckInResponse {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub time: NaiveTime,
    pub mode_text: String,
    pub status: String,
    pub is_late: bool,
    /// Stored image filename
    pub image_url: String,
    pub distance_m: u64,
}

/// One row of a daily log partition. Field order is the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub mode: String,
    pub status: String,
    pub image_file: String,
    pub lat: f64,
    pub lng: f64,
    pub dist_m: f64,
}

pub const LOG_HEADER: [&str; 8] = [
    "date",
    "time",
    "mode",
    "status",
    "image_file",
    "lat",
    "lng",
    "dist_m",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn mode_parses_exact_lowercase_names() {
        assert_eq!(Mode::from_str("arrival").unwrap(), Mode::Arrival);
        assert_eq!(Mode::from_str("departure").unwrap(), Mode::Departure);
        assert!(Mode::from_str("lunch").is_err());
        assert!(Mode::from_str("Arrival").is_err());
        assert!(Mode::from_str("").is_err());
    }

    #[test]
    fn arrival_lateness_boundaries() {
        let cutoff = t(8, 0, 0);
        assert_eq!(Status::classify(Mode::Arrival, t(7, 59, 59), cutoff), Status::OnTime);
        assert_eq!(Status::classify(Mode::Arrival, t(8, 0, 0), cutoff), Status::OnTime);
        assert_eq!(Status::classify(Mode::Arrival, t(8, 0, 1), cutoff), Status::Late);
        assert_eq!(Status::classify(Mode::Arrival, t(13, 30, 0), cutoff), Status::Late);
    }

    #[test]
    fn departure_is_never_late() {
        let cutoff = t(8, 0, 0);
        for at in [t(0, 0, 0), t(8, 0, 1), t(17, 45, 0), t(23, 59, 59)] {
            let status = Status::classify(Mode::Departure, at, cutoff);
            assert_eq!(status, Status::Departed);
            assert!(!status.is_late());
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Mode::Arrival.label(), "arrived");
        assert_eq!(Mode::Departure.label(), "departed");
        assert_eq!(Mode::Arrival.as_ref(), "arrival");
        assert_eq!(Status::Late.as_str(), "late");
        assert_eq!(Status::OnTime.as_str(), "on-time");
    }
}
