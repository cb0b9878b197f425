use std::str::FromStr;

use chrono::Timelike;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::AppError;
use crate::model::attendance::{AttendanceRecord, CheckInRequest, CheckInResponse, Mode, Status};
use crate::storage::AttendanceStore;
use crate::utils::{filename::image_filename, geo, image_payload};

/// Validates, classifies and records one check-in.
///
/// All validation happens before the first write: the image is saved, then the
/// log row appended. A failed image write appends nothing.
pub fn process_checkin(
    req: &CheckInRequest,
    config: &Config,
    clock: &dyn Clock,
    store: &dyn AttendanceStore,
) -> Result<CheckInResponse, AppError> {
    let now = clock.now();
    let now = now.with_nanosecond(0).unwrap_or(now);
    let date = now.date();
    let time = now.time();

    let mode = Mode::from_str(&req.mode).map_err(|_| AppError::InvalidMode)?;
    let status = Status::classify(mode, time, config.late_cutoff);

    let (lat, lng) = match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(AppError::MissingLocation),
    };

    // wrapped coordinates would otherwise land back on the office
    if !geo::is_valid_coordinate(lat, lng) {
        let dist = geo::distance_m(
            lat.clamp(-90.0, 90.0),
            lng.clamp(-180.0, 180.0),
            config.office_lat,
            config.office_lng,
        );
        warn!(mode = mode.as_ref(), lat, lng, "Check-in with out-of-range coordinates");
        return Err(AppError::OutOfGeofence {
            distance_m: dist as u64,
        });
    }

    let dist = geo::distance_m(lat, lng, config.office_lat, config.office_lng);
    // NaN coordinates compare false against the radius; treat them as outside
    if !(dist <= config.max_distance_m) {
        warn!(mode = mode.as_ref(), distance_m = dist, "Check-in outside geofence");
        return Err(AppError::OutOfGeofence {
            distance_m: dist as u64,
        });
    }

    let image = image_payload::decode(&req.image_base64).ok_or(AppError::InvalidImage)?;

    let filename = image_filename(now, image.extension);
    store.save_image(&filename, &image.bytes)?;

    let record = AttendanceRecord {
        date,
        time,
        mode: mode.label().to_string(),
        status: status.as_str().to_string(),
        image_file: filename.clone(),
        lat,
        lng,
        dist_m: geo::round_2(dist),
    };
    store.append_record(date, &record)?;

    info!(
        %date,
        %time,
        mode = mode.as_ref(),
        status = status.as_str(),
        image = %filename,
        "Check-in recorded"
    );

    Ok(CheckInResponse {
        date,
        time,
        mode_text: record.mode,
        status: record.status,
        is_late: status.is_late(),
        image_url: filename,
        distance_m: dist as u64,
    })
}
