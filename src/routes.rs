use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, web};
use serde_json::json;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let burst = requests_per_min.max(1);
        let per_ms = (60_000 / burst as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(burst)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("limiter period and burst are non-zero");
        Governor::new(&cfg)
    }

    // Photos arrive base64-encoded inside the JSON body
    let json_config = web::JsonConfig::default()
        .limit(config.max_payload_bytes)
        .error_handler(|err, _req| {
            let resp = HttpResponse::BadRequest().json(json!({
                "error": "InvalidRequest",
                "message": err.to_string()
            }));
            InternalError::from_response(err, resp).into()
        });

    cfg.app_data(json_config);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::resource("/checkin")
                    .wrap(build_limiter(config.rate_checkin_per_min))
                    .route(web::post().to(attendance::check_in)),
            )
            .service(
                web::resource("/export-today")
                    .wrap(build_limiter(config.rate_export_per_min))
                    .route(web::get().to(attendance::export_today)),
            ),
    );
}

// CHECK-IN
//  ├─ mode + geofence validated
//  ├─ photo → <data_dir>/images/<date>_<HH-MM-SS>_<rand>.<ext>
//  └─ row  → <data_dir>/attendance_<date>.csv

// EXPORT
//  └─ attendance_<date>.csv + images → attendance_<date>.xlsx
