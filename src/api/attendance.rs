use actix_web::{HttpResponse, http::header::ContentDisposition, web};
use tracing::{debug, error, warn};

use crate::{
    clock::Clock,
    config::Config,
    error::AppError,
    model::attendance::CheckInRequest,
    service::{
        checkin::process_checkin,
        export::{XLSX_MIME, build_daily_export},
    },
    storage::AttendanceStore,
};

fn log_rejection(operation: &'static str, err: &AppError) {
    match err {
        AppError::Storage(_) | AppError::Export(_) => {
            error!(error = %err, operation, "Request failed")
        }
        _ => warn!(kind = err.kind(), error = %err, operation, "Request rejected"),
    }
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/checkin",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Check-in recorded", body = CheckInResponse),
        (status = 400, description = "Invalid mode, missing location, outside the office area or bad image", body = Object, example = json!({
            "error": "OutOfGeofence",
            "message": "you are not within the office area (approximate distance 137 m)"
        })),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    config: web::Data<Config>,
    clock: web::Data<dyn Clock>,
    store: web::Data<dyn AttendanceStore>,
    payload: web::Json<CheckInRequest>,
) -> actix_web::Result<HttpResponse> {
    let req = payload.into_inner();

    // file I/O stays off the async workers
    let result = web::block(move || {
        process_checkin(&req, config.get_ref(), clock.get_ref(), store.get_ref())
    })
    .await?;

    match result {
        Ok(confirmation) => Ok(HttpResponse::Ok().json(confirmation)),
        Err(e) => {
            log_rejection("check_in", &e);
            Err(e.into())
        }
    }
}

/// Download today's attendance as a spreadsheet
#[utoipa::path(
    get,
    path = "/export-today",
    responses(
        (status = 200, description = "Today's attendance workbook (xlsx attachment)"),
        (status = 404, description = "No check-ins today", body = Object, example = json!({
            "error": "NoDataForToday",
            "message": "no attendance recorded today"
        })),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn export_today(
    clock: web::Data<dyn Clock>,
    store: web::Data<dyn AttendanceStore>,
) -> actix_web::Result<HttpResponse> {
    let result = web::block(move || build_daily_export(clock.get_ref(), store.get_ref())).await?;

    match result {
        Ok(export) => {
            debug!(
                file = %export.filename,
                rows = export.rows,
                embedded_images = export.embedded_images,
                "Sending export"
            );
            Ok(HttpResponse::Ok()
                .content_type(XLSX_MIME)
                .insert_header(ContentDisposition::attachment(export.filename))
                .body(export.bytes))
        }
        Err(e) => {
            log_rejection("export_today", &e);
            Err(e.into())
        }
    }
}
