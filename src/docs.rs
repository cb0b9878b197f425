use crate::config::Config;
use crate::model::attendance::{CheckInRequest, CheckInResponse};
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Check-in API",
        version = "0.1.0",
        description = r#"
## Office attendance check-in

Employees check in on arrival and departure with a photo and their current location.

### 🔹 Features
- **Check-in**
  - Accepted only within the configured radius around the office
  - Arrivals after the cutoff time are marked late
- **Daily export**
  - Today's log as an `.xlsx` workbook with photo thumbnails

### 📦 Storage
- One CSV log per day, append-only
- Photos stored as individual files, referenced by name from the log

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::export_today,
    ),
    components(
        schemas(
            CheckInRequest,
            CheckInResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in and export APIs"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with `API_PREFIX` as its server, so Swagger calls the mounted routes
pub fn openapi_for(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !config.api_prefix.is_empty() {
        doc.servers = Some(vec![Server::new(config.api_prefix.clone())]);
    }
    doc
}
