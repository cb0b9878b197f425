use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("mode must be either \"arrival\" or \"departure\"")]
    InvalidMode,

    #[error("geolocation is required")]
    MissingLocation,

    #[error("you are not within the office area (approximate distance {distance_m} m)")]
    OutOfGeofence { distance_m: u64 },

    #[error("image payload could not be decoded")]
    InvalidImage,

    #[error("no attendance recorded today")]
    NoDataForToday,

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("spreadsheet rendering failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl AppError {
    /// Machine-readable kind, stable across message wording changes
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidMode => "InvalidMode",
            AppError::MissingLocation => "MissingLocation",
            AppError::OutOfGeofence { .. } => "OutOfGeofence",
            AppError::InvalidImage => "InvalidImage",
            AppError::NoDataForToday => "NoDataForToday",
            AppError::Storage(_) => "Storage",
            AppError::Export(_) => "Export",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidMode
            | AppError::MissingLocation
            | AppError::OutOfGeofence { .. }
            | AppError::InvalidImage => StatusCode::BAD_REQUEST,
            AppError::NoDataForToday => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Storage(_) | AppError::Export(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": message
        }))
    }
}
