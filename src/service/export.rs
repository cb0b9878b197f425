use rust_xlsxwriter::{Image, Workbook, XlsxError};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::AppError;
use crate::model::attendance::AttendanceRecord;
use crate::storage::AttendanceStore;
use crate::utils::filename::export_filename;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Attendance";
const HEADER: [&str; 8] = [
    "Image",
    "Date",
    "Time",
    "Action",
    "Status",
    "Lat",
    "Lng",
    "Distance (m)",
];
const THUMBNAIL_SIZE: u32 = 80;
const IMAGE_ROW_HEIGHT: u32 = 60;

pub struct DailyExport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
    pub embedded_images: usize,
}

/// A log row paired with its photo, if the photo is still on disk
pub struct ExportRow {
    pub record: AttendanceRecord,
    pub image: Option<Vec<u8>>,
}

/// Renders today's partition to xlsx and keeps a copy next to it.
pub fn build_daily_export(
    clock: &dyn Clock,
    store: &dyn AttendanceStore,
) -> Result<DailyExport, AppError> {
    let today = clock.now().date();
    let records = store
        .list_records(today)?
        .ok_or(AppError::NoDataForToday)?;

    let rows = collect_rows(records, store);
    let (bytes, embedded_images) = render(&rows)?;

    let filename = export_filename(today);
    store.save_export(&filename, &bytes)?;

    info!(%today, rows = rows.len(), embedded_images, "Daily export built");

    Ok(DailyExport {
        filename,
        bytes,
        rows: rows.len(),
        embedded_images,
    })
}

/// Missing or unreadable images never fail the export; the cell stays blank.
pub fn collect_rows(records: Vec<AttendanceRecord>, store: &dyn AttendanceStore) -> Vec<ExportRow> {
    records
        .into_iter()
        .map(|record| {
            let image = if store.image_exists(&record.image_file) {
                match store.read_image(&record.image_file) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        warn!(error = %e, image = %record.image_file, "Failed to read image");
                        None
                    }
                }
            } else {
                debug!(image = %record.image_file, "Image missing, leaving cell blank");
                None
            };
            ExportRow { record, image }
        })
        .collect()
}

/// Returns the workbook bytes and how many thumbnails were embedded
pub fn render(rows: &[ExportRow]) -> Result<(Vec<u8>, usize), XlsxError> {
    let mut workbook = Workbook::new();
    let mut embedded = 0;

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    sheet.set_column_width(0, 12)?;
    sheet.set_column_width(7, 14)?;

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32; // row 0 is the header
        let rec = &row.record;

        sheet.write_string(r, 1, rec.date.format("%Y-%m-%d").to_string())?;
        sheet.write_string(r, 2, rec.time.format("%H:%M:%S").to_string())?;
        sheet.write_string(r, 3, rec.mode.as_str())?;
        sheet.write_string(r, 4, rec.status.as_str())?;
        sheet.write_number(r, 5, rec.lat)?;
        sheet.write_number(r, 6, rec.lng)?;
        sheet.write_number(r, 7, rec.dist_m)?;

        let Some(bytes) = &row.image else {
            continue;
        };

        match Image::new_from_buffer(bytes) {
            Ok(image) => {
                let image = image.set_scale_to_size(THUMBNAIL_SIZE, THUMBNAIL_SIZE, false);
                sheet.insert_image(r, 0, &image)?;
                sheet.set_row_height(r, IMAGE_ROW_HEIGHT)?;
                embedded += 1;
            }
            Err(e) => {
                // photos are not validated at check-in, so the format may be one xlsx can't hold
                warn!(error = %e, image = %rec.image_file, "Skipping unembeddable image");
            }
        }
    }

    Ok((workbook.save_to_buffer()?, embedded))
}
