use chrono::NaiveDateTime;
use uuid::Uuid;

/// `<date>_<HH-MM-SS>_<6 hex>.<ext>`; the suffix separates check-ins within the same second.
pub fn image_filename(at: NaiveDateTime, extension: &str) -> String {
    let suffix = Uuid::new_v4().to_simple().to_string();
    format!(
        "{}_{}_{}.{}",
        at.format("%Y-%m-%d"),
        at.format("%H-%M-%S"),
        &suffix[..6],
        extension
    )
}

pub fn log_filename(date: chrono::NaiveDate) -> String {
    format!("attendance_{}.csv", date.format("%Y-%m-%d"))
}

pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("attendance_{}.xlsx", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn image_name_encodes_date_and_time() {
        let at = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        let name = image_filename(at, "jpg");

        assert!(name.starts_with("2026-03-09_07-05-03_"), "{name}");
        assert!(name.ends_with(".jpg"));
        assert!(!name.contains(':'));

        let suffix = &name["2026-03-09_07-05-03_".len()..name.len() - ".jpg".len()];
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn same_second_names_differ() {
        let at = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        let names: std::collections::HashSet<_> =
            (0..20).map(|_| image_filename(at, "png")).collect();
        assert!(names.len() > 1);
    }

    #[test]
    fn partition_and_export_names() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(log_filename(date), "attendance_2026-10-19.csv");
        assert_eq!(export_filename(date), "attendance_2026-10-19.xlsx");
    }
}
