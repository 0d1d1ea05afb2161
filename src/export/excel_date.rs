// src/export/excel_date.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Try to interpret a string as a date or datetime, returning the
/// *Excel serial* plus the matching number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    // Record timestamps carry a UTC offset.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        let serial = naive_datetime_to_excel_serial(&dt.naive_local());
        return Some(("yyyy-mm-dd hh:mm", serial));
    }

    let dt_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            let serial = naive_datetime_to_excel_serial(&dt);
            return Some(("yyyy-mm-dd hh:mm", serial));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0).unwrap();
        let serial = naive_datetime_to_excel_serial(&dt);
        return Some(("yyyy-mm-dd", serial));
    }

    None
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_date_maps_to_whole_serial() {
        let (fmt, serial) = parse_to_excel_date("2025-06-01").unwrap();
        assert_eq!(fmt, "yyyy-mm-dd");
        assert_eq!(serial.fract(), 0.0);
        // 1900-01-01 is serial 2 against the 1899-12-30 epoch
        let (_, base) = parse_to_excel_date("1900-01-01").unwrap();
        assert_eq!(base, 2.0);
    }

    #[test]
    fn rfc3339_timestamp_is_recognized() {
        let (fmt, serial) = parse_to_excel_date("2025-06-01T08:30:00+02:00").unwrap();
        assert_eq!(fmt, "yyyy-mm-dd hh:mm");
        let (_, day) = parse_to_excel_date("2025-06-01").unwrap();
        assert!((serial - day - (8.5 / 24.0)).abs() < 1e-6);
    }

    #[test]
    fn non_dates_are_left_alone() {
        assert!(parse_to_excel_date("Alpha Rollout").is_none());
        assert!(parse_to_excel_date("8.00").is_none());
    }
}
