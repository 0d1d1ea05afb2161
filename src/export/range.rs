// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::NaiveDate;

/// Parse --range (year / month / day / interval).
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "range bounds must share one format: {}",
                r
            )));
        }

        match start.len() {
            // YYYY:YYYY
            4 => {
                let (d1, _) = parse_year(start)?;
                let (_, d2) = parse_year(end)?;
                Ok((d1, d2))
            }
            // YYYY-MM:YYYY-MM
            7 => {
                let (d1, _) = parse_month(start)?;
                let (_, d2) = parse_month(end)?;
                Ok((d1, d2))
            }
            // YYYY-MM-DD:YYYY-MM-DD
            10 => {
                let d1 = parse_day(start)?;
                let d2 = parse_day(end)?;
                Ok((d1, d2))
            }
            _ => Err(AppError::InvalidDate(format!(
                "unsupported range format: {}",
                r
            ))),
        }
    } else {
        match r.len() {
            4 => parse_year(r),
            7 => parse_month(r),
            10 => parse_day(r).map(|d| (d, d)),
            _ => Err(AppError::InvalidDate(format!(
                "unsupported --range format: {}",
                r
            ))),
        }
    }
}

fn parse_year(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let y: i32 = s
        .parse()
        .map_err(|_| AppError::InvalidDate(format!("invalid year: {}", s)))?;
    let d1 = NaiveDate::from_ymd_opt(y, 1, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("invalid year: {}", s)))?;
    let d2 = NaiveDate::from_ymd_opt(y, 12, 31)
        .ok_or_else(|| AppError::InvalidDate(format!("invalid year: {}", s)))?;
    Ok((d1, d2))
}

fn parse_month(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidDate(format!("invalid month: {}", s));
    let y: i32 = s[0..4].parse().map_err(|_| bad())?;
    let m: u32 = s[5..7].parse().map_err(|_| bad())?;
    let last = month_last_day(y, m).ok_or_else(bad)?;

    let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(bad)?;
    let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(bad)?;
    Ok((d1, d2))
}

fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(format!("invalid date: {}", s)))
}
