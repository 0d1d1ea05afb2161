pub mod backup;
pub mod log;
pub mod record_hours;
pub mod report;
