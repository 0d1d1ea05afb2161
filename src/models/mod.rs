pub mod employee;
pub mod hour_record;
pub mod project;

pub use employee::Employee;
pub use hour_record::{HourRecord, HourRecordRow};
pub use project::Project;
