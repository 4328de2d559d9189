pub mod calendar;
pub mod config;
pub mod error;
pub mod holiday;
pub mod prompt;
pub mod render;
pub mod source;

pub use error::{Error, ErrorKind, Result};
pub use holiday::{HolidayRecord, HolidayStore};
