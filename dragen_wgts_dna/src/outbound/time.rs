//! the wall clock as a [TimeGetter]

use crate::domain::ports::TimeGetter;
use chrono::Utc;

/// The default implementation of time
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTime;

impl TimeGetter for DefaultTime {
    fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}
