//! Clock port for result timestamps

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Results and reports are stamped through this trait so tests can pin time.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
