//! Wall-clock capability injected into the sink.
//!
//! The sink never reads the OS clock directly; the host hands it a [`Clock`]
//! at construction. Production code uses [`SystemClock`], tests drive day
//! rollovers with a settable implementation.

use chrono::NaiveDate;

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local-time system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
