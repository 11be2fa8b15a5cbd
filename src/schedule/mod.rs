//! Academic calendar arithmetic and weekly course-slot classification.
//!
//! Everything here is a pure function of the instant it is given; callers pass
//! the local wall-clock time in.

pub mod classifier;
pub mod period;
pub mod slot;

pub use classifier::{categorize, Categorized, ScheduleClassifier};
pub use period::{current_period, next_period, AcademicPeriod, Semester};
pub use slot::{ClockTime, Day, Scheduled, WeeklySlot};
