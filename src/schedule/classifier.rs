use crate::schedule::period::{current_period, AcademicPeriod};
use crate::schedule::slot::{ClockTime, Day, Scheduled, WeeklySlot};
use chrono::{Datelike, Duration, NaiveDateTime};
use serde::Serialize;

/// Slots sorted into the buckets the course overview shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Categorized<T> {
    /// Running right now.
    pub current: Vec<T>,
    /// Still ahead this week, soonest first.
    pub upcoming: Vec<T>,
    /// Everything else, in input order.
    pub other: Vec<T>,
}

impl<T> Default for Categorized<T> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
            upcoming: Vec::new(),
            other: Vec::new(),
        }
    }
}

/// Classifies weekly slots relative to a fixed instant.
///
/// `period` is `None` outside of an academic period, in which case no slot is
/// ever active or upcoming.
#[derive(Debug, Clone)]
pub struct ScheduleClassifier {
    now: NaiveDateTime,
    period: Option<AcademicPeriod>,
}

impl ScheduleClassifier {
    pub fn new(now: NaiveDateTime, period: Option<AcademicPeriod>) -> Self {
        Self { now, period }
    }

    /// Classifier for `now` using whichever period is running at that time.
    pub fn at(now: NaiveDateTime) -> Self {
        Self::new(now, current_period(now).ok())
    }

    pub fn period(&self) -> Option<AcademicPeriod> {
        self.period
    }

    fn today(&self) -> Day {
        Day::from(self.now.weekday())
    }

    fn clock(&self) -> ClockTime {
        ClockTime::truncate(self.now.time())
    }

    fn in_period(&self, slot: &WeeklySlot) -> bool {
        self.period
            .map_or(false, |period| period.matches(slot.semester, &slot.year))
    }

    /// True while the slot is running today; both ends of the window count.
    pub fn is_active(&self, slot: &WeeklySlot) -> bool {
        let clock = self.clock();
        self.in_period(slot) && slot.day == self.today() && slot.from <= clock && clock <= slot.to
    }

    /// True if the slot still starts later today, or on a later day of the
    /// current week. Never wraps into the following week.
    ///
    /// Today is placed in a Monday-first week and the slot in a Sunday-first
    /// one. On a Sunday nothing on another day is upcoming, and a Sunday slot
    /// is only upcoming on Sunday itself.
    pub fn is_upcoming(&self, slot: &WeeklySlot) -> bool {
        if !self.in_period(slot) {
            return false;
        }
        let today = self.today();
        if slot.day == today {
            slot.from > self.clock()
        } else {
            slot.day.sunday_first_index() > today.index()
        }
    }

    /// Start of the slot's next occurrence, today included if it has not
    /// started yet.
    pub fn next_occurrence(&self, slot: &WeeklySlot) -> NaiveDateTime {
        let mut days_ahead = (slot.day.index() - self.today().index()).rem_euclid(7);
        let start_today = NaiveDateTime::new(self.now.date(), slot.from.as_naive());
        if days_ahead == 0 && start_today < self.now {
            days_ahead = 7;
        }
        start_today + Duration::days(days_ahead)
    }

    /// Partitions `items` into current, upcoming and other buckets.
    pub fn categorize<T: Scheduled>(&self, items: Vec<T>) -> Categorized<T> {
        let mut buckets = Categorized::default();
        for item in items {
            let slot = item.slot();
            if self.is_active(slot) {
                buckets.current.push(item);
            } else if self.is_upcoming(slot) {
                buckets.upcoming.push(item);
            } else {
                buckets.other.push(item);
            }
        }
        buckets
            .upcoming
            .sort_by_key(|item| self.next_occurrence(item.slot()));
        buckets
    }
}

/// Categorizes `items` against the academic period running at `now`.
pub fn categorize<T: Scheduled>(now: NaiveDateTime, items: Vec<T>) -> Categorized<T> {
    ScheduleClassifier::at(now).categorize(items)
}
