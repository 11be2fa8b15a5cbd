use crate::error::AppError;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half of an academic year.
///
/// Serialized as the bare number `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Semester {
    /// September through January.
    First,
    /// February through June.
    Second,
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Semester::First),
            2 => Ok(Semester::Second),
            other => Err(format!("semester must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> u8 {
        match semester {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }
}

/// A `(year range, semester)` pair such as `2024-2025`, semester 1.
///
/// On the wire it is `{"year": "2024-2025", "semester": 1}`; the year label is
/// checked on deserialization so it always spans two consecutive years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr", into = "PeriodRepr")]
pub struct AcademicPeriod {
    start_year: i32,
    semester: Semester,
}

#[derive(Serialize, Deserialize)]
struct PeriodRepr {
    year: String,
    semester: Semester,
}

impl TryFrom<PeriodRepr> for AcademicPeriod {
    type Error = String;

    fn try_from(repr: PeriodRepr) -> Result<Self, Self::Error> {
        let start_year = parse_year_label(&repr.year)
            .ok_or_else(|| format!("year must look like 2024-2025, got {:?}", repr.year))?;
        Ok(AcademicPeriod::new(start_year, repr.semester))
    }
}

impl From<AcademicPeriod> for PeriodRepr {
    fn from(period: AcademicPeriod) -> PeriodRepr {
        PeriodRepr {
            year: period.year(),
            semester: period.semester,
        }
    }
}

fn parse_year_label(label: &str) -> Option<i32> {
    let (start, end) = label.split_once('-')?;
    let start: i32 = start.parse().ok()?;
    let end: i32 = end.parse().ok()?;
    (end == start + 1).then_some(start)
}

impl AcademicPeriod {
    pub fn new(start_year: i32, semester: Semester) -> Self {
        Self {
            start_year,
            semester,
        }
    }

    /// The `"STARTYEAR-ENDYEAR"` label used by course groups.
    pub fn year(&self) -> String {
        format!("{}-{}", self.start_year, self.start_year + 1)
    }

    /// Whether a slot tagged with `semester` and `year` belongs to this period.
    pub fn matches(&self, semester: Semester, year: &str) -> bool {
        self.semester == semester && self.year() == year
    }
}

impl fmt::Display for AcademicPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} semester {}", self.year(), u8::from(self.semester))
    }
}

/// Determines the academic period running at `now`.
///
/// September to January is the first semester of the year that starts in
/// September, February to June the second. July and August belong to no period
/// and yield `AppError::OutsideAcademicPeriod`.
pub fn current_period(now: NaiveDateTime) -> Result<AcademicPeriod, AppError> {
    let year = now.year();
    match now.month0() {
        m @ (8..=11 | 0) => {
            let start_year = if m >= 8 { year } else { year - 1 };
            Ok(AcademicPeriod::new(start_year, Semester::First))
        }
        1..=5 => Ok(AcademicPeriod::new(year - 1, Semester::Second)),
        _ => Err(AppError::OutsideAcademicPeriod),
    }
}

/// The period that follows `period`, used to offer "next semester" assignments.
pub fn next_period(period: AcademicPeriod) -> AcademicPeriod {
    match period.semester {
        Semester::First => AcademicPeriod::new(period.start_year, Semester::Second),
        Semester::Second => AcademicPeriod::new(period.start_year + 1, Semester::First),
    }
}
