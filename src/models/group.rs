use crate::schedule::{Scheduled, WeeklySlot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A course group: one recurring weekly session of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CourseGroup {
    /// Unique identifier for the group (UUID v4).
    pub id: Uuid,
    /// Display name, e.g. "Group A".
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Name of the course this group belongs to.
    #[validate(length(min = 1, max = 200))]
    pub course: String,
    /// Teacher running the group, if one is assigned.
    pub teacher_id: Option<i32>,
    /// When the group meets.
    pub schedule: WeeklySlot,
}

impl Scheduled for CourseGroup {
    fn slot(&self) -> &WeeklySlot {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Day, Semester};
    use serde_json::json;

    fn group_json(name: &str, from: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "course": "Linear Algebra",
            "teacher_id": null,
            "schedule": {
                "day": "tuesday",
                "from": from,
                "to": "12:00",
                "semester": 2,
                "year": "2024-2025"
            }
        })
    }

    #[test]
    fn test_group_deserialization() {
        let group: CourseGroup = serde_json::from_value(group_json("Group A", "10:00")).unwrap();
        assert_eq!(group.slot().day, Day::Tuesday);
        assert_eq!(group.slot().semester, Semester::Second);
        assert!(group.validate().is_ok());
    }

    #[test]
    fn test_group_rejects_bad_schedule() {
        assert!(serde_json::from_value::<CourseGroup>(group_json("Group A", "10h00")).is_err());
        assert!(serde_json::from_value::<CourseGroup>(group_json("Group A", "13:00")).is_err());
    }

    #[test]
    fn test_group_validation() {
        let group: CourseGroup = serde_json::from_value(group_json("", "10:00")).unwrap();
        assert!(group.validate().is_err());
    }
}
