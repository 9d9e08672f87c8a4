//! Teacher, room and cohort records.
//!
//! These are resolved once at batch start into lookup tables; the slot
//! walker only ever handles their identifiers.

use serde::{Deserialize, Serialize};

use super::{CohortId, RoomId, TeacherId, Weekday};

/// A teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    /// Human-readable name.
    pub name: String,
}

impl Teacher {
    /// Creates a new teacher.
    pub fn new(id: impl Into<TeacherId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A room that classes can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Human-readable name.
    pub name: String,
    /// Owner scope. `None` = shared by every scope of the institution.
    pub owner: Option<String>,
}

impl Room {
    /// Creates a new shared room.
    pub fn new(id: impl Into<RoomId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            owner: None,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restricts the room to one owner scope.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// A cohort (semester): students who can never attend two classes at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Unique cohort identifier.
    pub id: CohortId,
    /// Human-readable name.
    pub name: String,
    /// Weekdays the cohort's program teaches on.
    pub valid_days: Vec<Weekday>,
}

impl Cohort {
    /// Creates a cohort with no valid days.
    pub fn new(id: impl Into<CohortId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            valid_days: Vec::new(),
        }
    }

    /// Sets the cohort name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a valid weekday (duplicates are ignored).
    pub fn with_day(mut self, day: Weekday) -> Self {
        if !self.valid_days.contains(&day) {
            self.valid_days.push(day);
        }
        self
    }

    /// Adds several valid weekdays.
    pub fn with_days(self, days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(self, |c, d| c.with_day(d))
    }

    /// Valid weekdays in canonical order.
    pub fn ordered_days(&self) -> Vec<Weekday> {
        let mut days = self.valid_days.clone();
        days.sort_by_key(|d| d.rank());
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::new(4).with_name("Lab 2").with_owner("coordinator");
        assert_eq!(r.id, RoomId(4));
        assert_eq!(r.name, "Lab 2");
        assert_eq!(r.owner.as_deref(), Some("coordinator"));
    }

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new(9).with_name("Ada");
        assert_eq!(t.id, TeacherId(9));
        assert_eq!(t.name, "Ada");
    }

    #[test]
    fn test_cohort_days_ordered_and_unique() {
        let c = Cohort::new(1)
            .with_name("Semester 1")
            .with_days([Weekday::Friday, Weekday::Monday, Weekday::Friday]);
        assert_eq!(c.valid_days.len(), 2);
        assert_eq!(c.ordered_days(), vec![Weekday::Monday, Weekday::Friday]);
    }
}
