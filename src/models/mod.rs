//! Timetabling domain models.
//!
//! Provides the core data types for representing a class-timetabling
//! problem and its solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | Academic source data |
//! |-------------|----------------------|
//! | Subject | Course / asignatura |
//! | Cohort | Semester of a degree program |
//! | Teacher | Instructor / docente |
//! | Room | Classroom / aula |
//! | ScheduleEntry | Timetable row / horario |

mod calendar;
mod ids;
mod resource;
mod schedule;
mod subject;
pub mod time;
mod weekday;

pub use calendar::{Break, TeacherUnavailability};
pub use ids::{CohortId, RoomId, SubjectId, TeacherId};
pub use resource::{Cohort, Room, Teacher};
pub use schedule::{BreakSlot, ScheduleEntry, Timetable, Violation, ViolationType};
pub use subject::Subject;
pub use time::{ClockTime, Shift, TimeParseError, TimeRange, MIN_WEEKLY_MINUTES, QUANTUM_MINUTES};
pub use weekday::{Weekday, WeekdayParseError};
