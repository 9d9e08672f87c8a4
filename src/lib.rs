//! Class timetable assignment engine.
//!
//! Places each subject's weekly quota of instructional minutes into
//! concrete (weekday, time range, room, teacher) slots inside a fixed
//! daily shift window, while respecting teacher unavailability, room
//! occupancy, breaks and the rule that a cohort never attends two classes
//! at once.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `Cohort`, `Teacher`, `Room`,
//!   `TeacherUnavailability`, `Break`, `ScheduleEntry`, `Timetable`, and
//!   the time model (`ClockTime`, `TimeRange`, `Shift`, `Weekday`)
//! - **`quota`**: Weekly quota from credit-hours, hour length and weeks
//! - **`availability`**: Feasibility index over occupied and blocked slots
//! - **`scheduler`**: Day ordering, slot walking, chunked commits, batch
//!   driver and KPIs
//! - **`store`**: Persistence seam (`EntryStore`) and an in-memory store
//! - **`validation`**: Request checks, manual entry checks, timetable audit
//! - **`config`**: Engine tunables, loadable from JSON
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Break, Cohort, Room, Subject, Teacher, TimeRange, Weekday};
//! use u_timetable::scheduler::{TimetableRequest, TimetableScheduler};
//! use u_timetable::store::InMemoryStore;
//!
//! let request = TimetableRequest::new()
//!     .with_cohort(Cohort::new(1).with_days([Weekday::Monday, Weekday::Wednesday]))
//!     .with_teacher(Teacher::new(1).with_name("Ada"))
//!     .with_room(Room::new(1).with_name("A-101"))
//!     .with_break(Break::new(Weekday::Monday, TimeRange::hm((8, 0), (8, 30))))
//!     .with_subject(Subject::new(2).with_name("Algebra").with_hours(2, 1).with_teacher(1).with_cohort(1));
//!
//! let mut store = InMemoryStore::new();
//! let report = TimetableScheduler::new().schedule(&request, &mut store).unwrap();
//!
//! assert!(report.is_clean());
//! assert_eq!(report.assigned_minutes(), 90);
//! ```
//!
//! # Determinism
//!
//! Identical requests and configuration always produce identical entries.
//! The engine is single-threaded and owns its scheduling state for the
//! whole run.

pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod quota;
pub mod scheduler;
pub mod store;
pub mod validation;
