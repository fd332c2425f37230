//! Remedial scheduling domain models.
//!
//! Typed records for the four reference tables and for the untrusted
//! candidate schedule. Reference rows are validated once at the loader
//! boundary; the metrics operate only on these types, never on raw rows.
//!
//! # Domain Mappings
//!
//! | Table | Type | Key |
//! |-------|------|-----|
//! | students.csv | `Student` | Name |
//! | teachers.csv | `Teacher` | Name |
//! | slots.csv | `Slot` | Slot_ID |
//! | busy.csv | `BusyWindow` | Section |
//! | generator output | `ScheduleEntry` | none |

mod busy;
mod reference;
mod schedule;
mod slot;
mod student;
mod teacher;

pub use busy::BusyWindow;
pub use reference::{ReferenceData, ReferenceIndex};
pub(crate) use schedule::display_or_missing;
pub use schedule::{ScheduleEntry, SLOT_KEY, STUDENT_KEY, SUBJECT_KEY, TEACHER_KEY};
pub use slot::{split_slot_list, Slot, SlotId};
pub use student::Student;
pub use teacher::Teacher;
