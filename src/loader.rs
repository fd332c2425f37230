//! Reference table and candidate schedule loading.
//!
//! Reference tables are CSV files with a header row:
//!
//! | File | Columns |
//! |------|---------|
//! | `students.csv` | `Name,Section,Score,Subject` |
//! | `teachers.csv` | `Name,Subject,Slot_IDs` |
//! | `slots.csv` | `Slot_ID` (optional `Day`, `Time`) |
//! | `busy.csv` | `Section,Busy_Slot_IDs` |
//!
//! Unknown columns are ignored. Slot lists are delimited by the configured
//! delimiter (`;` by default).
//!
//! Candidate schedules are JSON arrays of objects keyed `Student Name`,
//! `Subject`, `Teacher Name`, `Slot_ID`. Parsing is lenient: only a
//! document that is not a JSON array at all is an error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::models::{
    split_slot_list, BusyWindow, ReferenceData, ScheduleEntry, Slot, Student, Teacher,
};

/// Students table file name.
pub const STUDENTS_FILE: &str = "students.csv";
/// Teachers table file name.
pub const TEACHERS_FILE: &str = "teachers.csv";
/// Slots table file name.
pub const SLOTS_FILE: &str = "slots.csv";
/// Busy windows table file name.
pub const BUSY_FILE: &str = "busy.csv";

#[derive(Debug, Deserialize)]
struct StudentRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Section")]
    section: String,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Subject", default)]
    subject: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeacherRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Subject", default)]
    subject: Option<String>,
    #[serde(rename = "Slot_IDs", default)]
    slot_ids: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlotRow {
    #[serde(rename = "Slot_ID")]
    slot_id: String,
    #[serde(rename = "Day", default)]
    day: Option<String>,
    #[serde(rename = "Time", default)]
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BusyRow {
    #[serde(rename = "Section")]
    section: String,
    #[serde(rename = "Busy_Slot_IDs", default)]
    busy_slot_ids: Option<String>,
}

fn read_rows<R, T>(reader: R, table: &'static str) -> EvalResult<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| EvalError::Csv { table, source })?;
    Ok(rows)
}

/// Reads the students table.
pub fn read_students<R: Read>(reader: R) -> EvalResult<Vec<Student>> {
    let rows: Vec<StudentRow> = read_rows(reader, "students")?;
    Ok(rows
        .into_iter()
        .map(|r| Student::new(r.name, r.section, r.score, r.subject.unwrap_or_default()))
        .collect())
}

/// Reads the teachers table.
pub fn read_teachers<R: Read>(reader: R, delimiter: char) -> EvalResult<Vec<Teacher>> {
    let rows: Vec<TeacherRow> = read_rows(reader, "teachers")?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let free = split_slot_list(r.slot_ids.as_deref().unwrap_or(""), delimiter);
            Teacher::new(r.name, r.subject.unwrap_or_default()).with_free_slots(free)
        })
        .collect())
}

/// Reads the slots table.
pub fn read_slots<R: Read>(reader: R) -> EvalResult<Vec<Slot>> {
    let rows: Vec<SlotRow> = read_rows(reader, "slots")?;
    Ok(rows
        .into_iter()
        .map(|r| Slot {
            id: r.slot_id.into(),
            day: r.day,
            time: r.time,
        })
        .collect())
}

/// Reads the busy windows table.
pub fn read_busy_windows<R: Read>(reader: R, delimiter: char) -> EvalResult<Vec<BusyWindow>> {
    let rows: Vec<BusyRow> = read_rows(reader, "busy")?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let busy = split_slot_list(r.busy_slot_ids.as_deref().unwrap_or(""), delimiter);
            BusyWindow::new(r.section).with_busy_slots(busy)
        })
        .collect())
}

/// Reads all four reference tables from in-memory sources.
pub fn read_reference<S, T, L, B>(
    students: S,
    teachers: T,
    slots: L,
    busy: B,
    config: &EvalConfig,
) -> EvalResult<ReferenceData>
where
    S: Read,
    T: Read,
    L: Read,
    B: Read,
{
    Ok(ReferenceData {
        students: read_students(students)?,
        teachers: read_teachers(teachers, config.slot_delimiter)?,
        slots: read_slots(slots)?,
        busy_windows: read_busy_windows(busy, config.slot_delimiter)?,
    })
}

fn open(path: &Path) -> EvalResult<File> {
    File::open(path).map_err(|source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the four reference tables from a directory.
pub fn load_reference_dir(dir: impl AsRef<Path>, config: &EvalConfig) -> EvalResult<ReferenceData> {
    let dir = dir.as_ref();
    let data = read_reference(
        open(&dir.join(STUDENTS_FILE))?,
        open(&dir.join(TEACHERS_FILE))?,
        open(&dir.join(SLOTS_FILE))?,
        open(&dir.join(BUSY_FILE))?,
        config,
    )?;
    debug!(
        dir = %dir.display(),
        students = data.students.len(),
        teachers = data.teachers.len(),
        slots = data.slots.len(),
        busy_windows = data.busy_windows.len(),
        "reference tables loaded"
    );
    Ok(data)
}

/// Parses a candidate schedule from JSON text.
///
/// # Errors
/// [`EvalError::Json`] if the text is not JSON, [`EvalError::NotAnArray`]
/// if it is JSON but not an array. Malformed elements are never errors.
pub fn parse_schedule_json(text: &str) -> EvalResult<Vec<ScheduleEntry>> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => Ok(items.iter().map(ScheduleEntry::from_value).collect()),
        Value::Null => Err(EvalError::NotAnArray("null")),
        Value::Bool(_) => Err(EvalError::NotAnArray("a boolean")),
        Value::Number(_) => Err(EvalError::NotAnArray("a number")),
        Value::String(_) => Err(EvalError::NotAnArray("a string")),
        Value::Object(_) => Err(EvalError::NotAnArray("an object")),
    }
}

/// Extracts the schedule array from raw generator output.
///
/// Generators often wrap the JSON in prose or code fences. The slice from
/// the first `[` to the last `]` is taken as the schedule.
pub fn extract_schedule_json(output: &str) -> EvalResult<&str> {
    let start = output.find('[').ok_or(EvalError::NoScheduleFound)?;
    let end = output.rfind(']').ok_or(EvalError::NoScheduleFound)?;
    if end < start {
        return Err(EvalError::NoScheduleFound);
    }
    Ok(&output[start..=end])
}

/// Parses a candidate schedule from raw generator output.
pub fn parse_generator_output(output: &str) -> EvalResult<Vec<ScheduleEntry>> {
    parse_schedule_json(extract_schedule_json(output)?)
}

/// Loads a candidate schedule file (plain JSON or raw generator output).
pub fn load_schedule_file(path: impl AsRef<Path>) -> EvalResult<Vec<ScheduleEntry>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let schedule = parse_generator_output(&text)?;
    debug!(path = %path.display(), entries = schedule.len(), "candidate schedule loaded");
    Ok(schedule)
}
