//! Property tests over arbitrary candidate schedules.

use proptest::prelude::*;
use proptest::sample::select;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::{json, Value};

use u_schedule_eval::loader::parse_schedule_json;
use u_schedule_eval::models::{
    BusyWindow, ReferenceData, ScheduleEntry, Slot, SlotId, Student, Teacher,
};
use u_schedule_eval::{EvalConfig, Evaluator};

const STUDENTS: [&str; 6] = ["Asha", "Ben", "Cleo", "Dev", "Eli", "Fay"];
const TEACHERS: [&str; 3] = ["Mr. Rao", "Ms. Iyer", "Mx. Chen"];
/// Slot values drawn for schedules; `0.5` and `9` are not in the slot table.
const SLOT_VALUES: [f64; 9] = [0.5, 1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 9.0];

fn reference() -> ReferenceData {
    let mut data = ReferenceData::new();
    for (i, name) in STUDENTS.iter().enumerate() {
        let section = ["X", "Y", "Z"][i % 3];
        data = data.with_student(Student::new(*name, section, 15.0 * i as f64, "Math"));
    }
    data = data
        .with_teacher(Teacher::new("Mr. Rao", "Math").with_free_slots(["1", "2.0", "3", "2.5"]))
        .with_teacher(Teacher::new("Ms. Iyer", "Math").with_free_slots(["3.00", "4"]))
        .with_teacher(Teacher::new("Mx. Chen", "Math").with_free_slots([5_i64, 6]));
    for id in ["1", "2", "3.0", "4", "5.0", "6"] {
        data = data.with_slot(Slot::new(id));
    }
    data = data.with_slot(Slot::new(2.5_f64));
    data.with_busy_window(BusyWindow::new("X").with_busy_slots(["1.0", "4", "2.50"]))
        .with_busy_window(BusyWindow::new("Y").with_busy_slot(5_i64))
}

fn evaluator(config: EvalConfig) -> Evaluator {
    Evaluator::new(reference(), config).unwrap()
}

fn names(pool: &[&str], extra: &[&str]) -> Vec<String> {
    pool.iter().chain(extra).map(|s| s.to_string()).collect()
}

/// Entries that may reference ghosts, miss fields, or use unknown slots.
fn arbitrary_entry() -> impl Strategy<Value = ScheduleEntry> {
    (
        proptest::option::of(select(names(&STUDENTS, &["Ghost", ""]))),
        proptest::option::of(select(names(&TEACHERS, &["Phantom"]))),
        proptest::option::of(select(SLOT_VALUES.to_vec())),
    )
        .prop_map(|(student, teacher, slot)| ScheduleEntry {
            student_name: student,
            subject: Some("Math".into()),
            teacher_name: teacher,
            slot_id: slot.map(SlotId::from_f64),
        })
}

/// Entries referencing only real students, teachers and slots.
fn valid_entry() -> impl Strategy<Value = ScheduleEntry> {
    (
        select(names(&STUDENTS, &[])),
        select(names(&TEACHERS, &[])),
        1_i64..=6,
    )
        .prop_map(|(student, teacher, slot)| ScheduleEntry::new(student, "Math", teacher, slot))
}

/// How a slot value is written into generator JSON.
#[derive(Debug, Clone, Copy)]
enum SlotForm {
    /// `3` or `2.5`
    Number,
    /// `3.0` even when integral
    FloatNumber,
    /// `"3"` or `"2.5"`
    Text,
    /// `"3.00"`, `"2.50"`
    PaddedText,
}

const SLOT_FORMS: [SlotForm; 4] = [
    SlotForm::Number,
    SlotForm::FloatNumber,
    SlotForm::Text,
    SlotForm::PaddedText,
];

fn render_slot(id: &SlotId, form: SlotForm) -> Value {
    let value: f64 = id.as_str().parse().unwrap();
    match form {
        SlotForm::Number if value.fract() == 0.0 => json!(value as i64),
        SlotForm::Number | SlotForm::FloatNumber => json!(value),
        SlotForm::Text => json!(id.as_str()),
        SlotForm::PaddedText => json!(format!(" {value:.2} ")),
    }
}

fn to_json(schedule: &[ScheduleEntry], forms: &[SlotForm]) -> String {
    let items: Vec<Value> = schedule
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let slot = match &e.slot_id {
                Some(id) => render_slot(id, forms[i % forms.len()]),
                None => Value::Null,
            };
            json!({
                "Student Name": e.student_name,
                "Subject": e.subject,
                "Teacher Name": e.teacher_name,
                "Slot_ID": slot,
            })
        })
        .collect();
    Value::Array(items).to_string()
}

proptest! {
    #[test]
    fn metrics_stay_within_bounds(schedule in prop::collection::vec(arbitrary_entry(), 0..40)) {
        let r = evaluator(EvalConfig::default()).evaluate(&schedule);
        prop_assert!((0.0..=100.0).contains(&r.intent_recall));
        prop_assert!((0.0..=100.0).contains(&r.hallucination_rate));
        prop_assert!((0.0..=100.0).contains(&r.constraint_satisfaction_rate));
        prop_assert!(r.violation_count <= r.total_assignments);
        prop_assert!(r.fake_reference_count <= 3 * r.total_assignments);
        prop_assert!(r.unique_students_scheduled <= r.total_failing_students);
        if schedule.is_empty() {
            prop_assert_eq!(r.constraint_satisfaction_rate, 0.0);
        }
    }

    #[test]
    fn recall_is_zero_without_failing_students(schedule in prop::collection::vec(arbitrary_entry(), 0..20)) {
        let config = EvalConfig::default().with_failing_score_threshold(0.0);
        let r = evaluator(config).evaluate(&schedule);
        prop_assert_eq!(r.total_failing_students, 0);
        prop_assert_eq!(r.intent_recall, 0.0);
    }

    #[test]
    fn real_identifiers_are_never_hallucinations(schedule in prop::collection::vec(valid_entry(), 1..30)) {
        let r = evaluator(EvalConfig::default()).evaluate(&schedule);
        prop_assert_eq!(r.hallucination_rate, 0.0);
        prop_assert_eq!(r.fake_reference_count, 0);
    }

    #[test]
    fn slot_representation_does_not_matter(
        schedule in prop::collection::vec(arbitrary_entry(), 0..20),
        mixed in prop::collection::vec(select(SLOT_FORMS.to_vec()), 1..8),
    ) {
        let e = evaluator(EvalConfig::default());
        let baseline = e.evaluate(&schedule);
        for form in SLOT_FORMS {
            let parsed = parse_schedule_json(&to_json(&schedule, &[form])).unwrap();
            prop_assert_eq!(&baseline, &e.evaluate(&parsed), "form {:?}", form);
        }
        let parsed = parse_schedule_json(&to_json(&schedule, &mixed)).unwrap();
        prop_assert_eq!(&baseline, &e.evaluate(&parsed));
    }

    #[test]
    fn evaluation_is_idempotent_and_order_independent(
        schedule in prop::collection::vec(arbitrary_entry(), 0..30),
        seed in any::<u64>(),
    ) {
        let e = evaluator(EvalConfig::default());
        let first = e.evaluate(&schedule);
        prop_assert_eq!(&first, &e.evaluate(&schedule));

        let mut shuffled = schedule.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(&first, &e.evaluate(&shuffled));
    }
}
