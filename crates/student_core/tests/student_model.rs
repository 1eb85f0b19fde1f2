use student_core::model::student::{validate_age, validate_name};
use student_core::{
    FieldValue, Student, StudentId, StudentPatch, StudentRecord, StudentValidationError,
};

fn ann() -> Student {
    Student::new(
        "Ann",
        21,
        Some("ann@x.com".to_string()),
        Some("F".to_string()),
        vec!["Math".to_string(), "CS".to_string()],
    )
}

#[test]
fn new_student_gets_fresh_short_id() {
    let first = ann();
    let second = ann();

    assert_eq!(first.student_id.as_str().len(), 8);
    assert_ne!(first.student_id, second.student_id);
}

#[test]
fn courses_serialized_uses_list_literal_form() {
    assert_eq!(ann().courses_serialized(), "['Math', 'CS']");

    let none = Student::new("Solo", 30, None, None, Vec::new());
    assert_eq!(none.courses_serialized(), "[]");
}

#[test]
fn to_map_exposes_all_fields_with_copied_courses() {
    let student = ann();
    let mut map = student.to_map();

    assert_eq!(
        map.get("Student ID"),
        Some(&FieldValue::Text(student.student_id.to_string()))
    );
    assert_eq!(map.get("Name"), Some(&FieldValue::Text("Ann".to_string())));
    assert_eq!(map.get("Age"), Some(&FieldValue::Integer(21)));
    assert_eq!(map.get("Gender"), Some(&FieldValue::Text("F".to_string())));

    if let Some(FieldValue::List(courses)) = map.get_mut("Courses") {
        courses.push("History".to_string());
    } else {
        panic!("courses should be a list");
    }
    assert_eq!(student.courses(), ["Math".to_string(), "CS".to_string()]);
}

#[test]
fn to_map_serializes_absent_fields_as_null() {
    let student = Student::new("Solo", 30, None, None, Vec::new());
    let json = serde_json::to_value(student.to_map()).unwrap();

    assert_eq!(json["Email"], serde_json::Value::Null);
    assert_eq!(json["Gender"], serde_json::Value::Null);
    assert_eq!(json["Courses"], serde_json::json!([]));
    assert_eq!(json["Age"], 30);
}

#[test]
fn debug_output_is_limited_to_identity_fields() {
    let rendered = format!("{:?}", ann());
    assert!(rendered.contains("Ann"));
    assert!(rendered.contains("21"));
    assert!(!rendered.contains("ann@x.com"));
}

#[test]
fn field_validation_reports_age_and_name_problems() {
    assert!(validate_age(1).is_ok());
    assert_eq!(
        validate_age(0),
        Err(StudentValidationError::NonPositiveAge(0))
    );
    assert!(validate_name("Ann").is_ok());
    assert_eq!(validate_name(" "), Err(StudentValidationError::EmptyName));
}

#[test]
fn patch_merge_keeps_unsupplied_fields() {
    let current = StudentRecord {
        student_id: StudentId::from_stored("a1b2c3d4"),
        name: "Ann".to_string(),
        age: 21,
        email: Some("ann@x.com".to_string()),
        gender: Some("F".to_string()),
        courses: Some("['Math']".to_string()),
    };

    assert!(StudentPatch::default().is_empty());
    assert_eq!(StudentPatch::default().merge_into(&current), current);

    let patch = StudentPatch {
        age: Some(22),
        courses: Some(vec!["Art".to_string()]),
        ..StudentPatch::default()
    };
    let merged = patch.merge_into(&current);
    assert_eq!(merged.age, 22);
    assert_eq!(merged.courses.as_deref(), Some("['Art']"));
    assert_eq!(merged.name, current.name);
    assert_eq!(merged.email, current.email);
    assert_eq!(merged.student_id, current.student_id);
}

#[test]
fn record_serializes_raw_courses_text() {
    let record = StudentRecord {
        student_id: StudentId::from_stored("a1b2c3d4"),
        name: "Ann".to_string(),
        age: 21,
        email: None,
        gender: None,
        courses: Some("['Math', 'CS']".to_string()),
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["student_id"], "a1b2c3d4");
    assert_eq!(json["courses"], "['Math', 'CS']");
}
