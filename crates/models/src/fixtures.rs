//! Fixed records served to guests instead of backend data.
//!
//! The records are kept as raw JSON so that guests see exactly the shape a
//! list or show page would receive from the backend.

use crate::{resource::Resource, school_data::RecordId};
use lazy_static::lazy_static;
use serde_json::{Value, json};

#[allow(clippy::too_many_arguments)]
fn class(
    id: &str,
    name: &str,
    description: &str,
    status: &str,
    capacity: u32,
    teacher: (&str, &str),
    subject: (&str, &str),
    dates: (&str, &str),
) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "status": status,
        "capacity": capacity,
        "teacher": { "id": teacher.0, "name": teacher.1 },
        "subject": { "id": subject.0, "name": subject.1 },
        "bannerUrl": null,
        "bannerCldPubId": null,
        "createdAt": timestamp(dates.0),
        "updatedAt": timestamp(dates.1),
    })
}

fn person(id: &str, name: &str, email: &str, role: &str, created: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "role": role,
        "createdAt": timestamp(created),
        "updatedAt": timestamp("2024-02-10"),
    })
}

fn timestamp(date: &str) -> String {
    format!("{date}T00:00:00.000Z")
}

const SMITH: (&str, &str) = ("t1", "Dr. John Smith");
const JOHNSON: (&str, &str) = ("t2", "Sarah Johnson");
const CHEN: (&str, &str) = ("t3", "Prof. Michael Chen");

const COMPUTER_SCIENCE: (&str, &str) = ("s1", "Computer Science");
const WEB_DEVELOPMENT: (&str, &str) = ("s2", "Web Development");
const DATA_SCIENCE: (&str, &str) = ("s3", "Data Science");

lazy_static! {
    pub static ref CLASSES: Vec<Value> = vec![
        class(
            "1",
            "Advanced Python Programming",
            "Learn advanced Python concepts and best practices",
            "active",
            30,
            SMITH,
            COMPUTER_SCIENCE,
            ("2024-01-15", "2024-02-10"),
        ),
        class(
            "2",
            "Introduction to Web Development",
            "Master HTML, CSS, and JavaScript for modern web apps",
            "active",
            25,
            JOHNSON,
            WEB_DEVELOPMENT,
            ("2024-01-20", "2024-02-12"),
        ),
        class(
            "3",
            "Data Science Fundamentals",
            "Explore data analysis, visualization, and machine learning basics",
            "active",
            28,
            CHEN,
            DATA_SCIENCE,
            ("2024-02-01", "2024-02-11"),
        ),
        class(
            "4",
            "Database Design & SQL",
            "Design efficient databases and master SQL queries",
            "active",
            20,
            SMITH,
            COMPUTER_SCIENCE,
            ("2024-02-05", "2024-02-13"),
        ),
        class(
            "5",
            "Cloud Computing with AWS",
            "Deploy and manage applications on Amazon Web Services",
            "active",
            22,
            JOHNSON,
            WEB_DEVELOPMENT,
            ("2024-02-08", "2024-02-14"),
        ),
        class(
            "6",
            "Mobile App Development",
            "Build native and cross-platform mobile applications",
            "inactive",
            24,
            CHEN,
            DATA_SCIENCE,
            ("2024-01-10", "2024-02-09"),
        ),
    ];
    pub static ref SUBJECTS: Vec<Value> = [
        ("s1", "Computer Science", "CS", "Core computer science concepts and programming", "d1"),
        ("s2", "Web Development", "WD", "Frontend and backend web technologies", "d1"),
        ("s3", "Data Science", "DS", "Data analysis, visualization, and machine learning", "d2"),
        ("s4", "Mathematics", "MATH", "Advanced mathematics for computer science", "d1"),
    ]
    .into_iter()
    .map(|(id, name, code, description, department_id)| {
        json!({
            "id": id,
            "name": name,
            "code": code,
            "description": description,
            "departmentId": department_id,
            "createdAt": timestamp("2024-01-01"),
            "updatedAt": timestamp("2024-02-10"),
        })
    })
    .collect();
    pub static ref TEACHERS: Vec<Value> = vec![
        person("t1", "Dr. John Smith", "john.smith@school.edu", "teacher", "2024-01-01"),
        person("t2", "Sarah Johnson", "sarah.johnson@school.edu", "teacher", "2024-01-01"),
        person("t3", "Prof. Michael Chen", "michael.chen@school.edu", "teacher", "2024-01-01"),
        person("t4", "Dr. Emily Roberts", "emily.roberts@school.edu", "teacher", "2024-01-05"),
    ];
    pub static ref STUDENTS: Vec<Value> = vec![
        person("st1", "Alice Martinez", "alice.martinez@student.school.edu", "student", "2024-01-10"),
        person("st2", "Bob Wilson", "bob.wilson@student.school.edu", "student", "2024-01-12"),
        person("st3", "Carol Davis", "carol.davis@student.school.edu", "student", "2024-01-15"),
        person("st4", "David Brown", "david.brown@student.school.edu", "student", "2024-01-18"),
        person("st5", "Emma Taylor", "emma.taylor@student.school.edu", "student", "2024-01-20"),
    ];
    pub static ref DEPARTMENTS: Vec<Value> = vec![
        json!({
            "id": "d1",
            "name": "School of Computing",
            "description": "Computer Science, Software Engineering, and Web Development",
            "code": "SOC",
            "createdAt": timestamp("2024-01-01"),
            "updatedAt": timestamp("2024-02-10"),
        }),
        json!({
            "id": "d2",
            "name": "School of Data Science",
            "description": "Data Science and Analytics programs",
            "code": "SDS",
            "createdAt": timestamp("2024-01-01"),
            "updatedAt": timestamp("2024-02-10"),
        }),
    ];
}

/// Fixture records for a resource. `teachers` and `users` share one set;
/// resources without fixtures get an empty slice.
pub fn records(resource: Resource) -> &'static [Value] {
    match resource {
        Resource::Classes => CLASSES.as_slice(),
        Resource::Subjects => SUBJECTS.as_slice(),
        Resource::Teachers | Resource::Users => TEACHERS.as_slice(),
        Resource::Students => STUDENTS.as_slice(),
        Resource::Departments => DEPARTMENTS.as_slice(),
        Resource::Dashboard | Resource::Attendance => &[],
    }
}

/// First fixture record of `resource` whose `id` matches
pub fn find(resource: Resource, id: &RecordId) -> Option<&'static Value> {
    records(resource)
        .iter()
        .find(|record| record.get("id").is_some_and(|value| id.matches(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::school_data::{ClassDetails, ClassStatus, Department, Subject, User, UserRole};

    #[test]
    fn test_fixture_sizes() {
        assert_eq!(records(Resource::Classes).len(), 6);
        assert_eq!(records(Resource::Subjects).len(), 4);
        assert_eq!(records(Resource::Teachers).len(), 4);
        assert_eq!(records(Resource::Students).len(), 5);
        assert_eq!(records(Resource::Departments).len(), 2);
        assert!(records(Resource::Attendance).is_empty());
    }

    #[test]
    fn test_users_alias_teachers() {
        assert_eq!(records(Resource::Users), records(Resource::Teachers));
    }

    #[test]
    fn test_find() {
        let found = find(Resource::Departments, &RecordId::from("d2")).unwrap();
        assert_eq!(found["name"], "School of Data Science");

        // Numeric ids compare by their text form
        let found = find(Resource::Classes, &RecordId::Number(3)).unwrap();
        assert_eq!(found["name"], "Data Science Fundamentals");

        assert!(find(Resource::Subjects, &RecordId::from("s9")).is_none());
        assert!(find(Resource::Attendance, &RecordId::from("1")).is_none());
    }

    #[test]
    fn test_fixtures_decode_into_models() {
        let classes: Vec<ClassDetails> =
            serde_json::from_value(Value::Array(CLASSES.clone())).unwrap();
        let active = classes
            .iter()
            .filter(|c| c.status == ClassStatus::Active)
            .count();
        assert_eq!(active, 5);

        let subjects: Vec<Subject> =
            serde_json::from_value(Value::Array(SUBJECTS.clone())).unwrap();
        assert_eq!(subjects[3].code, "MATH");

        let teachers: Vec<User> = serde_json::from_value(Value::Array(TEACHERS.clone())).unwrap();
        assert!(teachers.iter().all(|t| t.role == UserRole::Teacher));

        let departments: Vec<Department> =
            serde_json::from_value(Value::Array(DEPARTMENTS.clone())).unwrap();
        assert_eq!(departments[0].code.as_deref(), Some("SOC"));
    }
}
