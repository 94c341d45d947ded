//! Seed data configuration
//!
//! The `[seed]` table controls the default account passwords and the sample
//! records written when the portal is opened against an empty database.
//! Students, subjects and grades may be replaced wholesale with
//! `[[seed.students]]`, `[[seed.subjects]]` and `[[seed.grades]]` entries.

use serde::Deserialize;

/// The `[seed]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Whether sample students, subjects and grades are created
    pub sample_data: bool,
    /// Password of the default admin account
    pub admin_password: String,
    /// Password of the default teacher account
    pub teacher_password: String,
    /// Sample students
    pub students: Vec<SeedStudent>,
    /// Sample subjects
    pub subjects: Vec<SeedSubject>,
    /// Sample enrollments and grades
    pub grades: Vec<SeedGrade>,
}

/// A sample student.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedStudent {
    /// Given name
    pub first_name: String,
    /// Middle name
    #[serde(default)]
    pub middle_name: Option<String>,
    /// Family name
    pub last_name: String,
    /// Degree program
    pub course: String,
    /// Year level
    pub year_level: u8,
    /// Section label
    pub section: String,
    /// Login name of the linked account
    pub username: String,
    /// Password of the linked account
    pub password: String,
}

/// A sample subject.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSubject {
    /// Catalog code
    pub code: String,
    /// Title
    pub name: String,
    /// Year level
    pub grade_level: u8,
    /// Section label
    pub section: String,
    /// Teacher name as typed
    #[serde(default)]
    pub teacher_name: String,
}

/// A sample enrollment, optionally graded.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedGrade {
    /// Username of a seeded student
    pub username: String,
    /// Code of a seeded subject
    pub subject_code: String,
    /// Raw midterm score
    #[serde(default)]
    pub midterm: Option<f64>,
    /// Raw final score
    #[serde(default, rename = "final")]
    pub final_score: Option<f64>,
}

fn sample_student(first: &str, middle: &str, last: &str, username: &str) -> SeedStudent {
    SeedStudent {
        first_name: first.to_string(),
        middle_name: Some(middle.to_string()),
        last_name: last.to_string(),
        course: "BSIT".to_string(),
        year_level: 1,
        section: "A".to_string(),
        username: username.to_string(),
        password: "student123".to_string(),
    }
}

fn sample_subject(code: &str, name: &str, teacher_name: &str) -> SeedSubject {
    SeedSubject {
        code: code.to_string(),
        name: name.to_string(),
        grade_level: 1,
        section: "A".to_string(),
        teacher_name: teacher_name.to_string(),
    }
}

fn sample_grade(username: &str, code: &str, midterm: Option<f64>, fin: Option<f64>) -> SeedGrade {
    SeedGrade {
        username: username.to_string(),
        subject_code: code.to_string(),
        midterm,
        final_score: fin,
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sample_data: true,
            admin_password: "admin123".to_string(),
            teacher_password: "teacher123".to_string(),
            students: vec![
                sample_student("Juan", "Santos", "Dela Cruz", "juan"),
                sample_student("Ana", "Lopez", "Reyes", "ana"),
                sample_student("Pedro", "Garcia", "Bautista", "pedro"),
            ],
            subjects: vec![
                sample_subject("IT101", "Introduction to Computing", "Ms. Maria Clara"),
                sample_subject("MATH101", "College Algebra", "Maria Clara"),
                sample_subject("ENG101", "Purposive Communication", "Mr. Jose Rizal"),
            ],
            grades: vec![
                sample_grade("juan", "IT101", Some(88.0), Some(91.0)),
                sample_grade("juan", "MATH101", Some(79.0), Some(82.0)),
                sample_grade("ana", "IT101", Some(95.0), Some(97.0)),
                sample_grade("ana", "ENG101", Some(84.0), None),
                sample_grade("pedro", "IT101", Some(68.0), Some(72.0)),
                sample_grade("pedro", "MATH101", None, None),
            ],
        }
    }
}
