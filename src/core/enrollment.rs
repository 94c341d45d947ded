//! Enrollments and grade records.
//!
//! Each student has one list of grade records, keyed by student id. A grade
//! write replaces the student's whole list with the updated copy.

use crate::{
    core::{
        grading::{GradingPolicy, validate_score},
        model::{GradeRecord, PortalState, Student},
        students::find_student,
        subjects::find_subject,
    },
    errors::{Error, Result},
};
use std::fmt;
use tracing::{debug, info};

/// A reference to a record that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
    /// A student's grade record points at a deleted subject
    EnrolledSubject {
        /// Student holding the record
        student_id: String,
        /// Missing subject
        subject_id: String,
    },
    /// A teacher assignment points at a deleted subject
    AssignedSubject {
        /// Teacher holding the assignment
        teacher_id: String,
        /// Missing subject
        subject_id: String,
    },
    /// An enrollment list belongs to a deleted student
    EnrollmentOwner {
        /// Missing student
        student_id: String,
    },
    /// A subject's teacher id points at a deleted account
    SubjectTeacher {
        /// Subject holding the reference
        subject_id: String,
        /// Missing account
        teacher_id: String,
    },
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnrolledSubject {
                student_id,
                subject_id,
            } => write!(f, "student {student_id} is enrolled in missing subject {subject_id}"),
            Self::AssignedSubject {
                teacher_id,
                subject_id,
            } => write!(f, "teacher {teacher_id} is assigned missing subject {subject_id}"),
            Self::EnrollmentOwner { student_id } => {
                write!(f, "enrollment list belongs to missing student {student_id}")
            }
            Self::SubjectTeacher {
                subject_id,
                teacher_id,
            } => write!(f, "subject {subject_id} points at missing teacher {teacher_id}"),
        }
    }
}

/// Grade records of a student (empty when not enrolled anywhere).
#[must_use]
pub fn enrollments_for<'a>(state: &'a PortalState, student_id: &str) -> &'a [GradeRecord] {
    state
        .enrollments
        .get(student_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Enrolls a student in a subject with an ungraded record.
pub fn enroll_student(
    state: &mut PortalState,
    student_id: &str,
    subject_id: &str,
) -> Result<GradeRecord> {
    if find_student(state, student_id).is_none() {
        return Err(Error::not_found("Student", student_id));
    }
    let subject = find_subject(state, subject_id)
        .ok_or_else(|| Error::not_found("Subject", subject_id))?;

    let current = enrollments_for(state, student_id);
    if current.iter().any(|r| r.subject_id == subject_id) {
        return Err(Error::transition(format!(
            "Student {student_id} is already enrolled in {}",
            subject.name
        )));
    }

    let record = GradeRecord::ungraded(subject);
    let mut records = current.to_vec();
    records.push(record.clone());
    state.enrollments.insert(student_id.to_string(), records);
    info!(student_id, subject_id, "Student enrolled");
    Ok(record)
}

/// Removes a student's record for a subject.
pub fn unenroll_student(
    state: &mut PortalState,
    student_id: &str,
    subject_id: &str,
) -> Result<GradeRecord> {
    let current = enrollments_for(state, student_id);
    let Some(index) = current.iter().position(|r| r.subject_id == subject_id) else {
        return Err(Error::transition(format!(
            "Student {student_id} is not enrolled in subject {subject_id}"
        )));
    };

    let mut records = current.to_vec();
    let removed = records.remove(index);
    if records.is_empty() {
        state.enrollments.remove(student_id);
    } else {
        state.enrollments.insert(student_id.to_string(), records);
    }
    info!(student_id, subject_id, "Student unenrolled");
    Ok(removed)
}

/// Writes midterm and final scores for a student's subject.
///
/// The record is upserted by subject id, so saving twice overwrites. Stored
/// equivalents use the linear transform; rating and status follow `policy`.
pub fn save_grade_record(
    state: &mut PortalState,
    student_id: &str,
    subject_id: &str,
    midterm: Option<f64>,
    final_score: Option<f64>,
    policy: &GradingPolicy,
) -> Result<GradeRecord> {
    let midterm = validate_score("Midterm", midterm)?;
    let final_score = validate_score("Final", final_score)?;
    if find_student(state, student_id).is_none() {
        return Err(Error::not_found("Student", student_id));
    }
    let subject = find_subject(state, subject_id)
        .ok_or_else(|| Error::not_found("Subject", subject_id))?;

    let evaluation = policy.evaluate(midterm, final_score);
    let record = GradeRecord {
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        midterm,
        midterm_eq: evaluation.midterm_eq,
        final_score,
        final_eq: evaluation.final_eq,
        rating: evaluation.rating,
        status: evaluation.status,
    };

    let mut records = enrollments_for(state, student_id).to_vec();
    match records.iter_mut().find(|r| r.subject_id == subject_id) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
    state.enrollments.insert(student_id.to_string(), records);
    debug!(student_id, subject_id, status = %record.status, "Grade record saved");
    Ok(record)
}

/// Saves scores for a subject the student is already enrolled in.
///
/// Same as [`save_grade_record`] but refuses to create the enrollment.
pub fn grade_enrolled_student(
    state: &mut PortalState,
    student_id: &str,
    subject_id: &str,
    midterm: Option<f64>,
    final_score: Option<f64>,
    policy: &GradingPolicy,
) -> Result<GradeRecord> {
    let enrolled = enrollments_for(state, student_id)
        .iter()
        .any(|r| r.subject_id == subject_id);
    if !enrolled {
        return Err(Error::transition(format!(
            "Student {student_id} is not enrolled in subject {subject_id}"
        )));
    }
    save_grade_record(state, student_id, subject_id, midterm, final_score, policy)
}

/// Students enrolled in a subject with their record, ordered by list name.
#[must_use]
pub fn students_in_subject<'a>(
    state: &'a PortalState,
    subject_id: &str,
) -> Vec<(&'a Student, &'a GradeRecord)> {
    let mut rows: Vec<(&Student, &GradeRecord)> = state
        .enrollments
        .iter()
        .filter_map(|(student_id, records)| {
            let record = records.iter().find(|r| r.subject_id == subject_id)?;
            let student = find_student(state, student_id)?;
            Some((student, record))
        })
        .collect();
    rows.sort_by_key(|(student, _)| student.list_name().to_lowercase());
    rows
}

/// Every reference to a student, subject or teacher that no longer exists.
#[must_use]
pub fn dangling_references(state: &PortalState) -> Vec<DanglingReference> {
    let mut found = Vec::new();

    for (student_id, records) in &state.enrollments {
        if find_student(state, student_id).is_none() {
            found.push(DanglingReference::EnrollmentOwner {
                student_id: student_id.clone(),
            });
        }
        for record in records {
            if find_subject(state, &record.subject_id).is_none() {
                found.push(DanglingReference::EnrolledSubject {
                    student_id: student_id.clone(),
                    subject_id: record.subject_id.clone(),
                });
            }
        }
    }

    for (teacher_id, subject_ids) in &state.teacher_assignments {
        for subject_id in subject_ids {
            if find_subject(state, subject_id).is_none() {
                found.push(DanglingReference::AssignedSubject {
                    teacher_id: teacher_id.clone(),
                    subject_id: subject_id.clone(),
                });
            }
        }
    }

    for subject in &state.subjects {
        if let Some(teacher_id) = subject.teacher_id.as_deref() {
            if state.user(teacher_id).is_none() {
                found.push(DanglingReference::SubjectTeacher {
                    subject_id: subject.id.clone(),
                    teacher_id: teacher_id.to_string(),
                });
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        assignments::{assign_subject, subjects_for_teacher},
        dashboard::subject_gradebook,
        model::GradeStatus,
        subjects::{add_subject, delete_subject},
    };
    use crate::test_utils::{
        create_test_student, create_test_subject, create_test_teacher, default_state, new_subject,
    };

    #[test]
    fn test_enroll_and_unenroll() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");

        let record = enroll_student(&mut state, &student.id, &subject.id).unwrap();
        assert_eq!(record.status, GradeStatus::Incomplete);
        assert_eq!(enrollments_for(&state, &student.id).len(), 1);

        assert!(matches!(
            enroll_student(&mut state, &student.id, &subject.id).unwrap_err(),
            Error::InvalidTransition { .. }
        ));

        unenroll_student(&mut state, &student.id, &subject.id).unwrap();
        assert!(enrollments_for(&state, &student.id).is_empty());
        assert!(!state.enrollments.contains_key(&student.id));
        assert!(unenroll_student(&mut state, &student.id, &subject.id).is_err());
    }

    #[test]
    fn test_enroll_unknown_ids() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        assert!(matches!(
            enroll_student(&mut state, &student.id, "SUB-0404").unwrap_err(),
            Error::NotFound { entity: "Subject", .. }
        ));
        assert!(matches!(
            enroll_student(&mut state, "STU-0404", "SUB-0404").unwrap_err(),
            Error::NotFound { entity: "Student", .. }
        ));
    }

    #[test]
    fn test_save_grade_record_computes_fields() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");

        let record = save_grade_record(
            &mut state,
            &student.id,
            &subject.id,
            Some(85.0),
            Some(90.0),
            &GradingPolicy::default(),
        )
        .unwrap();
        assert_eq!(record.midterm_eq, Some(8.1));
        assert_eq!(record.final_eq, Some(8.6));
        assert_eq!(record.rating, Some(8.35));
        assert_eq!(record.status, GradeStatus::Passed);
        assert_eq!(record.subject_name, "Algebra");
    }

    #[test]
    fn test_save_grade_record_twice_overwrites() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");
        let policy = GradingPolicy::default();

        save_grade_record(&mut state, &student.id, &subject.id, Some(60.0), None, &policy)
            .unwrap();
        save_grade_record(&mut state, &student.id, &subject.id, Some(80.0), Some(82.0), &policy)
            .unwrap();

        let records = enrollments_for(&state, &student.id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].midterm, Some(80.0));
        assert_eq!(records[0].final_score, Some(82.0));
    }

    #[test]
    fn test_save_grade_record_rejects_out_of_range() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");
        let err = save_grade_record(
            &mut state,
            &student.id,
            &subject.id,
            Some(101.0),
            Some(90.0),
            &GradingPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(enrollments_for(&state, &student.id).is_empty());
    }

    #[test]
    fn test_deleting_subject_leaves_dangling_enrollment() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");
        enroll_student(&mut state, &student.id, &subject.id).unwrap();
        state
            .teacher_assignments
            .insert("USR-0002".to_string(), vec![subject.id.clone()]);

        delete_subject(&mut state, &subject.id).unwrap();

        let records = enrollments_for(&state, &student.id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject_id, subject.id);

        let dangling = dangling_references(&state);
        assert!(dangling.contains(&DanglingReference::EnrolledSubject {
            student_id: student.id.clone(),
            subject_id: subject.id.clone(),
        }));
        assert!(dangling.contains(&DanglingReference::AssignedSubject {
            teacher_id: "USR-0002".to_string(),
            subject_id: subject.id.clone(),
        }));
    }

    #[test]
    fn test_grading_requires_enrollment() {
        let mut state = default_state();
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");
        let policy = GradingPolicy::default();

        let err = grade_enrolled_student(
            &mut state,
            &student.id,
            &subject.id,
            Some(80.0),
            Some(85.0),
            &policy,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert!(enrollments_for(&state, &student.id).is_empty());

        enroll_student(&mut state, &student.id, &subject.id).unwrap();
        let record = grade_enrolled_student(
            &mut state,
            &student.id,
            &subject.id,
            Some(80.0),
            Some(85.0),
            &policy,
        )
        .unwrap();
        assert_eq!(record.status, GradeStatus::Passed);
        assert_eq!(enrollments_for(&state, &student.id).len(), 1);
    }

    #[test]
    fn test_new_subject_does_not_inherit_deleted_subject_references() {
        let mut state = default_state();
        let policy = GradingPolicy::default();
        let teacher = create_test_teacher(&mut state, "mreyes");
        let student = create_test_student(&mut state, "Ana", "Reyes");
        let old = create_test_subject(&mut state, "MATH1", "Algebra");
        assign_subject(&mut state, &teacher.id, &old.id).unwrap();
        save_grade_record(&mut state, &student.id, &old.id, Some(50.0), Some(40.0), &policy)
            .unwrap();

        delete_subject(&mut state, &old.id).unwrap();
        let physics = add_subject(&mut state, new_subject("PHYS1", "Physics")).unwrap();
        assert_ne!(physics.id, old.id);

        let dangling = dangling_references(&state);
        assert!(dangling.contains(&DanglingReference::EnrolledSubject {
            student_id: student.id.clone(),
            subject_id: old.id.clone(),
        }));
        assert!(dangling.contains(&DanglingReference::AssignedSubject {
            teacher_id: teacher.id.clone(),
            subject_id: old.id.clone(),
        }));

        let book = subject_gradebook(&state, &physics.id, &policy).unwrap();
        assert!(book.rows.is_empty());
        assert!(subjects_for_teacher(&state, &teacher).is_empty());
    }

    #[test]
    fn test_students_in_subject_sorted() {
        let mut state = default_state();
        let zed = create_test_student(&mut state, "Zed", "Torres");
        let ana = create_test_student(&mut state, "Ana", "Bautista");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");
        enroll_student(&mut state, &zed.id, &subject.id).unwrap();
        enroll_student(&mut state, &ana.id, &subject.id).unwrap();

        let rows = students_in_subject(&state, &subject.id);
        let ids: Vec<&str> = rows.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(ids, vec![ana.id.as_str(), zed.id.as_str()]);
    }
}
