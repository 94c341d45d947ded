//! Portal domain model.
//!
//! Everything the portal knows lives in one [`PortalState`] value. It is
//! serialized as a single camelCase JSON document, so field names here are the
//! persisted layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// Account role. Decides which command group a user may open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages students, subjects, enrollments and accounts
    Admin,
    /// Grades the subjects they own
    Teacher,
    /// Reads their own grades
    Student,
}

impl Role {
    /// Lower-case name as stored and shown.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(Error::validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// Whether a student or account is in use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Normal state
    #[default]
    Active,
    /// Kept on record but cannot log in
    Inactive,
}

impl AccountStatus {
    /// Lower-case name as stored and shown.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student record managed by admins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Portal identifier (`STU-0001`)
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Middle name, if any
    #[serde(default)]
    pub middle_name: Option<String>,
    /// Family name
    pub last_name: String,
    /// Degree program, e.g. "BSIT"
    pub course: String,
    /// Year level (1-based)
    pub year_level: u8,
    /// Section label
    pub section: String,
    /// Phone number
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Home address
    #[serde(default)]
    pub address: Option<String>,
    /// Guardian's name
    #[serde(default)]
    pub guardian_name: Option<String>,
    /// Guardian's phone number
    #[serde(default)]
    pub guardian_contact: Option<String>,
    /// Username of the linked student account, if one was created
    #[serde(default)]
    pub username: Option<String>,
    /// Enrollment status
    #[serde(default)]
    pub status: AccountStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// "First Last" display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "Last, First M." as used in class lists and exports.
    #[must_use]
    pub fn list_name(&self) -> String {
        match self.middle_name.as_deref().and_then(|m| m.chars().next()) {
            Some(initial) => format!("{}, {} {initial}.", self.last_name, self.first_name),
            None => format!("{}, {}", self.last_name, self.first_name),
        }
    }
}

/// A subject offering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Portal identifier (`SUB-0001`)
    pub id: String,
    /// Catalog code, unique case-insensitively
    pub code: String,
    /// Descriptive title
    pub name: String,
    /// Year level the subject is offered to
    pub grade_level: u8,
    /// Section label
    pub section: String,
    /// Free-text teacher name typed by whoever created the subject
    #[serde(default)]
    pub teacher_name: String,
    /// Teacher account explicitly assigned to the subject
    #[serde(default)]
    pub teacher_id: Option<String>,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of a grade record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeStatus {
    /// Both terms graded and the policy's threshold met
    Passed,
    /// Both terms graded and the threshold missed
    Failed,
    /// At least one term has no score yet
    #[default]
    Incomplete,
}

impl GradeStatus {
    /// Remark text used in views and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Incomplete => "Incomplete",
        }
    }
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One enrollment entry: a subject and the grades earned in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    /// Subject this entry belongs to
    pub subject_id: String,
    /// Subject name at the time of the last write
    pub subject_name: String,
    /// Raw midterm score (0-100)
    #[serde(default)]
    pub midterm: Option<f64>,
    /// Linear equivalent of the midterm score
    #[serde(default)]
    pub midterm_eq: Option<f64>,
    /// Raw final score (0-100)
    #[serde(default, rename = "final")]
    pub final_score: Option<f64>,
    /// Linear equivalent of the final score
    #[serde(default)]
    pub final_eq: Option<f64>,
    /// Rating under the grading policy
    #[serde(default)]
    pub rating: Option<f64>,
    /// Verdict under the grading policy
    #[serde(default)]
    pub status: GradeStatus,
}

impl GradeRecord {
    /// Enrollment entry with no grades yet.
    #[must_use]
    pub fn ungraded(subject: &Subject) -> Self {
        Self {
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            midterm: None,
            midterm_eq: None,
            final_score: None,
            final_eq: None,
            rating: None,
            status: GradeStatus::Incomplete,
        }
    }
}

/// A login account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Portal identifier (`USR-0001`)
    pub id: String,
    /// Login name, unique case-insensitively
    pub username: String,
    /// Email address, unique case-insensitively
    pub email: String,
    /// Stored and compared as typed
    pub password: String,
    /// Account role
    pub role: Role,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Student record this account belongs to
    #[serde(default)]
    pub student_id: Option<String>,
    /// Inactive accounts cannot log in
    #[serde(default)]
    pub status: AccountStatus,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last successful login
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last", falling back to the username when no name is set.
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

/// The whole portal: every collection plus the logged-in account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalState {
    /// All students
    #[serde(default)]
    pub students: Vec<Student>,
    /// All subjects
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Student id to that student's grade records
    #[serde(default)]
    pub enrollments: BTreeMap<String, Vec<GradeRecord>>,
    /// All accounts
    #[serde(default)]
    pub users: Vec<User>,
    /// Account that logged in most recently
    #[serde(default)]
    pub current_user: Option<User>,
    /// Teacher user id to assigned subject ids
    #[serde(default)]
    pub teacher_assignments: BTreeMap<String, Vec<String>>,
    /// Last number handed out per id prefix; ids are never reused
    #[serde(default)]
    pub sequences: BTreeMap<String, u32>,
}

impl PortalState {
    /// Every id the state mentions, including references to deleted records.
    fn known_ids(&self) -> impl Iterator<Item = &str> {
        let records = self
            .students
            .iter()
            .map(|s| s.id.as_str())
            .chain(self.subjects.iter().map(|s| s.id.as_str()))
            .chain(self.users.iter().map(|u| u.id.as_str()));
        let references = self
            .subjects
            .iter()
            .filter_map(|s| s.teacher_id.as_deref())
            .chain(self.users.iter().filter_map(|u| u.student_id.as_deref()))
            .chain(self.enrollments.keys().map(String::as_str))
            .chain(
                self.enrollments
                    .values()
                    .flatten()
                    .map(|r| r.subject_id.as_str()),
            )
            .chain(self.teacher_assignments.keys().map(String::as_str))
            .chain(
                self.teacher_assignments
                    .values()
                    .flatten()
                    .map(String::as_str),
            );
        records.chain(references)
    }

    /// Allocates the next identifier for `prefix`, e.g. `STU-0001`.
    ///
    /// Numbers only grow: the counter starts above both the stored sequence
    /// and every id already mentioned in the state, so a deleted record's id
    /// is never handed out again.
    pub(crate) fn next_id(&mut self, prefix: &str) -> Result<String, Error> {
        let head = format!("{prefix}-");
        let highest_seen = self
            .known_ids()
            .filter_map(|id| id.strip_prefix(&head))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        let last = self
            .sequences
            .get(prefix)
            .copied()
            .unwrap_or(0)
            .max(highest_seen);
        let next = last
            .checked_add(1)
            .ok_or_else(|| Error::validation(format!("No {prefix} identifiers left")))?;
        self.sequences.insert(prefix.to_string(), next);
        Ok(format!("{head}{next:04}"))
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Number of admin accounts.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.role == Role::Admin).count()
    }
}
