//! Teacher name matching.
//!
//! Older subjects only carry the teacher's name as typed text. To work out
//! which of those a teacher owns, the text is compared against several
//! normalized forms of the teacher account's identity.

use crate::core::model::User;

/// Leading titles dropped before comparing names.
const HONORIFICS: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "sir", "maam", "ma'am", "engr", "atty",
];

/// Shortest normalized identifier allowed to take part in substring matching.
const MIN_SUBSTRING_LEN: usize = 3;

/// Lower-cases, trims, strips leading honorifics and drops everything that is
/// not a letter or digit.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut words: Vec<&str> = lowered.split_whitespace().collect();
    while let Some(first) = words.first() {
        let bare = first.trim_end_matches('.');
        if words.len() > 1 && HONORIFICS.contains(&bare) {
            words.remove(0);
        } else {
            break;
        }
    }
    words
        .concat()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Normalized forms of an account's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherIdentity {
    full_name: String,
    username: String,
    exact: Vec<String>,
}

impl TeacherIdentity {
    /// Builds every identifier a teacher's name might have been typed as.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        let full_name = normalize_name(&format!("{} {}", user.first_name, user.last_name));
        let reversed = normalize_name(&format!("{} {}", user.last_name, user.first_name));
        let username = normalize_name(&user.username);
        let email_local = user.email.split('@').next().unwrap_or_default();

        let exact = [
            full_name.clone(),
            reversed,
            username.clone(),
            normalize_name(&user.email),
            normalize_name(email_local),
            normalize_name(&user.first_name),
            normalize_name(&user.last_name),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

        Self {
            full_name,
            username,
            exact,
        }
    }

    /// Whether a subject's free-text teacher name refers to this identity.
    #[must_use]
    pub fn matches(&self, teacher_name: &str) -> bool {
        let candidate = normalize_name(teacher_name);
        if candidate.is_empty() {
            return false;
        }
        if self.exact.iter().any(|id| *id == candidate) {
            return true;
        }
        if candidate.len() < MIN_SUBSTRING_LEN {
            return false;
        }
        [&self.full_name, &self.username]
            .into_iter()
            .filter(|id| id.len() >= MIN_SUBSTRING_LEN)
            .any(|id| candidate.contains(id.as_str()) || id.contains(candidate.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AccountStatus, Role};
    use chrono::Utc;

    fn teacher(first: &str, last: &str, username: &str, email: &str) -> User {
        User {
            id: "USR-0002".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: Role::Teacher,
            first_name: first.to_string(),
            last_name: last.to_string(),
            student_id: None,
            status: AccountStatus::Active,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn teacher_name_matches(user: &User, teacher_name: &str) -> bool {
        TeacherIdentity::from_user(user).matches(teacher_name)
    }

    #[test]
    fn test_normalize_strips_titles_and_punctuation() {
        assert_eq!(normalize_name("  Mr. Juan Dela-Cruz "), "juandelacruz");
        assert_eq!(normalize_name("Dr Maria O'Neil"), "mariaoneil");
        assert_eq!(normalize_name("Ma'am Santos"), "santos");
        assert_eq!(normalize_name("Prof. Dr. Lee"), "lee");
    }

    #[test]
    fn test_lone_title_is_kept() {
        assert_eq!(normalize_name("Sir"), "sir");
    }

    #[test]
    fn test_exact_match_on_any_identifier() {
        let user = teacher("Juan", "Dela Cruz", "jdcruz", "juan.dc@school.edu");
        assert!(teacher_name_matches(&user, "Mr. Juan Dela Cruz"));
        assert!(teacher_name_matches(&user, "Dela Cruz, Juan"));
        assert!(teacher_name_matches(&user, "JDCRUZ"));
        assert!(teacher_name_matches(&user, "juan.dc@school.edu"));
        assert!(teacher_name_matches(&user, "Juan"));
    }

    #[test]
    fn test_substring_match_either_direction() {
        let user = teacher("Ana", "Reyes", "areyes", "ana@school.edu");
        assert!(teacher_name_matches(&user, "Ms. Ana Reyes-Santos"));
        assert!(teacher_name_matches(&user, "reyes"));
        assert!(teacher_name_matches(&user, "areyes (adviser)"));
    }

    #[test]
    fn test_unrelated_or_blank_names_do_not_match() {
        let user = teacher("Ana", "Reyes", "areyes", "ana@school.edu");
        assert!(!teacher_name_matches(&user, "Pedro Penduko"));
        assert!(!teacher_name_matches(&user, ""));
        assert!(!teacher_name_matches(&user, "Mr."));
        assert!(!teacher_name_matches(&user, "a"));
    }
}
