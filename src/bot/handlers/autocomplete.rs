//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions show a readable label and submit the record id, so commands
//! always receive a stable identifier.

use crate::{
    bot::BotData,
    core::{
        assignments::subjects_for_teacher,
        model::{PortalState, Role},
    },
    errors::Error,
};
use poise::serenity_prelude::AutocompleteChoice;

/// Discord accepts at most 25 choices.
const MAX_CHOICES: usize = 25;

/// A suggestion: label shown to the user and value submitted.
pub type Suggestion = (String, String);

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Students whose id, name or username contain `partial`.
#[must_use]
pub fn student_suggestions(state: &PortalState, partial: &str) -> Vec<Suggestion> {
    let needle = partial.trim().to_lowercase();
    let mut found: Vec<Suggestion> = state
        .students
        .iter()
        .filter(|s| {
            contains(&s.id, &needle)
                || contains(&s.list_name(), &needle)
                || contains(&s.full_name(), &needle)
                || s.username.as_deref().is_some_and(|u| contains(u, &needle))
        })
        .map(|s| (format!("{} ({})", s.list_name(), s.id), s.id.clone()))
        .collect();
    found.sort();
    found.truncate(MAX_CHOICES);
    found
}

/// Subjects whose code or name contain `partial`, limited to `only` when given.
#[must_use]
pub fn subject_suggestions(
    state: &PortalState,
    partial: &str,
    only: Option<&[String]>,
) -> Vec<Suggestion> {
    let needle = partial.trim().to_lowercase();
    let mut found: Vec<Suggestion> = state
        .subjects
        .iter()
        .filter(|s| only.is_none_or(|ids| ids.contains(&s.id)))
        .filter(|s| contains(&s.code, &needle) || contains(&s.name, &needle))
        .map(|s| (format!("{} - {}", s.code, s.name), s.id.clone()))
        .collect();
    found.sort();
    found.truncate(MAX_CHOICES);
    found
}

/// Accounts whose username, name or email contain `partial`.
#[must_use]
pub fn user_suggestions(state: &PortalState, partial: &str, role: Option<Role>) -> Vec<Suggestion> {
    let needle = partial.trim().to_lowercase();
    let mut found: Vec<Suggestion> = state
        .users
        .iter()
        .filter(|u| role.is_none_or(|r| u.role == r))
        .filter(|u| {
            contains(&u.username, &needle)
                || contains(&u.full_name(), &needle)
                || contains(&u.email, &needle)
        })
        .map(|u| (format!("{} ({}, {})", u.username, u.full_name(), u.role), u.id.clone()))
        .collect();
    found.sort();
    found.truncate(MAX_CHOICES);
    found
}

fn into_choices(suggestions: Vec<Suggestion>) -> Vec<AutocompleteChoice> {
    suggestions
        .into_iter()
        .map(|(label, value)| AutocompleteChoice::new(label, value))
        .collect()
}

/// Provides autocomplete suggestions for students.
pub async fn autocomplete_student(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let portal = ctx.data().portal.lock().await;
    into_choices(student_suggestions(portal.state(), partial))
}

/// Provides autocomplete suggestions for every subject.
pub async fn autocomplete_subject(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let portal = ctx.data().portal.lock().await;
    into_choices(subject_suggestions(portal.state(), partial, None))
}

/// Provides autocomplete suggestions for the caller's own subjects.
///
/// Admins see every subject; callers without a session see none.
pub async fn autocomplete_my_subject(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let account_id = ctx.data().sessions.account_id(ctx.author().id.get()).await;
    let portal = ctx.data().portal.lock().await;
    let state = portal.state();
    let Some(user) = account_id.as_deref().and_then(|id| state.user(id)) else {
        return Vec::new();
    };
    if user.role == Role::Admin {
        return into_choices(subject_suggestions(state, partial, None));
    }
    let owned: Vec<String> = subjects_for_teacher(state, user)
        .into_iter()
        .map(|s| s.id.clone())
        .collect();
    into_choices(subject_suggestions(state, partial, Some(owned.as_slice())))
}

/// Provides autocomplete suggestions for accounts of any role.
pub async fn autocomplete_user(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let portal = ctx.data().portal.lock().await;
    into_choices(user_suggestions(portal.state(), partial, None))
}

/// Provides autocomplete suggestions for teacher accounts.
pub async fn autocomplete_teacher(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let portal = ctx.data().portal.lock().await;
    into_choices(user_suggestions(portal.state(), partial, Some(Role::Teacher)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_student, create_test_subject, default_state};

    #[test]
    fn test_student_suggestions_match_name_and_id() {
        let mut state = default_state();
        create_test_student(&mut state, "Ana", "Reyes");
        create_test_student(&mut state, "Ben", "Cruz");

        let found = student_suggestions(&state, "rey");
        assert_eq!(found, vec![("Reyes, Ana (STU-0001)".to_string(), "STU-0001".to_string())]);
        assert_eq!(student_suggestions(&state, "stu-0002").len(), 1);
        assert_eq!(student_suggestions(&state, "").len(), 2);
    }

    #[test]
    fn test_subject_suggestions_respect_filter() {
        let mut state = default_state();
        let math = create_test_subject(&mut state, "MATH1", "Algebra");
        create_test_subject(&mut state, "ENG1", "English");

        assert_eq!(subject_suggestions(&state, "", None).len(), 2);
        let only = vec![math.id.clone()];
        let found = subject_suggestions(&state, "", Some(only.as_slice()));
        assert_eq!(found, vec![("MATH1 - Algebra".to_string(), math.id)]);
        assert!(subject_suggestions(&state, "eng", Some(only.as_slice())).is_empty());
    }

    #[test]
    fn test_user_suggestions_by_role() {
        let state = default_state();
        let teachers = user_suggestions(&state, "", Some(Role::Teacher));
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].1, "USR-0002");
        assert_eq!(user_suggestions(&state, "maria", None).len(), 1);
    }
}
