//! Grade equivalence and pass/fail computation.
//!
//! Raw scores are percentages (0-100). Two equivalence scales exist:
//!
//! - the linear transform [`to_equivalent`], used for every stored equivalent
//! - the discrete lookup [`table_equivalent`], a 1.00 (best) to 5.00 (fail) scale
//!
//! A [`GradingPolicy`] picks which scale produces the rating and which
//! threshold decides the verdict.

use crate::{
    core::model::GradeStatus,
    errors::{Error, Result},
};
use serde::Deserialize;

/// Lowest accepted raw score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted raw score.
pub const MAX_SCORE: f64 = 100.0;

/// Breakpoints of the lookup scale: minimum raw score and its equivalent.
const EQUIVALENCE_TABLE: [(f64, f64); 9] = [
    (97.0, 1.00),
    (94.0, 1.25),
    (91.0, 1.50),
    (88.0, 1.75),
    (85.0, 2.00),
    (82.0, 2.25),
    (79.0, 2.50),
    (76.0, 2.75),
    (75.0, 3.00),
];
/// Lookup equivalent for anything below the last breakpoint.
const FAILING_EQUIVALENT: f64 = 5.00;

/// Offset of the linear scale, in tenths of an equivalent point.
const LINEAR_OFFSET_TENTHS: f64 = 4.0;

/// Linear equivalent of a raw score: `round((score / 10 - 0.4) * 10) / 10`.
///
/// Returns `None` for NaN and infinities.
#[must_use]
pub fn to_equivalent(score: f64) -> Option<f64> {
    if !score.is_finite() {
        return None;
    }
    // (score / 10 - 0.4) * 10 == score - 4, rounded without rescaling
    Some(((score - LINEAR_OFFSET_TENTHS) + 0.5).floor() / 10.0)
}

/// Parses a typed score. Empty or non-numeric input gives `None`.
#[must_use]
pub fn parse_score(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Text form of [`to_equivalent`] for form fields.
///
/// Missing, empty or invalid input gives an empty string.
#[must_use]
pub fn equivalent_text(input: Option<&str>) -> String {
    input
        .and_then(parse_score)
        .and_then(to_equivalent)
        .map_or_else(String::new, format_equivalent)
}

/// Formats an equivalent with one decimal place.
#[must_use]
pub fn format_equivalent(value: f64) -> String {
    format!("{value:.1}")
}

/// Lookup-scale equivalent of a raw score.
#[must_use]
pub fn table_equivalent(score: f64) -> Option<f64> {
    if !score.is_finite() {
        return None;
    }
    let eq = EQUIVALENCE_TABLE
        .iter()
        .find(|(min, _)| score >= *min)
        .map_or(FAILING_EQUIVALENT, |(_, eq)| *eq);
    Some(eq)
}

/// Checks that a score lies within 0..=100.
pub fn validate_score(label: &str, score: Option<f64>) -> Result<Option<f64>> {
    match score {
        None => Ok(None),
        Some(s) if s.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&s) => Ok(Some(s)),
        Some(s) => Err(Error::validation(format!(
            "{label} score must be between {MIN_SCORE} and {MAX_SCORE}, got {s}"
        ))),
    }
}

/// Which equivalence scale drives ratings and verdicts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingScale {
    /// Linear transform; verdict by mean raw score
    #[default]
    Linear,
    /// Lookup table; verdict by mean equivalent (lower is better)
    Table,
}

/// Rating scale and pass thresholds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GradingPolicy {
    /// Scale used for the rating
    pub scale: GradingScale,
    /// Mean raw score needed to pass on the linear scale
    pub passing_percentage: f64,
    /// Highest mean equivalent that passes on the lookup scale
    pub passing_equivalent: f64,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            scale: GradingScale::Linear,
            passing_percentage: 75.0,
            passing_equivalent: 3.0,
        }
    }
}

/// Derived fields for one pair of midterm/final scores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// Linear midterm equivalent
    pub midterm_eq: Option<f64>,
    /// Linear final equivalent
    pub final_eq: Option<f64>,
    /// Mean equivalent on the policy's scale
    pub rating: Option<f64>,
    /// Verdict
    pub status: GradeStatus,
}

impl GradingPolicy {
    /// Equivalent of a raw score on this policy's scale.
    #[must_use]
    pub fn equivalent(&self, score: f64) -> Option<f64> {
        match self.scale {
            GradingScale::Linear => to_equivalent(score),
            GradingScale::Table => table_equivalent(score),
        }
    }

    /// Computes equivalents, rating and verdict.
    ///
    /// A missing term gives [`GradeStatus::Incomplete`] and no rating.
    #[must_use]
    pub fn evaluate(&self, midterm: Option<f64>, final_score: Option<f64>) -> Evaluation {
        let midterm_eq = midterm.and_then(to_equivalent);
        let final_eq = final_score.and_then(to_equivalent);

        let (Some(mid), Some(fin)) = (midterm, final_score) else {
            return Evaluation {
                midterm_eq,
                final_eq,
                rating: None,
                status: GradeStatus::Incomplete,
            };
        };

        let rating = match (self.equivalent(mid), self.equivalent(fin)) {
            (Some(a), Some(b)) => Some(round_hundredth((a + b) / 2.0)),
            _ => None,
        };

        let passed = match self.scale {
            GradingScale::Linear => (mid + fin) / 2.0 >= self.passing_percentage,
            GradingScale::Table => rating.is_some_and(|r| r <= self.passing_equivalent),
        };

        Evaluation {
            midterm_eq,
            final_eq,
            rating,
            status: if passed {
                GradeStatus::Passed
            } else {
                GradeStatus::Failed
            },
        }
    }
}

fn round_hundredth(value: f64) -> f64 {
    ((value * 100.0) + 0.5).floor() / 100.0
}

/// Mean of the available ratings, rounded to two decimals.
#[must_use]
pub fn general_average(ratings: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = ratings
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), r| (sum + r, count + 1));
    if count == 0 {
        None
    } else {
        Some(round_hundredth(sum / f64::from(count)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_to_equivalent_known_values() {
        assert_eq!(to_equivalent(85.0), Some(8.1));
        assert_eq!(to_equivalent(100.0), Some(9.6));
        assert_eq!(to_equivalent(75.0), Some(7.1));
        assert_eq!(to_equivalent(0.0), Some(-0.4));
    }

    #[test]
    fn test_to_equivalent_rounds_half_up_at_edges() {
        let cases = [
            (4.5, 0.1),
            (5.5, 0.2),
            (4.49, 0.0),
            (74.5, 7.1),
            (74.4, 7.0),
            (64.49, 6.0),
            (92.5, 8.9),
            (99.95, 9.6),
            (3.5, 0.0),
            (3.4, -0.1),
        ];
        for (score, expected) in cases {
            assert_eq!(to_equivalent(score), Some(expected), "score {score}");
        }
    }

    #[test]
    fn test_to_equivalent_rejects_non_finite() {
        assert_eq!(to_equivalent(f64::NAN), None);
        assert_eq!(to_equivalent(f64::INFINITY), None);
    }

    #[test]
    fn test_equivalent_text_blank_for_missing_input() {
        assert_eq!(equivalent_text(None), "");
        assert_eq!(equivalent_text(Some("")), "");
        assert_eq!(equivalent_text(Some("   ")), "");
        assert_eq!(equivalent_text(Some("abc")), "");
        assert_eq!(equivalent_text(Some("85")), "8.1");
    }

    #[test]
    fn test_table_equivalent_breakpoints() {
        assert_eq!(table_equivalent(100.0), Some(1.0));
        assert_eq!(table_equivalent(97.0), Some(1.0));
        assert_eq!(table_equivalent(96.9), Some(1.25));
        assert_eq!(table_equivalent(85.0), Some(2.0));
        assert_eq!(table_equivalent(75.0), Some(3.0));
        assert_eq!(table_equivalent(74.9), Some(5.0));
        assert_eq!(table_equivalent(0.0), Some(5.0));
    }

    #[test]
    fn test_validate_score_bounds() {
        assert_eq!(validate_score("Midterm", Some(0.0)).unwrap(), Some(0.0));
        assert_eq!(validate_score("Midterm", None).unwrap(), None);
        assert!(validate_score("Midterm", Some(100.5)).is_err());
        assert!(validate_score("Final", Some(-1.0)).is_err());
    }

    #[test]
    fn test_linear_policy_passes_on_mean_percentage() {
        let policy = GradingPolicy::default();
        let eval = policy.evaluate(Some(80.0), Some(70.0));
        assert_eq!(eval.status, GradeStatus::Passed);
        assert_eq!(eval.midterm_eq, Some(7.6));
        assert_eq!(eval.final_eq, Some(6.6));
        assert_eq!(eval.rating, Some(7.1));

        let eval = policy.evaluate(Some(70.0), Some(74.0));
        assert_eq!(eval.status, GradeStatus::Failed);
    }

    #[test]
    fn test_table_policy_passes_on_low_equivalent() {
        let policy = GradingPolicy {
            scale: GradingScale::Table,
            ..GradingPolicy::default()
        };
        let eval = policy.evaluate(Some(90.0), Some(80.0));
        assert_eq!(eval.rating, Some(2.13));
        assert_eq!(eval.status, GradeStatus::Passed);

        let eval = policy.evaluate(Some(95.0), Some(60.0));
        assert_eq!(eval.rating, Some(3.13));
        assert_eq!(eval.status, GradeStatus::Failed);
    }

    #[test]
    fn test_missing_term_is_incomplete() {
        let eval = GradingPolicy::default().evaluate(Some(88.0), None);
        assert_eq!(eval.status, GradeStatus::Incomplete);
        assert_eq!(eval.rating, None);
        assert_eq!(eval.midterm_eq, Some(8.4));
    }

    #[test]
    fn test_general_average() {
        assert_eq!(general_average([]), None);
        assert_eq!(general_average([2.0, 3.0]), Some(2.5));
    }
}
