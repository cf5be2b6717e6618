//! Scoring Engine: weighs a [`CandidateProfile`] against a [`ScoringCriteria`].
//!
//! Weights: required skills 40, academic score 30, preferred skills 20,
//! complete contact details 10. The total is clamped to 100 and mapped to a
//! [`Tier`]:
//!
//! | total          | tier          |
//! |----------------|---------------|
//! | `>= 80`        | Recommended   |
//! | `60 ..< 80`    | Potential     |
//! | `< 60`         | Not Qualified |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::screening::criteria::{ConfigurationError, ScoringCriteria};
use crate::screening::profile::CandidateProfile;

pub const REQUIRED_SKILLS_WEIGHT: f64 = 40.0;
pub const ACADEMIC_WEIGHT: f64 = 30.0;
pub const PREFERRED_SKILLS_WEIGHT: f64 = 20.0;
pub const CONTACT_WEIGHT: f64 = 10.0;
pub const MAX_SCORE: f64 = 100.0;

const RECOMMENDED_THRESHOLD: f64 = 80.0;
const POTENTIAL_THRESHOLD: f64 = 60.0;

/// The prefix of the last breakdown line. Downstream consumers read the tier
/// back out of that line, so its shape must not change.
pub const RECOMMENDATION_PREFIX: &str = "Recommendation: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Recommended,
    Potential,
    NotQualified,
}

impl Tier {
    pub fn from_score(total: f64) -> Self {
        if total >= RECOMMENDED_THRESHOLD {
            Tier::Recommended
        } else if total >= POTENTIAL_THRESHOLD {
            Tier::Potential
        } else {
            Tier::NotQualified
        }
    }

    /// Human-readable label, also used as the persisted candidate status.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Recommended => "Recommended",
            Tier::Potential => "Potential",
            Tier::NotQualified => "Not Qualified",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points awarded per rubric component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    pub required_skills: f64,
    pub academic: f64,
    pub preferred_skills: f64,
    pub contact: f64,
}

impl ScoreComponents {
    pub fn sum(&self) -> f64 {
        self.required_skills + self.academic + self.preferred_skills + self.contact
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// In `[0, 100]`.
    pub total_score: f64,
    pub components: ScoreComponents,
    /// One line per component, then the recommendation line.
    pub breakdown: Vec<String>,
    pub tier: Tier,
}

/// Scores `profile` against `criteria`.
///
/// Fails only when the rubric itself is unusable (an empty skill list would
/// divide by zero).
pub fn score_profile(
    profile: &CandidateProfile,
    criteria: &ScoringCriteria,
) -> Result<ScoreResult, ConfigurationError> {
    criteria.validate()?;

    let required_matched = count_matches(profile, &criteria.required_skills);
    let required_skills = fraction(required_matched, criteria.required_skills.len())
        * REQUIRED_SKILLS_WEIGHT;

    let academic_score = profile.academic_score_or_zero();
    let academic = academic_points(academic_score, criteria.min_academic_score);

    let preferred_matched = count_matches(profile, &criteria.preferred_skills);
    let preferred_skills = fraction(preferred_matched, criteria.preferred_skills.len())
        * PREFERRED_SKILLS_WEIGHT;

    let contact_complete = profile.has_complete_contact();
    let contact = if contact_complete { CONTACT_WEIGHT } else { 0.0 };

    let components = ScoreComponents {
        required_skills,
        academic,
        preferred_skills,
        contact,
    };
    let total_score = components.sum().clamp(0.0, MAX_SCORE);
    let tier = Tier::from_score(total_score);

    let academic_line = match profile.academic_score {
        Some(value) => format!(
            "CGPA: {} (Min: {})",
            format_decimal(value),
            format_decimal(criteria.min_academic_score)
        ),
        None => format!(
            "CGPA: not found (Min: {})",
            format_decimal(criteria.min_academic_score)
        ),
    };

    let breakdown = vec![
        format!(
            "Required Skills: {}/{}",
            required_matched,
            criteria.required_skills.len()
        ),
        academic_line,
        format!(
            "Preferred Skills: {}/{}",
            preferred_matched,
            criteria.preferred_skills.len()
        ),
        if contact_complete {
            "Contact Info: Complete".to_string()
        } else {
            "Contact Info: Incomplete".to_string()
        },
        format!("{RECOMMENDATION_PREFIX}{tier}"),
    ];

    Ok(ScoreResult {
        total_score,
        components,
        breakdown,
        tier,
    })
}

fn count_matches(profile: &CandidateProfile, tokens: &[String]) -> usize {
    tokens.iter().filter(|t| profile.has_skill(t)).count()
}

fn fraction(matched: usize, total: usize) -> f64 {
    matched as f64 / total as f64
}

/// Full marks at or above the minimum, otherwise proportional credit.
fn academic_points(score: f64, minimum: f64) -> f64 {
    if score >= minimum {
        ACADEMIC_WEIGHT
    } else {
        (score / minimum) * ACADEMIC_WEIGHT
    }
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
