use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rubric that cannot be scored against.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("rubric '{0}' has no required skills")]
    EmptyRequiredSkills(String),

    #[error("rubric '{0}' has no preferred skills")]
    EmptyPreferredSkills(String),

    #[error("rubric '{0}' has an invalid minimum academic score {1}")]
    InvalidMinAcademicScore(String, f64),
}

/// The hiring rubric a profile is scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringCriteria {
    pub name: String,
    /// Each worth an equal share of the 40 required-skill points.
    pub required_skills: Vec<String>,
    pub min_academic_score: f64,
    /// Each worth an equal share of the 20 preferred-skill points.
    pub preferred_skills: Vec<String>,
}

impl ScoringCriteria {
    /// Builds a validated rubric. Skill tokens are lowercased so they compare
    /// equal to extracted profile skills.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        required_skills: &[S],
        min_academic_score: f64,
        preferred_skills: &[S],
    ) -> Result<Self, ConfigurationError> {
        let criteria = Self {
            name: name.into(),
            required_skills: normalize_tokens(required_skills),
            min_academic_score,
            preferred_skills: normalize_tokens(preferred_skills),
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Reads and validates a JSON rubric file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rubric file {}", path.display()))?;
        let parsed: ScoringCriteria = serde_json::from_str(&raw)
            .with_context(|| format!("Rubric file {} is not valid JSON", path.display()))?;
        let criteria = Self::new(
            parsed.name,
            &parsed.required_skills,
            parsed.min_academic_score,
            &parsed.preferred_skills,
        )?;
        Ok(criteria)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.required_skills.is_empty() {
            return Err(ConfigurationError::EmptyRequiredSkills(self.name.clone()));
        }
        if self.preferred_skills.is_empty() {
            return Err(ConfigurationError::EmptyPreferredSkills(self.name.clone()));
        }
        if !self.min_academic_score.is_finite() || self.min_academic_score < 0.0 {
            return Err(ConfigurationError::InvalidMinAcademicScore(
                self.name.clone(),
                self.min_academic_score,
            ));
        }
        Ok(())
    }

    /// Every skill token the rubric awards points for.
    pub fn skill_tokens(&self) -> impl Iterator<Item = &str> {
        self.required_skills
            .iter()
            .chain(self.preferred_skills.iter())
            .map(String::as_str)
    }
}

impl Default for ScoringCriteria {
    /// The fresher rubric for the Analytics and Modeling Associate role.
    fn default() -> Self {
        Self {
            name: "Analytics and Modeling Associate".to_string(),
            required_skills: normalize_tokens(&["python", "sql", "javascript", "java", "c++"]),
            min_academic_score: 8.0,
            preferred_skills: normalize_tokens(&["java", "react.js"]),
        }
    }
}

fn normalize_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
