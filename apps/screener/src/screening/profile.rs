use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

/// How long the candidate held the detected position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExperienceDuration {
    Ongoing,
    /// The month count exactly as written, digits only.
    Months(String),
    #[default]
    NotSpecified,
}

impl fmt::Display for ExperienceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceDuration::Ongoing => f.write_str("Ongoing"),
            ExperienceDuration::Months(n) => write!(f, "{n} months"),
            ExperienceDuration::NotSpecified => f.write_str("Not specified"),
        }
    }
}

impl Serialize for ExperienceDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Experience {
    /// `None` when no "worked at ..." style phrase was found.
    pub company: Option<String>,
    pub duration: ExperienceDuration,
}

/// Typed attributes pulled out of one resume.
///
/// Every field that could not be extracted is `None` (or empty, for skills)
/// rather than a placeholder string, so a candidate literally named
/// "Not found" is still a real name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Lowercase skill tokens. Ordered only so responses are stable.
    pub skills: BTreeSet<String>,
    pub experience: Experience,
    /// CGPA/GPA as written on the resume. `None` scores like 0.0.
    pub academic_score: Option<f64>,
}

impl CandidateProfile {
    /// The academic score with "not found" collapsed to 0.0.
    pub fn academic_score_or_zero(&self) -> f64 {
        self.academic_score.unwrap_or(0.0)
    }

    pub fn has_skill(&self, token: &str) -> bool {
        self.skills.contains(token)
    }

    pub fn has_complete_contact(&self) -> bool {
        self.email.is_some() && self.phone.is_some()
    }
}
