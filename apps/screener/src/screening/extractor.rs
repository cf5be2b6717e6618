//! Field Extractor: heuristic pattern rules that turn resume text into a
//! [`CandidateProfile`].
//!
//! Each rule is independent: a non-match leaves that field absent and never
//! affects the others. The rules target a predictable single-column layout,
//! not arbitrary documents.

use std::collections::BTreeSet;

use regex::Regex;

use crate::screening::profile::{CandidateProfile, Experience, ExperienceDuration};

/// Skills recognised when no vocabulary is configured.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "javascript",
    "machine learning",
    "data analysis",
    "aws",
    "react",
    "docker",
    "git",
    "node.js",
    "tensorflow",
    "excel",
    "communication",
    "leadership",
];

/// Only this many leading lines are considered for the candidate name.
const NAME_SCAN_LINES: usize = 10;
const NAME_MIN_CHARS: usize = 10;
const NAME_MAX_CHARS: usize = 50;
const NAME_MAX_TOKENS: usize = 3;

const NAME_PATTERN: &str = r"[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)+";
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const PHONE_PATTERN: &str =
    r"(?:\+[0-9]{1,3}\s?)?\(?[0-9]{3}\)?[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}";
// Matched against lowercased text. The company capture is greedy over letters
// and whitespace, so it can run on past the company name.
const EXPERIENCE_PATTERN: &str = r"(?:internship|experience|worked|working)\s+at\s+([a-z\s]+)(?:.*?([0-9]+)\s*months?)?(?:.*?(ongoing|present))?";
const ACADEMIC_PATTERN: &str = r"(?:cgpa|gpa)\s*[:\-\s]*([0-9]+\.?[0-9]*)";

/// Lowercase, deduplicated skill tokens in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    tokens: Vec<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { tokens: Vec::new() }.with_tokens(tokens)
    }

    /// Parses a comma-separated list such as `"rust, go ,SQL"`.
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Appends tokens not already present.
    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() && !self.tokens.contains(&token) {
                self.tokens.push(token);
            }
        }
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS)
    }
}

/// Compiled extraction rules plus the skill vocabulary they search for.
///
/// Immutable once built; share it behind an `Arc` across concurrent uploads.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    vocabulary: SkillVocabulary,
    name: Regex,
    email: Regex,
    phone: Regex,
    experience: Regex,
    academic: Regex,
}

impl FieldExtractor {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            vocabulary,
            name: Regex::new(NAME_PATTERN)?,
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
            experience: Regex::new(EXPERIENCE_PATTERN)?,
            academic: Regex::new(ACADEMIC_PATTERN)?,
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Runs every rule over `text`.
    pub fn extract(&self, text: &str) -> CandidateProfile {
        let lowered = text.to_lowercase();
        CandidateProfile {
            name: self.extract_name(text),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            skills: self.extract_skills(&lowered),
            experience: self.extract_experience(&lowered),
            academic_score: self.extract_academic_score(&lowered),
        }
    }

    /// First of the leading lines holding a run of capitalised words of
    /// plausible length, on a line of at most three tokens.
    pub fn extract_name(&self, text: &str) -> Option<String> {
        text.lines().take(NAME_SCAN_LINES).find_map(|line| {
            let line = line.trim();
            let found = self.name.find(line)?.as_str();
            let chars = found.chars().count();
            let plausible = (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars)
                && line.split_whitespace().count() <= NAME_MAX_TOKENS;
            plausible.then(|| found.to_string())
        })
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone.find(text).map(|m| m.as_str().to_string())
    }

    /// Substring containment, no word boundaries: "javascript" also yields
    /// "java".
    pub fn extract_skills(&self, lowered: &str) -> BTreeSet<String> {
        self.vocabulary
            .tokens()
            .iter()
            .filter(|token| lowered.contains(token.as_str()))
            .cloned()
            .collect()
    }

    pub fn extract_experience(&self, lowered: &str) -> Experience {
        let Some(caps) = self.experience.captures(lowered) else {
            return Experience::default();
        };

        let company = caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .filter(|c| !c.is_empty());

        let duration = if caps.get(3).is_some() {
            ExperienceDuration::Ongoing
        } else {
            caps.get(2)
                .map(|m| ExperienceDuration::Months(m.as_str().to_string()))
                .unwrap_or_default()
        };

        Experience { company, duration }
    }

    pub fn extract_academic_score(&self, lowered: &str) -> Option<f64> {
        self.academic
            .captures(lowered)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|score| score.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(SkillVocabulary::default()).unwrap()
    }

    const SAMPLE_RESUME: &str = "Priya Raman Iyer\n\
        Data Analyst\n\
        priya.iyer@example.com | +91 987-654-3210\n\
        Skills: Python, SQL, Machine Learning, Excel\n\
        Internship at Northwind Traders for 6 months\n\
        B.Tech, CGPA: 8.7\n";

    // ── Vocabulary ──────────────────────────────────────────────────────────

    #[test]
    fn test_vocabulary_normalizes_and_dedups() {
        let vocab = SkillVocabulary::from_csv(" Rust, go ,SQL,,rust");
        assert_eq!(vocab.tokens(), &["rust", "go", "sql"]);
    }

    #[test]
    fn test_vocabulary_with_tokens_appends_only_new() {
        let vocab = SkillVocabulary::new(["python"]).with_tokens(["Python", "React.js"]);
        assert_eq!(vocab.tokens(), &["python", "react.js"]);
    }

    #[test]
    fn test_default_vocabulary_is_lowercase() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.tokens().contains(&"c++".to_string()));
        assert!(vocab.tokens().iter().all(|t| *t == t.to_lowercase()));
    }

    // ── Name ────────────────────────────────────────────────────────────────

    #[test]
    fn test_name_from_first_line() {
        assert_eq!(
            extractor().extract_name(SAMPLE_RESUME).as_deref(),
            Some("Priya Raman Iyer")
        );
    }

    #[test]
    fn test_name_skips_short_and_wordy_lines() {
        let text = "Jo Li\nSenior Data Analyst Intern\n  Marcus Whitfield  \n";
        assert_eq!(
            extractor().extract_name(text).as_deref(),
            Some("Marcus Whitfield")
        );
    }

    #[test]
    fn test_name_length_bounds_are_inclusive() {
        let ex = extractor();
        assert_eq!(ex.extract_name("Abcd Efghi").as_deref(), Some("Abcd Efghi"));
        assert_eq!(ex.extract_name("Abc Efghi"), None);

        let fifty = format!("A{} B{}", "b".repeat(24), "c".repeat(23));
        assert_eq!(fifty.chars().count(), 50);
        assert_eq!(ex.extract_name(&fifty), Some(fifty.clone()));

        let fifty_one = format!("{fifty}d");
        assert_eq!(ex.extract_name(&fifty_one), None);
    }

    #[test]
    fn test_name_only_in_first_ten_lines() {
        let mut text = "x\n".repeat(10);
        text.push_str("Marcus Whitfield\n");
        assert_eq!(extractor().extract_name(&text), None);
    }

    #[test]
    fn test_name_requires_two_capitalized_words() {
        assert_eq!(extractor().extract_name("resume of someone\nMADONNA\n"), None);
    }

    // ── Email / phone ───────────────────────────────────────────────────────

    #[test]
    fn test_email_first_occurrence() {
        let text = "a@b.c is invalid, use first.last@mail.example.org or other@example.com";
        assert_eq!(
            extractor().extract_email(text).as_deref(),
            Some("first.last@mail.example.org")
        );
    }

    #[test]
    fn test_email_needs_two_letter_tld() {
        assert_eq!(extractor().extract_email("me@host.x"), None);
    }

    #[test]
    fn test_phone_with_country_code() {
        assert_eq!(
            extractor().extract_phone(SAMPLE_RESUME).as_deref(),
            Some("+91 987-654-3210")
        );
    }

    #[test]
    fn test_phone_with_parenthesized_area_code() {
        assert_eq!(
            extractor().extract_phone("Call (555) 123.4567 today").as_deref(),
            Some("(555) 123.4567")
        );
    }

    #[test]
    fn test_phone_bare_ten_digits() {
        assert_eq!(
            extractor().extract_phone("tel 5551234567").as_deref(),
            Some("5551234567")
        );
    }

    #[test]
    fn test_phone_too_short() {
        assert_eq!(extractor().extract_phone("ext 123-4567"), None);
    }

    // ── Skills ──────────────────────────────────────────────────────────────

    #[test]
    fn test_skills_case_insensitive() {
        let ex = extractor();
        let skills = ex.extract_skills(&"Python Developer".to_lowercase());
        assert!(skills.contains("python"));
    }

    #[test]
    fn test_skills_match_inside_longer_words() {
        let ex = extractor();
        let skills = ex.extract_skills("javascript only");
        assert!(skills.contains("javascript"));
        assert!(skills.contains("java"));
    }

    #[test]
    fn test_skills_symbols_in_tokens() {
        let ex = extractor();
        let skills = ex.extract_skills("c++ and node.js");
        assert!(skills.contains("c++"));
        assert!(skills.contains("node.js"));
    }

    #[test]
    fn test_skills_use_injected_vocabulary() {
        let ex = FieldExtractor::new(SkillVocabulary::new(["Rust", "Kafka"])).unwrap();
        let skills = ex.extract_skills("rust, python and kafka");
        assert_eq!(
            skills.into_iter().collect::<Vec<_>>(),
            vec!["kafka".to_string(), "rust".to_string()]
        );
    }

    // ── Experience ──────────────────────────────────────────────────────────

    #[test]
    fn test_experience_months_and_greedy_company() {
        let exp = extractor().extract_experience("worked at acme analytics for 6 months");
        assert_eq!(exp.company.as_deref(), Some("acme analytics for"));
        assert_eq!(exp.duration, ExperienceDuration::Months("6".to_string()));
    }

    #[test]
    fn test_experience_ongoing_after_company() {
        let exp = extractor().extract_experience("internship at globex (ongoing)");
        assert_eq!(exp.company.as_deref(), Some("globex"));
        assert_eq!(exp.duration, ExperienceDuration::Ongoing);
    }

    #[test]
    fn test_experience_present_beats_month_count() {
        let exp = extractor().extract_experience("working at initech, 14 months, present");
        assert_eq!(exp.company.as_deref(), Some("initech"));
        assert_eq!(exp.duration, ExperienceDuration::Ongoing);
    }

    #[test]
    fn test_experience_duration_must_be_on_same_line() {
        let exp = extractor().extract_experience("worked at initech.\nduration 12 months");
        assert_eq!(exp.company.as_deref(), Some("initech"));
        assert_eq!(exp.duration, ExperienceDuration::NotSpecified);
    }

    #[test]
    fn test_experience_company_swallows_following_lines() {
        let exp = extractor().extract_experience("worked at umbrella\nskills python");
        assert_eq!(exp.company.as_deref(), Some("umbrella\nskills python"));
    }

    #[test]
    fn test_experience_keeps_month_digits_verbatim() {
        let exp = extractor().extract_experience("worked at acme for 99999999999 months");
        assert_eq!(
            exp.duration,
            ExperienceDuration::Months("99999999999".to_string())
        );
        assert_eq!(exp.duration.to_string(), "99999999999 months");
    }

    #[test]
    fn test_experience_absent() {
        assert_eq!(
            extractor().extract_experience("freelance designer"),
            Experience::default()
        );
    }

    // ── Academic score ──────────────────────────────────────────────────────

    #[test]
    fn test_academic_score_cgpa() {
        assert_eq!(extractor().extract_academic_score("cgpa: 8.7 / 10"), Some(8.7));
    }

    #[test]
    fn test_academic_score_gpa_with_dash() {
        assert_eq!(extractor().extract_academic_score("gpa - 3.85"), Some(3.85));
    }

    #[test]
    fn test_academic_score_integer_and_trailing_dot() {
        assert_eq!(extractor().extract_academic_score("cgpa 9"), Some(9.0));
        assert_eq!(extractor().extract_academic_score("cgpa 9."), Some(9.0));
    }

    #[test]
    fn test_academic_score_overflow_is_not_found() {
        let text = format!("cgpa {}", "9".repeat(400));
        assert_eq!(extractor().extract_academic_score(&text), None);
    }

    #[test]
    fn test_academic_score_absent() {
        assert_eq!(extractor().extract_academic_score("percentage 92"), None);
    }

    // ── Whole profile ───────────────────────────────────────────────────────

    #[test]
    fn test_extract_full_profile() {
        let profile = extractor().extract(SAMPLE_RESUME);
        assert_eq!(profile.name.as_deref(), Some("Priya Raman Iyer"));
        assert_eq!(profile.email.as_deref(), Some("priya.iyer@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("+91 987-654-3210"));
        for skill in ["python", "sql", "machine learning", "excel"] {
            assert!(profile.skills.contains(skill), "missing {skill}");
        }
        assert_eq!(
            profile.experience.company.as_deref(),
            Some("northwind traders for")
        );
        assert_eq!(profile.experience.duration, ExperienceDuration::Months("6".to_string()));
        assert_eq!(profile.academic_score, Some(8.7));
    }

    #[test]
    fn test_empty_text_yields_absent_fields() {
        let profile = extractor().extract("");
        assert_eq!(profile, CandidateProfile::default());
    }

    #[test]
    fn test_whitespace_text_yields_absent_fields() {
        let profile = extractor().extract("   \n\n\t \n");
        assert_eq!(profile, CandidateProfile::default());
    }
}
