//! Skill Vocabulary: the fixed list of terms that count as a "skill".
//!
//! Built once at startup and shared read-only through `AppState`. Extraction never
//! reports a term that is not in here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Database,
    Tool,
    SoftSkill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTerm {
    /// Canonical lowercase form used for matching.
    pub term: String,
    pub category: SkillCategory,
}

const LANGUAGES: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "scala",
    "r",
    "matlab",
    "sql",
    "html",
    "css",
];

const FRAMEWORKS: &[&str] = &[
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "laravel",
    "fastapi",
    "bootstrap",
    "jquery",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
];

const DATABASES: &[&str] = &[
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "sqlite",
    "oracle",
    "sql server",
];

const TOOLS: &[&str] = &[
    "git",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "jenkins",
    "linux",
    "windows",
    "jira",
    "agile",
    "scrum",
    "ci/cd",
    "devops",
    "microservices",
    "rest api",
    "graphql",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "project management",
    "analytical",
    "creative",
    "adaptable",
    "detail oriented",
];

/// Immutable, ordered vocabulary of canonical skill terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<SkillTerm>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from `(term, category)` pairs.
    ///
    /// Terms are trimmed and lowercased; blank terms are skipped and later duplicates
    /// are dropped so the first occurrence keeps its position and category.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = (S, SkillCategory)>,
        S: AsRef<str>,
    {
        let mut out: Vec<SkillTerm> = Vec::new();
        for (term, category) in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || out.iter().any(|t| t.term == term) {
                continue;
            }
            out.push(SkillTerm { term, category });
        }
        Self { terms: out }
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn category_of(&self, term: &str) -> Option<SkillCategory> {
        let term = term.to_lowercase();
        self.terms
            .iter()
            .find(|t| t.term == term)
            .map(|t| t.category)
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        let groups = [
            (LANGUAGES, SkillCategory::Language),
            (FRAMEWORKS, SkillCategory::Framework),
            (DATABASES, SkillCategory::Database),
            (TOOLS, SkillCategory::Tool),
            (SOFT_SKILLS, SkillCategory::SoftSkill),
        ];
        Self::new(
            groups
                .into_iter()
                .flat_map(|(terms, category)| terms.iter().map(move |t| (*t, category))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_has_every_group() {
        let vocab = SkillVocabulary::default();
        assert_eq!(
            vocab.len(),
            LANGUAGES.len() + FRAMEWORKS.len() + DATABASES.len() + TOOLS.len() + SOFT_SKILLS.len()
        );
        assert_eq!(vocab.terms()[0].term, "python");
        assert_eq!(vocab.category_of("Docker"), Some(SkillCategory::Tool));
        assert_eq!(vocab.category_of("sql server"), Some(SkillCategory::Database));
        assert_eq!(
            vocab.category_of("detail oriented"),
            Some(SkillCategory::SoftSkill)
        );
    }

    #[test]
    fn test_new_normalizes_and_dedups() {
        let vocab = SkillVocabulary::new([
            ("  Rust ", SkillCategory::Language),
            ("rust", SkillCategory::Tool),
            ("", SkillCategory::Tool),
            ("Axum", SkillCategory::Framework),
        ]);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.terms()[0].term, "rust");
        assert_eq!(vocab.category_of("rust"), Some(SkillCategory::Language));
        assert_eq!(vocab.terms()[1].term, "axum");
    }

    #[test]
    fn test_unknown_term_has_no_category() {
        assert_eq!(SkillVocabulary::default().category_of("cobol"), None);
    }
}
