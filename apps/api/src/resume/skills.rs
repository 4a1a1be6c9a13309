//! Skill Extractor: scans resume text against the `SkillVocabulary`.
//!
//! All vocabulary terms are searched in a single pass with an Aho-Corasick automaton
//! over the lowercased text. Matches are de-duplicated, rendered in title case and
//! returned sorted lexicographically so repeated calls on the same text are identical.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, BuildError};
use serde::{Deserialize, Serialize};

use crate::resume::vocabulary::{SkillCategory, SkillVocabulary};

/// Terms this short ("r", "go", "c#") only count when they stand alone.
const SHORT_TERM_MAX_LEN: usize = 2;

/// How a vocabulary term has to sit in the text to count as a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchMode {
    /// Short terms need a non-alphanumeric character (or the text edge) on both
    /// sides; longer terms match anywhere. "r" does not match "server", while
    /// "Python3" and "CPython" still count as Python.
    #[default]
    ShortTermBoundary,
    /// Every term must be bounded on both sides. "Python3" yields nothing.
    WordBoundary,
    /// Plain case-insensitive containment. "r" matches almost any text.
    Substring,
}

impl SkillMatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillMatchMode::ShortTermBoundary => "short_term_boundary",
            SkillMatchMode::WordBoundary => "word_boundary",
            SkillMatchMode::Substring => "substring",
        }
    }
}

impl fmt::Display for SkillMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short_term_boundary" | "short-term-boundary" => {
                Ok(SkillMatchMode::ShortTermBoundary)
            }
            "word_boundary" | "word-boundary" => Ok(SkillMatchMode::WordBoundary),
            "substring" => Ok(SkillMatchMode::Substring),
            other => Err(format!(
                "unknown skill match mode '{other}' \
                 (expected 'short_term_boundary', 'word_boundary' or 'substring')"
            )),
        }
    }
}

/// Distinct skills found in one resume, in display form, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSkillSet(BTreeSet<String>);

impl ExtractedSkillSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

pub struct SkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
    matcher: AhoCorasick,
    mode: SkillMatchMode,
}

impl SkillExtractor {
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        mode: SkillMatchMode,
    ) -> Result<Self, BuildError> {
        let matcher = AhoCorasick::new(vocabulary.terms().iter().map(|t| t.term.as_str()))?;
        Ok(Self {
            vocabulary,
            matcher,
            mode,
        })
    }

    pub fn mode(&self) -> SkillMatchMode {
        self.mode
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn extract(&self, text: &str) -> ExtractedSkillSet {
        if text.is_empty() {
            return ExtractedSkillSet::default();
        }

        let lowered = text.to_lowercase();
        let terms = self.vocabulary.terms();
        let mut seen = vec![false; terms.len()];

        for m in self.matcher.find_overlapping_iter(&lowered) {
            let idx = m.pattern().as_usize();
            if seen[idx] {
                continue;
            }
            let bounded = || is_word_bounded(&lowered, m.start(), m.end());
            let counts = match self.mode {
                SkillMatchMode::Substring => true,
                SkillMatchMode::WordBoundary => bounded(),
                SkillMatchMode::ShortTermBoundary => {
                    terms[idx].term.len() > SHORT_TERM_MAX_LEN || bounded()
                }
            };
            if !counts {
                continue;
            }
            seen[idx] = true;
        }

        ExtractedSkillSet(
            terms
                .iter()
                .zip(seen)
                .filter(|(_, hit)| *hit)
                .map(|(t, _)| title_case(&t.term))
                .collect(),
        )
    }

    /// How many of `skills` fall in each vocabulary category.
    pub fn categorize(&self, skills: &ExtractedSkillSet) -> BTreeMap<SkillCategory, usize> {
        let mut counts = BTreeMap::new();
        for skill in skills.iter() {
            if let Some(category) = self.vocabulary.category_of(skill) {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        counts
    }
}

// Vocabulary terms are ASCII, so match offsets always fall on char boundaries.
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Title case the way the stored skill lists expect it: a letter is upper-cased when
/// the character before it is not a letter, every other letter is lower-cased.
/// `node.js` → `Node.Js`, `ci/cd` → `Ci/Cd`, `c++` → `C++`.
pub fn title_case(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut prev_is_letter = false;
    for c in term.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
