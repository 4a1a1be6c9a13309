// Job/applicant matching: skill-overlap scoring behind the MatchScorer trait,
// plus the ranking endpoints built on it.

pub mod handlers;
pub mod scoring;
