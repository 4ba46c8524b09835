//! ContribSpark Match Engine — deterministic, rule-based repository matching.
//!
//! Scores each candidate repository's intrinsic health, layers on
//! user-specific skill and experience adjustments, then filters by a minimum
//! score and returns a stable descending ranking with per-signal explanations.
//!
//! No DB, no network; pure computation. The wall clock is injected via [`Clock`].

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod health;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use engine::Engine;
pub use error::MatchError;
pub use health::compute_health_score;
pub use matching::compute_match_score;
pub use types::{
  ExperienceLevel, Level, MatchRequest, MatchResponse, MatchResult, RepoId, RepositoryCandidate,
  Skill, SkillCategory,
};
