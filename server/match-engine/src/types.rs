//! Core types for the match engine (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One scoring request. Unknown fields are silently ignored.
///
/// Repositories stay as raw JSON values so that one malformed entry is
/// rejected on its own instead of failing the whole request.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
  #[serde(default)]
  pub skills: Vec<InboundSkill>,
  #[serde(default)]
  pub experience_level: Option<String>,
  #[serde(default)]
  pub min_match_score: Option<u8>,
  /// Caller-side cap on the returned list; the engine itself never truncates.
  #[serde(default)]
  pub limit: Option<usize>,
  #[serde(default)]
  pub repositories: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundSkill {
  pub name: String,
  pub category: String,
  pub level: String,
}

/// Repository as delivered by the data source. Counts are signed so that
/// negative values reach validation instead of failing deserialization.
///
/// GitHub repository objects carry both spellings of several fields
/// (`forks` and `forks_count`, `open_issues` and `open_issues_count`), so
/// each spelling gets its own field and normalization merges them.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundRepository {
  pub id: RepoId,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub full_name: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub html_url: Option<String>,
  #[serde(default)]
  pub stars: Option<i64>,
  #[serde(default)]
  pub stargazers_count: Option<i64>,
  #[serde(default)]
  pub forks: Option<i64>,
  #[serde(default)]
  pub forks_count: Option<i64>,
  #[serde(default)]
  pub open_issues: Option<i64>,
  #[serde(default)]
  pub open_issues_count: Option<i64>,
  #[serde(default)]
  pub updated_at: Option<String>,
  #[serde(default)]
  pub last_updated: Option<String>,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub topics: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Repository identifier: GitHub numeric id or any caller-chosen string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoId {
  Number(u64),
  Text(String),
}

impl fmt::Display for RepoId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(n) => write!(f, "{}", n),
      Self::Text(s) => f.write_str(s),
    }
  }
}

impl From<u64> for RepoId {
  fn from(n: u64) -> Self {
    Self::Number(n)
  }
}

impl From<&str> for RepoId {
  fn from(s: &str) -> Self {
    Self::Text(s.to_string())
  }
}

// ---------------------------------------------------------------------------
// Skill profile enums (normalized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
  Language,
  Framework,
  Tool,
  Other,
}

impl SkillCategory {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "language" => Some(Self::Language),
      "framework" => Some(Self::Framework),
      "tool" => Some(Self::Tool),
      "other" => Some(Self::Other),
      _ => None,
    }
  }
}

/// Shared by per-skill proficiency and the user's overall experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
}

pub type ExperienceLevel = Level;

impl Level {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "beginner" => Some(Self::Beginner),
      "intermediate" => Some(Self::Intermediate),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// One declared skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub name: String,
  pub category: SkillCategory,
  pub level: Level,
}

impl Skill {
  pub fn new(name: impl Into<String>, category: SkillCategory, level: Level) -> Self {
    Self {
      name: name.into(),
      category,
      level,
    }
  }
}

/// Validated repository. Never mutated by scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCandidate {
  pub id: RepoId,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub full_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub html_url: Option<String>,
  pub stars: u64,
  pub forks: u64,
  pub open_issues: u64,
  pub last_updated: DateTime<Utc>,
  pub language: Option<String>,
  pub topics: Vec<String>,
}

impl RepositoryCandidate {
  /// Bare candidate with zero counts, no language and no topics.
  pub fn new(id: impl Into<RepoId>, last_updated: DateTime<Utc>) -> Self {
    Self {
      id: id.into(),
      name: None,
      full_name: None,
      description: None,
      html_url: None,
      stars: 0,
      forks: 0,
      open_issues: 0,
      last_updated,
      language: None,
      topics: Vec::new(),
    }
  }

  pub fn with_stars(mut self, stars: u64) -> Self {
    self.stars = stars;
    self
  }

  pub fn with_open_issues(mut self, open_issues: u64) -> Self {
    self.open_issues = open_issues;
    self
  }

  pub fn with_language(mut self, language: impl Into<String>) -> Self {
    self.language = Some(language.into());
    self
  }

  pub fn with_topics<I, S>(mut self, topics: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.topics = topics.into_iter().map(Into::into).collect();
    self
  }
}

// ---------------------------------------------------------------------------
// Score explanation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
  Recency,
  Popularity,
  IssueVolume,
  TopicRichness,
  BeginnerTopic,
  LanguageMatch,
  LanguageProficiency,
  TopicMatch,
  ExperienceStars,
  ExperienceIssues,
}

/// One signed adjustment applied while scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
  pub signal: Signal,
  pub points: i32,
  pub detail: String,
}

impl Contribution {
  pub fn new(signal: Signal, points: i32, detail: impl Into<String>) -> Self {
    Self {
      signal,
      points,
      detail: detail.into(),
    }
  }
}

/// Case-insensitive equality used for every name, topic and language comparison.
pub fn same_name(a: &str, b: &str) -> bool {
  a.to_lowercase() == b.to_lowercase()
}

/// Sum contributions onto a base and clamp into 0..=100.
pub fn clamp_score(base: i32, contributions: &[Contribution]) -> u8 {
  let raw = base + contributions.iter().map(|c| c.points).sum::<i32>();
  raw.clamp(0, 100) as u8
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// A candidate annotated with its match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
  #[serde(flatten)]
  pub repository: RepositoryCandidate,
  pub match_score: u8,
  pub health_score: u8,
  /// Health signals first, then user-specific adjustments.
  pub contributions: Vec<Contribution>,
}

/// A candidate that failed validation; the rest of the batch is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<RepoId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
  pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
  pub matches: Vec<MatchResult>,
  pub rejected: Vec<Rejection>,
  /// Number of candidates in the request, valid or not.
  pub evaluated: usize,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output when the request as a whole is unusable.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
