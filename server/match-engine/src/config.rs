//! Engine configuration with sane defaults.

use crate::types::same_name;

/// Topics that mark a repository as explicitly welcoming new contributors.
pub const DEFAULT_BEGINNER_TOPICS: [&str; 4] =
  ["beginner", "first-timers", "good-first-issue", "help-wanted"];

/// Tunables for matching.
#[derive(Debug, Clone)]
pub struct Config {
  /// Minimum match score (inclusive) when the caller does not supply one.
  pub min_match_score: u8,
  /// Beginner-friendly topic tags (compared case-insensitively).
  pub beginner_topics: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      min_match_score: 50,
      beginner_topics: DEFAULT_BEGINNER_TOPICS.iter().map(|t| t.to_string()).collect(),
    }
  }
}

impl Config {
  pub(crate) fn is_beginner_topic(&self, topic: &str) -> bool {
    self
      .beginner_topics
      .iter()
      .any(|t| same_name(t, topic))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn beginner_topics_compare_unicode_case_insensitively() {
    let config = Config {
      beginner_topics: vec!["ÉCOLE".into()],
      ..Config::default()
    };
    assert!(config.is_beginner_topic("école"));
    assert!(Config::default().is_beginner_topic("Good-First-Issue"));
    assert!(!Config::default().is_beginner_topic("good-first-issues"));
  }
}
