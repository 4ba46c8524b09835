//! Intrinsic repository health: recency, popularity, issue volume, topics.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::types::{clamp_score, Contribution, RepositoryCandidate, Signal};

pub const HEALTH_BASE: i32 = 50;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days between `last_updated` and `now`, floored (future timestamps go negative).
pub fn days_since(last_updated: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
  (*now - *last_updated).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Health score 0–100 for one repository.
pub fn compute_health_score(repo: &RepositoryCandidate, now: &DateTime<Utc>, config: &Config) -> u8 {
  clamp_score(HEALTH_BASE, &health_contributions(repo, now, config))
}

/// Every health signal that fired, in table order.
pub fn health_contributions(
  repo: &RepositoryCandidate,
  now: &DateTime<Utc>,
  config: &Config,
) -> Vec<Contribution> {
  let mut out = Vec::new();

  let days = days_since(&repo.last_updated, now);
  let recency = match days {
    d if d < 7 => 20,
    d if d < 30 => 15,
    d if d < 90 => 5,
    d if d > 365 => -20,
    _ => 0,
  };
  if recency != 0 {
    out.push(Contribution::new(
      Signal::Recency,
      recency,
      format!("updated {} days ago", days.max(0)),
    ));
  }

  let popularity = match repo.stars {
    s if s > 5000 => 15,
    s if s > 1000 => 10,
    s if s > 100 => 5,
    _ => 0,
  };
  if popularity > 0 {
    out.push(Contribution::new(
      Signal::Popularity,
      popularity,
      format!("{} stars", repo.stars),
    ));
  }

  let issues = match repo.open_issues {
    0 => 0,
    n if n < 100 => 10,
    _ => 5,
  };
  if issues > 0 {
    out.push(Contribution::new(
      Signal::IssueVolume,
      issues,
      format!("{} open issues", repo.open_issues),
    ));
  }

  let topic_count = repo.topics.len();
  let richness = match topic_count {
    n if n > 5 => 10,
    n if n > 2 => 5,
    _ => 0,
  };
  if richness > 0 {
    out.push(Contribution::new(
      Signal::TopicRichness,
      richness,
      format!("{} topics", topic_count),
    ));
  }

  if let Some(topic) = repo.topics.iter().find(|t| config.is_beginner_topic(t)) {
    out.push(Contribution::new(
      Signal::BeginnerTopic,
      15,
      format!("tagged \"{}\"", topic),
    ));
  }

  out
}
