//! Core engine: scores candidate batches, filters by threshold, ranks.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::MatchError;
use crate::health;
use crate::matching;
use crate::normalize;
use crate::types::*;

/// The match engine. Holds configuration and the clock used for recency.
pub struct Engine {
  config: Config,
  clock: Arc<dyn Clock>,
}

impl Engine {
  pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
    Self { config, clock }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default(), Arc::new(SystemClock))
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn health_score(&self, repo: &RepositoryCandidate) -> u8 {
    health::compute_health_score(repo, &self.clock.now(), &self.config)
  }

  pub fn match_score(
    &self,
    repo: &RepositoryCandidate,
    skills: &[Skill],
    experience: Option<ExperienceLevel>,
  ) -> u8 {
    matching::compute_match_score(repo, skills, experience, &self.clock.now(), &self.config)
  }

  /// Score, filter and rank already-validated candidates.
  ///
  /// `min_match_score` falls back to the configured threshold. The input slice
  /// is left untouched; results are new records.
  pub fn get_matched_repositories(
    &self,
    repos: &[RepositoryCandidate],
    skills: &[Skill],
    experience: Option<ExperienceLevel>,
    min_match_score: Option<u8>,
  ) -> Vec<MatchResult> {
    let min = min_match_score.unwrap_or(self.config.min_match_score);
    rank(repos, skills, experience, min, &self.clock.now(), &self.config)
  }

  /// Handle one raw request end to end.
  ///
  /// Request-level problems (bad skill profile) fail the call. Individual
  /// malformed or duplicate repositories land in `rejected` and the rest of
  /// the batch is still scored.
  pub fn process(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
    let skills = normalize::normalize_skills(&request.skills)?;
    let experience = normalize::normalize_experience_level(request.experience_level.as_deref());
    let min = request.min_match_score.unwrap_or(self.config.min_match_score);
    let now = self.clock.now();

    let parsed: Vec<Result<RepositoryCandidate, MatchError>> = request
      .repositories
      .par_iter()
      .map(normalize::repository_from_value)
      .collect();

    let mut seen: HashSet<RepoId> = HashSet::new();
    let mut candidates = Vec::with_capacity(parsed.len());
    let mut rejected = Vec::new();

    for (value, result) in request.repositories.iter().zip(parsed) {
      let outcome = result.and_then(|repo| {
        if seen.insert(repo.id.clone()) {
          Ok(repo)
        } else {
          Err(MatchError::configuration("id", "duplicate id in candidate set"))
        }
      });
      match outcome {
        Ok(repo) => candidates.push(repo),
        Err(e) => {
          let id = normalize::repo_id_of(value);
          warn!(id = ?id, error = %e, "skipping candidate");
          rejected.push(rejection(id, &e));
        }
      }
    }

    let matches = rank(&candidates, &skills, experience, min, &now, &self.config);
    info!(
      evaluated = request.repositories.len(),
      rejected = rejected.len(),
      matched = matches.len(),
      min_match_score = min,
      "ranked candidates"
    );

    Ok(MatchResponse {
      matches,
      rejected,
      evaluated: request.repositories.len(),
    })
  }
}

/// Score every candidate in parallel, keep those at or above `min_match_score`,
/// then stable-sort descending so equal scores keep input order.
pub fn rank(
  repos: &[RepositoryCandidate],
  skills: &[Skill],
  experience: Option<ExperienceLevel>,
  min_match_score: u8,
  now: &DateTime<Utc>,
  config: &Config,
) -> Vec<MatchResult> {
  let mut scored: Vec<MatchResult> = repos
    .par_iter()
    .map(|repo| {
      let breakdown = matching::explain_match(repo, skills, experience, now, config);
      debug!(
        id = %repo.id,
        health_score = breakdown.health_score,
        match_score = breakdown.match_score,
        "scored candidate"
      );
      let mut contributions = breakdown.health;
      contributions.extend(breakdown.adjustments);
      MatchResult {
        repository: repo.clone(),
        match_score: breakdown.match_score,
        health_score: breakdown.health_score,
        contributions,
      }
    })
    .collect();

  scored.retain(|m| m.match_score >= min_match_score);
  scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
  scored
}

fn rejection(id: Option<RepoId>, err: &MatchError) -> Rejection {
  match err {
    MatchError::Configuration { field, reason } => Rejection {
      id,
      field: Some(field.clone()),
      reason: reason.clone(),
    },
    other => Rejection {
      id,
      field: None,
      reason: other.to_string(),
    },
  }
}
