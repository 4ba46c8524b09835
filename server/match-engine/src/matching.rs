//! User-specific match adjustments layered on top of repository health.
//!
//! Three independent groups: language match (first matching language skill
//! decides the proficiency bonus), topic/skill overlap (+5 per topic), and one
//! experience-level heuristic branch.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::health;
use crate::types::{
  clamp_score, same_name, Contribution, ExperienceLevel, Level, RepositoryCandidate, Signal,
  Skill, SkillCategory,
};

const LANGUAGE_MATCH_BONUS: i32 = 20;
const TOPIC_MATCH_BONUS: i32 = 5;

/// Scored candidate before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
  pub health_score: u8,
  pub match_score: u8,
  pub health: Vec<Contribution>,
  pub adjustments: Vec<Contribution>,
}

/// Match score 0–100 for one repository and one user.
pub fn compute_match_score(
  repo: &RepositoryCandidate,
  skills: &[Skill],
  experience: Option<ExperienceLevel>,
  now: &DateTime<Utc>,
  config: &Config,
) -> u8 {
  explain_match(repo, skills, experience, now, config).match_score
}

/// Match score plus every contribution that produced it.
pub fn explain_match(
  repo: &RepositoryCandidate,
  skills: &[Skill],
  experience: Option<ExperienceLevel>,
  now: &DateTime<Utc>,
  config: &Config,
) -> ScoreBreakdown {
  let health = health::health_contributions(repo, now, config);
  let health_score = clamp_score(health::HEALTH_BASE, &health);
  let adjustments = user_adjustments(repo, skills, experience);
  let match_score = clamp_score(health_score as i32, &adjustments);
  ScoreBreakdown {
    health_score,
    match_score,
    health,
    adjustments,
  }
}

/// Language, topic and experience adjustments (health excluded).
pub fn user_adjustments(
  repo: &RepositoryCandidate,
  skills: &[Skill],
  experience: Option<ExperienceLevel>,
) -> Vec<Contribution> {
  let mut out = Vec::new();
  language_match(repo, skills, &mut out);
  topic_match(repo, skills, &mut out);
  if let Some(level) = experience {
    experience_heuristic(repo, level, &mut out);
  }
  out
}

fn language_match(repo: &RepositoryCandidate, skills: &[Skill], out: &mut Vec<Contribution>) {
  let Some(language) = repo.language.as_deref() else {
    return;
  };
  let first = skills
    .iter()
    .filter(|s| s.category == SkillCategory::Language)
    .find(|s| same_name(&s.name, language));
  let Some(skill) = first else {
    return;
  };

  out.push(Contribution::new(
    Signal::LanguageMatch,
    LANGUAGE_MATCH_BONUS,
    format!("written in {}", language),
  ));

  // Lower stated proficiency surfaces the match harder.
  let proficiency = match skill.level {
    Level::Beginner => 15,
    Level::Intermediate => 10,
    Level::Advanced => 5,
  };
  out.push(Contribution::new(
    Signal::LanguageProficiency,
    proficiency,
    format!("{} {}", skill.level.as_str(), skill.name),
  ));
}

fn topic_match(repo: &RepositoryCandidate, skills: &[Skill], out: &mut Vec<Contribution>) {
  for topic in &repo.topics {
    if skills.iter().any(|s| same_name(&s.name, topic)) {
      out.push(Contribution::new(
        Signal::TopicMatch,
        TOPIC_MATCH_BONUS,
        format!("topic \"{}\" matches a skill", topic),
      ));
    }
  }
}

fn experience_heuristic(repo: &RepositoryCandidate, level: ExperienceLevel, out: &mut Vec<Contribution>) {
  let stars = repo.stars;
  let issues = repo.open_issues;
  let (star_bonus, issue_bonus) = match level {
    Level::Beginner => (
      if stars > 1000 { 10 } else { 0 },
      if issues > 0 && issues < 50 { 10 } else { 0 },
    ),
    Level::Intermediate => (
      if stars > 100 && stars < 5000 { 10 } else { 0 },
      if issues > 10 && issues < 200 { 10 } else { 0 },
    ),
    Level::Advanced => (
      if stars > 10 && stars < 1000 { 5 } else { 0 },
      if issues > 50 { 5 } else { 0 },
    ),
  };
  if star_bonus > 0 {
    out.push(Contribution::new(
      Signal::ExperienceStars,
      star_bonus,
      format!("{} stars suits {} contributors", stars, level.as_str()),
    ));
  }
  if issue_bonus > 0 {
    out.push(Contribution::new(
      Signal::ExperienceIssues,
      issue_bonus,
      format!("{} open issues suits {} contributors", issues, level.as_str()),
    ));
  }
}
