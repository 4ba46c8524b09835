//! Validate inbound JSON into canonical candidates and skills.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::MatchError;
use crate::types::*;

/// Parse a raw JSON repository and validate it.
pub fn repository_from_value(value: &Value) -> Result<RepositoryCandidate, MatchError> {
  let raw = InboundRepository::deserialize(value)
    .map_err(|e| MatchError::configuration("repository", &format!("malformed: {}", e)))?;
  normalize_repository(&raw)
}

/// Best-effort id extraction for reporting a rejected repository.
pub fn repo_id_of(value: &Value) -> Option<RepoId> {
  value.get("id").and_then(|v| RepoId::deserialize(v).ok())
}

/// Validate an InboundRepository into a RepositoryCandidate.
pub fn normalize_repository(raw: &InboundRepository) -> Result<RepositoryCandidate, MatchError> {
  let updated_at = raw
    .updated_at
    .as_deref()
    .or(raw.last_updated.as_deref())
    .ok_or_else(|| MatchError::configuration("updated_at", "missing"))?;
  let last_updated: DateTime<Utc> = DateTime::parse_from_rfc3339(updated_at)
    .map_err(|e| MatchError::configuration("updated_at", &format!("invalid RFC3339: {}", e)))?
    .with_timezone(&Utc);

  // `*_count` is GitHub's canonical spelling; the bare name is the fallback.
  let stars = count("stars", raw.stargazers_count.or(raw.stars))?;
  let forks = count("forks", raw.forks_count.or(raw.forks))?;
  let open_issues = count("open_issues", raw.open_issues_count.or(raw.open_issues))?;

  let language = raw
    .language
    .as_deref()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .map(str::to_string);

  Ok(RepositoryCandidate {
    id: raw.id.clone(),
    name: raw.name.clone(),
    full_name: raw.full_name.clone(),
    description: raw.description.clone(),
    html_url: raw.html_url.clone(),
    stars,
    forks,
    open_issues,
    last_updated,
    language,
    topics: normalize_topics(raw.topics.as_deref().unwrap_or_default()),
  })
}

/// Validate the skill profile. Any bad entry fails the whole profile.
pub fn normalize_skills(raw: &[InboundSkill]) -> Result<Vec<Skill>, MatchError> {
  raw
    .iter()
    .enumerate()
    .map(|(i, s)| {
      let name = s.name.trim();
      if name.is_empty() {
        return Err(MatchError::configuration(
          &format!("skills[{}].name", i),
          "must not be empty",
        ));
      }
      let category = SkillCategory::from_str_loose(&s.category).ok_or_else(|| {
        MatchError::configuration(
          &format!("skills[{}].category", i),
          "expected language|framework|tool|other",
        )
      })?;
      let level = Level::from_str_loose(&s.level).ok_or_else(|| {
        MatchError::configuration(
          &format!("skills[{}].level", i),
          "expected beginner|intermediate|advanced",
        )
      })?;
      Ok(Skill::new(name, category, level))
    })
    .collect()
}

/// Unrecognized levels are not an error: scoring simply skips the heuristic.
pub fn normalize_experience_level(raw: Option<&str>) -> Option<ExperienceLevel> {
  let raw = raw?;
  let level = Level::from_str_loose(raw);
  if level.is_none() {
    warn!(experience_level = raw, "unrecognized experience level; heuristic bonus skipped");
  }
  level
}

fn count(field: &str, value: Option<i64>) -> Result<u64, MatchError> {
  match value {
    None => Err(MatchError::configuration(field, "missing")),
    Some(n) if n < 0 => Err(MatchError::configuration(field, "must be non-negative")),
    Some(n) => Ok(n as u64),
  }
}

/// Topics are a set: drop blanks and case-insensitive duplicates, keep first spelling.
fn normalize_topics(topics: &[String]) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(topics.len());
  for t in topics {
    let t = t.trim();
    if t.is_empty() || out.iter().any(|seen| same_name(seen, t)) {
      continue;
    }
    out.push(t.to_string());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn valid_json() -> Value {
    json!({
      "id": 42,
      "full_name": "octo/widgets",
      "stargazers_count": 200,
      "forks_count": 12,
      "open_issues_count": 10,
      "updated_at": "2025-01-05T00:00:00Z",
      "language": "Python",
      "topics": ["cli", "CLI", " ", "good-first-issue"]
    })
  }

  #[test]
  fn github_field_aliases_are_accepted() {
    let repo = repository_from_value(&valid_json()).unwrap();
    assert_eq!(repo.id, RepoId::Number(42));
    assert_eq!(repo.stars, 200);
    assert_eq!(repo.forks, 12);
    assert_eq!(repo.open_issues, 10);
    assert_eq!(repo.language.as_deref(), Some("Python"));
    assert_eq!(repo.full_name.as_deref(), Some("octo/widgets"));
  }

  #[test]
  fn topics_are_deduplicated_case_insensitively() {
    let repo = repository_from_value(&valid_json()).unwrap();
    assert_eq!(repo.topics, vec!["cli", "good-first-issue"]);
  }

  #[test]
  fn github_search_item_with_both_spellings_is_accepted() {
    let item = json!({
      "id": 1296269,
      "name": "Hello-World",
      "full_name": "octocat/Hello-World",
      "html_url": "https://github.com/octocat/Hello-World",
      "description": "This your first repo!",
      "stargazers_count": 200,
      "watchers_count": 200,
      "forks_count": 3,
      "forks": 3,
      "open_issues_count": 10,
      "open_issues": 10,
      "updated_at": "2025-01-05T00:00:00Z",
      "pushed_at": "2025-01-05T00:00:00Z",
      "language": "Python",
      "topics": ["cli"],
      "score": 1.0
    });
    let repo = repository_from_value(&item).unwrap();
    assert_eq!(repo.stars, 200);
    assert_eq!(repo.forks, 3);
    assert_eq!(repo.open_issues, 10);
    assert_eq!(repo.topics, vec!["cli"]);
  }

  #[test]
  fn count_spelling_wins_over_bare_name() {
    let mut v = valid_json();
    v["open_issues"] = json!(99);
    v["forks"] = json!(1);
    let repo = repository_from_value(&v).unwrap();
    assert_eq!(repo.open_issues, 10);
    assert_eq!(repo.forks, 12);
  }

  #[test]
  fn bare_names_and_last_updated_are_fallbacks() {
    let v = json!({
      "id": "x",
      "stars": 7,
      "forks": 1,
      "open_issues": 2,
      "last_updated": "2025-01-05T00:00:00Z"
    });
    let repo = repository_from_value(&v).unwrap();
    assert_eq!((repo.stars, repo.forks, repo.open_issues), (7, 1, 2));
  }

  #[test]
  fn both_timestamp_spellings_are_accepted() {
    let mut v = valid_json();
    v["last_updated"] = json!("2024-01-01T00:00:00Z");
    let repo = repository_from_value(&v).unwrap();
    assert_eq!(repo.last_updated.to_rfc3339(), "2025-01-05T00:00:00+00:00");
  }

  #[test]
  fn topic_dedup_is_unicode_case_insensitive() {
    let mut v = valid_json();
    v["topics"] = json!(["École", "école"]);
    let repo = repository_from_value(&v).unwrap();
    assert_eq!(repo.topics, vec!["École"]);
  }

  #[test]
  fn string_ids_are_accepted() {
    let mut v = valid_json();
    v["id"] = json!("octo/widgets");
    let repo = repository_from_value(&v).unwrap();
    assert_eq!(repo.id, RepoId::Text("octo/widgets".into()));
  }

  #[test]
  fn unparseable_timestamp_is_configuration_error() {
    let mut v = valid_json();
    v["updated_at"] = json!("yesterday");
    let err = repository_from_value(&v).unwrap_err();
    assert_eq!(err.field(), Some("updated_at"));
    assert!(matches!(err, MatchError::Configuration { .. }));
  }

  #[test]
  fn negative_count_is_rejected() {
    let mut v = valid_json();
    v["open_issues_count"] = json!(-3);
    let err = repository_from_value(&v).unwrap_err();
    assert_eq!(err.field(), Some("open_issues"));
    assert!(err.to_string().contains("non-negative"));
  }

  #[test]
  fn missing_stars_is_rejected() {
    let mut v = valid_json();
    v.as_object_mut().unwrap().remove("stargazers_count");
    let err = repository_from_value(&v).unwrap_err();
    assert_eq!(err.field(), Some("stars"));
  }

  #[test]
  fn null_language_and_topics_degrade_to_empty() {
    let mut v = valid_json();
    v["language"] = Value::Null;
    v["topics"] = Value::Null;
    let repo = repository_from_value(&v).unwrap();
    assert!(repo.language.is_none());
    assert!(repo.topics.is_empty());
  }

  #[test]
  fn repo_id_of_reads_id_even_when_invalid() {
    let v = json!({"id": "abc", "stars": "lots"});
    assert_eq!(repo_id_of(&v), Some(RepoId::Text("abc".into())));
    assert!(repository_from_value(&v).is_err());
  }

  #[test]
  fn skills_are_parsed_case_insensitively() {
    let raw = vec![InboundSkill {
      name: " Python ".into(),
      category: "Language".into(),
      level: "BEGINNER".into(),
    }];
    let skills = normalize_skills(&raw).unwrap();
    assert_eq!(
      skills,
      vec![Skill::new("Python", SkillCategory::Language, Level::Beginner)]
    );
  }

  #[test]
  fn unknown_skill_category_is_rejected() {
    let raw = vec![InboundSkill {
      name: "Rust".into(),
      category: "hobby".into(),
      level: "advanced".into(),
    }];
    let err = normalize_skills(&raw).unwrap_err();
    assert_eq!(err.field(), Some("skills[0].category"));
  }

  #[test]
  fn unknown_experience_level_is_none() {
    assert_eq!(normalize_experience_level(Some("guru")), None);
    assert_eq!(normalize_experience_level(None), None);
    assert_eq!(
      normalize_experience_level(Some("Intermediate")),
      Some(Level::Intermediate)
    );
  }
}
