//! Binary entrypoint: read one MatchRequest JSON object from stdin, write one
//! MatchResponse to stdout.
//!
//! A request that cannot be used at all (bad JSON, invalid skill profile)
//! produces an ErrorOutput object and exit code 1.

use match_engine::logging::init_tracing_subscriber;
use match_engine::types::ErrorOutput;
use match_engine::{Engine, MatchError, MatchRequest};
use std::io::{self, Read, Write};

fn main() {
  init_tracing_subscriber();
  if let Err(e) = run_binary() {
    tracing::error!(error = %e, "match-engine failed");
    let err = match &e {
      MatchError::Configuration { field, reason } => {
        ErrorOutput::new(reason.clone()).with_field(field.clone())
      }
      _ => ErrorOutput::new(e.to_string()),
    };
    let _ = serde_json::to_writer(io::stdout(), &err);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), MatchError> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let request: MatchRequest = serde_json::from_str(&raw)?;

  let engine = Engine::with_defaults();
  let mut response = engine.process(&request)?;
  // Display slicing is the caller's concern; the engine never truncates.
  if let Some(limit) = request.limit {
    response.matches.truncate(limit);
  }

  let json = serde_json::to_vec(&response)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
