//! AI Privacy Footprint Analyzer - Runner Binary
//!
//! Wires the engine together once at startup and exposes a small
//! command surface over argv. Every command prints a JSON document on
//! stdout so the output can be piped into other tools.

mod api;
mod logic;
pub mod constants;
mod error;

use anyhow::{bail, Context, Result};

use api::analyze::{AnalysisEngine, AnalyzeRequest};
use constants::{APP_NAME, APP_VERSION};
use logic::config::EngineConfig;

const USAGE: &str = "\
Usage:
  analyze <text> [--user <id>] [--no-recommendations] [--no-rewrite]
  ask <question> [locale]
  history [--user <id>] [--limit <n>]
  report <analysis-id>
  delete <analysis-id>
  stats
  challenges
  attempt <challenge-id> <rewritten-text>";

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; explicit environment always wins
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = EngineConfig::from_env();
    let engine = AnalysisEngine::from_config(&config).context("engine startup failed")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run_command(&engine, &args).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            log::error!("{}", e);
            Err(e)
        }
    }
}

async fn run_command(engine: &AnalysisEngine, args: &[String]) -> Result<String> {
    let command = args.first().map(String::as_str).unwrap_or("");

    match command {
        "analyze" => {
            let text = positional(args, 1, "analyze needs the text to analyze")?;
            let mut request = AnalyzeRequest::new(text);
            request.user_id = flag_value(args, "--user");
            request.include_recommendations = !has_flag(args, "--no-recommendations");
            request.include_rewrite = !has_flag(args, "--no-rewrite");

            let report = engine.analyze(request).await?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        "ask" => {
            let question = positional(args, 1, "ask needs a question")?;
            let locale = args.get(2).map(String::as_str);
            let answer = engine.ask(&question, locale).await?;
            Ok(serde_json::to_string_pretty(&serde_json::json!({ "answer": answer }))?)
        }
        "history" => {
            let user = flag_value(args, "--user");
            let limit = flag_value(args, "--limit").and_then(|v| v.parse().ok());
            let history = engine.history(user.as_deref(), limit)?;
            Ok(serde_json::to_string_pretty(&history)?)
        }
        "report" => {
            let id = positional(args, 1, "report needs an analysis id")?;
            Ok(serde_json::to_string_pretty(&engine.report(&id)?)?)
        }
        "delete" => {
            let id = positional(args, 1, "delete needs an analysis id")?;
            engine.delete(&id)?;
            Ok(serde_json::to_string_pretty(&serde_json::json!({ "deleted": id }))?)
        }
        "stats" => Ok(serde_json::to_string_pretty(&engine.stats()?)?),
        "challenges" => Ok(serde_json::to_string_pretty(&engine.challenges())?),
        "attempt" => {
            let challenge_id = positional(args, 1, "attempt needs a challenge id")?;
            let text = positional(args, 2, "attempt needs the rewritten text")?;
            let report = engine.score_attempt(&challenge_id, &text)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        _ => bail!("{}", USAGE),
    }
}

fn positional(args: &[String], index: usize, message: &str) -> Result<String> {
    match args.get(index) {
        Some(value) if !value.starts_with("--") => Ok(value.clone()),
        _ => bail!("{}\n\n{}", message, USAGE),
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
