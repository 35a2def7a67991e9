//! Heuristic-only review entry point.
//!
//! Same pipeline tail as the AI-enabled binary, but no model call: the
//! rule-based scanner is the only review source. Comment publishing is
//! best-effort; label sync still runs when it fails.

use clap::Parser;
use reviewbot::event::load_event;
use reviewbot::github::{GitHubApi, PullRequestHost};
use reviewbot::runner::run_heuristic_review;
use reviewbot::{AppError, Config};

#[derive(Debug, Parser)]
#[command(name = "reviewbot-basic", version)]
#[command(about = "Rule-based pull-request review (no AI)")]
struct Cli {}

#[tokio::main]
async fn main() {
    env_logger::init();
    let _cli = Cli::parse();

    if let Err(e) = run().await {
        log::error!("[reviewbot-basic] run failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let event = load_event(&config.event_path)?;

    let host = GitHubApi::new(config.repository.clone(), config.github_token.clone());
    let pr = host
        .get_pull_request(event.number)
        .await
        .map_err(|e| AppError::github(e.to_string(), "fetch-pr"))?;
    println!("Reviewing PR #{} by @{}: {}", pr.number, pr.user.login, pr.title);

    let result = run_heuristic_review(&host, event.number).await?;
    println!(
        "Done: posted {} review (findings: {})",
        result.source, result.has_findings
    );
    Ok(())
}
