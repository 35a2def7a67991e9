//! AI-enabled review entry point.
//!
//! Reads its configuration from the environment (workflow-style), reviews
//! the PR named by the event descriptor, and exits 0 on success or 1 on
//! any handled failure.

use clap::Parser;
use reviewbot::ai::{prompt, ChatClient};
use reviewbot::event::load_event;
use reviewbot::github::{GitHubApi, PullRequestHost};
use reviewbot::runner::run_ai_review;
use reviewbot::{AppError, Config};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "reviewbot", version)]
#[command(about = "AI pull-request review with heuristic fallback")]
struct Cli {
    /// Prompt template file; a missing file falls back to built-in instructions
    #[arg(long, default_value = prompt::DEFAULT_TEMPLATE_PATH)]
    prompt_template: PathBuf,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        log::error!("[reviewbot] run failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let event = load_event(&config.event_path)?;

    let host = GitHubApi::new(config.repository.clone(), config.github_token.clone());
    let pr = host
        .get_pull_request(event.number)
        .await
        .map_err(|e| AppError::github(e.to_string(), "fetch-pr"))?;
    println!("Reviewing PR #{} by @{}: {}", pr.number, pr.user.login, pr.title);

    let template = prompt::load_template(&cli.prompt_template);
    let model = ChatClient::new(
        config.model_endpoint.clone(),
        config.model_name.clone(),
        config.ai_token.clone(),
    );

    let result = run_ai_review(&host, event.number, &model, &template).await?;
    println!(
        "Done: posted {} review (findings: {})",
        result.source, result.has_findings
    );
    Ok(())
}
