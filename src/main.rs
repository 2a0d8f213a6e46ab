//! grafis - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use git2::Repository;
use tracing_subscriber::EnvFilter;

use grafis::config;
use grafis::error::GitError;
use grafis::git::{CommitOutcome, check_git_installed, collect_diff, confirm_and_commit};
use grafis::llm::SuggestionClient;

/// Suggest commit messages for uncommitted changes using a chat-completions API.
#[derive(Parser, Debug)]
#[command(name = "grafis")]
#[command(about = "Suggest commit messages for uncommitted changes")]
#[command(version)]
struct Cli {
    /// Write a fresh configuration file with placeholder values and exit
    #[arg(short = 'i', long = "init")]
    init: bool,

    /// Print the suggestion without prompting or committing
    #[arg(long)]
    dry_run: bool,

    /// Additional context appended to the suggestion prompt
    #[arg(trailing_var_arg = true)]
    context: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Step 1: Initialize config and exit if requested
    if cli.init {
        config::init().context("Failed to write configuration file")?;
        println!("Configuration file created: {}", config::CONFIG_FILE);
        return Ok(());
    }

    // Step 2: Check prerequisites
    check_git_installed()?;

    let config = config::load().context("Failed to load configuration")?;

    // Step 3: Collect the pending diff
    let repo = Repository::open(".").map_err(GitError::NotARepository)?;

    println!("Fetching uncommitted diffs from git...");
    let diff = match collect_diff(&repo) {
        Ok(d) => d,
        Err(GitError::NoChanges) => {
            println!("No uncommitted changes found.");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to collect diff"),
    };

    println!(
        "Found {} changed file(s) (+{} -{}){}",
        diff.files_changed,
        diff.additions,
        diff.deletions,
        if diff.truncated { ", diff truncated" } else { "" }
    );

    // Step 4: Request a suggestion
    let additional_context = if cli.context.is_empty() {
        None
    } else {
        Some(cli.context.join(" "))
    };

    println!("Requesting commit message suggestion...");
    let client = SuggestionClient::new(config);
    let suggestion = client
        .suggest(&diff.diff_text, additional_context.as_deref())
        .await
        .context("Failed to fetch commit message suggestion")?;

    println!();
    println!("Suggested commit message:");
    println!("{}", suggestion);
    println!();

    // Step 5: Confirm and commit
    let outcome = confirm_and_commit(&suggestion, cli.dry_run, || {
        Confirm::new()
            .with_prompt("Commit with this message?")
            .default(false)
            .interact()
            .map_err(std::io::Error::other)
    })
    .context("Failed to create commit")?;

    match outcome {
        CommitOutcome::DryRun => {}
        CommitOutcome::Cancelled => println!("Commit cancelled."),
        CommitOutcome::Committed(summary) => {
            println!("Changes successfully committed:");
            if !summary.is_empty() {
                println!("{}", summary);
            }
        }
    }

    Ok(())
}
