//! Tournament CLI
//!
//! Run the external RPS tournament repeatedly and report average results.

use anyhow::Context;
use clap::{Parser, Subcommand};
use rps_tournament::{
    aggregate_file, validate_bot_name, ConfigOverrides, Driver, Prompter, TournamentConfig,
    FIRST_BOT_PROMPT, SECOND_BOT_PROMPT,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "rps_tournament")]
struct Cli {
    /// Settings file (defaults to ./rps_tournament.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Name of the first bot (prompted for when missing)
    #[arg(long, global = true)]
    bot_a: Option<String>,

    /// Name of the second bot (prompted for when missing)
    #[arg(long, global = true)]
    bot_b: Option<String>,

    /// Results file the runs write to
    #[arg(long, global = true)]
    results: Option<PathBuf>,

    /// Also write the summary as JSON
    #[arg(long, global = true)]
    summary_json: Option<PathBuf>,

    /// Number of tournaments to play (prompted for when missing)
    #[arg(short = 'n', long)]
    tournaments: Option<u32>,

    /// Rounds per tournament
    #[arg(long)]
    rounds: Option<u32>,

    /// Kill a run after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Stop at the first failed or timed-out run
    #[arg(long)]
    strict: bool,

    /// No per-run progress lines
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Only aggregate an existing results file
    Aggregate,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            results_path: self.results.clone(),
            rounds: self.rounds,
            timeout_secs: self.timeout_secs,
            strict: self.strict,
            quiet: self.quiet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config =
        TournamentConfig::load_or_default(cli.config.as_deref()).context("loading settings")?;
    config.apply_overrides(&cli.overrides())?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let bot_a = match &cli.bot_a {
        Some(name) => name.trim().to_string(),
        None => prompter.bot_name(FIRST_BOT_PROMPT)?,
    };
    let bot_b = match &cli.bot_b {
        Some(name) => name.trim().to_string(),
        None => prompter.bot_name(SECOND_BOT_PROMPT)?,
    };
    validate_bot_name(&bot_a)?;
    validate_bot_name(&bot_b)?;

    if cli.command.is_none() {
        let tournaments = match cli.tournaments {
            Some(n) => n,
            None => prompter.tournament_count(config.tournaments)?,
        };

        let mut driver = Driver::with_processes(config.clone());
        let report = driver
            .run(&bot_a, &bot_b, tournaments)
            .context("running tournaments")?;
        if !report.all_completed() {
            eprintln!(
                "Warning: {} failed and {} timed-out run(s); averages cover the rest",
                report.failed, report.timed_out
            );
        }
        println!();
    }

    let summary = aggregate_file(&config.results_path, &bot_a, &bot_b)
        .with_context(|| format!("aggregating {}", config.results_path.display()))?;
    summary.print_report();

    if let Some(path) = &cli.summary_json {
        summary
            .save(path)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }

    Ok(())
}
