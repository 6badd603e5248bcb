//! Driver that runs the external tournament executable N times in a row

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::classify::validate_bot_name;
use crate::config::TournamentConfig;
use crate::error::{Result, TournamentError};

/// How often a run with a timeout checks whether its child has exited
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// The command line for one tournament run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Build `<command...> <bot_a> <bot_b> <rounds>` from the config
    pub fn new(config: &TournamentConfig, bot_a: &str, bot_b: &str) -> Result<Self> {
        validate_bot_name(bot_a)?;
        validate_bot_name(bot_b)?;
        let (program, leading) = config.command.split_first().ok_or_else(|| {
            TournamentError::InvalidInput("no tournament program configured".to_string())
        })?;

        let mut args = leading.to_vec();
        args.push(bot_a.to_string());
        args.push(bot_b.to_string());
        args.push(config.rounds.to_string());

        Ok(Self {
            program: program.clone(),
            args,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// A `Command` for this invocation, arguments passed directly (no shell)
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a single run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Failed(ExitStatus),
    TimedOut(Duration),
}

/// Starts a tournament run and blocks until it is over
pub trait Launcher {
    /// Run `invocation` with its stdout going to `stdout`. Must not return
    /// before the run has finished.
    fn launch(&mut self, run: u32, invocation: &Invocation, stdout: File) -> Result<RunOutcome>;
}

/// Launches real child processes
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    timeout: Option<Duration>,
}

impl ProcessLauncher {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn wait(&self, run: u32, child: &mut Child) -> Result<RunOutcome> {
        let status = match self.timeout {
            None => child
                .wait()
                .map_err(|source| TournamentError::Wait { run, source })?,
            Some(limit) => match wait_until(child, Instant::now() + limit)
                .map_err(|source| TournamentError::Wait { run, source })?
            {
                Some(status) => status,
                None => {
                    // Already-exited children make kill() fail; the wait reaps either way
                    let _ = child.kill();
                    child
                        .wait()
                        .map_err(|source| TournamentError::Wait { run, source })?;
                    return Ok(RunOutcome::TimedOut(limit));
                }
            },
        };

        if status.success() {
            Ok(RunOutcome::Completed)
        } else {
            Ok(RunOutcome::Failed(status))
        }
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&mut self, run: u32, invocation: &Invocation, stdout: File) -> Result<RunOutcome> {
        tracing::debug!("run {}: {}", run, invocation);
        let mut child = invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| TournamentError::Spawn {
                program: invocation.program().to_string(),
                source,
            })?;
        self.wait(run, &mut child)
    }
}

/// Wait for the child until `deadline`; `None` means it is still running
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        std::thread::sleep(EXIT_CHECK_INTERVAL.min(deadline - now));
    }
}

/// Tally of how the runs of a session went
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub launched: u32,
    pub completed: u32,
    pub failed: u32,
    pub timed_out: u32,
}

impl RunReport {
    pub fn all_completed(&self) -> bool {
        self.completed == self.launched
    }
}

/// Runs the tournament executable repeatedly into one results file
pub struct Driver<L: Launcher> {
    config: TournamentConfig,
    launcher: L,
}

impl Driver<ProcessLauncher> {
    /// Driver that launches real processes with the configured timeout
    pub fn with_processes(config: TournamentConfig) -> Self {
        let launcher = ProcessLauncher::new(config.timeout());
        Self::new(config, launcher)
    }
}

impl<L: Launcher> Driver<L> {
    pub fn new(config: TournamentConfig, launcher: L) -> Self {
        Self { config, launcher }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Play `tournaments` runs of bot_a vs bot_b, one after another,
    /// with progress going to stdout.
    pub fn run(&mut self, bot_a: &str, bot_b: &str, tournaments: u32) -> Result<RunReport> {
        self.run_with_progress(bot_a, bot_b, tournaments, &mut io::stdout())
    }

    /// Same as [`Driver::run`], with the banner and per-run progress lines
    /// written to `progress`.
    ///
    /// The results file is truncated once up front and every run's stdout
    /// is appended to it.
    pub fn run_with_progress<W: Write>(
        &mut self,
        bot_a: &str,
        bot_b: &str,
        tournaments: u32,
        progress: &mut W,
    ) -> Result<RunReport> {
        let invocation = Invocation::new(&self.config, bot_a, bot_b)?;
        let results_path = self.config.results_path.clone();
        let results =
            File::create(&results_path).map_err(|e| TournamentError::io(&results_path, e))?;

        if self.config.progress {
            writeln!(
                progress,
                "Beginning {} tournaments between {} and {}",
                tournaments, bot_a, bot_b
            )
            .map_err(|e| TournamentError::io("<progress>", e))?;
        }
        tracing::info!(
            "running `{}` {} times into {}",
            invocation,
            tournaments,
            results_path.display()
        );

        let mut report = RunReport::default();
        for run in 1..=tournaments {
            let stdout = results
                .try_clone()
                .map_err(|e| TournamentError::io(&results_path, e))?;
            report.launched += 1;

            match self.launcher.launch(run, &invocation, stdout)? {
                RunOutcome::Completed => report.completed += 1,
                RunOutcome::Failed(status) => {
                    report.failed += 1;
                    tracing::warn!("tournament run {} exited with {}", run, status);
                    if self.config.strict {
                        return Err(TournamentError::RunFailed { run, status });
                    }
                }
                RunOutcome::TimedOut(timeout) => {
                    report.timed_out += 1;
                    tracing::warn!("tournament run {} killed after {:?}", run, timeout);
                    if self.config.strict {
                        return Err(TournamentError::Timeout { run, timeout });
                    }
                }
            }

            if self.config.progress {
                writeln!(progress, "Completed tournament {}", run)
                    .map_err(|e| TournamentError::io("<progress>", e))?;
            }
        }

        if !report.all_completed() {
            tracing::warn!(
                "{} of {} runs did not complete; their results may be missing",
                report.failed + report.timed_out,
                report.launched
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
