//! Aggregation of the results file and the end-of-session report

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::classify::{Classifier, ResultLine};
use crate::error::{Result, TournamentError};

/// Counts collected from the results file, one sequence per outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub bot_a: Vec<u64>,
    pub bot_b: Vec<u64>,
    pub ties: Vec<u64>,
    /// Lines that fit none of the three sequences
    pub malformed: usize,
}

impl Buckets {
    /// Put a classified line into its bucket
    pub fn record(&mut self, line: ResultLine) {
        match line {
            ResultLine::BotA(count) => self.bot_a.push(count),
            ResultLine::BotB(count) => self.bot_b.push(count),
            ResultLine::Tie(count) => self.ties.push(count),
            ResultLine::Malformed(_) => self.malformed += 1,
        }
    }

    /// Total number of lines seen
    pub fn total_lines(&self) -> usize {
        self.bot_a.len() + self.bot_b.len() + self.ties.len() + self.malformed
    }
}

/// Arithmetic mean of the counts, or `None` for an empty sequence
pub fn average(counts: &[u64]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }
    // Summed as u128: many u64 counts can exceed u64::MAX
    let total: u128 = counts.iter().map(|&count| u128::from(count)).sum();
    Some(total as f64 / counts.len() as f64)
}

/// Reads result lines and sorts them into [`Buckets`]
pub struct Aggregator {
    classifier: Classifier,
    buckets: Buckets,
}

impl Aggregator {
    pub fn new(bot_a: &str, bot_b: &str) -> Self {
        Self {
            classifier: Classifier::new(bot_a, bot_b),
            buckets: Buckets::default(),
        }
    }

    /// Classify and record one line. `line_no` is 1-based and only used for logging.
    pub fn push_line(&mut self, line_no: usize, line: &str) {
        let result = self.classifier.classify(line);
        if let ResultLine::Malformed(reason) = &result {
            tracing::warn!("results line {}: {} ({:?})", line_no, reason, line);
        }
        self.buckets.record(result);
    }

    /// Consume every line of a reader. Invalid UTF-8 is replaced with U+FFFD,
    /// which leaves such a line `Malformed`.
    pub fn read_all<R: BufRead>(&mut self, mut reader: R, origin: &Path) -> Result<()> {
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| TournamentError::io(origin, e))?;
            if read == 0 {
                return Ok(());
            }
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);
            self.push_line(line_no, line.trim_end_matches(['\n', '\r']));
        }
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn into_buckets(self) -> Buckets {
        self.buckets
    }
}

/// Read a results file and bucket every line
pub fn read_buckets(path: &Path, bot_a: &str, bot_b: &str) -> Result<Buckets> {
    let file = File::open(path).map_err(|e| TournamentError::io(path, e))?;
    let mut aggregator = Aggregator::new(bot_a, bot_b);
    aggregator.read_all(BufReader::new(file), path)?;
    Ok(aggregator.into_buckets())
}

/// Read a results file and summarize it
pub fn aggregate_file(path: &Path, bot_a: &str, bot_b: &str) -> Result<Summary> {
    let buckets = read_buckets(path, bot_a, bot_b)?;
    tracing::info!(
        "aggregated {} lines from {}",
        buckets.total_lines(),
        path.display()
    );
    Ok(Summary::from_buckets(bot_a, bot_b, &buckets))
}

/// Aggregate statistics for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub bot_a: String,
    pub bot_b: String,
    /// Average wins per run; `None` when bot A has no result lines
    pub bot_a_average: Option<f64>,
    pub bot_b_average: Option<f64>,
    pub ties_average: Option<f64>,
    /// |bot_a_average - bot_b_average|; `None` if either side is undefined
    pub margin: Option<f64>,
    pub bot_a_results: usize,
    pub bot_b_results: usize,
    pub tie_results: usize,
    pub malformed_lines: usize,
}

impl Summary {
    pub fn from_buckets(bot_a: &str, bot_b: &str, buckets: &Buckets) -> Self {
        let bot_a_average = average(&buckets.bot_a);
        let bot_b_average = average(&buckets.bot_b);
        let margin = match (bot_a_average, bot_b_average) {
            (Some(a), Some(b)) => Some((a - b).abs()),
            _ => None,
        };

        Self {
            bot_a: bot_a.to_string(),
            bot_b: bot_b.to_string(),
            bot_a_average,
            bot_b_average,
            ties_average: average(&buckets.ties),
            margin,
            bot_a_results: buckets.bot_a.len(),
            bot_b_results: buckets.bot_b.len(),
            tie_results: buckets.ties.len(),
            malformed_lines: buckets.malformed,
        }
    }

    /// Generate the text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "{} average wins: {}\n",
            self.bot_a,
            format_average(self.bot_a_average)
        ));
        report.push_str(&format!(
            "Average ties: {}\n",
            format_average(self.ties_average)
        ));
        report.push_str(&format!(
            "{} average wins: {}\n",
            self.bot_b,
            format_average(self.bot_b_average)
        ));
        report.push_str(&format!(
            "Margin of victory: {}\n",
            format_average(self.margin)
        ));
        if self.malformed_lines > 0 {
            report.push_str(&format!(
                "Skipped {} malformed line(s)\n",
                self.malformed_lines
            ));
        }
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        print!("{}", self.generate_report());
    }

    /// Save summary to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| TournamentError::io(path, e))
    }

    /// Load summary from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| TournamentError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Two decimals, or `n/a` when there was nothing to average
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod aggregate_tests;
