//! Classification of the tournament executable's output lines
//!
//! The executable prints one line per result, shaped
//! `<label>: <count> [anything else...]`. The label is either one of the
//! two bot names or something else, which is counted as a tie. Only the
//! first two whitespace-separated tokens are looked at.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TournamentError};

/// What a single output line says
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultLine {
    /// Wins credited to the first bot
    BotA(u64),
    /// Wins credited to the second bot
    BotB(u64),
    /// Any other well-formed label
    Tie(u64),
    /// Not a `<label> <count>` line
    Malformed(MalformedReason),
}

/// Why a line could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedReason {
    Blank,
    MissingCount,
    InvalidCount(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::Blank => write!(f, "blank line"),
            MalformedReason::MissingCount => write!(f, "no count after the label"),
            MalformedReason::InvalidCount(token) => write!(f, "count `{}` is not a number", token),
        }
    }
}

/// Matches output lines against the two bots' labels
#[derive(Debug, Clone)]
pub struct Classifier {
    bot_a_label: String,
    bot_b_label: String,
}

impl Classifier {
    pub fn new(bot_a: &str, bot_b: &str) -> Self {
        Self {
            bot_a_label: format!("{}:", bot_a),
            bot_b_label: format!("{}:", bot_b),
        }
    }

    /// Classify one line.
    ///
    /// Bot A's label is checked first, so a session where both bots share a
    /// name credits every win to bot A.
    pub fn classify(&self, line: &str) -> ResultLine {
        let mut tokens = line.split_whitespace();
        let Some(label) = tokens.next() else {
            return ResultLine::Malformed(MalformedReason::Blank);
        };
        let Some(count_token) = tokens.next() else {
            return ResultLine::Malformed(MalformedReason::MissingCount);
        };
        let count = match count_token.parse::<u64>() {
            Ok(count) => count,
            Err(_) => {
                return ResultLine::Malformed(MalformedReason::InvalidCount(
                    count_token.to_string(),
                ));
            }
        };

        if label == self.bot_a_label {
            ResultLine::BotA(count)
        } else if label == self.bot_b_label {
            ResultLine::BotB(count)
        } else {
            ResultLine::Tie(count)
        }
    }
}

/// Check that `name` can appear as a result label: the label is the first
/// whitespace-separated token, so names must be one non-empty token.
pub fn validate_bot_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TournamentError::InvalidInput(
            "bot names must not be empty".to_string(),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(TournamentError::InvalidInput(format!(
            "bot name `{}` must not contain whitespace",
            name
        )));
    }
    Ok(())
}

/// Classify a single line without keeping a [`Classifier`] around
pub fn classify_line(line: &str, bot_a: &str, bot_b: &str) -> ResultLine {
    Classifier::new(bot_a, bot_b).classify(line)
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod classify_tests;
