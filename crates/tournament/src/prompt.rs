//! Interactive prompts for the session inputs

use std::io::{BufRead, Write};

use crate::classify::validate_bot_name;
use crate::error::{Result, TournamentError};

pub const FIRST_BOT_PROMPT: &str = "Please enter the name of the first bot: ";
pub const SECOND_BOT_PROMPT: &str = "Please enter the name of the second bot: ";
pub const TOURNAMENTS_PROMPT: &str = "Please enter the number of tournaments to play: ";

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print the question and return the trimmed answer
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).map_err(|e| TournamentError::io("<stdout>", e))?;
        self.output
            .flush()
            .map_err(|e| TournamentError::io("<stdout>", e))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| TournamentError::io("<stdin>", e))?;
        if read == 0 {
            return Err(TournamentError::InvalidInput(
                "input closed before an answer was given".to_string(),
            ));
        }
        Ok(answer.trim().to_string())
    }

    /// Ask until a usable bot name (one non-empty token) is given
    pub fn bot_name(&mut self, question: &str) -> Result<String> {
        loop {
            let name = self.ask(question)?;
            if name.is_empty() {
                continue;
            }
            match validate_bot_name(&name) {
                Ok(()) => return Ok(name),
                Err(e) => writeln!(self.output, "{}", e)
                    .map_err(|e| TournamentError::io("<stdout>", e))?,
            }
        }
    }

    /// Ask for the tournament count; an empty answer picks `default`
    pub fn tournament_count(&mut self, default: u32) -> Result<u32> {
        let answer = self.ask(TOURNAMENTS_PROMPT)?;
        if answer.is_empty() {
            return Ok(default);
        }
        answer.parse().map_err(|_| {
            TournamentError::InvalidInput(format!(
                "`{}` is not a number of tournaments",
                answer
            ))
        })
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
