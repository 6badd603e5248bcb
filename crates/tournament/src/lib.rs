//! Rock-Paper-Scissors tournament runner
//!
//! This crate provides infrastructure for:
//! - Running an external tournament executable between two bots, many times
//! - Collecting every run's output in one results file
//! - Averaging wins and ties across the runs
//!
//! # Usage
//!
//! ```bash
//! # Prompt for everything
//! cargo run -p rps_tournament
//!
//! # Run 50 tournaments without prompting
//! cargo run -p rps_tournament -- --bot-a MyocainePowder --bot-b WolfBot -n 50
//!
//! # Re-aggregate an existing results file
//! cargo run -p rps_tournament -- aggregate --bot-a MyocainePowder --bot-b WolfBot
//! ```

mod aggregate;
mod classify;
mod config;
mod driver;
mod error;
mod prompt;

pub use aggregate::*;
pub use classify::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use prompt::*;
