//! Prompt assembly for the two competition phases.
//!
//! The generator prompt pins reference art for each contest animal so
//! the round stays winnable; the guesser prompt embeds the produced art
//! and demands a one-word answer.

pub mod art;
pub mod guess;
