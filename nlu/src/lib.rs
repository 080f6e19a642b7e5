//! # nlu
//!
//! Single-turn natural-language understanding: token normalization, intent
//! classification, entity extraction and sentiment estimation. Every function here is
//! pure and total — no I/O, no errors for any string input; "no match" is a valid
//! outcome, not a failure.

pub mod entities;
pub mod intent;
pub mod normalize;
pub mod sentiment;

pub use entities::{extract, numeric_mention};
pub use intent::classify;
pub use normalize::normalize;
pub use sentiment::estimate;
