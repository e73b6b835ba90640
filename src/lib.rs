//! journo - Personal journal with content history and mood analytics
//!
//! Entries live in notebooks, carry tags and an optional mood, and keep an
//! immutable snapshot of every content revision. Entries can be exported as
//! Markdown or PDF and any two snapshots can be compared side by side.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::JournoError;
