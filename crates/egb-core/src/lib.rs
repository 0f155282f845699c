//! Core domain + application logic for the Ethereal group bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! messaging port (trait) implemented in the adapter crate.

pub mod config;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod notify;
pub mod replies;
pub mod schedule;
pub mod store;
pub mod utils;

pub use errors::{Error, Result};
