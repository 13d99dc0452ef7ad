//! Core domain + application logic for the email check bot.
//!
//! This crate is framework-agnostic. Telegram and the HTTP service live in
//! adapter crates; they meet the front end through ports (traits) defined
//! here.

pub mod classify;
pub mod client;
pub mod config;
pub mod domain;
pub mod emails;
pub mod errors;
pub mod formatting;
pub mod frontend;
pub mod label;
pub mod logging;
pub mod messaging;
pub mod ports;
pub mod session;
pub mod wire;

pub use errors::{Error, Result};
