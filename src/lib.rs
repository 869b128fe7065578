//! seedkit library
//!
//! Core functionality behind the `seedkit` CLI: fetching the Gradle wrapper
//! jar and unpacking an archived Android project into the working tree.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
