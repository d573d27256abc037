//! Common test utilities for respack contract, scenario and CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the CLI
//! - Assertion macros: `assert_output_contains!`, `assert_marker_for!`
//! - Fixtures: Reusable source and config content

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
