//! Testing infrastructure for domtable integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `assertions`: Custom assertions over `list --output json` documents
//! - `fixtures`: Sample domain snapshots
//! - `process`: Background process management for long-running commands

pub mod assertions;
pub mod fixtures;
pub mod process;
pub mod world;

pub use world::{CliResult, TestWorld};
