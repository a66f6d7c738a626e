//! pslint core library.
//!
//! This crate exposes programmatic APIs for validating a public suffix
//! registry: a line-oriented list of domain-suffix rules split into an ICANN
//! and a PRIVATE section.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `source`: Line normalization (whitespace, encoding).
//! - `section`: Section begin/end state machine.
//! - `rules`: Rule syntax validation and the doublette/exception registry.
//! - `order`: Group sort-order checking and suffix comparison.
//! - `diagnostics`: Warning/error sink.
//! - `lint`: Validator context and file runners.
//! - `submissions`: PRIVATE section submission order analysis.
//! - `models`: Findings, rule flags and lint output structs.
//! - `output`: Human/JSON printers.
//! - `error`: Operational error type.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lint;
pub mod models;
pub mod order;
pub mod output;
pub mod rules;
pub mod section;
pub mod source;
pub mod submissions;
pub mod utils;
