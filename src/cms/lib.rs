//! # CMS Architecture
//!
//! CMS is a **UI-agnostic student record store**: an in-memory table of student
//! records loaded from and saved to a tab-separated text file, with validation,
//! queries, sorting and a single step of undo. The `cms` binary is one client of
//! this library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns one Table and one StorageBackend                    │
//! │  - Normalizes raw strings (ids, fields, marks)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Table + Undo (table.rs,     │ │  Format + Storage          │
//! │  undo.rs, validation.rs)     │ │  (format.rs, store/)       │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result<CmdResult>`.
//! It never prints, never prompts and never exits. File access goes through
//! [`store::StorageBackend`], so the whole core runs against
//! [`store::memory::MemBackend`] in tests.
//!
//! Diagnostics go through the `log` facade. The binary decides whether and
//! where they appear.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): behaviour of every operation, against
//!    in-memory tables. Most tests live here.
//! 2. **Table, format, validation**: invariants of each building block.
//! 3. **API** (`api.rs`): input normalization and dispatch.
//! 4. **CLI** (`tests/`): the binary end to end on temporary files.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`table`]: The in-memory record table
//! - [`undo`]: The single-slot undo snapshot
//! - [`validation`]: Field rules
//! - [`format`]: Tab-separated file parsing and rendering
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Record`, `StudentId`, `Mark`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, the interactive shell and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod store;
pub mod table;
pub mod undo;
pub mod validation;
