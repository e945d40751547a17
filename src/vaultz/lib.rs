//! # Vaultz Architecture
//!
//! Vaultz is a **UI-agnostic vault engine**: a library for indexing,
//! querying, and bulk-editing a directory tree of markdown notes, with a
//! CLI client on top. The filesystem is the only source of truth: there
//! is no manifest, cache, or database; every operation re-walks the tree,
//! so edits made by other tools show up on the next call.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic: search, list, related, selection    │
//! │    planning, bulk mutation, note CRUD                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository Layer (vault.rs + frontmatter.rs)               │
//! │  - Filesystem walks, note load/store, frontmatter codec     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bulk Mutation Protocol
//!
//! Every bulk operation goes through the same two-phase shape: the
//! selection planner resolves a criterion (explicit titles, tags, folder,
//! content query) into a concrete ordered set of `(title, path)` refs,
//! then the bulk mutator either reports that set (dry run, zero I/O by
//! construction) or applies the mutation item by item. One item's failure
//! never aborts the rest; the outcome reports selected vs. applied counts
//! plus itemized failures.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns regular
//! types, never writes to stdout/stderr, and never calls
//! `std::process::exit`. Diagnostics go through `tracing`; installing a
//! subscriber is the binary's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`vault`]: The filesystem-backed note repository
//! - [`frontmatter`]: Metadata block codec
//! - [`model`]: Core data types (`Note`, `Metadata`, result types)
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod vault;
