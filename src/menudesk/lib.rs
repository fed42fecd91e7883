//! # Menudesk Architecture
//!
//! Menudesk manages restaurants and their menus, persisted to a
//! spreadsheet-shaped workbook and gated by a username/password check.
//! The library holds everything but the terminal; the binary is a thin
//! interactive client on top of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Login loop, text menus, prompts, colored output          │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the backend and the session's working set           │
//! │  - Thin dispatch to commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validate, persist, then update the working set           │
//! │  - Return structured CmdResult values                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Repository (restaurants, products) and CredentialStore   │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No Terminal I/O in Core
//!
//! From `api.rs` inward, code takes plain arguments, returns `Result` values,
//! never prints and never exits the process.
//!
//! ## Module Overview
//!
//! - [`api`]: the API facade
//! - [`commands`]: business logic for each operation
//! - [`store`]: workbook format, backends, repository, credentials
//! - [`model`]: `Restaurant`, `Product`, `User` and validation
//! - [`working_set`]: the in-memory restaurants a session works on
//! - [`config`]: configuration file
//! - [`init`]: path resolution and context setup
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod working_set;
