//! # Storage Layer
//!
//! Everything menudesk persists lives in one workbook: three named tables,
//! each with a header row followed by data rows.
//!
//! ```text
//! Users        ID | Username | PasswordHash | Role
//! Restaurants  ID | Name | Phone | Address
//! Menu         ID | RestaurantID | Name | Price | Status
//! ```
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw load/save of the whole workbook.
//!   - [`fs_backend::FsBackend`]: a JSON file, replaced atomically on save
//!   - [`mem_backend::MemBackend`]: in-memory, for tests
//! - [`repository::Repository`]: restaurant and product rows, ID allocation,
//!   cascade delete.
//! - [`credentials::CredentialStore`]: store initialization and password checks.
//!
//! Both `Repository` and `CredentialStore` are generic over the backend and
//! also accept `&B`, so one backend can serve both.
//!
//! ## On-disk format
//!
//! ```text
//! {
//!   "sheets": {
//!     "Menu": [["ID", "RestaurantID", "Name", "Price", "Status"], [1, 1, "Pizza", 450.0, true]],
//!     ...
//!   },
//!   "counters": { "Menu": 1 }
//! }
//! ```
//!
//! `counters` records the highest ID handed out per table so IDs are never
//! reused after deletes.

pub mod backend;
pub mod credentials;
pub mod fs_backend;
pub mod mem_backend;
pub mod repository;
pub mod workbook;

pub use backend::StorageBackend;
pub use credentials::{hash_password, CredentialStore};
pub use repository::Repository;
