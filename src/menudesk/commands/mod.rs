//! # Command Layer
//!
//! This module contains the **core business logic** of menudesk. Each command
//! lives in its own submodule and implements plain Rust functions over the
//! [`WorkingSet`](crate::working_set::WorkingSet) and a
//! [`Repository`](crate::store::Repository).
//!
//! ## Role and Responsibilities
//!
//! - Validate input through the domain types (`Restaurant`, `Product`)
//! - Persist first, then apply the change to the working set, so a failed
//!   write never leaves the working set ahead of the store
//! - Return structured [`CmdResult`] values with listed entities and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr, prompts or colors
//! - **Reprompting**: validation errors are returned; the UI decides to ask again
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! Command tests use `MemBackend` and check both the returned `CmdResult` and
//! what ended up in the store.
//!
//! ## Command Modules
//!
//! - [`init`]: create the store and seed the admin user
//! - [`login`]: credential check
//! - [`create`]: add a restaurant
//! - [`update`]: edit restaurant fields
//! - [`delete`]: remove a restaurant and its menu
//! - [`list`]: list restaurants
//! - [`view`]: one restaurant with its menu
//! - [`search`]: substring search on name and address
//! - [`menu`]: add, edit, delete and toggle dishes
//! - [`helpers`]: shared lookups

use crate::working_set::{ListedProduct, ListedRestaurant};
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod list;
pub mod login;
pub mod menu;
pub mod search;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_restaurants: Vec<ListedRestaurant>,
    pub listed_products: Vec<ListedProduct>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_restaurants(mut self, restaurants: Vec<ListedRestaurant>) -> Self {
        self.listed_restaurants = restaurants;
        self
    }

    pub fn with_listed_products(mut self, products: Vec<ListedProduct>) -> Self {
        self.listed_products = products;
        self
    }
}

/// Changes to a dish. Empty or absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<String>,
}

impl ProductUpdate {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
        }
    }
}
