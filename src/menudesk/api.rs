//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every menudesk operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the storage backend and the session's [`WorkingSet`]
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr or prompts
//!
//! ## Generic Over StorageBackend
//!
//! `MenuApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `MenuApi<FsBackend>`
//! - Testing: `MenuApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::{Identity, RestaurantUpdate};
use crate::store::{CredentialStore, Repository, StorageBackend};
use crate::working_set::WorkingSet;
use tracing::info;

/// The main API facade for menudesk operations.
pub struct MenuApi<B: StorageBackend> {
    backend: B,
    working_set: WorkingSet,
}

impl<B: StorageBackend> MenuApi<B> {
    /// Initializes the store if needed and loads the working set from it.
    pub fn open(backend: B) -> Result<Self> {
        CredentialStore::new(&backend).initialize()?;
        let restaurants = Repository::new(&backend).load_working_set()?;
        info!(
            location = %backend.location(),
            restaurants = restaurants.len(),
            "opened store"
        );
        Ok(Self {
            backend,
            working_set: WorkingSet::new(restaurants),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Option<Identity>> {
        commands::login::run(&CredentialStore::new(&self.backend), username, password)
    }

    pub fn add_restaurant(
        &mut self,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::create::run(&mut self.working_set, &mut repo, name, phone, address)
    }

    pub fn update_restaurant(
        &mut self,
        index: usize,
        update: &RestaurantUpdate,
    ) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::update::run(&mut self.working_set, &mut repo, index, update)
    }

    pub fn delete_restaurant(&mut self, index: usize) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::delete::run(&mut self.working_set, &mut repo, index)
    }

    pub fn list_restaurants(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.working_set)
    }

    pub fn view_restaurant(&self, index: usize) -> Result<commands::CmdResult> {
        commands::view::run(&self.working_set, index)
    }

    pub fn search_restaurants(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.working_set, term)
    }

    pub fn add_product(
        &mut self,
        index: usize,
        name: &str,
        price: &str,
    ) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::menu::add_product(&mut self.working_set, &mut repo, index, name, price)
    }

    pub fn update_product(
        &mut self,
        index: usize,
        dish: usize,
        update: &commands::ProductUpdate,
    ) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::menu::update_product(&mut self.working_set, &mut repo, index, dish, update)
    }

    pub fn delete_product(&mut self, index: usize, dish: usize) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::menu::delete_product(&mut self.working_set, &mut repo, index, dish)
    }

    pub fn toggle_product(&mut self, index: usize, dish: usize) -> Result<commands::CmdResult> {
        let mut repo = Repository::new(&self.backend);
        commands::menu::toggle_status(&mut self.working_set, &mut repo, index, dish)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, ProductUpdate};
