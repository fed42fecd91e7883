use crate::api::MenuApi;
use crate::commands::{self, CmdResult};
use crate::config::MenudeskConfig;
use crate::error::{MenuError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::{CredentialStore, StorageBackend};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where menudesk keeps its files for this invocation.
#[derive(Debug, Clone)]
pub struct MenudeskPaths {
    /// Data directory holding `config.json` and, by default, the store
    pub home: PathBuf,
    /// The workbook file
    pub store: PathBuf,
}

pub struct MenudeskContext {
    pub paths: MenudeskPaths,
    pub config: MenudeskConfig,
}

/// The per-user data directory, e.g. `~/.local/share/menudesk`.
pub fn default_home() -> Result<PathBuf> {
    ProjectDirs::from("com", "menudesk", "menudesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| MenuError::Storage("could not determine a data directory".to_string()))
}

/// The store path: an explicit override wins, otherwise the configured file
/// name inside `home`. Relative overrides are taken as given (relative to cwd).
pub fn store_path(home: &Path, config: &MenudeskConfig, store_override: Option<&Path>) -> PathBuf {
    match store_override {
        Some(path) => path.to_path_buf(),
        None => home.join(&config.store_file),
    }
}

/// Resolves paths and loads configuration. Does not touch the store.
pub fn initialize(
    home_override: Option<PathBuf>,
    store_override: Option<PathBuf>,
) -> Result<MenudeskContext> {
    let home = match home_override {
        Some(home) => home,
        None => default_home()?,
    };
    let config = MenudeskConfig::load(&home)?;
    let store = store_path(&home, &config, store_override.as_deref());
    debug!(home = %home.display(), store = %store.display(), "resolved paths");

    Ok(MenudeskContext {
        paths: MenudeskPaths { home, store },
        config,
    })
}

impl MenudeskContext {
    /// Opens (creating if needed) the store and loads the working set.
    pub fn open_api(&self) -> Result<MenuApi<FsBackend>> {
        MenuApi::open(FsBackend::new(&self.paths.store))
    }

    /// Creates the store with its seed admin user, reporting whether it
    /// already existed.
    pub fn init_store(&self) -> Result<CmdResult> {
        let backend = FsBackend::new(&self.paths.store);
        commands::init::run(&CredentialStore::new(&backend), &backend.location())
    }
}
