use super::backend::StorageBackend;
use super::workbook::{Cell, RowRef, Workbook, USERS};
use crate::error::Result;
use crate::model::{Identity, Role, User};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Lowercase hex SHA-256 digest of the UTF-8 password bytes.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Username/password checks against the `Users` table.
pub struct CredentialStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> CredentialStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Creates the workbook with all tables and the seed admin user if it
    /// does not exist yet. Returns `true` when the store was created.
    pub fn initialize(&self) -> Result<bool> {
        if self.backend.exists()? {
            return Ok(false);
        }

        let mut workbook = Workbook::with_schema();
        workbook.sheet_mut(&USERS)?.append(vec![
            Cell::from(1u32),
            Cell::from(DEFAULT_ADMIN_USERNAME),
            Cell::text(hash_password(DEFAULT_ADMIN_PASSWORD)),
            Cell::from(Role::Admin.as_str()),
        ]);
        workbook.set_counter(&USERS, 1);
        self.backend.save(&workbook)?;

        info!(location = %self.backend.location(), "created store with default admin user");
        Ok(true)
    }

    pub fn users(&self) -> Result<Vec<User>> {
        let workbook = self.backend.load()?;
        let sheet = workbook.sheet(&USERS)?;

        let mut users = Vec::new();
        for (pos, cells) in sheet.data_rows() {
            let row = RowRef::new(&USERS, pos, cells);
            let Some(id) = row.opt_u32("ID")? else {
                continue;
            };
            users.push(User {
                id,
                username: row.text("Username"),
                password_hash: row.text("PasswordHash"),
                role: Role::from(row.text("Role").as_str()),
            });
        }
        Ok(users)
    }

    /// Returns the identity whose username and password hash both match.
    pub fn verify(&self, username: &str, password: &str) -> Result<Option<Identity>> {
        let digest = hash_password(password);
        let identity = self
            .users()?
            .into_iter()
            .find(|user| {
                user.username == username && user.password_hash == digest
            })
            .map(|user| Identity {
                id: user.id,
                role: user.role,
            });

        if identity.is_none() {
            warn!(username, "failed login attempt");
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;
    use crate::store::mem_backend::MemBackend;
    use crate::store::workbook::{MENU, RESTAURANTS};

    #[test]
    fn hashes_are_sha256_hex() {
        assert_eq!(
            hash_password("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
        assert_eq!(hash_password("admin").len(), 64);
    }

    #[test]
    fn initialize_seeds_one_admin() {
        let backend = MemBackend::new();
        let store = CredentialStore::new(&backend);

        assert!(store.initialize().unwrap());

        let users = store.users().unwrap();
        assert_eq!(
            users,
            vec![User {
                id: 1,
                username: "admin".into(),
                password_hash: hash_password("admin"),
                role: Role::Admin,
            }]
        );
        let workbook = backend.snapshot().unwrap();
        assert_eq!(workbook.sheet(&RESTAURANTS).unwrap().data_len(), 0);
        assert_eq!(workbook.sheet(&MENU).unwrap().data_len(), 0);
    }

    #[test]
    fn initialize_is_idempotent() {
        let backend = MemBackend::new();
        let store = CredentialStore::new(&backend);

        assert!(store.initialize().unwrap());
        assert!(!store.initialize().unwrap());

        assert_eq!(store.users().unwrap().len(), 1);
        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn verify_admin_after_initialize() {
        let store = CredentialStore::new(MemBackend::new());
        store.initialize().unwrap();

        assert_eq!(
            store.verify("admin", "admin").unwrap(),
            Some(Identity {
                id: 1,
                role: Role::Admin
            })
        );
        assert_eq!(store.verify("admin", "wrong").unwrap(), None);
        assert_eq!(store.verify("nouser", "admin").unwrap(), None);
        assert_eq!(store.verify("Admin", "admin").unwrap(), None);
    }

    #[test]
    fn verify_compares_hashes_exactly() {
        let mut workbook = Workbook::with_schema();
        workbook.sheet_mut(&USERS).unwrap().append(vec![
            Cell::from(1u32),
            Cell::from("admin"),
            Cell::text(hash_password("admin").to_uppercase()),
            Cell::from("admin"),
        ]);
        let store = CredentialStore::new(MemBackend::with_workbook(workbook));

        assert_eq!(store.verify("admin", "admin").unwrap(), None);
    }

    #[test]
    fn verify_on_missing_store_fails() {
        let store = CredentialStore::new(MemBackend::new());
        assert!(matches!(
            store.verify("admin", "admin"),
            Err(MenuError::Storage(_))
        ));
    }

    #[test]
    fn verify_reports_corrupt_user_ids() {
        let mut workbook = Workbook::with_schema();
        workbook.sheet_mut(&USERS).unwrap().append(vec![
            Cell::text("one"),
            Cell::from("admin"),
            Cell::text(hash_password("admin")),
            Cell::from("admin"),
        ]);
        let store = CredentialStore::new(MemBackend::with_workbook(workbook));

        assert!(matches!(
            store.verify("admin", "admin"),
            Err(MenuError::DataCorruption { .. })
        ));
    }
}
