use crate::error::Result;
use crate::model::Identity;
use crate::store::{CredentialStore, StorageBackend};

/// Checks a username/password pair. Surrounding whitespace in the username
/// is ignored; the password is used exactly as typed.
pub fn run<B: StorageBackend>(
    credentials: &CredentialStore<B>,
    username: &str,
    password: &str,
) -> Result<Option<Identity>> {
    credentials.verify(username.trim(), password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn admin_can_log_in() {
        let credentials = CredentialStore::new(MemBackend::new());
        credentials.initialize().unwrap();

        let identity = run(&credentials, " admin ", "admin").unwrap().unwrap();
        assert_eq!(identity.role, Role::Admin);
        assert!(run(&credentials, "admin", " admin").unwrap().is_none());
    }
}
