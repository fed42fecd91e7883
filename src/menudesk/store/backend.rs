use super::workbook::Workbook;
use crate::error::Result;

/// Abstract interface for raw workbook I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `Repository` and `CredentialStore` handle the "what" (rows, IDs, hashes).
///
/// Every operation works on the whole workbook: callers load, mutate in
/// memory and save it back. There is no partial write and no locking.
pub trait StorageBackend {
    /// Whether a workbook has been created yet.
    fn exists(&self) -> Result<bool>;

    /// Load the whole workbook. Fails if it does not exist or cannot be parsed.
    fn load(&self) -> Result<Workbook>;

    /// Replace the stored workbook.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, workbook: &Workbook) -> Result<()>;

    /// Human readable location, for messages.
    fn location(&self) -> String;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn exists(&self) -> Result<bool> {
        (**self).exists()
    }

    fn load(&self) -> Result<Workbook> {
        (**self).load()
    }

    fn save(&self, workbook: &Workbook) -> Result<()> {
        (**self).save(workbook)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
