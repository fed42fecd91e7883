use super::backend::StorageBackend;
use super::workbook::Workbook;
use crate::error::{MenuError, Result};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since menudesk is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    workbook: RefCell<Option<Workbook>>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `workbook`, e.g. a hand-built corrupt one.
    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            workbook: RefCell::new(Some(workbook)),
            ..Default::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// A copy of the stored workbook, if any.
    pub fn snapshot(&self) -> Option<Workbook> {
        self.workbook.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn exists(&self) -> Result<bool> {
        Ok(self.workbook.borrow().is_some())
    }

    fn load(&self) -> Result<Workbook> {
        self.workbook
            .borrow()
            .clone()
            .ok_or_else(|| MenuError::Storage("no store in memory".to_string()))
    }

    fn save(&self, workbook: &Workbook) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(MenuError::Io(std::io::Error::other("simulated write error")));
        }
        *self.workbook.borrow_mut() = Some(workbook.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
