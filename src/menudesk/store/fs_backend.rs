use super::backend::StorageBackend;
use super::workbook::Workbook;
use crate::error::{MenuError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Stores the workbook as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(MenuError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn exists(&self) -> Result<bool> {
        Ok(self.path.is_file())
    }

    fn load(&self) -> Result<Workbook> {
        if !self.path.exists() {
            return Err(MenuError::Storage(format!(
                "no store at {} (run `menudesk init`)",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path).map_err(MenuError::Io)?;
        let workbook: Workbook =
            serde_json::from_str(&content).map_err(MenuError::Serialization)?;
        debug!(path = %self.path.display(), sheets = workbook.sheets.len(), "loaded workbook");
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        self.ensure_dir(dir)?;

        let content = serde_json::to_string_pretty(workbook).map_err(MenuError::Serialization)?;

        // Atomic write: temp file in the same directory, then rename over the store
        let tmp_file = dir.join(format!(".menudesk-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content)
            .and_then(|()| fs::rename(&tmp_file, &self.path))
        {
            let _ = fs::remove_file(&tmp_file);
            return Err(MenuError::Io(e));
        }

        debug!(path = %self.path.display(), "saved workbook");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory where the store file should be makes rename fail
        let path = dir.path().join("menudesk.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let backend = FsBackend::new(&path);
        let err = backend.save(&Workbook::with_schema()).unwrap_err();

        assert!(matches!(err, MenuError::Io(_)));
        assert_eq!(entries(dir.path()), vec!["menudesk.json".to_string()]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().join("nested").join("menudesk.json"));
        assert!(!backend.exists().unwrap());

        let workbook = Workbook::with_schema();
        backend.save(&workbook).unwrap();

        assert!(backend.exists().unwrap());
        assert_eq!(backend.load().unwrap(), workbook);
        assert_eq!(entries(&dir.path().join("nested")), vec!["menudesk.json".to_string()]);
    }
}
