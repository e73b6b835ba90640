//! File system repository

use crate::domain::Journal;
use crate::error::{JournoError, Result};
use crate::infrastructure::config::{Config, JOURNO_DIR};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const STORE_FILE: &str = "store.json";
const LOCK_FILE: &str = "store.lock";

/// Abstract repository for journal operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .journo/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .journo/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Load every record from .journo/store.json
    fn load_journal(&self) -> Result<Journal>;

    /// Replace .journo/store.json with the given records
    fn save_journal(&self, journal: &Journal) -> Result<()>;

    /// Check if .journo directory exists
    fn is_initialized(&self) -> bool;

    /// Create .journo directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Find the journal root: JOURNO_ROOT if set, otherwise walk up from the
    /// current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("JOURNO_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_journo_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(JournoError::Config(format!(
                "JOURNO_ROOT is set to '{}' but no .journo directory found. \
                Run 'journo init' in that directory or unset JOURNO_ROOT.",
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory containing .journo is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_journo_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| JournoError::NotJournoDirectory(start.to_path_buf()))
    }

    fn has_journo_dir(path: &Path) -> bool {
        path.join(JOURNO_DIR).is_dir()
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(JOURNO_DIR).join(STORE_FILE)
    }

    /// Run one unit of work: load the store, apply `work`, and save only if
    /// it succeeded. Other processes are held off for the whole cycle.
    pub fn update<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Journal) -> Result<T>,
    {
        let _lock = self.lock_store()?;
        let mut journal = self.load_journal()?;
        let value = work(&mut journal)?;
        self.save_journal(&journal)?;
        Ok(value)
    }

    /// Exclusive advisory lock on the store, released when the file drops
    fn lock_store(&self) -> Result<File> {
        if !self.is_initialized() {
            return Err(JournoError::NotJournoDirectory(self.root.clone()));
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(JOURNO_DIR).join(LOCK_FILE))?;
        file.lock_exclusive()?;
        tracing::trace!(root = %self.root.display(), "Locked journal store");
        Ok(file)
    }

    /// Replace `path` with `content` through a temp file in the same directory
    fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| JournoError::Config(format!("No parent directory: {}", path.display())))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| JournoError::Io(e.error))?;
        Ok(())
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn load_journal(&self) -> Result<Journal> {
        if !self.is_initialized() {
            return Err(JournoError::NotJournoDirectory(self.root.clone()));
        }

        let path = self.store_path();
        if !path.exists() {
            return Ok(Journal::default());
        }

        let contents = fs::read_to_string(&path)?;
        let journal = serde_json::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded journal store");
        Ok(journal)
    }

    fn save_journal(&self, journal: &Journal) -> Result<()> {
        let contents = serde_json::to_vec_pretty(journal)?;
        Self::write_atomic(&self.store_path(), &contents)?;
        tracing::debug!(path = %self.store_path().display(), "Saved journal store");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        Self::has_journo_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let journo_dir = self.root.join(JOURNO_DIR);

        if journo_dir.exists() {
            return Err(JournoError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&journo_dir)?;
        self.save_journal(&Journal::default())
    }
}
