//! Cart persistence backends.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::state::CartState;

/// Errors a storage backend can raise.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] io::Error),
    /// The backing store holds something that is not a cart.
    #[error("cart storage holds invalid data: {0}")]
    InvalidData(#[from] serde_json::Error),
}

/// Where the cart is saved between visits.
///
/// The store saves after every mutation and loads once at open. Backends do
/// no merging and no locking; two carts written to the same backend race
/// and the last write wins.
pub trait CartStorage {
    /// Load the previously saved cart, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is readable but its contents do
    /// not parse, or when the read itself fails for any reason other than
    /// the save simply not existing yet.
    fn load(&self) -> Result<Option<CartState>, StorageError>;

    /// Persist the given cart, replacing any previous save.
    ///
    /// # Errors
    ///
    /// Returns an error when serializing or writing fails.
    fn save(&mut self, state: &CartState) -> Result<(), StorageError>;
}

/// JSON file on disk, the desktop analog of browser local storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<CartState>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&mut self, state: &CartState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    saved: Option<CartState>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-saved cart.
    #[must_use]
    pub const fn with_saved(state: CartState) -> Self {
        Self { saved: Some(state) }
    }

    /// The most recently saved cart, if any.
    #[must_use]
    pub const fn saved(&self) -> Option<&CartState> {
        self.saved.as_ref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<CartState>, StorageError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, state: &CartState) -> Result<(), StorageError> {
        self.saved = Some(state.clone());
        Ok(())
    }
}
