use std::future::Future;
use std::path::PathBuf;

use tokio::fs;
use tracing::warn;

use crate::error::StorageError;
use crate::model::FavoritesMap;

/// Slot names double as file names under the backend directory.
pub const FAVORITES_SLOT: &str = "favorites-v1";
pub const THEME_SLOT: &str = "theme-dark";

const THEME_DARK_TOKEN: &str = "1";
const THEME_LIGHT_TOKEN: &str = "0";

/// Opaque string key-value storage for preference slots.
pub trait SettingsBackend: Send + Sync + 'static {
    /// Raw value of a slot; `None` when never written.
    fn get(&self, slot: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set(&self, slot: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Backend storing each slot as a UTF-8 file under one directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }
}

impl SettingsBackend for FileBackend {
    async fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, slot: &str, value: String) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.slot_path(slot), value).await?;
        Ok(())
    }
}

/// Typed view over the two preference slots.
///
/// Loads soft-fail: a missing or unreadable slot yields the default (empty
/// favorites, dark theme) and is indistinguishable from a first run. Saves
/// surface a `StorageError` for the caller to report; the in-memory state
/// that triggered the save is never rolled back.
#[derive(Debug, Clone)]
pub struct PreferenceStore<B> {
    backend: B,
}

impl<B: SettingsBackend> PreferenceStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn load_favorites(&self) -> FavoritesMap {
        let raw = match self.backend.get(FAVORITES_SLOT).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoritesMap::new(),
            Err(err) => {
                warn!(slot = FAVORITES_SLOT, error = %err, "preference read failed; starting empty");
                return FavoritesMap::new();
            }
        };
        let mut map = match serde_json::from_str::<FavoritesMap>(&raw) {
            Ok(map) => map,
            Err(err) => {
                warn!(slot = FAVORITES_SLOT, error = %err, "stored favorites unparseable; starting empty");
                return FavoritesMap::new();
            }
        };
        // A key must equal the id of its record.
        let before = map.len();
        map.retain(|id, photo| *id == photo.id);
        if map.len() != before {
            warn!(
                dropped = before - map.len(),
                "favorites entries with mismatched ids dropped"
            );
        }
        map
    }

    pub async fn save_favorites(&self, favorites: &FavoritesMap) -> Result<(), StorageError> {
        let raw = serde_json::to_string(favorites).map_err(|source| StorageError::Encode {
            slot: FAVORITES_SLOT,
            source,
        })?;
        self.backend.set(FAVORITES_SLOT, raw).await
    }

    pub async fn load_theme(&self) -> bool {
        match self.backend.get(THEME_SLOT).await {
            Ok(Some(raw)) => match raw.as_str() {
                THEME_DARK_TOKEN => true,
                THEME_LIGHT_TOKEN => false,
                other => {
                    warn!(slot = THEME_SLOT, value = other, "unrecognized theme token; defaulting to dark");
                    true
                }
            },
            Ok(None) => true,
            Err(err) => {
                warn!(slot = THEME_SLOT, error = %err, "preference read failed; defaulting to dark");
                true
            }
        }
    }

    pub async fn save_theme(&self, dark: bool) -> Result<(), StorageError> {
        let token = if dark { THEME_DARK_TOKEN } else { THEME_LIGHT_TOKEN };
        self.backend.set(THEME_SLOT, token.to_owned()).await
    }
}
