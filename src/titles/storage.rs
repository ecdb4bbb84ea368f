use std::collections::HashMap;
use std::sync::Mutex;

use cfg_if::cfg_if;
use thiserror::Error;

/// Versioned key for the serialized override map, shape `{ thread_id: title }`.
pub const TITLES_STORAGE_KEY: &str = "chatdeck.thread_titles.v1";

#[derive(Debug, Error)]
pub enum TitleStorageError {
    #[error("browser storage unavailable")]
    Unavailable,
    #[error("failed to serialize titles: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage write rejected: {0}")]
    Write(String),
}

/// Durable snapshot of the override map. Writes replace the whole record,
/// last write wins, no cross-device sync.
pub trait TitleStorage: Send + Sync {
    fn load(&self) -> HashMap<String, String>;
    fn save(&self, titles: &HashMap<String, String>) -> Result<(), TitleStorageError>;
}

pub fn encode_titles(titles: &HashMap<String, String>) -> Result<String, serde_json::Error> {
    serde_json::to_string(titles)
}

/// Fail open: absent or corrupt state becomes an empty map. Entries with a
/// blank id or value are dropped so a present key always maps to a non-empty
/// trimmed title.
pub fn decode_titles(raw: &str) -> HashMap<String, String> {
    let parsed: HashMap<String, String> = serde_json::from_str(raw).unwrap_or_default();
    parsed
        .into_iter()
        .filter(|(thread_id, title)| !thread_id.is_empty() && !title.trim().is_empty())
        .map(|(thread_id, title)| (thread_id, title.trim().to_string()))
        .collect()
}

/// Browser `localStorage` backend. On the server build there is no window, so
/// loads are empty and saves report `Unavailable`.
#[derive(Default)]
pub struct LocalStorageTitles;

impl LocalStorageTitles {
    pub fn new() -> Self {
        Self
    }

    fn backing() -> Option<web_sys::Storage> {
        cfg_if! {
            if #[cfg(feature = "ssr")] {
                None
            } else {
                web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            }
        }
    }
}

impl TitleStorage for LocalStorageTitles {
    fn load(&self) -> HashMap<String, String> {
        let Some(storage) = Self::backing() else {
            return HashMap::new();
        };
        match storage.get_item(TITLES_STORAGE_KEY) {
            Ok(Some(raw)) => decode_titles(&raw),
            _ => HashMap::new(),
        }
    }

    fn save(&self, titles: &HashMap<String, String>) -> Result<(), TitleStorageError> {
        let storage = Self::backing().ok_or(TitleStorageError::Unavailable)?;
        let payload = encode_titles(titles)?;
        storage
            .set_item(TITLES_STORAGE_KEY, &payload)
            .map_err(|e| TitleStorageError::Write(format!("{e:?}")))
    }
}

/// In-memory backend holding the same serialized payload a browser would.
/// Used by tests to exercise the codec and rehydration paths.
#[derive(Default)]
pub struct MemoryTitles {
    raw: Mutex<Option<String>>,
}

impl MemoryTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: &str) -> Self {
        MemoryTitles {
            raw: Mutex::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().unwrap().clone()
    }
}

impl TitleStorage for MemoryTitles {
    fn load(&self) -> HashMap<String, String> {
        match self.raw.lock().unwrap().as_deref() {
            Some(raw) => decode_titles(raw),
            None => HashMap::new(),
        }
    }

    fn save(&self, titles: &HashMap<String, String>) -> Result<(), TitleStorageError> {
        let payload = encode_titles(titles)?;
        *self.raw.lock().unwrap() = Some(payload);
        Ok(())
    }
}
