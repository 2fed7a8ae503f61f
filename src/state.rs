use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::calendar::CalendarEvent;

const EVENTS_FILE: &str = "events.json";
// Maximum allowed size for the events file (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ITEMS: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Events file {} exceeds the {max} byte limit", .0.display(), max = MAX_FILE_SIZE)]
    TooLarge(PathBuf),
    #[error("Too many events in {} ({count}, maximum {max})", .path.display(), max = MAX_ITEMS)]
    TooManyItems { path: PathBuf, count: usize },
    #[error("Failed to parse events file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read/write access to the stored event collection. Implementations hand
/// out owned copies; nothing is shared between callers.
pub trait EventStore {
    fn load(&self) -> Result<Vec<CalendarEvent>>;
    fn save(&self, events: &[CalendarEvent]) -> Result<()>;
}

/// Append new events to the store.
pub fn append(store: &dyn EventStore, events: &[CalendarEvent]) -> Result<usize> {
    let mut stored = store.load()?;
    stored.extend_from_slice(events);
    store.save(&stored)?;
    Ok(events.len())
}

/// Replace the stored event with the same id. Returns false when there was none.
pub fn replace(store: &dyn EventStore, event: CalendarEvent) -> Result<bool> {
    let mut stored = store.load()?;
    match stored.iter_mut().find(|e| e.id == event.id) {
        Some(slot) => {
            *slot = event;
            store.save(&stored)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Events kept as a JSON array in a single file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the per-user data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_events_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Result<Vec<CalendarEvent>> {
        if !self.path.exists() {
            debug!("No events file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let metadata = fs::metadata(&self.path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(anyhow!(StoreError::TooLarge(self.path.clone())));
        }

        let file = File::open(&self.path).with_context(|| format!("Failed to open {}", self.path.display()))?;
        let json_value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;

        if let Some(array) = json_value.as_array() {
            if array.len() > MAX_ITEMS {
                return Err(anyhow!(StoreError::TooManyItems { path: self.path.clone(), count: array.len() }));
            }
        }

        let events: Vec<CalendarEvent> = serde_json::from_value(json_value)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        debug!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    fn save(&self, events: &[CalendarEvent]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        serde_json::to_writer_pretty(BufWriter::new(file), events)?;
        info!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }
}

/// Events held in memory, for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<Vec<CalendarEvent>>,
}

impl MemoryStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events: Mutex::new(events) }
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> Result<Vec<CalendarEvent>> {
        let events = self.events.lock().map_err(|_| anyhow!("Event store lock poisoned"))?;
        Ok(events.clone())
    }

    fn save(&self, events: &[CalendarEvent]) -> Result<()> {
        let mut stored = self.events.lock().map_err(|_| anyhow!("Event store lock poisoned"))?;
        *stored = events.to_vec();
        Ok(())
    }
}

fn default_events_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "campaign-toolkit", "campaign-toolkit")
        .context("Failed to determine data directory")?;
    Ok(proj_dirs.data_dir().join(EVENTS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CanonicalCategory;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample(id: &str) -> CalendarEvent {
        CalendarEvent::new(id, format!("Event {}", id), "2026-05-01", "2026-05-31", CanonicalCategory::Campaigns)
    }

    #[test]
    fn test_missing_file_loads_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("events.json"));
        assert!(store.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("nested").join("events.json"));
        let events = vec![sample("a"), sample("b").with_status("Live")];
        store.save(&events)?;
        assert_eq!(store.load()?, events);
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("events.json");
        fs::write(&path, "{not json")?;
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_too_many_items_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("events.json");
        let items = vec![serde_json::json!({}); MAX_ITEMS + 1];
        fs::write(&path, serde_json::to_string(&items)?)?;
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::TooManyItems { .. })));
        Ok(())
    }

    #[test]
    fn test_append_and_replace() -> Result<()> {
        let store = MemoryStore::new(vec![sample("a")]);
        assert_eq!(append(&store, &[sample("b")])?, 1);

        let renamed = CalendarEvent { title: "Renamed".to_string(), ..sample("b") };
        assert!(replace(&store, renamed)?);
        assert!(!replace(&store, sample("zzz"))?);

        let stored = store.load()?;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].title, "Renamed");
        Ok(())
    }
}
