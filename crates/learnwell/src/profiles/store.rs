use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{UserId, UserProfile};
use super::repository::{ProfileRepository, RepositoryError, SetInsertion, WriteMode};
use super::update::{ProfileUpdate, SetField};
use crate::config::StoreConfig;

/// Process-wide document store. Mutations are serialized through one lock, so each
/// `ProfileUpdate` is observed either fully applied or not at all.
#[derive(Debug)]
pub struct MemoryProfileStore {
    state: Mutex<StoreState>,
    snapshot_path: Option<PathBuf>,
}

#[derive(Debug)]
struct StoreState {
    connected: bool,
    profiles: HashMap<UserId, UserProfile>,
}

/// Failure while loading or writing the snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access profile snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("profile snapshot {path} is not valid JSON: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl MemoryProfileStore {
    /// A connected store with no snapshot file.
    pub fn in_memory() -> Self {
        Self::with_profiles(HashMap::new(), None)
    }

    /// Opens the store, loading the snapshot when one is configured and present.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let profiles = match &config.snapshot_path {
            Some(path) if path.exists() => read_snapshot(path)?,
            _ => HashMap::new(),
        };

        info!(
            profiles = profiles.len(),
            snapshot = ?config.snapshot_path,
            "profile store connected"
        );
        Ok(Self::with_profiles(profiles, config.snapshot_path.clone()))
    }

    fn with_profiles(profiles: HashMap<UserId, UserProfile>, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                connected: true,
                profiles,
            }),
            snapshot_path,
        }
    }

    /// Writes the snapshot (when configured) and refuses further calls.
    pub fn disconnect(&self) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        if !state.connected {
            return Ok(());
        }

        if let Some(path) = &self.snapshot_path {
            write_snapshot(path, &state.profiles)?;
        }
        state.connected = false;

        info!(profiles = state.profiles.len(), "profile store disconnected");
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.lock_state()
            .map(|state| state.connected)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.lock_state()
            .map(|state| state.profiles.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state.lock().map_err(|_| {
            warn!("profile store lock poisoned");
            RepositoryError::Unavailable("profile store lock poisoned".to_string())
        })
    }

    fn connected_state(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        let state = self.lock_state()?;
        if state.connected {
            Ok(state)
        } else {
            Err(RepositoryError::Unavailable(
                "profile store disconnected".to_string(),
            ))
        }
    }
}

impl ProfileRepository for MemoryProfileStore {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let state = self.connected_state()?;
        Ok(state.profiles.get(user_id).cloned())
    }

    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut state = self.connected_state()?;
        if state.profiles.contains_key(&profile.user_id) {
            return Err(RepositoryError::Conflict);
        }
        state
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    fn update(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
        mode: WriteMode,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let mut state = self.connected_state()?;
        let now = Utc::now();

        if !state.profiles.contains_key(user_id) {
            if mode == WriteMode::ExistingOnly {
                return Ok(None);
            }
            state.profiles.insert(
                user_id.clone(),
                UserProfile::with_defaults(user_id.clone(), now),
            );
        }
        let Some(profile) = state.profiles.get_mut(user_id) else {
            return Ok(None);
        };

        update.apply(&mut profile.document);
        profile.updated_at = now;
        Ok(Some(profile.clone()))
    }

    fn insert_into_set(
        &self,
        user_id: &UserId,
        field: SetField,
        value: &str,
    ) -> Result<SetInsertion, RepositoryError> {
        let mut state = self.connected_state()?;
        let Some(profile) = state.profiles.get_mut(user_id) else {
            return Ok(SetInsertion::Missing);
        };

        if field
            .values(&profile.document)
            .iter()
            .any(|existing| existing == value)
        {
            return Ok(SetInsertion::AlreadyPresent);
        }

        field
            .values_mut(&mut profile.document)
            .push(value.to_string());
        profile.updated_at = Utc::now();
        Ok(SetInsertion::Inserted(profile.clone()))
    }

    fn delete(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        let mut state = self.connected_state()?;
        Ok(state.profiles.remove(user_id).is_some())
    }
}

fn read_snapshot(path: &Path) -> Result<HashMap<UserId, UserProfile>, StoreError> {
    let raw = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let profiles: Vec<UserProfile> =
        serde_json::from_slice(&raw).map_err(|source| StoreError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(profiles
        .into_iter()
        .map(|profile| (profile.user_id.clone(), profile))
        .collect())
}

fn write_snapshot(path: &Path, profiles: &HashMap<UserId, UserProfile>) -> Result<(), StoreError> {
    let mut ordered: Vec<&UserProfile> = profiles.values().collect();
    ordered.sort_by(|a, b| a.user_id.cmp(&b.user_id));

    let payload = serde_json::to_vec_pretty(&ordered).map_err(|source| StoreError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;

    let staging = path.with_extension("tmp");
    fs::write(&staging, payload)
        .and_then(|_| fs::rename(&staging, path))
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}
