//! Loading and saving session state through a [`KeyValueStore`].

use super::schema::{
    decode_legacy_state, decode_state, migrate, StoredState, LEGACY_STATE_KEY, STATE_KEY,
};
use super::KeyValueStore;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Where a loaded state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrigin {
    /// Read from the current (v2) key
    Current,
    /// Upgraded from the legacy (v1) key and written back as v2
    Migrated,
    /// Nothing usable was stored
    Defaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    pub state: StoredState,
    pub origin: StateOrigin,
}

/// Load session state.
///
/// A readable v2 record wins. Otherwise a readable v1 record is migrated and
/// the result saved under the v2 key right away; the v1 record is left in
/// place. A value that is not valid JSON counts as absent.
pub fn load_state(store: &dyn KeyValueStore, fallback: &StoredState) -> LoadedState {
    if let Some(raw) = read_json(store, STATE_KEY) {
        debug!(key = STATE_KEY, "Loaded stored state");
        return LoadedState {
            state: decode_state(&raw, fallback),
            origin: StateOrigin::Current,
        };
    }

    if let Some(raw) = read_json(store, LEGACY_STATE_KEY) {
        let state = migrate(&decode_legacy_state(&raw, fallback));
        info!(from = LEGACY_STATE_KEY, to = STATE_KEY, "Migrated legacy state");
        save_state(store, &state);
        return LoadedState {
            state,
            origin: StateOrigin::Migrated,
        };
    }

    LoadedState {
        state: fallback.clone(),
        origin: StateOrigin::Defaults,
    }
}

/// Best-effort save under the v2 key. Failures are logged, never raised.
pub fn save_state(store: &dyn KeyValueStore, state: &StoredState) -> bool {
    let json = match state.to_json() {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize state");
            return false;
        }
    };
    match store.set(STATE_KEY, &json) {
        Ok(()) => true,
        Err(e) => {
            warn!(key = STATE_KEY, error = %e, "Failed to save state");
            false
        }
    }
}

fn read_json(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    let text = store.get(key)?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable stored state");
            None
        }
    }
}
