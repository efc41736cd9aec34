//! Save-slot persistence: the save blob, its envelope, and the browser store.

use desktop_app_contract::{ChoiceRecord, StoryProgress, SystemIntegrity};
use leptos::logging;
use platform_host::{write_payload, SaveEnvelope, SaveStore, SAVE_SLOT};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    model::{AppId, GameState, Screen},
    session::generate_password,
    world::{resolve_saved_location, LocationId},
};

/// Payload schema stored in the envelope.
pub const SAVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("save payload is malformed: {0}")]
    Malformed(String),
    #[error("unsupported save schema version {0}")]
    UnsupportedSchema(u32),
    #[error("save store failed: {0}")]
    Store(String),
}

/// Persisted game snapshot. Keys are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    pub screen: Screen,
    pub story: StoryProgress,
    pub health: SystemIntegrity,
    #[serde(default)]
    pub choices: ChoiceRecord,
    pub location_id: String,
    #[serde(default)]
    pub opened_apps: Vec<AppId>,
    #[serde(default)]
    pub disabled_systems: Vec<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl SaveFile {
    pub fn capture(state: &GameState) -> Self {
        Self {
            screen: state.screen,
            story: state.story,
            health: state.integrity,
            choices: state.choices.clone(),
            location_id: state.location_id.id().to_string(),
            opened_apps: state.opened_apps.iter().copied().collect(),
            disabled_systems: state.disabled_systems.clone(),
            password: Some(state.password.clone()),
        }
    }

    /// Applies the save to `state`.
    ///
    /// The retired location id maps to the apartment, as does any unknown id. An ending screen
    /// loads as the main menu and a missing password is regenerated.
    pub fn restore_into(self, state: &mut GameState, rng: &mut dyn RngCore) {
        let location_id = resolve_saved_location(&self.location_id).unwrap_or_else(|| {
            logging::warn!("unknown saved location `{}`; using player_room", self.location_id);
            LocationId::PlayerRoom
        });
        state.screen = match self.screen {
            Screen::GameEnding => Screen::MainMenu,
            screen => screen,
        };
        state.story = self.story;
        state.integrity = self.health;
        state.choices = self.choices;
        state.location_id = location_id;
        state.opened_apps = self.opened_apps.into_iter().collect();
        state.disabled_systems = self.disabled_systems;
        state.password = self
            .password
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| generate_password(rng));
        state.ending = None;
        state.has_save = true;
    }
}

/// Decodes a stored envelope.
///
/// # Errors
///
/// Returns [`SaveError::UnsupportedSchema`] for unknown schema versions and
/// [`SaveError::Malformed`] when the payload does not match [`SaveFile`].
pub fn decode_save(envelope: &SaveEnvelope) -> Result<SaveFile, SaveError> {
    if envelope.schema_version != SAVE_SCHEMA_VERSION {
        return Err(SaveError::UnsupportedSchema(envelope.schema_version));
    }
    envelope.decode_payload().map_err(SaveError::Malformed)
}

/// Loads the save slot. An empty slot is `Ok(None)`.
///
/// # Errors
///
/// Returns [`SaveError`] when the store fails or the stored save cannot be decoded.
pub async fn load_save(store: &dyn SaveStore) -> Result<Option<SaveFile>, SaveError> {
    let envelope = store
        .read_slot(SAVE_SLOT)
        .await
        .map_err(SaveError::Store)?;
    envelope.as_ref().map(decode_save).transpose()
}

/// Loads the save slot for boot. Malformed or unreadable saves count as no save.
pub async fn load_boot_save(store: &dyn SaveStore) -> Option<SaveFile> {
    match load_save(store).await {
        Ok(save) => save,
        Err(err) => {
            logging::warn!("ignoring stored save: {err}");
            None
        }
    }
}

/// Writes `save` to the slot.
///
/// # Errors
///
/// Returns [`SaveError::Store`] when serialization or the write fails.
pub async fn persist_save(store: &dyn SaveStore, save: &SaveFile) -> Result<(), SaveError> {
    write_payload(store, SAVE_SLOT, SAVE_SCHEMA_VERSION, save)
        .await
        .map_err(SaveError::Store)
}

/// Empties the slot.
///
/// # Errors
///
/// Returns [`SaveError::Store`] when the delete fails.
pub async fn delete_save(store: &dyn SaveStore) -> Result<(), SaveError> {
    store
        .clear_slot(SAVE_SLOT)
        .await
        .map_err(SaveError::Store)
}

/// Browser store: one `localStorage` key per slot, holding the envelope as JSON.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSaveStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageSaveStore {
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageSaveStore {
    fn read_slot<'a>(
        &'a self,
        slot: &'a str,
    ) -> platform_host::StoreFuture<'a, Result<Option<SaveEnvelope>, String>> {
        Box::pin(async move {
            let Ok(storage) = Self::storage() else {
                return Ok(None);
            };
            let raw = storage
                .get_item(slot)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))?;
            raw.map(|raw| {
                serde_json::from_str(&raw).map_err(|e| format!("stored envelope is not valid JSON: {e}"))
            })
            .transpose()
        })
    }

    fn write_slot<'a>(
        &'a self,
        envelope: &'a SaveEnvelope,
    ) -> platform_host::StoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let raw = serde_json::to_string(envelope).map_err(|e| e.to_string())?;
            Self::storage()?
                .set_item(&envelope.slot, &raw)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        })
    }

    fn clear_slot<'a>(&'a self, slot: &'a str) -> platform_host::StoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            Self::storage()?
                .remove_item(slot)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        })
    }
}
