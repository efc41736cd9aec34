//! Versioned save envelopes and the stores that hold them.
//!
//! A slot holds at most one [`SaveEnvelope`]. The envelope carries its own schema version so the
//! game can reject payloads written by a newer build before touching their contents.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::time::next_monotonic_timestamp_ms;

const ENVELOPE_VERSION: u32 = 1;

/// Slot used by the single game save.
pub const SAVE_SLOT: &str = "shadowfall.savegame";

/// Versioned wrapper around a persisted JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    /// Layout version of the envelope itself.
    pub envelope_version: u32,
    /// Slot the envelope belongs to.
    pub slot: String,
    /// Payload schema version chosen by the game.
    pub schema_version: u32,
    /// Write time in unix milliseconds, strictly increasing per process.
    pub saved_at_unix_ms: u64,
    /// Serialized payload.
    pub payload: Value,
}

impl SaveEnvelope {
    /// Serializes `payload` into a freshly stamped envelope for `slot`.
    ///
    /// # Errors
    ///
    /// Returns the serializer message when `payload` cannot become JSON.
    pub fn wrap<T: Serialize>(slot: &str, schema_version: u32, payload: &T) -> Result<Self, String> {
        let payload = serde_json::to_value(payload).map_err(|e| e.to_string())?;
        Ok(Self {
            envelope_version: ENVELOPE_VERSION,
            slot: slot.to_string(),
            schema_version,
            saved_at_unix_ms: next_monotonic_timestamp_ms(),
            payload,
        })
    }

    /// Deserializes the payload.
    ///
    /// # Errors
    ///
    /// Returns the deserializer message when the payload does not match `T`.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, String> {
        T::deserialize(&self.payload).map_err(|e| e.to_string())
    }
}

/// Boxed future returned by [`SaveStore`] methods, keeping the trait object-safe.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Keeps save envelopes by slot name.
pub trait SaveStore {
    /// Reads the envelope in `slot`, if any.
    fn read_slot<'a>(&'a self, slot: &'a str) -> StoreFuture<'a, Result<Option<SaveEnvelope>, String>>;

    /// Replaces whatever the envelope's slot held.
    fn write_slot<'a>(&'a self, envelope: &'a SaveEnvelope) -> StoreFuture<'a, Result<(), String>>;

    /// Empties `slot`.
    fn clear_slot<'a>(&'a self, slot: &'a str) -> StoreFuture<'a, Result<(), String>>;
}

/// Writes `payload` into `slot` through `store`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn write_payload<S: SaveStore + ?Sized, T: Serialize>(
    store: &S,
    slot: &str,
    schema_version: u32,
    payload: &T,
) -> Result<(), String> {
    let envelope = SaveEnvelope::wrap(slot, schema_version, payload)?;
    store.write_slot(&envelope).await
}

/// Store that never holds anything. Used where no persistent storage exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSaveStore;

impl SaveStore for NoopSaveStore {
    fn read_slot<'a>(&'a self, _slot: &'a str) -> StoreFuture<'a, Result<Option<SaveEnvelope>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn write_slot<'a>(&'a self, _envelope: &'a SaveEnvelope) -> StoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn clear_slot<'a>(&'a self, _slot: &'a str) -> StoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

/// In-memory slots. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slots: Rc<RefCell<HashMap<String, SaveEnvelope>>>,
}

impl MemorySaveStore {
    /// Puts `envelope` into its slot without going through a future.
    pub fn insert(&self, envelope: SaveEnvelope) {
        self.slots.borrow_mut().insert(envelope.slot.clone(), envelope);
    }
}

impl SaveStore for MemorySaveStore {
    fn read_slot<'a>(&'a self, slot: &'a str) -> StoreFuture<'a, Result<Option<SaveEnvelope>, String>> {
        Box::pin(async move { Ok(self.slots.borrow().get(slot).cloned()) })
    }

    fn write_slot<'a>(&'a self, envelope: &'a SaveEnvelope) -> StoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.insert(envelope.clone());
            Ok(())
        })
    }

    fn clear_slot<'a>(&'a self, slot: &'a str) -> StoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.slots.borrow_mut().remove(slot);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Checkpoint {
        story: f64,
        room: String,
    }

    #[test]
    fn envelope_keys_are_snake_case() {
        let envelope = SaveEnvelope::wrap(SAVE_SLOT, 3, &json!({"story": 1.1})).expect("wrap");
        let value = serde_json::to_value(&envelope).expect("ser");
        assert_eq!(value["envelope_version"], json!(1));
        assert_eq!(value["slot"], json!("shadowfall.savegame"));
        assert_eq!(value["schema_version"], json!(3));
        assert!(value.get("saved_at_unix_ms").is_some_and(Value::is_u64));
    }

    #[test]
    fn later_envelopes_carry_later_stamps() {
        let first = SaveEnvelope::wrap(SAVE_SLOT, 1, &1).expect("wrap");
        let second = SaveEnvelope::wrap(SAVE_SLOT, 1, &2).expect("wrap");
        assert!(second.saved_at_unix_ms > first.saved_at_unix_ms);
    }

    #[test]
    fn payload_type_mismatch_is_an_error() {
        let envelope = SaveEnvelope::wrap(SAVE_SLOT, 1, &json!({"story": "far", "room": 7})).expect("wrap");
        assert!(envelope.decode_payload::<Checkpoint>().is_err());
    }

    #[test]
    fn memory_slots_overwrite_and_clear() {
        let store = MemorySaveStore::default();
        let office = Checkpoint {
            story: 1.0,
            room: "office".to_string(),
        };
        let cafe = Checkpoint {
            story: 2.2,
            room: "cafe".to_string(),
        };
        block_on(write_payload(&store, SAVE_SLOT, 1, &office)).expect("write");
        block_on(write_payload(&store, SAVE_SLOT, 1, &cafe)).expect("write");

        let stored = block_on(store.read_slot(SAVE_SLOT)).expect("read").expect("present");
        assert_eq!(stored.decode_payload::<Checkpoint>(), Ok(cafe));

        block_on(store.clear_slot(SAVE_SLOT)).expect("clear");
        assert_eq!(block_on(store.read_slot(SAVE_SLOT)), Ok(None));
    }

    #[test]
    fn noop_store_forgets_writes() {
        let store: &dyn SaveStore = &NoopSaveStore;
        block_on(write_payload(store, SAVE_SLOT, 1, &"ignored")).expect("write");
        assert_eq!(block_on(store.read_slot(SAVE_SLOT)), Ok(None));
        block_on(store.clear_slot(SAVE_SLOT)).expect("clear");
    }
}
