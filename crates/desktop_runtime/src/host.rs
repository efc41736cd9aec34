//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Effect execution and viewport queries sit behind this typed boundary so the reducer stays free
//! of browser APIs.

mod boot;
mod effects;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::{leptos_dom::helpers::TimeoutHandle, Callback};
use platform_host::SaveStore;

use crate::{
    model::Viewport,
    reducer::{GameAction, RuntimeEffect},
    runtime_context::GameRuntimeContext,
};

/// Pending wake-up timer and the instant it targets.
#[derive(Clone, Copy)]
struct PendingWake {
    at_ms: u64,
    handle: TimeoutHandle,
}

#[derive(Clone)]
/// Host service bundle for game runtime side effects.
pub struct GameHostContext {
    save_store: Rc<dyn SaveStore>,
    frame_pending: Rc<Cell<bool>>,
    wake: Rc<RefCell<Option<PendingWake>>>,
    walk_audio: Rc<RefCell<Option<web_sys::HtmlAudioElement>>>,
}

impl Default for GameHostContext {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        let store: Rc<dyn SaveStore> = Rc::new(crate::persistence::LocalStorageSaveStore);
        #[cfg(not(target_arch = "wasm32"))]
        let store: Rc<dyn SaveStore> = Rc::new(platform_host::NoopSaveStore);
        Self::new(store)
    }
}

impl GameHostContext {
    /// Builds a host around an explicit save store.
    pub fn new(save_store: Rc<dyn SaveStore>) -> Self {
        Self {
            save_store,
            frame_pending: Rc::new(Cell::new(false)),
            wake: Rc::new(RefCell::new(None)),
            walk_audio: Rc::new(RefCell::new(None)),
        }
    }

    /// Returns the configured save store.
    pub fn save_store(&self) -> Rc<dyn SaveStore> {
        self.save_store.clone()
    }

    /// Loads the save slot once and reports it with [`GameAction::HydrateSave`].
    pub fn install_boot_hydration(&self, dispatch: Callback<GameAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: GameRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }

    /// Returns the browser viewport size, or the default size off the browser.
    pub fn viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                    value.ok().and_then(|v| v.as_f64()).map(|v| v as i32)
                };
                let fallback = Viewport::default();
                return Viewport {
                    width: read(window.inner_width()).unwrap_or(fallback.width),
                    height: read(window.inner_height()).unwrap_or(fallback.height),
                };
            }
        }
        Viewport::default()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::GameState,
        persistence::{load_save, persist_save, SaveFile},
    };

    #[test]
    fn native_host_keeps_no_saves() {
        let store = GameHostContext::default().save_store();
        let save = SaveFile::capture(&GameState::new("NIGHTFOX21".to_string(), 10));
        block_on(persist_save(store.as_ref(), &save)).expect("persist");
        assert_eq!(block_on(load_save(store.as_ref())), Ok(None));
    }
}
