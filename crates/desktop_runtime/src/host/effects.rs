//! Runtime-effect dispatch for the game host boundary.

use std::time::Duration;

use leptos::{
    logging, request_animation_frame, set_timeout_with_handle, spawn_local, SignalGetUntracked,
};
use platform_host::unix_time_ms_now;

use crate::{
    host::{GameHostContext, PendingWake},
    model::WindowId,
    persistence::{self, SaveFile},
    reducer::{GameAction, RuntimeEffect, SoundCue},
    runtime_context::GameRuntimeContext,
};

pub(super) fn run_runtime_effect(
    host: GameHostContext,
    runtime: GameRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::PersistSave => persist_save(host, runtime),
        RuntimeEffect::ClearSave => clear_save(host),
        RuntimeEffect::RequestFrame => request_frame(host, runtime),
        RuntimeEffect::ScheduleWake { at_ms } => schedule_wake(host, runtime, at_ms),
        RuntimeEffect::FocusWindowInput(window_id) => focus_window_input(window_id),
        RuntimeEffect::Cue(cue) => play_cue(&host, cue),
    }
}

fn persist_save(host: GameHostContext, runtime: GameRuntimeContext) {
    let save = SaveFile::capture(&runtime.state.get_untracked());
    spawn_local(async move {
        let store = host.save_store();
        if let Err(err) = persistence::persist_save(store.as_ref(), &save).await {
            logging::warn!("persist save failed: {err}");
        }
    });
}

fn clear_save(host: GameHostContext) {
    spawn_local(async move {
        let store = host.save_store();
        if let Err(err) = persistence::delete_save(store.as_ref()).await {
            logging::warn!("delete save failed: {err}");
        }
    });
}

/// One frame request in flight at a time; the frame's own dispatch asks for the next one.
fn request_frame(host: GameHostContext, runtime: GameRuntimeContext) {
    if host.frame_pending.replace(true) {
        return;
    }
    let pending = host.frame_pending.clone();
    request_animation_frame(move || {
        pending.set(false);
        runtime.dispatch_action(GameAction::AnimationFrame);
    });
}

/// Keeps a single timer aimed at the earliest requested instant.
fn schedule_wake(host: GameHostContext, runtime: GameRuntimeContext, at_ms: u64) {
    let mut pending = host.wake.borrow_mut();
    if let Some(current) = *pending {
        if current.at_ms <= at_ms {
            return;
        }
        current.handle.clear();
    }

    let delay = Duration::from_millis(at_ms.saturating_sub(unix_time_ms_now()));
    let slot = host.wake.clone();
    match set_timeout_with_handle(
        move || {
            slot.borrow_mut().take();
            runtime.dispatch_action(GameAction::Tick);
        },
        delay,
    ) {
        Ok(handle) => *pending = Some(PendingWake { at_ms, handle }),
        Err(err) => {
            *pending = None;
            logging::warn!("schedule wake failed: {err:?}");
        }
    }
}

fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(frame) = document.get_element_by_id(&crate::components::window_dom_id(window_id))
        else {
            return;
        };
        let Ok(Some(element)) = frame.query_selector("input, textarea") else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

fn play_cue(host: &GameHostContext, cue: SoundCue) {
    #[cfg(target_arch = "wasm32")]
    {
        use web_sys::HtmlAudioElement;

        let start = |audio: &HtmlAudioElement| {
            if let Err(err) = audio.play() {
                logging::warn!("audio `{}` failed to play: {err:?}", cue.name());
            }
        };

        match cue {
            SoundCue::WalkStart => {
                let mut walk = host.walk_audio.borrow_mut();
                if walk.is_none() {
                    match HtmlAudioElement::new_with_src(&cue.asset_path()) {
                        Ok(audio) => {
                            audio.set_loop(true);
                            audio.set_volume(cue.volume());
                            *walk = Some(audio);
                        }
                        Err(err) => logging::warn!("walk audio unavailable: {err:?}"),
                    }
                }
                if let Some(audio) = walk.as_ref() {
                    start(audio);
                }
            }
            SoundCue::WalkStop => {
                if let Some(audio) = host.walk_audio.borrow().as_ref() {
                    let _ = audio.pause();
                    audio.set_current_time(0.0);
                }
            }
            _ => match HtmlAudioElement::new_with_src(&cue.asset_path()) {
                Ok(audio) => {
                    audio.set_volume(cue.volume());
                    start(&audio);
                }
                Err(err) => logging::warn!("audio `{}` unavailable: {err:?}", cue.name()),
            },
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (host, cue);
}
