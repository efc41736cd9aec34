use super::*;
use crate::{apps::render_window_contents, model::WindowRect};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Area a maximized window fills: the viewport above the taskbar.
fn maximized_rect(runtime: GameRuntimeContext) -> WindowRect {
    let viewport = runtime.state.with_untracked(|s| s.viewport);
    WindowRect {
        x: 0,
        y: 0,
        w: viewport.width,
        h: (viewport.height - TASKBAR_HEIGHT_PX).max(0),
    }
}

fn stop_pointer(ev: web_sys::PointerEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn GameWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_game_runtime();

    let window = create_memo(move |_| {
        runtime
            .state
            .with(|s| s.desktop.window(window_id).cloned())
    });
    let is_active = create_memo(move |_| runtime.state.with(|s| s.desktop.is_active(window_id)));
    let agent = create_memo(move |_| {
        runtime
            .state
            .with(|s| s.desktop_mode() == Some(DesktopMode::Agent))
    });
    let app_id = window.with_untracked(|w| w.as_ref().map(|w| w.app_id));

    let focus = move |_: web_sys::PointerEvent| {
        if !is_active.get_untracked() {
            runtime.dispatch_action(GameAction::FocusWindow { window_id });
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if ev.pointer_type() == "mouse" && ev.button() != 0 {
            return;
        }
        if ev.pointer_type() != "mouse" && !ev.is_primary() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(GameAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    // The header holds pointer capture for the whole drag, so moves and releases land here.
    let drag_to = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.with_untracked(|i| i.is_dragging(window_id)) {
            runtime.dispatch_action(GameAction::UpdateMove {
                window_id,
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let end_drag = move |_: web_sys::PointerEvent| {
        if runtime.interaction.with_untracked(|i| i.is_dragging(window_id)) {
            runtime.dispatch_action(GameAction::EndMove { window_id });
        }
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(GameAction::ToggleMaximize {
            window_id,
            viewport: maximized_rect(runtime),
        });
    };

    let class = move || {
        window.with(|w| {
            let Some(w) = w else {
                return String::from("game-window");
            };
            let mut class = String::from("game-window");
            class.push_str(if agent.get() { " agent" } else { " personal" });
            if is_active.get() {
                class.push_str(" active");
            }
            if w.maximized {
                class.push_str(" maximized");
            }
            if w.closing {
                class.push_str(" window-exit");
            }
            class
        })
    };
    let style = move || {
        window.with(|w| match w {
            Some(w) => format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};{}",
                w.rect.x,
                w.rect.y,
                w.rect.w,
                w.rect.h,
                w.z_index,
                if w.minimized { "display:none;" } else { "" }
            ),
            None => "display:none;".to_string(),
        })
    };
    let title = move || window.with(|w| w.as_ref().map(|w| w.title.clone()).unwrap_or_default());

    view! {
        <section
            id=window_dom_id(window_id)
            class=class
            style=style
            role="dialog"
            aria-label=title
            on:pointerdown=focus
        >
            <header
                class="window-header"
                on:pointerdown=begin_move
                on:pointermove=drag_to
                on:pointerup=end_drag
                on:pointercancel=end_drag
                on:dblclick=toggle_maximize
            >
                <span class="window-title">{title}</span>
                <div class="window-controls">
                    <button
                        type="button"
                        class="window-control minimize"
                        aria-label="Minimize window"
                        on:pointerdown=stop_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(GameAction::ToggleMinimize { window_id });
                        }
                    ></button>
                    <button
                        type="button"
                        class="window-control close"
                        aria-label="Close window"
                        on:pointerdown=stop_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(GameAction::CloseWindow { window_id });
                        }
                    ></button>
                </div>
            </header>
            <div class="window-body">
                {app_id.map(|app_id| render_window_contents(runtime, window_id, app_id))}
            </div>
        </section>
    }
}
