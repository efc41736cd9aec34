use std::time::Duration;

use super::desktop::integrity_class;
use super::*;
use crate::{apps::app_descriptor, reducer::SoundCue};

fn clock_text() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::Date::new_0().to_locale_time_string("en-US"))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::from("00:00:00")
    }
}

#[component]
fn TaskbarClock() -> impl IntoView {
    let now = create_rw_signal(clock_text());
    match set_interval_with_handle(move || now.set(clock_text()), Duration::from_secs(1)) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => logging::warn!("taskbar clock unavailable: {err:?}"),
    }

    view! { <span class="taskbar-clock">{move || now.get()}</span> }
}

#[component]
fn TaskbarWindowButton(window_id: WindowId) -> impl IntoView {
    let runtime = use_game_runtime();
    let entry = create_memo(move |_| {
        runtime.state.with(|s| {
            s.desktop.window(window_id).map(|w| {
                (
                    w.app_id,
                    w.title.clone(),
                    w.minimized,
                    s.desktop.is_active(window_id),
                )
            })
        })
    });

    view! {
        {move || {
            entry
                .get()
                .map(|(app_id, title, minimized, active)| {
                    let mut class = String::from("taskbar-window");
                    if active {
                        class.push_str(" active");
                    }
                    if minimized {
                        class.push_str(" minimized");
                    }
                    let icon = app_descriptor(app_id).map(|app| app.icon_url).unwrap_or_default();
                    view! {
                        <button
                            type="button"
                            class=class
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(GameAction::PlayCue {
                                    cue: SoundCue::UiClick,
                                });
                                runtime.dispatch_action(GameAction::TaskbarClick { window_id });
                            }
                        >
                            <img src=icon alt="" class="taskbar-window-icon" />
                            <span>{title}</span>
                        </button>
                    }
                })
        }}
    }
}

#[component]
pub(super) fn Taskbar(mode: DesktopMode) -> impl IntoView {
    let runtime = use_game_runtime();
    let state = runtime.state;
    let agent = mode == DesktopMode::Agent;

    let window_ids = move || {
        state.with(|s| s.desktop.windows.iter().map(|w| w.id).collect::<Vec<_>>())
    };
    let integrity = create_memo(move |_| state.with(|s| s.integrity));

    view! {
        <footer class="taskbar" style=format!("height:{TASKBAR_HEIGHT_PX}px;")>
            <div class="taskbar-windows">
                <For each=window_ids key=|window_id| window_id.0 let:window_id>
                    <TaskbarWindowButton window_id=window_id />
                </For>
            </div>
            <div class="taskbar-tray">
                <Show when=move || agent fallback=|| ()>
                    <span class=move || {
                        format!("taskbar-integrity {}", integrity_class(integrity.get().band()))
                    }>
                        {move || format!("SYS-INTEGRITY: {}%", integrity.get().value())}
                    </span>
                </Show>
                {if agent {
                    view! {
                        <button
                            type="button"
                            class="taskbar-session"
                            on:click=move |_| runtime.dispatch_action(GameAction::Logout)
                        >
                            "LOGOUT"
                        </button>
                    }
                } else {
                    view! {
                        <button
                            type="button"
                            class="taskbar-session"
                            on:click=move |_| runtime.dispatch_action(GameAction::StepAway)
                        >
                            "Step Away"
                        </button>
                    }
                }}
                <TaskbarClock />
            </div>
        </footer>
    }
}
