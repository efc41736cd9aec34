use desktop_app_contract::IntegrityBand;

use super::*;
use super::{
    overlays::{DamageFlash, LoginDialog, ObjectiveNotification},
    taskbar::Taskbar,
    window::GameWindow,
};
use crate::{
    apps::{desktop_apps, icon_position, AppDescriptor},
    integrity::tint_opacity,
    reducer::SoundCue,
};

pub(super) fn integrity_class(band: IntegrityBand) -> &'static str {
    match band {
        IntegrityBand::Critical => "integrity-critical",
        IntegrityBand::Unstable => "integrity-unstable",
        IntegrityBand::Stable => "integrity-stable",
    }
}

#[component]
fn DesktopIcon(index: usize, app: AppDescriptor) -> impl IntoView {
    let runtime = use_game_runtime();
    let (x, y) = icon_position(index);
    let open = move || {
        runtime.dispatch_action(GameAction::PlayCue {
            cue: SoundCue::UiClick,
        });
        runtime.dispatch_action(GameAction::OpenApp { app_id: app.app_id });
    };

    view! {
        <button
            type="button"
            class="desktop-icon"
            style=format!("left:{x}px;top:{y}px;")
            data-app=app.app_id.id()
            on:click=move |_| open()
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Enter" {
                    ev.prevent_default();
                    open();
                }
            }
        >
            <img src=app.icon_url alt="" class="desktop-icon-image" draggable="false" />
            <span class="desktop-icon-label">{app.title}</span>
        </button>
    }
}

#[component]
pub(super) fn GameDesktop(mode: DesktopMode) -> impl IntoView {
    let runtime = use_game_runtime();
    let state = runtime.state;
    let agent = mode == DesktopMode::Agent;

    let integrity = create_memo(move |_| state.with(|s| s.integrity));
    let login_open = create_memo(move |_| state.with(|s| s.overlays.login.is_some()));
    let window_ids = move || {
        state.with(|s| s.desktop.windows.iter().map(|w| w.id).collect::<Vec<_>>())
    };

    let class = move || {
        if agent {
            format!("game-desktop agent {}", integrity_class(integrity.get().band()))
        } else {
            "game-desktop personal".to_string()
        }
    };

    view! {
        <div class=class>
            <div class="desktop-icons">
                {desktop_apps(mode)
                    .into_iter()
                    .enumerate()
                    .map(|(index, app)| view! { <DesktopIcon index=index app=app /> })
                    .collect_view()}
            </div>

            <div class="desktop-window-layer">
                <For each=window_ids key=|window_id| window_id.0 let:window_id>
                    <GameWindow window_id=window_id />
                </For>
            </div>

            <Show when=move || agent fallback=|| ()>
                <div class="vignette-overlay" aria-hidden="true"></div>
                <div class="scanline-overlay" aria-hidden="true"></div>
                <div
                    class="integrity-tint"
                    aria-hidden="true"
                    style=move || format!("opacity:{};", tint_opacity(integrity.get()))
                ></div>
                <DamageFlash />
                <ObjectiveNotification />
            </Show>

            <Taskbar mode=mode />

            <Show when=move || login_open.get() fallback=|| ()>
                <LoginDialog />
            </Show>
        </div>
    }
}
