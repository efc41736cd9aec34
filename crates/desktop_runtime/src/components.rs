//! Game shell UI composition and interaction surfaces.

mod desktop;
mod menus;
mod overlays;
mod taskbar;
mod window;
mod world;

use leptos::*;
use wasm_bindgen::JsCast;

use self::{
    desktop::GameDesktop,
    menus::{EndingScreen, MainMenu, PauseMenu},
    overlays::{CrashScreen, IntroScreen},
    world::WorldView,
};

use crate::{
    input,
    model::{DesktopMode, PointerPosition, Screen, WindowId},
    reducer::GameAction,
};

pub use crate::runtime_context::{use_game_runtime, GameProvider, GameRuntimeContext};

pub(crate) const TASKBAR_HEIGHT_PX: i32 = 48;

pub(crate) fn window_dom_id(window_id: WindowId) -> String {
    format!("game-window-{}", window_id.0)
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Whether the key event is headed into a text field.
fn typing_into_field(ev: &web_sys::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|element| matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

fn screen_css_id(screen: Screen) -> &'static str {
    match screen {
        Screen::MainMenu => "main-menu",
        Screen::PersonalDesktop => "personal-desktop",
        Screen::GameWorld => "game-world",
        Screen::AgentDesktop => "agent-desktop",
        Screen::GameEnding => "game-ending",
    }
}

fn install_global_listeners(runtime: GameRuntimeContext) {
    let keydown = window_event_listener(ev::keydown, move |ev| {
        let key = ev.key();
        if ev.repeat() || (key != "Escape" && typing_into_field(&ev)) {
            return;
        }
        if input::prevents_default(&key) {
            ev.prevent_default();
        }
        runtime.dispatch_action(GameAction::KeyDown { key });
    });
    let keyup = window_event_listener(ev::keyup, move |ev| {
        runtime.dispatch_action(GameAction::KeyUp { key: ev.key() });
    });
    let resize = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_action(GameAction::SetViewport {
            viewport: runtime.host.get_value().viewport(),
        });
    });
    on_cleanup(move || {
        keydown.remove();
        keyup.remove();
        resize.remove();
    });
}

#[component]
/// Renders the active screen with its overlays and routes global keyboard input into the reducer.
pub fn GameShell() -> impl IntoView {
    let runtime = use_game_runtime();
    let state = runtime.state;

    install_global_listeners(runtime);
    runtime.dispatch_action(GameAction::SetViewport {
        viewport: runtime.host.get_value().viewport(),
    });

    let screen = create_memo(move |_| state.with(|s| s.screen));
    let crashed = create_memo(move |_| state.with(|s| s.overlays.crashed));
    let intro = create_memo(move |_| state.with(|s| s.overlays.intro.is_some()));

    view! {
        <div
            id="game-shell-root"
            class="game-shell"
            data-screen=move || screen_css_id(screen.get())
        >
            <PauseMenu />
            {move || {
                if crashed.get() {
                    return view! { <CrashScreen /> }.into_view();
                }
                if intro.get() {
                    return view! { <IntroScreen /> }.into_view();
                }
                match screen.get() {
                    Screen::MainMenu => view! { <MainMenu /> }.into_view(),
                    Screen::PersonalDesktop => {
                        view! { <GameDesktop mode=DesktopMode::Personal /> }.into_view()
                    }
                    Screen::AgentDesktop => {
                        view! { <GameDesktop mode=DesktopMode::Agent /> }.into_view()
                    }
                    Screen::GameWorld => view! { <WorldView /> }.into_view(),
                    Screen::GameEnding => view! { <EndingScreen /> }.into_view(),
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_dom_ids_are_stable() {
        assert_eq!(window_dom_id(WindowId(7)), "game-window-7");
    }

    #[test]
    fn every_screen_has_a_css_id() {
        let ids = [
            Screen::MainMenu,
            Screen::PersonalDesktop,
            Screen::GameWorld,
            Screen::AgentDesktop,
            Screen::GameEnding,
        ]
        .map(screen_css_id);
        assert_eq!(
            ids,
            ["main-menu", "personal-desktop", "game-world", "agent-desktop", "game-ending"]
        );
    }
}
