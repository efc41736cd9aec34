use super::*;

#[component]
pub(super) fn MainMenu() -> impl IntoView {
    let runtime = use_game_runtime();
    let has_save = create_memo(move |_| runtime.state.with(|s| s.has_save));

    view! {
        <div class="main-menu">
            <div class="scanline-overlay" aria-hidden="true"></div>
            <div class="main-menu-panel">
                <h1 class="glitch" data-text="SHADOWFALL">"SHADOWFALL"</h1>
                <p class="main-menu-subtitle">"A TALE OF SACRIFICE"</p>
                <div class="main-menu-actions">
                    <Show when=move || has_save.get() fallback=|| ()>
                        <button
                            type="button"
                            class="menu-button"
                            on:click=move |_| runtime.dispatch_action(GameAction::ContinueGame)
                        >
                            "CONTINUE MISSION"
                        </button>
                    </Show>
                    <button
                        type="button"
                        class="menu-button"
                        on:click=move |_| runtime.dispatch_action(GameAction::NewGame)
                    >
                        {move || if has_save.get() { "NEW MISSION" } else { "BEGIN MISSION" }}
                    </button>
                </div>
            </div>
            <div class="main-menu-footer">
                <p>"Use [W][A][S][D] to move. Use [E] to interact. Press [Esc] to pause."</p>
                <p>"Your choices matter. Sacrifices must be made."</p>
            </div>
        </div>
    }
}

#[component]
pub(super) fn PauseMenu() -> impl IntoView {
    let runtime = use_game_runtime();
    let paused = create_memo(move |_| runtime.state.with(|s| s.overlays.paused));

    view! {
        <Show when=move || paused.get() fallback=|| ()>
            <div class="pause-menu" role="dialog" aria-label="Paused">
                <h2>"PAUSED"</h2>
                <button
                    type="button"
                    class="menu-button"
                    on:click=move |_| runtime.dispatch_action(GameAction::Resume)
                >
                    "RESUME"
                </button>
                <button
                    type="button"
                    class="menu-button"
                    on:click=move |_| runtime.dispatch_action(GameAction::ResetGame)
                >
                    "MAIN MENU"
                </button>
            </div>
        </Show>
    }
}

#[component]
pub(super) fn EndingScreen() -> impl IntoView {
    let runtime = use_game_runtime();
    let ending = create_memo(move |_| runtime.state.with(|s| s.ending.clone()));

    view! {
        {move || match ending.get() {
            None => view! { <div class="ending-screen loading">"Loading ending..."</div> }
                .into_view(),
            Some(reveal) => {
                let menu_ready = reveal.menu_ready;
                let lines = reveal
                    .visible_lines()
                    .iter()
                    .map(|line| view! { <p class="ending-line">{*line}</p> })
                    .collect_view();
                view! {
                    <div
                        class="ending-screen"
                        data-ending=reveal.ending.title().to_lowercase()
                    >
                        <div class="ending-text">{lines}</div>
                        <Show when=move || menu_ready fallback=|| ()>
                            <button
                                type="button"
                                class="menu-button-ending"
                                on:click=move |_| runtime.dispatch_action(GameAction::ResetGame)
                            >
                                "FIN."
                            </button>
                        </Show>
                    </div>
                }
                .into_view()
            }
        }}
    }
}
