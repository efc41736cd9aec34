use super::*;
use crate::story::{active_objective, objective_spans, TextSpan};

#[component]
pub(super) fn IntroScreen() -> impl IntoView {
    let runtime = use_game_runtime();
    let intro = create_memo(move |_| runtime.state.with(|s| s.overlays.intro.clone()));
    let text = move || intro.with(|i| i.as_ref().map(|i| i.text()).unwrap_or_default());
    let typing = move || intro.with(|i| i.as_ref().is_some_and(|i| i.is_typing()));

    view! {
        <div class="intro-screen">
            <p class="intro-text">
                {text}
                <Show when=typing fallback=|| ()>
                    <span class="intro-cursor">"_"</span>
                </Show>
            </p>
            <Show when=move || !typing() fallback=|| ()>
                <button
                    type="button"
                    class="intro-continue"
                    on:click=move |_| runtime.dispatch_action(GameAction::IntroFinished)
                >
                    "Continue..."
                </button>
            </Show>
        </div>
    }
}

#[component]
pub(super) fn CrashScreen() -> impl IntoView {
    view! {
        <div class="crash-screen" role="alert">
            <h1>"SYSTEM FAILURE"</h1>
            <p>"KERNEL PANIC: CORE INTEGRITY COMPROMISED"</p>
            <p class="crash-countdown">"SYSTEM WILL RESET IN 5 SECONDS..."</p>
        </div>
    }
}

#[component]
pub(super) fn DamageFlash() -> impl IntoView {
    let runtime = use_game_runtime();
    let flashing = create_memo(move |_| runtime.state.with(|s| s.overlays.damage_flash.is_some()));

    view! {
        <Show when=move || flashing.get() fallback=|| ()>
            <div class="damage-flash" aria-hidden="true"></div>
        </Show>
    }
}

#[component]
pub(super) fn ObjectiveNotification() -> impl IntoView {
    let runtime = use_game_runtime();
    let objective = create_memo(move |_| {
        runtime.state.with(|s| {
            if s.objective.dismissed_at == Some(s.story) {
                return None;
            }
            active_objective(s.story).map(|objective| objective.text)
        })
    });

    view! {
        {move || {
            objective
                .get()
                .map(|text| {
                    let spans = objective_spans(text)
                        .into_iter()
                        .map(|span| match span {
                            TextSpan::Plain(part) => part.into_view(),
                            TextSpan::Strong(part) => view! { <strong>{part}</strong> }.into_view(),
                        })
                        .collect_view();
                    view! {
                        <aside class="objective-notification" role="status">
                            <div class="objective-header">
                                <div>
                                    <p class="objective-kicker">"INCOMING MESSAGE"</p>
                                    <p class="objective-sender">"From: VOID"</p>
                                </div>
                                <button
                                    type="button"
                                    class="objective-close"
                                    aria-label="Dismiss"
                                    on:click=move |_| {
                                        runtime.dispatch_action(GameAction::DismissObjective)
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                            <p class="objective-text">{spans}</p>
                        </aside>
                    }
                })
        }}
    }
}

#[component]
pub(super) fn LoginDialog() -> impl IntoView {
    let runtime = use_game_runtime();
    let attempt = create_rw_signal(String::new());
    let error = create_memo(move |_| {
        runtime
            .state
            .with(|s| s.overlays.login.as_ref().and_then(|login| login.error))
    });

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        runtime.dispatch_action(GameAction::SubmitLogin {
            attempt: attempt.get_untracked(),
        });
        if runtime.state.with_untracked(|s| s.overlays.login.is_some()) {
            attempt.set(String::new());
        }
    };

    view! {
        <div
            class="login-backdrop"
            on:click=move |_| runtime.dispatch_action(GameAction::CloseLogin)
        >
            <form
                class="login-dialog"
                on:click=|ev| ev.stop_propagation()
                on:submit=submit
            >
                <h2>"[ SECURE SYSTEM ACCESS ]"</h2>
                <p class="login-hint">"Enter credentials to proceed"</p>
                <label>
                    <span>"AGENT ID"</span>
                    <input type="text" value="AGENT_77" disabled=true />
                </label>
                <label>
                    <span>"PASSWORD"</span>
                    <input
                        type="password"
                        autofocus=true
                        prop:value=move || attempt.get()
                        on:input=move |ev| attempt.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="login-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button type="submit" class="login-submit">"AUTHENTICATE"</button>
            </form>
        </div>
    }
}
