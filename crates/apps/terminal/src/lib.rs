//! Agent terminal window contents.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod interpreter;

pub use interpreter::{
    format_utc, help_text, TerminalJob, TerminalSession, BANNER, BREACH_REWARD, BREACH_RISK,
    BREACH_TARGET, BREACH_UNLOCK, REPAIR_AMOUNT,
};

use leptos::ev::KeyboardEvent;
use leptos::*;

/// Terminal transcript plus input line.
///
/// Commands are handed to `on_submit`; the runtime owns the [`TerminalSession`] and any
/// deferred jobs it starts.
#[component]
pub fn TerminalApp(
    /// Session owned by the runtime for this window.
    #[prop(into)]
    session: Signal<TerminalSession>,
    /// Invoked with the raw input line on Enter.
    on_submit: Callback<String>,
    /// Invoked on printable keystrokes, for the typing cue.
    #[prop(optional)]
    on_keystroke: Option<Callback<()>>,
) -> impl IntoView {
    let input = create_rw_signal(String::new());
    let input_ref = create_node_ref::<html::Input>();
    let busy = Signal::derive(move || session.with(TerminalSession::is_busy));

    let focus_input = move |_| {
        if let Some(el) = input_ref.get_untracked() {
            let _ = el.focus();
        }
    };

    view! {
        <div class="app-shell app-terminal-shell" on:click=focus_input>
            <div class="terminal-screen" role="log" aria-live="polite">
                {move || {
                    session
                        .with(|s| s.lines().to_vec())
                        .into_iter()
                        .map(|line| view! { <div class="terminal-line">{line}</div> })
                        .collect_view()
                }}
                <Show when=move || busy.get()>
                    <div class="terminal-line terminal-busy">"PROCESSING..."</div>
                </Show>
            </div>
            <div class="terminal-input-row">
                <span class="terminal-prompt">">"</span>
                <input
                    node_ref=input_ref
                    class="terminal-input app-field"
                    type="text"
                    autofocus=true
                    autocomplete="off"
                    spellcheck="false"
                    disabled=move || busy.get()
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: KeyboardEvent| {
                        let key = ev.key();
                        if key == "Enter" {
                            if !busy.get_untracked() {
                                on_submit.call(input.get_untracked());
                                input.set(String::new());
                            }
                        } else if key.chars().count() == 1 || key == "Backspace" {
                            if let Some(cb) = on_keystroke {
                                cb.call(());
                            }
                        }
                    }
                />
            </div>
        </div>
    }
}
