//! Secure messenger: scripted dialogue with progress-gated messages and choice blocks.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod script;
mod transcript;

pub use script::{Align, ChatEntry, ChoiceBlock, ChoiceOption, Message, CHAT_SCRIPT};
pub use transcript::{
    dependency_met, to_dialogue_choice, transcript, Bubble, MessengerSession, TranscriptItem,
    PLAYER_SENDER,
};

use desktop_app_contract::DialogueChoice;
use leptos::*;

#[component]
fn ChatBubble(bubble: Bubble) -> impl IntoView {
    if bubble.align == Align::Center {
        let class = if bubble.glitch {
            "chat-banner glitch"
        } else {
            "chat-banner"
        };
        return view! { <div class=class data-text=bubble.text>{bubble.text}</div> }.into_view();
    }

    view! {
        <div class=format!("chat-row {}", bubble.align.class_name())>
            <div class="chat-bubble">
                <p class="chat-sender">{bubble.sender}</p>
                <p class="chat-text">{bubble.text}</p>
                <p class="chat-time">{bubble.timestamp}</p>
            </div>
        </div>
    }
    .into_view()
}

#[component]
fn ChoicePrompt(options: Vec<DialogueChoice>, on_choose: Callback<DialogueChoice>) -> impl IntoView {
    view! {
        <div class="chat-choices">
            <p class="chat-choices-title">"Respond:"</p>
            {options
                .into_iter()
                .map(|choice| {
                    let label = choice.text.clone();
                    view! {
                        <button
                            type="button"
                            class="chat-choice"
                            on:click=move |_| on_choose.call(choice.clone())
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Renders the channel for the supplied transcript.
#[component]
pub fn MessengerApp(
    /// Visible transcript rows.
    #[prop(into)]
    transcript: Signal<Vec<TranscriptItem>>,
    /// Invoked when the player picks a response.
    on_choose: Callback<DialogueChoice>,
) -> impl IntoView {
    view! {
        <div class="app-shell app-messenger-shell">
            <div class="messenger-header">
                <h2>"SECURE COMMS - CH: 7 (ENCRYPTED)"</h2>
            </div>
            <div class="messenger-log">
                {move || {
                    transcript
                        .get()
                        .into_iter()
                        .map(|item| match item {
                            TranscriptItem::Bubble(bubble) => view! { <ChatBubble bubble=bubble /> }.into_view(),
                            TranscriptItem::Prompt { options, .. } => {
                                view! { <ChoicePrompt options=options on_choose=on_choose /> }.into_view()
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="messenger-compose">
                <input type="text" placeholder="Message transmission disabled..." disabled=true />
                <button type="button" disabled=true>"SEND"</button>
            </div>
        </div>
    }
}
