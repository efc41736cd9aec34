//! Case-file browser with progress-gated files, risky decryption and the final decision.

mod catalog;
mod session;

pub use catalog::{find_file, visible_files, CaseFile, CASE_FILES, FINAL_CHOICE_UNLOCK, FINAL_FILE_ID};
pub use session::{
    final_choices, shows_final_choice, CaseFilesSession, DecryptStatus, DecryptionJob, DECRYPT_RISK,
};

use desktop_app_contract::{DialogueChoice, StoryProgress};
use leptos::*;

#[component]
fn FinalChoiceButtons(choices: [DialogueChoice; 2], on_choose: Callback<DialogueChoice>) -> impl IntoView {
    let [expose, join] = choices;
    view! {
        <div class="case-final-choice">
            <button type="button" class="case-choice truth" on:click=move |_| on_choose.call(expose.clone())>
                "EXPOSE EVERYTHING"
            </button>
            <button type="button" class="case-choice control" on:click=move |_| on_choose.call(join.clone())>
                "JOIN VOID"
            </button>
        </div>
    }
}

#[component]
fn CaseDetail(
    file: CaseFile,
    story: Signal<StoryProgress>,
    session: Signal<CaseFilesSession>,
    on_decrypt: Callback<String>,
    on_choose: Callback<DialogueChoice>,
) -> impl IntoView {
    let id = file.id;
    let encrypted_section = file.encrypted_details.map(|hidden| {
        view! {
            <div class="case-encrypted">
                {move || session.with(|s| s.status(id).map(DecryptStatus::message))
                    .map(|msg| view! { <p class="case-decrypt-status">{msg}</p> })}
                <Show when=move || session.with(|s| s.is_decrypted(id))>
                    <p class="case-decrypted-text">{hidden}</p>
                </Show>
                <Show when=move || session.with(|s| s.can_attempt(id))>
                    <button
                        type="button"
                        class="case-decrypt"
                        on:click=move |_| on_decrypt.call(id.to_string())
                    >
                        "ATTEMPT DECRYPTION"
                    </button>
                </Show>
            </div>
        }
    });

    view! {
        <article class="case-detail">
            <h2>{file.id}": "{file.title}</h2>
            <p class=if file.is_active() { "case-status active" } else { "case-status" }>
                "STATUS: "{file.status}
            </p>
            <h3>"Summary"</h3>
            <p class="case-summary">{file.summary}</p>
            <h3>"Details"</h3>
            <pre class="case-details">{file.details}</pre>
            {encrypted_section}
            {move || {
                if id != FINAL_FILE_ID {
                    return None;
                }
                final_choices(story.get())
                    .map(|choices| view! { <FinalChoiceButtons choices=choices on_choose=on_choose /> })
            }}
        </article>
    }
}

/// Case list and detail panes.
#[component]
pub fn CaseFilesApp(
    #[prop(into)] story: Signal<StoryProgress>,
    #[prop(into)] session: Signal<CaseFilesSession>,
    on_select: Callback<String>,
    on_decrypt: Callback<String>,
    on_choose: Callback<DialogueChoice>,
) -> impl IntoView {
    let selected = Signal::derive(move || session.with(|s| s.selected_file(story.get())));

    view! {
        <div class="app-shell app-case-files-shell">
            <nav class="case-list" aria-label="Case files">
                <For each=move || visible_files(story.get()) key=|file| file.id let:file>
                    <button
                        type="button"
                        class=move || {
                            let mut class = String::from("case-list-item");
                            if selected.get().is_some_and(|s| s.id == file.id) {
                                class.push_str(" selected");
                            }
                            if file.is_active() {
                                class.push_str(" active");
                            }
                            class
                        }
                        on:click=move |_| on_select.call(file.id.to_string())
                    >
                        <span class="case-id">{file.id}</span>
                        <span class="case-title">{file.title}</span>
                    </button>
                </For>
            </nav>
            <div class="case-pane">
                {move || match selected.get() {
                    Some(file) => view! {
                        <CaseDetail
                            file=file
                            story=story
                            session=session
                            on_decrypt=on_decrypt
                            on_choose=on_choose
                        />
                    }
                    .into_view(),
                    None => view! { <p class="case-empty">"No case files available."</p> }.into_view(),
                }}
            </div>
        </div>
    }
}
