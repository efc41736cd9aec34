//! Content-only apps: notes, browser, photos, evidence locker, and the trash easter egg.

use leptos::*;

/// Clicks on "Empty Trash" before the hidden note shows up.
pub const TRASH_CLICKS_TO_REVEAL: u8 = 7;

const CORRUPTED_THOUGHT: &str = "They think this is my whole world... \njust work and family photos. \n\nThey don't see the real me. \nThey never will. \n\nNot until it's too late.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrashSession {
    clicks: u8,
}

impl TrashSession {
    pub fn clicks(self) -> u8 {
        self.clicks
    }

    pub fn revealed(self) -> bool {
        self.clicks >= TRASH_CLICKS_TO_REVEAL
    }

    /// Counts a click. Clicks after the reveal are ignored.
    pub fn click(&mut self) {
        if !self.revealed() {
            self.clicks += 1;
        }
    }
}

struct Picture {
    id: &'static str,
    title: &'static str,
    url: &'static str,
}

const GALLERY: [Picture; 6] = [
    Picture { id: "1", title: "Mountain Sunrise", url: "/assets/apps/gallery/photo1.jpg" },
    Picture { id: "2", title: "City at Night", url: "/assets/apps/gallery/photo2.jpg" },
    Picture { id: "3", title: "[DATA_CORRUPTED]", url: "/assets/apps/gallery/corrupted.png" },
    Picture { id: "4", title: "Beach Sunset", url: "/assets/apps/gallery/photo4.jpg" },
    Picture { id: "5", title: "Abstract Shapes", url: "/assets/apps/gallery/photo5.jpg" },
    Picture { id: "6", title: "Cute Puppy", url: "/assets/apps/gallery/photo6.jpg" },
];

const EVIDENCE: [Picture; 6] = [
    Picture { id: "EV-001", title: "Satellite Imagery - Compound", url: "/assets/apps/evidence/ev001.jpg" },
    Picture { id: "EV-002", title: "Recovered Hard Drive", url: "/assets/apps/evidence/ev002.jpg" },
    Picture { id: "EV-003", title: "CCTV - Suspect Vehicle", url: "/assets/apps/evidence/ev003.jpg" },
    Picture { id: "EV-004", title: "Crime Scene Photo A", url: "/assets/apps/evidence/ev004.jpg" },
    Picture { id: "EV-005", title: "Decrypted File Fragment", url: "/assets/apps/evidence/ev005.jpg" },
    Picture { id: "EV-006", title: "Facial Recognition Match", url: "/assets/apps/evidence/ev006.jpg" },
];

#[component]
pub(super) fn NotesApp(#[prop(into)] password: Signal<String>) -> impl IntoView {
    view! {
        <div class="app-shell app-notes-shell">
            <h2>"To-Do List"</h2>
            <ul>
                <li>"Pick up dry cleaning"</li>
                <li>"Finish quarterly report"</li>
                <li class="notes-important">
                    "IMPORTANT: Finalize details for project "
                    <span class="notes-highlight">{move || password.get()}</span>
                    " - critical deadline!"
                </li>
                <li>"Call mom"</li>
            </ul>
            <p class="notes-footer">"Don't forget the password for the secure server."</p>
        </div>
    }
}

#[component]
pub(super) fn BrowserApp() -> impl IntoView {
    view! {
        <div class="app-shell app-browser-shell">
            <div class="browser-toolbar">
                <span class="browser-url">"https://my-personal-space.web/home"</span>
            </div>
            <div class="browser-page">
                <h1>"Welcome to my Homepage!"</h1>
                <p>"Just a little corner of the internet I call my own."</p>
                <section class="browser-card">
                    <h2>"About Me"</h2>
                    <p>
                        "I'm just a regular person, trying to make my way in the world. I enjoy hiking, photography, and spending time with my family. This desktop is mostly for work, but I like to keep a few personal things on here too."
                    </p>
                </section>
                <section>
                    <h3>"My Latest Trip"</h3>
                    <img src="/assets/apps/browser/trip.jpg" alt="Vacation" class="pixelated" />
                    <p class="browser-caption">"A beautiful view from the mountains last summer."</p>
                </section>
                <section class="browser-comments">
                    <h3>"Comments (1)"</h3>
                    <div class="browser-comment">
                        <p class="browser-comment-author">"Void"</p>
                        <p>
                            "Nice little homepage. A perfect cage you've built for yourself. Do you ever wonder what's outside the walls?"
                        </p>
                        <p class="browser-comment-time">"1 hour ago"</p>
                    </div>
                </section>
            </div>
        </div>
    }
}

#[component]
fn PictureBrowser(
    pictures: &'static [Picture],
    heading: &'static str,
    caption: &'static str,
    shell_class: &'static str,
) -> impl IntoView {
    let selected = create_rw_signal(0usize);
    let current = move || &pictures[selected.get().min(pictures.len() - 1)];

    view! {
        <div class=format!("app-shell {shell_class}")>
            <div class="picture-browser">
                <nav class="picture-list">
                    <div class="picture-list-heading">{heading}</div>
                    {pictures
                        .iter()
                        .enumerate()
                        .map(|(index, picture)| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if selected.get() == index {
                                            "picture-item selected"
                                        } else {
                                            "picture-item"
                                        }
                                    }
                                    on:click=move |_| selected.set(index)
                                >
                                    <span class="picture-id">{picture.id}</span>
                                    <span class="picture-title">{picture.title}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="picture-stage">
                    <img src=move || current().url alt=move || current().title class="pixelated" />
                </div>
            </div>
            <div class="picture-status">
                {caption}
                <span>{move || format!("{} - {}", current().id, current().title)}</span>
            </div>
        </div>
    }
}

#[component]
pub(super) fn GalleryApp() -> impl IntoView {
    view! {
        <PictureBrowser
            pictures=&GALLERY
            heading="My Photos"
            caption="Viewing: "
            shell_class="app-gallery-shell"
        />
    }
}

#[component]
pub(super) fn EvidenceViewerApp() -> impl IntoView {
    view! {
        <PictureBrowser
            pictures=&EVIDENCE
            heading="EVIDENCE LOCKER"
            caption="Displaying: "
            shell_class="app-evidence-shell"
        />
    }
}

#[component]
pub(super) fn TrashApp(
    #[prop(into)] session: Signal<TrashSession>,
    on_click: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="app-shell app-trash-shell">
            <Show
                when=move || session.get().revealed()
                fallback=move || {
                    view! {
                        <h2>"Trash"</h2>
                        <p>"This folder is empty."</p>
                        <button type="button" class="trash-empty" on:click=move |_| on_click.call(())>
                            "Empty Trash"
                        </button>
                        <p class="trash-clicks">{move || format!("Clicks: {}", session.get().clicks())}</p>
                    }
                }
            >
                <div class="trash-secret">
                    <h3>"[ CORRUPTED_THOUGHT.TXT ]"</h3>
                    <p class="trash-secret-text">{CORRUPTED_THOUGHT}</p>
                </div>
            </Show>
        </div>
    }
}
