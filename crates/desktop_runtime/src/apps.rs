mod static_apps;

use desktop_app_calculator::CalculatorApp;
use desktop_app_case_files::{CaseFilesApp, CaseFilesSession};
use desktop_app_contract::DialogueChoice;
use desktop_app_messenger::{transcript, MessengerApp, MessengerSession};
use desktop_app_terminal::{TerminalApp, TerminalSession};
use leptos::*;

use crate::{
    model::{AppId, DesktopMode, WindowId},
    reducer::{GameAction, SoundCue},
    runtime_context::GameRuntimeContext,
};

pub use static_apps::{TrashSession, TRASH_CLICKS_TO_REVEAL};

use static_apps::{BrowserApp, EvidenceViewerApp, GalleryApp, NotesApp, TrashApp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub title: &'static str,
    pub desktop: DesktopMode,
    /// Preferred window size. `None` uses the configured default.
    pub size: Option<(i32, i32)>,
    /// Launcher-only entries open an overlay instead of a window.
    pub launcher_only: bool,
    pub icon_url: &'static str,
}

const APP_REGISTRY: [AppDescriptor; 10] = [
    AppDescriptor {
        app_id: AppId::Notes,
        title: "Notes",
        desktop: DesktopMode::Personal,
        size: Some((350, 400)),
        launcher_only: false,
        icon_url: "/assets/icons/normal/notes.png",
    },
    AppDescriptor {
        app_id: AppId::Calculator,
        title: "Calculator",
        desktop: DesktopMode::Personal,
        size: Some((300, 450)),
        launcher_only: false,
        icon_url: "/assets/icons/normal/calculator.png",
    },
    AppDescriptor {
        app_id: AppId::Browser,
        title: "Web Browser",
        desktop: DesktopMode::Personal,
        size: Some((800, 600)),
        launcher_only: false,
        icon_url: "/assets/icons/normal/browser.png",
    },
    AppDescriptor {
        app_id: AppId::Gallery,
        title: "Photos",
        desktop: DesktopMode::Personal,
        size: Some((600, 500)),
        launcher_only: false,
        icon_url: "/assets/icons/normal/gallery.png",
    },
    AppDescriptor {
        app_id: AppId::Trash,
        title: "Trash",
        desktop: DesktopMode::Personal,
        size: Some((400, 300)),
        launcher_only: false,
        icon_url: "/assets/icons/normal/trash.png",
    },
    AppDescriptor {
        app_id: AppId::SecureAccess,
        title: "Secure Access",
        desktop: DesktopMode::Personal,
        size: None,
        launcher_only: true,
        icon_url: "/assets/icons/normal/secure_access.png",
    },
    AppDescriptor {
        app_id: AppId::CaseFiles,
        title: "Case Files",
        desktop: DesktopMode::Agent,
        size: Some((700, 500)),
        launcher_only: false,
        icon_url: "/assets/icons/fbi/case_files.png",
    },
    AppDescriptor {
        app_id: AppId::Terminal,
        title: "Terminal",
        desktop: DesktopMode::Agent,
        size: Some((600, 400)),
        launcher_only: false,
        icon_url: "/assets/icons/fbi/terminal.png",
    },
    AppDescriptor {
        app_id: AppId::EvidenceViewer,
        title: "Evidence Viewer",
        desktop: DesktopMode::Agent,
        size: Some((800, 600)),
        launcher_only: false,
        icon_url: "/assets/icons/fbi/evidence_viewer.png",
    },
    AppDescriptor {
        app_id: AppId::SecureMessenger,
        title: "Secure Messenger",
        desktop: DesktopMode::Agent,
        size: Some((450, 650)),
        launcher_only: false,
        icon_url: "/assets/icons/fbi/secure_messenger.png",
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

pub fn app_descriptor(app_id: AppId) -> Option<&'static AppDescriptor> {
    APP_REGISTRY.iter().find(|app| app.app_id == app_id)
}

/// Apps shown on a desktop, in icon order.
pub fn desktop_apps(mode: DesktopMode) -> Vec<AppDescriptor> {
    APP_REGISTRY
        .iter()
        .filter(|app| app.desktop == mode)
        .copied()
        .collect()
}

/// Resolves `app_id` against the apps available on `mode`.
pub fn desktop_app(mode: DesktopMode, app_id: AppId) -> Option<&'static AppDescriptor> {
    app_descriptor(app_id).filter(|app| app.desktop == mode)
}

/// Window-bearing agent apps; opening all of them moves the story on.
pub fn agent_window_apps() -> impl Iterator<Item = AppId> {
    APP_REGISTRY
        .iter()
        .filter(|app| app.desktop == DesktopMode::Agent && !app.launcher_only)
        .map(|app| app.app_id)
}

/// Icon placement in columns of ten, filled top to bottom.
pub fn icon_position(index: usize) -> (i32, i32) {
    let column = (index / 10) as i32;
    let row = (index % 10) as i32;
    (16 + column * 120, 16 + row * 120)
}

/// Per-window state for apps whose behaviour the reducer drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSession {
    Terminal(TerminalSession),
    CaseFiles(CaseFilesSession),
    Messenger(MessengerSession),
    Trash(TrashSession),
}

impl AppSession {
    pub fn for_app(app_id: AppId) -> Option<Self> {
        match app_id {
            AppId::Terminal => Some(Self::Terminal(TerminalSession::default())),
            AppId::CaseFiles => Some(Self::CaseFiles(CaseFilesSession::default())),
            AppId::SecureMessenger => Some(Self::Messenger(MessengerSession::default())),
            AppId::Trash => Some(Self::Trash(TrashSession::default())),
            _ => None,
        }
    }
}

fn terminal_session(runtime: GameRuntimeContext, window_id: WindowId) -> Signal<TerminalSession> {
    Signal::derive(move || {
        runtime.state.with(|s| match s.sessions.get(&window_id) {
            Some(AppSession::Terminal(session)) => session.clone(),
            _ => TerminalSession::default(),
        })
    })
}

fn case_files_session(
    runtime: GameRuntimeContext,
    window_id: WindowId,
) -> Signal<CaseFilesSession> {
    Signal::derive(move || {
        runtime.state.with(|s| match s.sessions.get(&window_id) {
            Some(AppSession::CaseFiles(session)) => session.clone(),
            _ => CaseFilesSession::default(),
        })
    })
}

fn trash_session(runtime: GameRuntimeContext, window_id: WindowId) -> Signal<TrashSession> {
    Signal::derive(move || {
        runtime.state.with(|s| match s.sessions.get(&window_id) {
            Some(AppSession::Trash(session)) => *session,
            _ => TrashSession::default(),
        })
    })
}

/// Mounts the contents of one window.
pub fn render_window_contents(
    runtime: GameRuntimeContext,
    window_id: WindowId,
    app_id: AppId,
) -> View {
    let story = Signal::derive(move || runtime.state.with(|s| s.story));
    let on_choose = Callback::new(move |choice: DialogueChoice| {
        runtime.dispatch_action(GameAction::Choose { choice })
    });

    match app_id {
        AppId::Notes => {
            let password = Signal::derive(move || runtime.state.with(|s| s.password.clone()));
            view! { <NotesApp password=password /> }.into_view()
        }
        AppId::Calculator => view! { <CalculatorApp /> }.into_view(),
        AppId::Browser => view! { <BrowserApp /> }.into_view(),
        AppId::Gallery => view! { <GalleryApp /> }.into_view(),
        AppId::Trash => view! {
            <TrashApp
                session=trash_session(runtime, window_id)
                on_click=Callback::new(move |_: ()| {
                    runtime.dispatch_action(GameAction::TrashClick { window_id })
                })
            />
        }
        .into_view(),
        AppId::EvidenceViewer => view! { <EvidenceViewerApp /> }.into_view(),
        AppId::CaseFiles => view! {
            <CaseFilesApp
                story=story
                session=case_files_session(runtime, window_id)
                on_select=Callback::new(move |file_id: String| {
                    runtime.dispatch_action(GameAction::SelectCaseFile { window_id, file_id })
                })
                on_decrypt=Callback::new(move |file_id: String| {
                    runtime.dispatch_action(GameAction::AttemptDecryption { window_id, file_id })
                })
                on_choose=on_choose
            />
        }
        .into_view(),
        AppId::Terminal => view! {
            <TerminalApp
                session=terminal_session(runtime, window_id)
                on_submit=Callback::new(move |line: String| {
                    runtime.dispatch_action(GameAction::TerminalSubmit { window_id, line })
                })
                on_keystroke=Callback::new(move |_: ()| {
                    runtime.dispatch_action(GameAction::PlayCue { cue: SoundCue::TerminalKeystroke })
                })
            />
        }
        .into_view(),
        AppId::SecureMessenger => {
            let items =
                Signal::derive(move || runtime.state.with(|s| transcript(s.story, &s.choices)));
            view! { <MessengerApp transcript=items on_choose=on_choose /> }.into_view()
        }
        AppId::SecureAccess => ().into_view(),
    }
}
