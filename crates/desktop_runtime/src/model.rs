use std::collections::{BTreeMap, BTreeSet};

use desktop_app_contract::{AppContext, ChoiceRecord, StoryProgress, SystemIntegrity};
use serde::{Deserialize, Serialize};

use crate::{
    apps::AppSession,
    ending::EndingState,
    scheduler::{ScheduledEvent, Timeline, TimerHandle},
    world::{LocationId, WorldState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Top-level screen. Wire names match the save format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    MainMenu,
    PersonalDesktop,
    GameWorld,
    AgentDesktop,
    GameEnding,
}

impl Screen {
    pub fn desktop_mode(self) -> Option<DesktopMode> {
        match self {
            Self::PersonalDesktop => Some(DesktopMode::Personal),
            Self::AgentDesktop => Some(DesktopMode::Agent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopMode {
    Personal,
    Agent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    Notes,
    Calculator,
    Browser,
    Gallery,
    Trash,
    SecureAccess,
    CaseFiles,
    Terminal,
    EvidenceViewer,
    SecureMessenger,
}

impl AppId {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Calculator => "calculator",
            Self::Browser => "browser",
            Self::Gallery => "gallery",
            Self::Trash => "trash",
            Self::SecureAccess => "secure_access",
            Self::CaseFiles => "case_files",
            Self::Terminal => "terminal",
            Self::EvidenceViewer => "evidence_viewer",
            Self::SecureMessenger => "secure_messenger",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        [
            Self::Notes,
            Self::Calculator,
            Self::Browser,
            Self::Gallery,
            Self::Trash,
            Self::SecureAccess,
            Self::CaseFiles,
            Self::Terminal,
            Self::EvidenceViewer,
            Self::SecureMessenger,
        ]
        .into_iter()
        .find(|app| app.id() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    /// Set by a close request; the record is removed once the exit transition ends.
    pub closing: bool,
}

/// Window registry plus the z-order counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    pub active_window: Option<WindowId>,
    pub next_z_index: u32,
    pub next_window_id: u64,
}

impl DesktopState {
    pub fn new(first_z_index: u32) -> Self {
        Self {
            windows: Vec::new(),
            active_window: None,
            next_z_index: first_z_index,
            next_window_id: 1,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn is_active(&self, window_id: WindowId) -> bool {
        self.active_window == Some(window_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Pointer and window position captured when a header drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// Transient pointer state, kept outside [`GameState`] so it never reaches the save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Header drags in progress, at most one per window.
    pub drags: BTreeMap<WindowId, DragSession>,
}

impl InteractionState {
    pub fn is_dragging(&self, window_id: WindowId) -> bool {
        self.drags.contains_key(&window_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

pub const INTRO_TEXT: &str = "I finally saved up enough for a new laptop. Found a great deal on eBay for a used one... The seller said it was completely wiped. I guess they missed a spot.";

/// Typewriter reveal of the opening monologue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroState {
    revealed: usize,
}

impl IntroState {
    pub fn text(&self) -> &'static str {
        let end = INTRO_TEXT
            .char_indices()
            .nth(self.revealed)
            .map_or(INTRO_TEXT.len(), |(idx, _)| idx);
        &INTRO_TEXT[..end]
    }

    pub fn is_typing(&self) -> bool {
        self.revealed < INTRO_TEXT.chars().count()
    }

    /// Reveals one more character. Returns whether more remain.
    pub fn reveal_next(&mut self) -> bool {
        if self.is_typing() {
            self.revealed += 1;
        }
        self.is_typing()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub error: Option<&'static str>,
}

/// Full-screen and floating layers drawn above the current screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
    pub intro: Option<IntroState>,
    pub login: Option<LoginState>,
    pub paused: bool,
    pub crashed: bool,
    /// Pending end of the damage flash; the flash shows while this is set.
    pub damage_flash: Option<TimerHandle>,
    pub collision_debug: bool,
}

impl Overlays {
    /// Whether an overlay that swallows the pause key is up.
    pub fn blocks_pause(&self) -> bool {
        self.intro.is_some() || self.login.is_some() || self.crashed
    }
}

/// Tracks which objective the player closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveState {
    pub dismissed_at: Option<StoryProgress>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub screen: Screen,
    pub story: StoryProgress,
    pub integrity: SystemIntegrity,
    pub choices: ChoiceRecord,
    pub location_id: LocationId,
    pub opened_apps: BTreeSet<AppId>,
    pub disabled_systems: Vec<String>,
    pub password: String,
    /// Whether a save exists in the store.
    pub has_save: bool,
    /// Set once boot hydration finished; saves are suppressed before that.
    pub hydrated: bool,
    pub desktop: DesktopState,
    pub sessions: BTreeMap<WindowId, AppSession>,
    pub overlays: Overlays,
    pub objective: ObjectiveState,
    pub ending: Option<EndingState>,
    pub world: WorldState,
    pub timeline: Timeline<ScheduledEvent>,
    pub viewport: Viewport,
}

impl GameState {
    pub fn new(password: String, first_z_index: u32) -> Self {
        let location_id = LocationId::default();
        Self {
            screen: Screen::MainMenu,
            story: StoryProgress::ZERO,
            integrity: SystemIntegrity::FULL,
            choices: ChoiceRecord::new(),
            location_id,
            opened_apps: BTreeSet::new(),
            disabled_systems: Vec::new(),
            password,
            has_save: false,
            hydrated: false,
            desktop: DesktopState::new(first_z_index),
            sessions: BTreeMap::new(),
            overlays: Overlays::default(),
            objective: ObjectiveState::default(),
            ending: None,
            world: WorldState::spawn(location_id),
            timeline: Timeline::default(),
            viewport: Viewport::default(),
        }
    }

    /// Read-only snapshot handed to app logic.
    pub fn app_context(&self) -> AppContext {
        AppContext {
            story: self.story,
            integrity: self.integrity,
            choices: self.choices.clone(),
            password: self.password.clone(),
            location_id: self.location_id.id().to_string(),
            disabled_systems: self.disabled_systems.clone(),
        }
    }

    pub fn desktop_mode(&self) -> Option<DesktopMode> {
        self.screen.desktop_mode()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn app_ids_round_trip_through_wire_names() {
        for raw in ["notes", "secure_access", "case_files", "evidence_viewer"] {
            assert_eq!(AppId::from_id(raw).map(AppId::id), Some(raw));
        }
        assert_eq!(AppId::from_id("paint"), None);
        assert_eq!(
            serde_json::to_string(&AppId::SecureMessenger).expect("ser"),
            "\"secure_messenger\""
        );
    }

    #[test]
    fn screen_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&Screen::AgentDesktop).expect("ser"),
            "\"agent_desktop\""
        );
        let screen: Screen = serde_json::from_str("\"game_world\"").expect("de");
        assert_eq!(screen, Screen::GameWorld);
    }

    #[test]
    fn intro_reveals_one_character_at_a_time() {
        let mut intro = IntroState::default();
        assert_eq!(intro.text(), "");
        assert!(intro.reveal_next());
        assert_eq!(intro.text(), "I");
        while intro.reveal_next() {}
        assert_eq!(intro.text(), INTRO_TEXT);
        assert!(!intro.is_typing());
    }
}
