//! Reducer actions, side-effect intents, and transition logic for the game runtime.

mod app_host;

use desktop_app_contract::{AppHost, Clue, DialogueChoice, StoryProgress, SystemIntegrity};
use desktop_app_messenger::transcript;
use leptos::logging;
use rand::RngCore;
use thiserror::Error;

use crate::{
    apps::{agent_window_apps, desktop_app, AppSession},
    config::RuntimeConfig,
    ending::{Ending, EndingState},
    input::{self, InputCommand},
    integrity,
    model::{
        AppId, GameState, InteractionState, LoginState, PointerPosition, Screen, Viewport,
        WindowId, WindowRect,
    },
    persistence::SaveFile,
    scheduler::{ScheduledEvent, TimerScope},
    session, story,
    window_manager,
    world::{location, nearby_interaction, InteractionKind, LocationId, WalkChange},
};

pub(crate) use app_host::GameHost;

/// Progress at which opening every agent app moves the story on.
const FIRST_MISSION: StoryProgress = StoryProgress::from_thousandths(1000);
/// Progress at which opening the case files moves the story on.
const CASE_FILES_MISSION: StoryProgress = StoryProgress::from_thousandths(2000);
const OPEN_APP_STEP: StoryProgress = StoryProgress::from_thousandths(100);

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_game`].
pub enum GameAction {
    /// Boot hydration finished; `None` when no usable save exists.
    HydrateSave { save: Option<SaveFile> },
    NewGame,
    ContinueGame,
    /// Deletes the save and returns to the main menu.
    ResetGame,
    IntroFinished,

    OpenApp { app_id: AppId },
    FocusWindow { window_id: WindowId },
    ToggleMinimize { window_id: WindowId },
    CloseWindow { window_id: WindowId },
    /// Removes a window once its exit transition finished.
    RemoveWindow { window_id: WindowId },
    ToggleMaximize { window_id: WindowId, viewport: WindowRect },
    TaskbarClick { window_id: WindowId },
    BeginMove { window_id: WindowId, pointer: PointerPosition },
    UpdateMove { window_id: WindowId, pointer: PointerPosition },
    EndMove { window_id: WindowId },

    SubmitLogin { attempt: String },
    CloseLogin,
    Logout,
    /// Leaves the personal desktop for the world.
    StepAway,

    DismissObjective,
    TogglePause,
    Resume,

    KeyDown { key: String },
    KeyUp { key: String },
    SetViewport { viewport: Viewport },
    /// One physics step of the world view.
    AnimationFrame,
    /// Fires every scheduled event that is due.
    Tick,

    TerminalSubmit { window_id: WindowId, line: String },
    SelectCaseFile { window_id: WindowId, file_id: String },
    AttemptDecryption { window_id: WindowId, file_id: String },
    Choose { choice: DialogueChoice },
    TrashClick { window_id: WindowId },
    PlayCue { cue: SoundCue },

    Interact,
    Navigate { location: LocationId },
    FindClue { clue: Clue },
    AccessLaptop,
    DisableSystem { name: String, cost: u32 },
    ToggleCollisionDebug,
}

/// Named sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    WalkStart,
    WalkStop,
    UiClick,
    WindowOpen,
    WindowClose,
    WindowMinimize,
    TerminalKeystroke,
    NewMessage,
    NewObjective,
    LoginSuccess,
    LoginFail,
    Logout,
    DecryptionSuccess,
    DecryptionFail,
    SystemDamage,
    SystemCrash,
    PauseIn,
    PauseOut,
    RpgInteract,
    RpgPortal,
}

impl SoundCue {
    pub const fn name(self) -> &'static str {
        match self {
            Self::WalkStart | Self::WalkStop => "walk",
            Self::UiClick => "ui_click",
            Self::WindowOpen => "window_open",
            Self::WindowClose => "window_close",
            Self::WindowMinimize => "window_minimize",
            Self::TerminalKeystroke => "terminal_keystroke",
            Self::NewMessage => "new_message",
            Self::NewObjective => "new_objective",
            Self::LoginSuccess => "login_success",
            Self::LoginFail => "login_fail",
            Self::Logout => "logout",
            Self::DecryptionSuccess => "decryption_success",
            Self::DecryptionFail => "decryption_fail",
            Self::SystemDamage => "system_damage",
            Self::SystemCrash => "system_crash",
            Self::PauseIn => "pause_in",
            Self::PauseOut => "pause_out",
            Self::RpgInteract => "rpg_interact",
            Self::RpgPortal => "rpg_portal",
        }
    }

    pub fn asset_path(self) -> String {
        format!("/assets/audio/{}.mp3", self.name())
    }

    pub const fn volume(self) -> f64 {
        match self {
            Self::WalkStart | Self::WalkStop | Self::TerminalKeystroke => 0.4,
            Self::NewMessage => 0.7,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_game`] for the host to execute.
pub enum RuntimeEffect {
    PersistSave,
    ClearSave,
    /// Run one more [`GameAction::AnimationFrame`] on the next browser frame.
    RequestFrame,
    /// Dispatch [`GameAction::Tick`] no earlier than `at_ms`.
    ScheduleWake { at_ms: u64 },
    /// Move focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
    Cue(SoundCue),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference something that does not exist or is not allowed.
pub enum ReducerError {
    #[error("window not found")]
    WindowNotFound,
    #[error("app `{0}` is not available on this screen")]
    UnknownApp(&'static str),
    #[error("unknown location")]
    UnknownLocation,
    #[error("location `{0}` is still locked")]
    LocationLocked(&'static str),
    #[error("action not valid on the {0:?} screen")]
    InvalidScreen(Screen),
}

/// Inputs the reducer reads besides state: tunables, the random source and the clock.
pub struct ReduceEnv<'a> {
    pub config: &'a RuntimeConfig,
    pub rng: &'a mut dyn RngCore,
    pub now_ms: u64,
}

/// Facts compared before and after an action.
struct Before {
    story: StoryProgress,
    integrity: SystemIntegrity,
    hydrated: bool,
    save: SaveFile,
}

impl Before {
    fn of(state: &GameState) -> Self {
        Self {
            story: state.story,
            integrity: state.integrity,
            hydrated: state.hydrated,
            save: SaveFile::capture(state),
        }
    }
}

/// Applies a [`GameAction`] and collects resulting side effects.
///
/// After the action itself, follow-up rules run in a fixed order: the all-apps mission step,
/// damage flash and crash latch, objective and message cues, then persistence and wake-ups.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action references a missing window, an app that is not on
/// the current desktop, a locked location, or is invalid on the current screen. State may be
/// partially updated on error and should be discarded by the caller.
pub fn reduce_game(
    state: &mut GameState,
    interaction: &mut InteractionState,
    action: GameAction,
    env: &mut ReduceEnv<'_>,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let before = Before::of(state);
    let mut effects = Vec::new();
    apply_action(state, interaction, action, env, &mut effects)?;
    settle(state, &before, env, &mut effects);
    Ok(effects)
}

fn apply_action(
    state: &mut GameState,
    interaction: &mut InteractionState,
    action: GameAction,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let config = env.config;
    let now_ms = env.now_ms;
    match action {
        GameAction::HydrateSave { save } => {
            match save {
                Some(save) => {
                    save.restore_into(state, env.rng);
                    if state.screen == Screen::GameWorld {
                        session::enter_world(state, config, now_ms);
                    }
                    logging::log!("save restored at progress {}", state.story);
                }
                None => state.has_save = false,
            }
            state.hydrated = true;
        }
        GameAction::NewGame => {
            *interaction = InteractionState::default();
            session::new_game(state, env.rng, config, now_ms);
        }
        GameAction::ContinueGame => session::continue_game(state, config, now_ms),
        GameAction::ResetGame => {
            *interaction = InteractionState::default();
            effects.extend(halt_world(state));
            session::reset_game(state, env.rng, config);
            effects.push(RuntimeEffect::ClearSave);
        }
        GameAction::IntroFinished => {
            if state.overlays.intro.take().is_some() {
                session::enter_world(state, config, now_ms);
            }
        }

        GameAction::OpenApp { app_id } => open_app(state, app_id, env, effects)?,
        GameAction::FocusWindow { window_id } => {
            require_window(state, window_id)?;
            if window_manager::focus_window(&mut state.desktop, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        GameAction::ToggleMinimize { window_id } => {
            match window_manager::toggle_minimize(&mut state.desktop, window_id) {
                Some(true) => effects.push(RuntimeEffect::Cue(SoundCue::WindowMinimize)),
                Some(false) => effects.push(RuntimeEffect::FocusWindowInput(window_id)),
                None => return Err(ReducerError::WindowNotFound),
            }
        }
        GameAction::CloseWindow { window_id } => {
            let newly = window_manager::begin_close(&mut state.desktop, window_id)
                .ok_or(ReducerError::WindowNotFound)?;
            if newly {
                window_manager::end_move(interaction, window_id);
                state.timeline.schedule(
                    TimerScope::Window(window_id),
                    now_ms + config.delays.window_exit_ms,
                    ScheduledEvent::WindowExit { window_id },
                );
                effects.push(RuntimeEffect::Cue(SoundCue::WindowClose));
            }
        }
        GameAction::RemoveWindow { window_id } => {
            if !remove_window(state, window_id) {
                return Err(ReducerError::WindowNotFound);
            }
        }
        GameAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            if !window_manager::toggle_maximize(&mut state.desktop, window_id, viewport) {
                return Err(ReducerError::WindowNotFound);
            }
        }
        GameAction::TaskbarClick { window_id } => {
            match window_manager::taskbar_click(&mut state.desktop, window_id) {
                Some(true) => effects.push(RuntimeEffect::Cue(SoundCue::WindowMinimize)),
                Some(false) => effects.push(RuntimeEffect::FocusWindowInput(window_id)),
                None => return Err(ReducerError::WindowNotFound),
            }
        }
        GameAction::BeginMove { window_id, pointer } => {
            if !window_manager::begin_move(&mut state.desktop, interaction, window_id, pointer) {
                return Err(ReducerError::WindowNotFound);
            }
        }
        GameAction::UpdateMove { window_id, pointer } => {
            window_manager::update_move(&mut state.desktop, interaction, window_id, pointer);
        }
        GameAction::EndMove { window_id } => {
            window_manager::end_move(interaction, window_id);
        }

        GameAction::SubmitLogin { attempt } => {
            if session::submit_login(state, &attempt) {
                *interaction = InteractionState::default();
                effects.push(RuntimeEffect::Cue(SoundCue::LoginSuccess));
            } else {
                effects.push(RuntimeEffect::Cue(SoundCue::LoginFail));
            }
        }
        GameAction::CloseLogin => state.overlays.login = None,
        GameAction::Logout => {
            require_screen(state, Screen::AgentDesktop)?;
            *interaction = InteractionState::default();
            session::switch_screen(state, Screen::PersonalDesktop);
            effects.push(RuntimeEffect::Cue(SoundCue::Logout));
        }
        GameAction::StepAway => {
            require_screen(state, Screen::PersonalDesktop)?;
            *interaction = InteractionState::default();
            session::enter_world(state, config, now_ms);
        }

        GameAction::DismissObjective => state.objective.dismissed_at = Some(state.story),
        GameAction::TogglePause => toggle_pause(state, effects),
        GameAction::Resume => {
            if std::mem::take(&mut state.overlays.paused) {
                effects.push(RuntimeEffect::Cue(SoundCue::PauseOut));
            }
        }

        GameAction::KeyDown { key } => match input::command_for_key(&key) {
            Some(InputCommand::TogglePause) => toggle_pause(state, effects),
            Some(InputCommand::ToggleCollisionDebug) => {
                state.overlays.collision_debug = !state.overlays.collision_debug;
            }
            Some(InputCommand::Interact) => interact(state, env, effects)?,
            Some(InputCommand::Move(key)) => {
                if input::world_accepts_input(state) {
                    state.world.keys.set(key, true);
                }
            }
            None => {}
        },
        GameAction::KeyUp { key } => {
            if let Some(InputCommand::Move(key)) = input::command_for_key(&key) {
                state.world.keys.set(key, false);
            }
        }
        GameAction::SetViewport { viewport } => state.viewport = viewport,
        GameAction::AnimationFrame => {
            if input::world_accepts_input(state) {
                let walk = state
                    .world
                    .advance_frame(state.location_id, config, now_ms);
                effects.extend(walk.map(walk_cue));
            }
        }
        GameAction::Tick => run_due_events(state, interaction, env, effects),

        GameAction::TerminalSubmit { window_id, line } => {
            let ctx = state.app_context();
            let Some(AppSession::Terminal(terminal)) = state.sessions.get_mut(&window_id) else {
                return Err(ReducerError::WindowNotFound);
            };
            if let Some(job) = terminal.submit(&line, &ctx, now_ms) {
                let delay = match job {
                    desktop_app_terminal::TerminalJob::Breach => config.delays.breach_ms,
                    desktop_app_terminal::TerminalJob::Repair => config.delays.repair_ms,
                };
                state.timeline.schedule(
                    TimerScope::Window(window_id),
                    now_ms + delay,
                    ScheduledEvent::TerminalJob { window_id, job },
                );
            }
        }
        GameAction::SelectCaseFile { window_id, file_id } => {
            let Some(AppSession::CaseFiles(files)) = state.sessions.get_mut(&window_id) else {
                return Err(ReducerError::WindowNotFound);
            };
            files.select(&file_id);
            effects.push(RuntimeEffect::Cue(SoundCue::UiClick));
        }
        GameAction::AttemptDecryption { window_id, file_id } => {
            let Some(AppSession::CaseFiles(files)) = state.sessions.get_mut(&window_id) else {
                return Err(ReducerError::WindowNotFound);
            };
            if let Some(job) = files.begin_decryption(&file_id) {
                state.timeline.schedule(
                    TimerScope::Window(window_id),
                    now_ms + config.delays.decrypt_ms,
                    ScheduledEvent::Decryption { window_id, job },
                );
                effects.push(RuntimeEffect::Cue(SoundCue::UiClick));
            }
        }
        GameAction::Choose { choice } => {
            let mut host = GameHost::new(state, env.rng);
            host.choose(choice);
            let ending = host.ending;
            if let Some(ending) = ending {
                *interaction = InteractionState::default();
                start_ending(state, ending, config, now_ms);
            }
        }
        GameAction::TrashClick { window_id } => {
            let Some(AppSession::Trash(trash)) = state.sessions.get_mut(&window_id) else {
                return Err(ReducerError::WindowNotFound);
            };
            trash.click();
        }
        GameAction::PlayCue { cue } => effects.push(RuntimeEffect::Cue(cue)),

        GameAction::Interact => interact(state, env, effects)?,
        GameAction::Navigate { location } => navigate(state, location, env, effects)?,
        GameAction::FindClue { clue } => {
            effects.extend(halt_world(state));
            GameHost::new(state, env.rng).find_clue(clue);
            *interaction = InteractionState::default();
            effects.push(RuntimeEffect::Cue(SoundCue::RpgInteract));
        }
        GameAction::AccessLaptop => {
            require_screen(state, Screen::GameWorld)?;
            effects.extend(halt_world(state));
            session::switch_screen(state, Screen::PersonalDesktop);
            effects.push(RuntimeEffect::Cue(SoundCue::RpgInteract));
        }
        GameAction::DisableSystem { name, cost } => {
            GameHost::new(state, env.rng).disable_system(&name, cost);
        }
        GameAction::ToggleCollisionDebug => {
            state.overlays.collision_debug = !state.overlays.collision_debug;
        }
    }
    Ok(())
}

fn require_window(state: &GameState, window_id: WindowId) -> Result<(), ReducerError> {
    state
        .desktop
        .window(window_id)
        .map(|_| ())
        .ok_or(ReducerError::WindowNotFound)
}

fn require_screen(state: &GameState, screen: Screen) -> Result<(), ReducerError> {
    if state.screen == screen {
        Ok(())
    } else {
        Err(ReducerError::InvalidScreen(state.screen))
    }
}

fn walk_cue(change: WalkChange) -> RuntimeEffect {
    RuntimeEffect::Cue(match change {
        WalkChange::Started => SoundCue::WalkStart,
        WalkChange::Stopped => SoundCue::WalkStop,
    })
}

fn halt_world(state: &mut GameState) -> Option<RuntimeEffect> {
    state.world.halt().map(walk_cue)
}

fn toggle_pause(state: &mut GameState, effects: &mut Vec<RuntimeEffect>) {
    if !input::can_toggle_pause(state) {
        return;
    }
    state.overlays.paused = !state.overlays.paused;
    if state.overlays.paused {
        effects.extend(halt_world(state));
        effects.push(RuntimeEffect::Cue(SoundCue::PauseIn));
    } else {
        effects.push(RuntimeEffect::Cue(SoundCue::PauseOut));
    }
}

fn open_app(
    state: &mut GameState,
    app_id: AppId,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let mode = state
        .desktop_mode()
        .ok_or(ReducerError::InvalidScreen(state.screen))?;
    let app = desktop_app(mode, app_id).ok_or(ReducerError::UnknownApp(app_id.id()))?;
    if app.launcher_only {
        state.overlays.login = Some(LoginState::default());
        return Ok(());
    }

    if state.screen == Screen::AgentDesktop {
        state.opened_apps.insert(app_id);
        if app_id == AppId::CaseFiles && state.story == CASE_FILES_MISSION {
            story::advance(state, OPEN_APP_STEP);
        }
    }

    if let Some(existing) = window_manager::visible_window_for_app(&state.desktop, app_id) {
        if window_manager::focus_window(&mut state.desktop, existing) {
            effects.push(RuntimeEffect::FocusWindowInput(existing));
        }
        return Ok(());
    }

    let window_id = window_manager::open_window(&mut state.desktop, app, &env.config.windows, env.rng);
    if let Some(session) = AppSession::for_app(app_id) {
        state.sessions.insert(window_id, session);
    }
    effects.push(RuntimeEffect::Cue(SoundCue::WindowOpen));
    effects.push(RuntimeEffect::FocusWindowInput(window_id));
    Ok(())
}

fn remove_window(state: &mut GameState, window_id: WindowId) -> bool {
    state.timeline.cancel_scope(TimerScope::Window(window_id));
    state.sessions.remove(&window_id);
    window_manager::remove_window(&mut state.desktop, window_id)
}

fn interact(
    state: &mut GameState,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if !input::world_accepts_input(state) || !state.world.scene_ready {
        return Ok(());
    }
    let Some(target) = nearby_interaction(state.location_id, state.story, state.world.position)
    else {
        return Ok(());
    };
    match target.kind {
        InteractionKind::AccessLaptop => {
            effects.extend(halt_world(state));
            session::switch_screen(state, Screen::PersonalDesktop);
            effects.push(RuntimeEffect::Cue(SoundCue::RpgInteract));
        }
        InteractionKind::FindClue(clue) => {
            effects.extend(halt_world(state));
            GameHost::new(state, env.rng).find_clue(clue);
            effects.push(RuntimeEffect::Cue(SoundCue::RpgInteract));
        }
        InteractionKind::Navigate(destination) => navigate(state, destination, env, effects)?,
    }
    Ok(())
}

fn navigate(
    state: &mut GameState,
    destination: LocationId,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let target = location(destination);
    if !target.is_unlocked(state.story) {
        return Err(ReducerError::LocationLocked(destination.id()));
    }
    effects.extend(halt_world(state));
    state.location_id = destination;
    session::enter_world(state, env.config, env.now_ms);
    effects.push(RuntimeEffect::Cue(SoundCue::RpgPortal));
    Ok(())
}

fn start_ending(state: &mut GameState, ending: Ending, config: &RuntimeConfig, now_ms: u64) {
    logging::log!("ending selected: {}", ending.title());
    session::switch_screen(state, Screen::GameEnding);
    state.overlays.paused = false;
    state.ending = Some(EndingState::new(ending));
    state.timeline.schedule(
        TimerScope::Session,
        now_ms + config.narrative.ending_line_ms,
        ScheduledEvent::EndingLine,
    );
}

fn run_due_events(
    state: &mut GameState,
    interaction: &mut InteractionState,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<RuntimeEffect>,
) {
    let config = env.config;
    let now_ms = env.now_ms;
    for due in state.timeline.drain_due(now_ms) {
        match due.event {
            ScheduledEvent::TerminalJob { window_id, job } => {
                let Some(AppSession::Terminal(mut terminal)) = state.sessions.remove(&window_id)
                else {
                    continue;
                };
                let story = state.story;
                terminal.complete(job, story, &mut GameHost::new(state, env.rng));
                state.sessions.insert(window_id, AppSession::Terminal(terminal));
            }
            ScheduledEvent::Decryption { window_id, job } => {
                let Some(AppSession::CaseFiles(mut files)) = state.sessions.remove(&window_id)
                else {
                    continue;
                };
                let ok = files.resolve_decryption(&job, &mut GameHost::new(state, env.rng));
                state.sessions.insert(window_id, AppSession::CaseFiles(files));
                effects.push(RuntimeEffect::Cue(if ok {
                    SoundCue::DecryptionSuccess
                } else {
                    SoundCue::DecryptionFail
                }));
            }
            ScheduledEvent::WindowExit { window_id } => {
                remove_window(state, window_id);
            }
            ScheduledEvent::IntroChar => {
                if let Some(intro) = state.overlays.intro.as_mut() {
                    if intro.reveal_next() {
                        state.timeline.schedule(
                            TimerScope::Session,
                            now_ms + config.narrative.intro_char_ms,
                            ScheduledEvent::IntroChar,
                        );
                    }
                }
            }
            ScheduledEvent::EndingLine => {
                if let Some(ending) = state.ending.as_mut() {
                    let (delay, next) = if ending.reveal_next() {
                        (config.narrative.ending_line_ms, ScheduledEvent::EndingLine)
                    } else {
                        (config.narrative.ending_menu_delay_ms, ScheduledEvent::EndingMenuReady)
                    };
                    state
                        .timeline
                        .schedule(TimerScope::Session, now_ms + delay, next);
                }
            }
            ScheduledEvent::EndingMenuReady => {
                if let Some(ending) = state.ending.as_mut() {
                    ending.menu_ready = true;
                }
            }
            ScheduledEvent::SceneReady => state.world.scene_ready = true,
            ScheduledEvent::CrashReset => {
                logging::warn!("core integrity depleted; resetting game");
                *interaction = InteractionState::default();
                session::reset_game(state, env.rng, config);
                effects.push(RuntimeEffect::ClearSave);
                // Anything drained alongside the reset belongs to the discarded game.
                break;
            }
            ScheduledEvent::DamageFlashEnd => state.overlays.damage_flash = None,
        }
    }
}

fn settle(
    state: &mut GameState,
    before: &Before,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<RuntimeEffect>,
) {
    let config = env.config;

    if state.screen == Screen::AgentDesktop
        && state.story == FIRST_MISSION
        && agent_window_apps().all(|app| state.opened_apps.contains(&app))
    {
        story::advance(state, OPEN_APP_STEP);
    }

    let change = integrity::settle(state, before.integrity, &config.delays, env.now_ms);
    if change.crashed {
        effects.push(RuntimeEffect::Cue(SoundCue::SystemCrash));
    } else if change.damaged {
        effects.push(RuntimeEffect::Cue(SoundCue::SystemDamage));
    }

    let objective_changed = story::active_objective(before.story).map(|o| o.required)
        != story::active_objective(state.story).map(|o| o.required);
    if objective_changed && story::active_objective(state.story).is_some() {
        effects.push(RuntimeEffect::Cue(SoundCue::NewObjective));
    }

    let items = transcript(state.story, &state.choices);
    let mut new_message = false;
    for session in state.sessions.values_mut() {
        if let AppSession::Messenger(messenger) = session {
            new_message |= messenger.observe(&items);
        }
    }
    if new_message {
        effects.push(RuntimeEffect::Cue(SoundCue::NewMessage));
    }

    let cleared = effects.contains(&RuntimeEffect::ClearSave);
    if before.hydrated && state.hydrated && !cleared && SaveFile::capture(state) != before.save {
        state.has_save = true;
        effects.push(RuntimeEffect::PersistSave);
    }

    if input::world_accepts_input(state) && state.world.needs_frame() {
        effects.push(RuntimeEffect::RequestFrame);
    }
    if let Some(at_ms) = state.timeline.next_due_at() {
        effects.push(RuntimeEffect::ScheduleWake { at_ms });
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_case_files::DecryptStatus;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::world::{MoveKey, Vec2};

    /// Samples `0.0` from `gen::<f64>()`, so every risky action succeeds.
    struct AlwaysSucceed;

    /// Samples just below `1.0`, so every risky action fails. Integer ranges still draw their
    /// lowest value so passwords and window spawns stay deterministic.
    struct AlwaysFail;

    macro_rules! fixed_rng {
        ($name:ident, $value:expr) => {
            impl RngCore for $name {
                fn next_u32(&mut self) -> u32 {
                    0
                }
                fn next_u64(&mut self) -> u64 {
                    $value
                }
                fn fill_bytes(&mut self, dest: &mut [u8]) {
                    dest.fill(0);
                }
                fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                    self.fill_bytes(dest);
                    Ok(())
                }
            }
        };
    }

    fixed_rng!(AlwaysSucceed, 0u64);
    fixed_rng!(AlwaysFail, u64::MAX);

    struct Harness {
        state: GameState,
        interaction: InteractionState,
        config: RuntimeConfig,
        now_ms: u64,
        fail_rolls: bool,
    }

    impl Harness {
        fn new() -> Self {
            let config = RuntimeConfig::default();
            let mut state = GameState::new("GHOSTFOX42".to_string(), config.windows.first_z_index);
            state.hydrated = true;
            Self {
                state,
                interaction: InteractionState::default(),
                config,
                now_ms: 1_000,
                fail_rolls: false,
            }
        }

        fn try_dispatch(&mut self, action: GameAction) -> Result<Vec<RuntimeEffect>, ReducerError> {
            let mut succeed = AlwaysSucceed;
            let mut fail = AlwaysFail;
            let rng: &mut dyn RngCore = if self.fail_rolls { &mut fail } else { &mut succeed };
            let mut env = ReduceEnv {
                config: &self.config,
                rng,
                now_ms: self.now_ms,
            };
            reduce_game(&mut self.state, &mut self.interaction, action, &mut env)
        }

        fn dispatch(&mut self, action: GameAction) -> Vec<RuntimeEffect> {
            self.try_dispatch(action).expect("action should apply")
        }

        fn advance(&mut self, ms: u64) -> Vec<RuntimeEffect> {
            self.now_ms += ms;
            self.dispatch(GameAction::Tick)
        }

        fn on_agent_desktop(&mut self) {
            self.state.screen = Screen::PersonalDesktop;
            self.dispatch(GameAction::SubmitLogin {
                attempt: "GHOSTFOX42".to_string(),
            });
        }

        fn open(&mut self, app_id: AppId) -> WindowId {
            self.dispatch(GameAction::OpenApp { app_id });
            self.state
                .desktop
                .windows
                .iter()
                .find(|w| w.app_id == app_id && !w.closing)
                .map(|w| w.id)
                .expect("window opened")
        }
    }

    fn has_cue(effects: &[RuntimeEffect], cue: SoundCue) -> bool {
        effects.contains(&RuntimeEffect::Cue(cue))
    }

    #[test]
    fn opening_twice_keeps_a_single_window() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        let first = h.open(AppId::Terminal);
        let effects = h.dispatch(GameAction::OpenApp {
            app_id: AppId::Terminal,
        });
        assert_eq!(h.state.desktop.windows.len(), 1);
        assert!(!has_cue(&effects, SoundCue::WindowOpen));
        assert_eq!(h.state.desktop.active_window, Some(first));
    }

    #[test]
    fn apps_from_the_other_desktop_are_rejected() {
        let mut h = Harness::new();
        h.state.screen = Screen::PersonalDesktop;
        let err = h.try_dispatch(GameAction::OpenApp {
            app_id: AppId::Terminal,
        });
        assert_eq!(err, Err(ReducerError::UnknownApp("terminal")));
        h.state.screen = Screen::GameWorld;
        let err = h.try_dispatch(GameAction::OpenApp {
            app_id: AppId::Notes,
        });
        assert_eq!(err, Err(ReducerError::InvalidScreen(Screen::GameWorld)));
    }

    #[test]
    fn secure_access_opens_login_instead_of_window() {
        let mut h = Harness::new();
        h.state.screen = Screen::PersonalDesktop;
        h.dispatch(GameAction::OpenApp {
            app_id: AppId::SecureAccess,
        });
        assert!(h.state.desktop.windows.is_empty());
        assert_eq!(h.state.overlays.login, Some(LoginState::default()));

        let effects = h.dispatch(GameAction::SubmitLogin {
            attempt: "nope".to_string(),
        });
        assert!(has_cue(&effects, SoundCue::LoginFail));
        assert_eq!(h.state.screen, Screen::PersonalDesktop);
    }

    #[test]
    fn opening_every_agent_app_advances_first_mission() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        assert_eq!(h.state.story, StoryProgress::from_f64(1.0));
        for app in [AppId::CaseFiles, AppId::Terminal, AppId::EvidenceViewer] {
            h.open(app);
            assert_eq!(h.state.story, StoryProgress::from_f64(1.0));
        }
        let effects = h.dispatch(GameAction::OpenApp {
            app_id: AppId::SecureMessenger,
        });
        assert_eq!(h.state.story, StoryProgress::from_f64(1.1));
        assert!(has_cue(&effects, SoundCue::NewObjective));
        assert!(effects.contains(&RuntimeEffect::PersistSave));
    }

    #[test]
    fn case_files_at_two_advances_once() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        h.state.story = StoryProgress::from_f64(2.0);
        h.open(AppId::CaseFiles);
        assert_eq!(h.state.story, StoryProgress::from_f64(2.1));
        h.open(AppId::CaseFiles);
        assert_eq!(h.state.story, StoryProgress::from_f64(2.1));
    }

    #[test]
    fn close_waits_for_exit_transition() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        let terminal = h.open(AppId::Terminal);
        let effects = h.dispatch(GameAction::CloseWindow {
            window_id: terminal,
        });
        assert!(has_cue(&effects, SoundCue::WindowClose));
        assert!(effects.contains(&RuntimeEffect::ScheduleWake { at_ms: 1_200 }));
        let again = h.dispatch(GameAction::CloseWindow {
            window_id: terminal,
        });
        assert!(!has_cue(&again, SoundCue::WindowClose));
        assert_eq!(h.state.timeline.len(), 1);

        h.advance(199);
        assert_eq!(h.state.desktop.windows.len(), 1);
        h.advance(1);
        assert!(h.state.desktop.windows.is_empty());
        assert!(h.state.sessions.is_empty());
        assert_eq!(h.state.desktop.active_window, None);
        assert_eq!(
            h.try_dispatch(GameAction::RemoveWindow {
                window_id: terminal
            }),
            Err(ReducerError::WindowNotFound)
        );
    }

    #[test]
    fn decryption_resolves_after_delay() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        h.state.story = StoryProgress::from_f64(3.0);
        let files = h.open(AppId::CaseFiles);
        h.dispatch(GameAction::AttemptDecryption {
            window_id: files,
            file_id: "CYB-003".to_string(),
        });
        h.dispatch(GameAction::AttemptDecryption {
            window_id: files,
            file_id: "CYB-003".to_string(),
        });
        assert_eq!(h.state.timeline.len(), 1);

        h.fail_rolls = true;
        let effects = h.advance(1_500);
        assert!(has_cue(&effects, SoundCue::DecryptionFail));
        assert!(has_cue(&effects, SoundCue::SystemDamage));
        assert_eq!(h.state.integrity.value(), 85);
        assert!(h.state.overlays.damage_flash.is_some());
        let Some(AppSession::CaseFiles(session)) = h.state.sessions.get(&files) else {
            panic!("case files session");
        };
        assert_eq!(session.status("CYB-003"), Some(DecryptStatus::Failed));
        h.advance(300);
        assert!(h.state.overlays.damage_flash.is_none());
    }

    #[test]
    fn failed_breach_at_low_health_crashes_then_resets() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        h.state.story = StoryProgress::from_f64(3.2);
        h.state.integrity = SystemIntegrity::new(20);
        let terminal = h.open(AppId::Terminal);
        h.dispatch(GameAction::TerminalSubmit {
            window_id: terminal,
            line: "breach firewall_europa".to_string(),
        });
        h.fail_rolls = true;
        let effects = h.advance(3_000);
        assert!(h.state.integrity.is_depleted());
        assert!(h.state.overlays.crashed);
        assert!(has_cue(&effects, SoundCue::SystemCrash));

        let effects = h.advance(5_000);
        assert!(effects.contains(&RuntimeEffect::ClearSave));
        assert!(!effects.contains(&RuntimeEffect::PersistSave));
        assert_eq!(h.state.screen, Screen::MainMenu);
        assert!(!h.state.overlays.crashed);
        assert!(!h.state.has_save);
        assert_eq!(h.state.integrity, SystemIntegrity::FULL);
    }

    #[test]
    fn escape_respects_blocking_overlays() {
        let mut h = Harness::new();
        h.dispatch(GameAction::KeyDown {
            key: "Escape".to_string(),
        });
        assert!(!h.state.overlays.paused);

        h.state.screen = Screen::PersonalDesktop;
        let effects = h.dispatch(GameAction::KeyDown {
            key: "Escape".to_string(),
        });
        assert!(h.state.overlays.paused);
        assert!(has_cue(&effects, SoundCue::PauseIn));
        h.dispatch(GameAction::Resume);
        assert!(!h.state.overlays.paused);

        h.state.overlays.login = Some(LoginState::default());
        h.dispatch(GameAction::KeyDown {
            key: "Escape".to_string(),
        });
        assert!(!h.state.overlays.paused);

        h.dispatch(GameAction::KeyDown {
            key: "`".to_string(),
        });
        assert!(h.state.overlays.collision_debug);
    }

    #[test]
    fn world_frames_run_until_motion_settles() {
        let mut h = Harness::new();
        h.dispatch(GameAction::ContinueGame);
        assert_eq!(h.state.screen, Screen::GameWorld);
        let effects = h.dispatch(GameAction::KeyDown {
            key: "a".to_string(),
        });
        assert!(effects.contains(&RuntimeEffect::RequestFrame));
        assert!(h.state.world.keys.left);

        let effects = h.dispatch(GameAction::AnimationFrame);
        assert!(has_cue(&effects, SoundCue::WalkStart));
        h.dispatch(GameAction::KeyUp {
            key: "A".to_string(),
        });
        let mut frames = 0;
        loop {
            h.now_ms += 16;
            let effects = h.dispatch(GameAction::AnimationFrame);
            frames += 1;
            if !effects.contains(&RuntimeEffect::RequestFrame) {
                break;
            }
            assert!(frames < 500, "camera never converged");
        }
        assert_eq!(h.state.world.camera, h.state.world.position);
        assert_eq!(h.state.world.velocity, Vec2::ZERO);
    }

    #[test]
    fn interact_uses_the_nearest_object() {
        let mut h = Harness::new();
        h.dispatch(GameAction::ContinueGame);
        h.advance(50);
        assert!(h.state.world.scene_ready);
        // Laptop centre is (274, 184).
        h.state.world.position = Vec2 { x: 250.0, y: 152.0 };
        let effects = h.dispatch(GameAction::KeyDown {
            key: "e".to_string(),
        });
        assert!(has_cue(&effects, SoundCue::RpgInteract));
        assert_eq!(h.state.screen, Screen::PersonalDesktop);
    }

    #[test]
    fn navigation_checks_unlocks_and_resets_scene() {
        let mut h = Harness::new();
        h.dispatch(GameAction::ContinueGame);
        assert_eq!(
            h.try_dispatch(GameAction::Navigate {
                location: LocationId::WarehouseB7
            }),
            Err(ReducerError::LocationLocked("warehouse_b7"))
        );
        h.state.story = StoryProgress::from_f64(1.2);
        h.state.world.keys.set(MoveKey::Up, true);
        let effects = h.dispatch(GameAction::Navigate {
            location: LocationId::WarehouseB7,
        });
        assert!(has_cue(&effects, SoundCue::RpgPortal));
        assert_eq!(h.state.location_id, LocationId::WarehouseB7);
        assert_eq!(h.state.world.position, Vec2 { x: 776.0, y: 816.0 });
        assert!(!h.state.world.scene_ready);
        assert!(!h.state.world.keys.up);
    }

    #[test]
    fn final_choice_plays_out_the_ending() {
        let mut h = Harness::new();
        h.on_agent_desktop();
        h.state.story = StoryProgress::from_f64(4.0);
        h.open(AppId::CaseFiles);
        h.dispatch(GameAction::Choose {
            choice: DialogueChoice::final_choice("A", "Expose Everything"),
        });
        assert_eq!(h.state.screen, Screen::GameEnding);
        assert!(h.state.desktop.windows.is_empty());

        for _ in 0..7 {
            h.advance(2_500);
        }
        let ending = h.state.ending.clone().expect("ending running");
        assert_eq!(ending.visible_lines().len(), 7);
        assert!(!ending.menu_ready);
        h.advance(1_000);
        assert!(h.state.ending.as_ref().is_some_and(|e| e.menu_ready));
    }

    #[test]
    fn hydrate_marks_boot_complete_without_persisting() {
        let mut h = Harness::new();
        h.state.hydrated = false;
        let mut save = SaveFile::capture(&h.state);
        save.screen = Screen::AgentDesktop;
        save.story = StoryProgress::from_f64(2.2);
        let effects = h.dispatch(GameAction::HydrateSave { save: Some(save) });
        assert!(h.state.hydrated && h.state.has_save);
        assert_eq!(h.state.screen, Screen::AgentDesktop);
        assert!(!effects.contains(&RuntimeEffect::PersistSave));
    }

    #[test]
    fn sound_cues_map_to_audio_assets() {
        assert_eq!(SoundCue::WalkStop.asset_path(), "/assets/audio/walk.mp3");
        assert_eq!(SoundCue::RpgPortal.asset_path(), "/assets/audio/rpg_portal.mp3");
        assert_eq!(SoundCue::NewMessage.volume(), 0.7);
    }
}
