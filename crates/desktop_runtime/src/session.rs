//! Game lifecycle: passwords, login, screen switches, new game and reset.

use desktop_app_contract::StoryProgress;
use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{
    config::RuntimeConfig,
    model::{GameState, IntroState, LoginState, Screen},
    scheduler::{ScheduledEvent, TimerScope},
    world::WorldState,
};

const ADJECTIVES: [&str; 8] = ["Red", "Shadow", "Silent", "Night", "Cyber", "Ghost", "Zero", "Dark"];
const NOUNS: [&str; 8] = ["Fall", "Protocol", "Reaper", "Storm", "Fox", "Spectre", "Dawn", "Blade"];

pub const LOGIN_DENIED: &str = "ACCESS DENIED: Incorrect Credentials";

/// Progress granted by the first successful login.
pub const LOGIN_PROGRESS: StoryProgress = StoryProgress::from_thousandths(1000);

/// Builds an `ADJECTIVENOUNNN` credential, e.g. `GHOSTFOX42`.
pub fn generate_password(rng: &mut dyn RngCore) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or(ADJECTIVES[0]);
    let noun = NOUNS.choose(rng).copied().unwrap_or(NOUNS[0]);
    let number: u8 = rng.gen_range(10..=99);
    format!("{}{}{number}", adjective.to_uppercase(), noun.to_uppercase())
}

/// Switches screens, dropping every window and its pending work.
pub fn switch_screen(state: &mut GameState, screen: Screen) {
    for window in &state.desktop.windows {
        state.timeline.cancel_scope(TimerScope::Window(window.id));
    }
    state.desktop.windows.clear();
    state.desktop.active_window = None;
    state.sessions.clear();
    state.screen = screen;
}

/// Enters the world view at the spawn point of the current location.
pub fn enter_world(state: &mut GameState, config: &RuntimeConfig, now_ms: u64) {
    switch_screen(state, Screen::GameWorld);
    state.world = WorldState::spawn(state.location_id);
    state.timeline.cancel_scope(TimerScope::Scene);
    state.timeline.schedule(
        TimerScope::Scene,
        now_ms + config.delays.scene_ready_ms,
        ScheduledEvent::SceneReady,
    );
}

/// Checks a login attempt. Returns whether it matched.
pub fn submit_login(state: &mut GameState, attempt: &str) -> bool {
    if attempt != state.password {
        state.overlays.login = Some(LoginState {
            error: Some(LOGIN_DENIED),
        });
        return false;
    }
    state.overlays.login = None;
    switch_screen(state, Screen::AgentDesktop);
    state.story = state.story.max(LOGIN_PROGRESS);
    true
}

/// Fresh game state that keeps boot and display facts.
///
/// Pending events are dropped but the timeline itself is kept, so handles from the previous run
/// are never reissued.
fn fresh_state(state: &mut GameState, rng: &mut dyn RngCore, config: &RuntimeConfig) -> GameState {
    let mut next = GameState::new(generate_password(rng), config.windows.first_z_index);
    next.has_save = state.has_save;
    next.hydrated = state.hydrated;
    next.viewport = state.viewport;
    next.timeline = std::mem::take(&mut state.timeline);
    next.timeline.clear();
    next
}

/// Starts a new game with the intro monologue.
pub fn new_game(state: &mut GameState, rng: &mut dyn RngCore, config: &RuntimeConfig, now_ms: u64) {
    *state = fresh_state(state, rng, config);
    state.overlays.intro = Some(IntroState::default());
    state.timeline.schedule(
        TimerScope::Session,
        now_ms + config.narrative.intro_char_ms,
        ScheduledEvent::IntroChar,
    );
}

/// Back to the main menu with nothing saved.
pub fn reset_game(state: &mut GameState, rng: &mut dyn RngCore, config: &RuntimeConfig) {
    *state = fresh_state(state, rng, config);
    state.has_save = false;
}

/// Resumes the loaded game; a save made on the main menu resumes in the world.
pub fn continue_game(state: &mut GameState, config: &RuntimeConfig, now_ms: u64) {
    match state.screen {
        Screen::MainMenu | Screen::GameWorld => enter_world(state, config, now_ms),
        screen => switch_screen(state, screen),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::model::WindowId;

    fn state() -> GameState {
        GameState::new("SHADOWFOX42".to_string(), 10)
    }

    #[test]
    fn passwords_follow_pattern() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let password = generate_password(&mut rng);
            let adjective = ADJECTIVES
                .iter()
                .map(|a| a.to_uppercase())
                .find(|a| password.starts_with(a.as_str()));
            let rest = &password[adjective.map_or(0, |a| a.len())..];
            let noun = NOUNS
                .iter()
                .map(|n| n.to_uppercase())
                .find(|n| rest.starts_with(n.as_str()));
            let digits = &rest[noun.map_or(0, |n| n.len())..];
            assert_eq!(digits.len(), 2, "{password}");
            let number: u8 = digits.parse().expect("two digits");
            assert!((10..=99).contains(&number));
        }
    }

    #[test]
    fn wrong_login_keeps_everything() {
        let mut game = state();
        game.screen = Screen::PersonalDesktop;
        game.overlays.login = Some(LoginState::default());
        assert!(!submit_login(&mut game, "shadowfox42"));
        assert_eq!(game.screen, Screen::PersonalDesktop);
        assert_eq!(game.overlays.login, Some(LoginState { error: Some(LOGIN_DENIED) }));
        assert_eq!(game.story, StoryProgress::ZERO);
    }

    #[test]
    fn login_raises_progress_to_one() {
        let mut game = state();
        game.screen = Screen::PersonalDesktop;
        game.overlays.login = Some(LoginState::default());
        assert!(submit_login(&mut game, "SHADOWFOX42"));
        assert_eq!(game.screen, Screen::AgentDesktop);
        assert_eq!(game.overlays.login, None);
        assert_eq!(game.story, LOGIN_PROGRESS);

        game.story = StoryProgress::from_f64(2.1);
        assert!(submit_login(&mut game, "SHADOWFOX42"));
        assert_eq!(game.story, StoryProgress::from_f64(2.1));
    }

    #[test]
    fn switching_screens_drops_window_timers() {
        let mut game = state();
        game.timeline.schedule(TimerScope::Window(WindowId(1)), 10, ScheduledEvent::WindowExit { window_id: WindowId(1) });
        game.timeline.schedule(TimerScope::Session, 10, ScheduledEvent::DamageFlashEnd);
        game.desktop.windows.push(crate::model::WindowRecord {
            id: WindowId(1),
            app_id: crate::model::AppId::Notes,
            title: "Notes".to_string(),
            rect: crate::model::WindowRect { x: 0, y: 0, w: 10, h: 10 },
            restore_rect: None,
            z_index: 10,
            minimized: false,
            maximized: false,
            closing: true,
        });
        game.desktop.active_window = Some(WindowId(1));
        switch_screen(&mut game, Screen::GameWorld);
        assert!(game.desktop.windows.is_empty());
        assert_eq!(game.desktop.active_window, None);
        assert_eq!(game.timeline.len(), 1);
    }

    #[test]
    fn new_game_and_reset_start_fresh() {
        let config = RuntimeConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = state();
        game.story = StoryProgress::from_f64(3.0);
        game.hydrated = true;
        game.has_save = true;
        game.overlays.crashed = true;
        let stale = game.timeline.schedule(TimerScope::Session, 9_999, ScheduledEvent::CrashReset);

        new_game(&mut game, &mut rng, &config, 100);
        assert!(!game.timeline.cancel(stale));
        assert!(game.timeline.iter().all(|entry| entry.handle > stale));
        assert_eq!(game.story, StoryProgress::ZERO);
        assert!(game.hydrated && game.has_save);
        assert!(!game.overlays.crashed);
        assert!(game.overlays.intro.is_some());
        assert_eq!(game.timeline.next_due_at(), Some(150));

        reset_game(&mut game, &mut rng, &config);
        assert!(!game.has_save);
        assert_eq!(game.overlays.intro, None);
        assert_eq!(game.screen, Screen::MainMenu);
        assert!(game.timeline.is_empty());
    }

    #[test]
    fn continue_resumes_saved_screen() {
        let config = RuntimeConfig::default();
        let mut game = state();
        continue_game(&mut game, &config, 0);
        assert_eq!(game.screen, Screen::GameWorld);
        assert_eq!(game.timeline.next_due_at(), Some(50));

        let mut game = state();
        game.screen = Screen::AgentDesktop;
        continue_game(&mut game, &config, 0);
        assert_eq!(game.screen, Screen::AgentDesktop);
    }
}
