use desktop_app_contract::{Clue, DialogueChoice, StoryProgress};
use desktop_app_messenger::{transcript, TranscriptItem};
use desktop_runtime::{
    reduce_game,
    story::active_objective,
    world::{interactables, InteractionKind, LocationId, Vec2, PLAYER_SIZE},
    AppId, GameAction, GameState, InteractionState, ReduceEnv, RuntimeConfig, RuntimeEffect,
    SaveFile, Screen, WindowId,
};
use pretty_assertions::assert_eq;
use rand::RngCore;

/// Every sample is zero: risky actions always succeed.
struct LuckyRng;

impl RngCore for LuckyRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

struct Player {
    state: GameState,
    interaction: InteractionState,
    config: RuntimeConfig,
    now_ms: u64,
    saves: usize,
}

impl Player {
    fn boot() -> Self {
        let config = RuntimeConfig::embedded();
        let state = GameState::new("BOOTPASS10".to_string(), config.windows.first_z_index);
        let mut player = Self {
            state,
            interaction: InteractionState::default(),
            config,
            now_ms: 10_000,
            saves: 0,
        };
        player.dispatch(GameAction::HydrateSave { save: None });
        assert!(player.state.hydrated);
        player
    }

    fn dispatch(&mut self, action: GameAction) -> Vec<RuntimeEffect> {
        let mut rng = LuckyRng;
        let mut env = ReduceEnv {
            config: &self.config,
            rng: &mut rng,
            now_ms: self.now_ms,
        };
        let effects = reduce_game(&mut self.state, &mut self.interaction, action, &mut env)
            .expect("action applies");
        self.saves += effects
            .iter()
            .filter(|effect| **effect == RuntimeEffect::PersistSave)
            .count();
        effects
    }

    fn wait(&mut self, ms: u64) {
        self.now_ms += ms;
        self.dispatch(GameAction::Tick);
    }

    fn progress(&self) -> StoryProgress {
        self.state.story
    }

    fn press(&mut self, key: &str) {
        self.dispatch(GameAction::KeyDown {
            key: key.to_string(),
        });
        self.dispatch(GameAction::KeyUp {
            key: key.to_string(),
        });
    }

    /// Puts the player on top of an interactable in the current scene and presses the interact key.
    fn use_object(&mut self, kind: InteractionKind) {
        self.wait(self.config.delays.scene_ready_ms);
        assert!(self.state.world.scene_ready);
        let target = interactables(self.state.location_id, self.state.story)
            .into_iter()
            .find(|item| item.kind == kind)
            .expect("object present in scene");
        let center = target.rect.center();
        self.state.world.position = Vec2 {
            x: center.x - PLAYER_SIZE.width / 2.0,
            y: center.y - PLAYER_SIZE.height / 2.0,
        };
        self.press("e");
    }

    fn open(&mut self, app_id: AppId) -> WindowId {
        self.dispatch(GameAction::OpenApp { app_id });
        self.state
            .desktop
            .windows
            .iter()
            .find(|w| w.app_id == app_id)
            .map(|w| w.id)
            .expect("window opened")
    }

    /// Answers the pending messenger prompt with its first option.
    fn answer_messenger(&mut self) {
        let options = match transcript(self.state.story, &self.state.choices).pop() {
            Some(TranscriptItem::Prompt { options, .. }) => options,
            other => panic!("expected a prompt, got {other:?}"),
        };
        let choice: DialogueChoice = options.into_iter().next().expect("option");
        self.dispatch(GameAction::Choose { choice });
    }

    fn leave_for_world(&mut self) {
        self.dispatch(GameAction::Logout);
        assert_eq!(self.state.screen, Screen::PersonalDesktop);
        self.dispatch(GameAction::StepAway);
        assert_eq!(self.state.screen, Screen::GameWorld);
    }

    fn travel(&mut self, destination: LocationId) {
        if self.state.location_id != LocationId::WorldMap {
            self.use_object(InteractionKind::Navigate(LocationId::WorldMap));
            assert_eq!(self.state.location_id, LocationId::WorldMap);
        }
        self.use_object(InteractionKind::Navigate(destination));
        assert_eq!(self.state.location_id, destination);
    }
}

#[test]
fn new_game_plays_through_to_the_truth_ending() {
    let mut p = Player::boot();
    assert_eq!(p.state.screen, Screen::MainMenu);

    p.dispatch(GameAction::NewGame);
    assert!(p.state.overlays.intro.is_some());
    let mut guard = 0;
    while p.state.overlays.intro.as_ref().is_some_and(|intro| intro.is_typing()) {
        p.wait(p.config.narrative.intro_char_ms);
        guard += 1;
        assert!(guard < 1_000, "intro never finished typing");
    }
    p.dispatch(GameAction::IntroFinished);
    assert_eq!(p.state.screen, Screen::GameWorld);
    assert_eq!(p.state.location_id, LocationId::PlayerRoom);

    // The apartment laptop leads to the personal desktop and its login.
    p.use_object(InteractionKind::AccessLaptop);
    assert_eq!(p.state.screen, Screen::PersonalDesktop);
    p.open(AppId::Notes);
    let password = p.state.password.clone();
    p.dispatch(GameAction::OpenApp {
        app_id: AppId::SecureAccess,
    });
    p.dispatch(GameAction::SubmitLogin {
        attempt: "WRONG".to_string(),
    });
    assert_eq!(p.state.screen, Screen::PersonalDesktop);
    p.dispatch(GameAction::SubmitLogin { attempt: password });
    assert_eq!(p.state.screen, Screen::AgentDesktop);
    assert_eq!(p.progress(), StoryProgress::from_f64(1.0));

    // Mission 1: tour the agent desktop, then talk to Void.
    for app in [
        AppId::CaseFiles,
        AppId::Terminal,
        AppId::EvidenceViewer,
        AppId::SecureMessenger,
    ] {
        p.open(app);
    }
    assert_eq!(p.progress(), StoryProgress::from_f64(1.1));
    p.answer_messenger();
    assert_eq!(p.progress(), StoryProgress::from_f64(1.2));

    // Mission 2: the warehouse terminal.
    p.leave_for_world();
    p.travel(LocationId::WarehouseB7);
    p.use_object(InteractionKind::FindClue(Clue::WarehouseTerminal));
    assert_eq!(p.state.screen, Screen::AgentDesktop);
    assert_eq!(p.progress(), StoryProgress::from_f64(2.0));
    p.open(AppId::CaseFiles);
    assert_eq!(p.progress(), StoryProgress::from_f64(2.1));
    p.open(AppId::SecureMessenger);
    p.answer_messenger();
    assert_eq!(p.progress(), StoryProgress::from_f64(2.2));

    // Mission 3: the cafe, the encrypted file, and the data center.
    p.leave_for_world();
    p.travel(LocationId::TokyoCyberCafe);
    p.use_object(InteractionKind::FindClue(Clue::CafeTerminal));
    assert_eq!(p.progress(), StoryProgress::from_f64(3.0));

    let files = p.open(AppId::CaseFiles);
    p.dispatch(GameAction::AttemptDecryption {
        window_id: files,
        file_id: "CYB-003".to_string(),
    });
    p.wait(p.config.delays.decrypt_ms);
    assert_eq!(p.state.integrity.value(), 95);

    p.open(AppId::SecureMessenger);
    p.answer_messenger();
    assert_eq!(p.progress(), StoryProgress::from_f64(3.1));

    p.leave_for_world();
    p.travel(LocationId::DataCenterEuropa);
    p.use_object(InteractionKind::FindClue(Clue::EuropaMainframe));
    assert_eq!(p.progress(), StoryProgress::from_f64(3.2));

    // Mission 4: breach the firewall, then decide.
    let terminal = p.open(AppId::Terminal);
    p.dispatch(GameAction::TerminalSubmit {
        window_id: terminal,
        line: "breach firewall_europa".to_string(),
    });
    p.wait(p.config.delays.breach_ms);
    assert_eq!(p.progress(), StoryProgress::from_f64(4.0));
    assert_eq!(p.state.integrity.value(), 80);
    assert!(active_objective(p.progress())
        .is_some_and(|objective| objective.text.contains("make your choice")));

    let saved = SaveFile::capture(&p.state);
    assert_eq!(saved.story, StoryProgress::from_f64(4.0));
    assert!(p.saves > 0);

    p.open(AppId::CaseFiles);
    p.dispatch(GameAction::Choose {
        choice: DialogueChoice::final_choice("A", "Expose Everything"),
    });
    assert_eq!(p.state.screen, Screen::GameEnding);
    assert_eq!(p.state.choices.get("c2").map(String::as_str), Some("c2a"));

    for _ in 0..7 {
        p.wait(p.config.narrative.ending_line_ms);
    }
    p.wait(p.config.narrative.ending_menu_delay_ms);
    let ending = p.state.ending.clone().expect("ending shown");
    assert_eq!(ending.ending.title(), "TRUTH");
    assert!(ending.menu_ready);

    let effects = p.dispatch(GameAction::ResetGame);
    assert!(effects.contains(&RuntimeEffect::ClearSave));
    assert_eq!(p.state.screen, Screen::MainMenu);
    assert_eq!(p.progress(), StoryProgress::ZERO);
    assert!(p.state.overlays.intro.is_none());
}
