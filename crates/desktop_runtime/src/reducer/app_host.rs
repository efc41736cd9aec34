//! [`AppHost`] implementation that routes app callbacks into game state.

use desktop_app_contract::{AppHost, Clue, DialogueChoice, RiskyAction, StoryProgress};
use rand::RngCore;

use crate::{
    ending::Ending,
    integrity,
    model::{GameState, Screen},
    session,
    story::{self, ChoiceOutcome},
};

pub(crate) struct GameHost<'a> {
    pub state: &'a mut GameState,
    pub rng: &'a mut dyn RngCore,
    /// Ending picked through the final decision, applied by the caller.
    pub ending: Option<Ending>,
}

impl<'a> GameHost<'a> {
    pub fn new(state: &'a mut GameState, rng: &'a mut dyn RngCore) -> Self {
        Self {
            state,
            rng,
            ending: None,
        }
    }
}

impl AppHost for GameHost<'_> {
    fn perform_risky_action(&mut self, action: RiskyAction) -> bool {
        integrity::resolve_risky_action(&mut self.state.integrity, action, self.rng)
    }

    fn repair_system(&mut self, amount: u32) {
        self.state.integrity.repair(amount);
    }

    fn choose(&mut self, choice: DialogueChoice) {
        if let ChoiceOutcome::Ending(ending) = story::record_choice(self.state, &choice) {
            self.ending = Some(ending);
        }
    }

    fn advance_story(&mut self, amount: StoryProgress) {
        story::advance(self.state, amount);
    }

    fn find_clue(&mut self, clue: Clue) {
        story::find_clue(self.state, clue);
        session::switch_screen(self.state, Screen::AgentDesktop);
    }

    fn disable_system(&mut self, name: &str, cost: u32) {
        integrity::disable_system(self.state, name, cost);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn clue_returns_to_agent_desktop() {
        let mut state = GameState::new("X".to_string(), 10);
        state.screen = Screen::GameWorld;
        let mut rng = StdRng::seed_from_u64(1);
        let mut host = GameHost::new(&mut state, &mut rng);
        host.find_clue(Clue::CafeTerminal);
        assert_eq!(state.screen, Screen::AgentDesktop);
        assert_eq!(state.story, StoryProgress::from_f64(3.0));
    }

    #[test]
    fn final_choice_is_reported_not_recorded() {
        let mut state = GameState::new("X".to_string(), 10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut host = GameHost::new(&mut state, &mut rng);
        host.choose(DialogueChoice::final_choice("A", "Expose Everything"));
        assert_eq!(host.ending, Some(Ending::Truth));
        assert!(state.choices.is_empty());
    }
}
