//! Story progression: objectives, progress updates, dialogue choices and clues.

use desktop_app_contract::{Clue, DialogueChoice, StoryProgress};

use crate::{ending::Ending, model::GameState};

pub struct Objective {
    pub required: StoryProgress,
    /// Mission text; `**...**` marks emphasis.
    pub text: &'static str,
}

const fn objective(thousandths: u32, text: &'static str) -> Objective {
    Objective {
        required: StoryProgress::from_thousandths(thousandths),
        text,
    }
}

pub const OBJECTIVES: [Objective; 10] = [
    objective(1000, "System online. Familiarize yourself with the OS by opening **all available applications**."),
    objective(1100, "Good. Now check your **Secure Messenger** for an incoming transmission."),
    objective(1200, "You have your first destination. Exit the office and use the **World Map** portal to travel to `warehouse_b7`."),
    objective(2000, "Good. You found the first piece. Now check your **Case Files** for the truth I unlocked."),
    objective(2100, "You have a new message. Open **Secure Messenger**."),
    objective(2200, "Time for your next move. I sent you a new location in **Secure Messenger**. Use the **World Map** to get there."),
    objective(3000, "Another breadcrumb. Decrypt the file in **Case Files**."),
    objective(3100, "The final piece is close. Travel to the **Europa Data Center** and connect to the core network."),
    objective(3200, "Connection established. Return to your FBI OS and use command `breach firewall_europa` in the **Terminal**."),
    objective(4000, "The system is ours. Access the final **Case File** and make your choice."),
];

/// The objective with the largest threshold still satisfied by `story`.
pub fn active_objective(story: StoryProgress) -> Option<&'static Objective> {
    OBJECTIVES.iter().rev().find(|o| story.reached(o.required))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSpan<'a> {
    Plain(&'a str),
    Strong(&'a str),
}

/// Splits objective text on `**` markers; odd segments are emphasised.
pub fn objective_spans(text: &str) -> Vec<TextSpan<'_>> {
    text.split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(idx, part)| {
            if idx % 2 == 1 {
                TextSpan::Strong(part)
            } else {
                TextSpan::Plain(part)
            }
        })
        .collect()
}

/// Adds `amount` to the story. Progress is never lowered.
pub fn advance(state: &mut GameState, amount: StoryProgress) {
    state.story = state.story.saturating_add(amount);
}

/// Raises the story to at least `target`.
pub fn raise_to(state: &mut GameState, target: StoryProgress) {
    state.story = state.story.max(target);
}

/// Result of a dialogue pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    Recorded,
    /// The conversation already has a recorded pick; nothing changed.
    AlreadyResolved,
    /// The final decision; the caller moves to the ending screen.
    Ending(Ending),
    /// A final decision with an id that names no ending.
    Ignored,
}

/// Records `choice` and applies its deltas, or selects an ending for the final decision.
///
/// Integrity deltas are clamped to the valid range; story deltas only ever add. A conversation
/// is resolved once: later picks for it leave the state untouched.
pub fn record_choice(state: &mut GameState, choice: &DialogueChoice) -> ChoiceOutcome {
    if choice.is_final() {
        return Ending::from_choice_id(&choice.id).map_or(ChoiceOutcome::Ignored, ChoiceOutcome::Ending);
    }
    if state.choices.contains_key(&choice.conversation_id) {
        return ChoiceOutcome::AlreadyResolved;
    }
    state
        .choices
        .insert(choice.conversation_id.clone(), choice.id.clone());
    state.integrity.apply_delta(choice.integrity_delta);
    advance(state, choice.progress_delta);
    ChoiceOutcome::Recorded
}

/// Applies a found clue's progress target. Screen changes are left to the caller.
pub fn find_clue(state: &mut GameState, clue: Clue) {
    raise_to(state, clue.progress_target());
}
