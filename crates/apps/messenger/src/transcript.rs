//! Builds the visible chat transcript from story progress and recorded choices.

use desktop_app_contract::{ChoiceRecord, DialogueChoice, StoryProgress};

use crate::script::{Align, ChatEntry, ChoiceBlock, ChoiceOption, Message, CHAT_SCRIPT};

/// Sender label for the player's own replies.
pub const PLAYER_SENDER: &str = "AGENT_77";

/// A rendered chat bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    /// Sender label.
    pub sender: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Clock label, empty for player replies.
    pub timestamp: &'static str,
    /// Placement.
    pub align: Align,
    /// Glitch effect.
    pub glitch: bool,
}

impl From<&Message> for Bubble {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender,
            text: message.text,
            timestamp: message.timestamp,
            align: message.align,
            glitch: message.glitch,
        }
    }
}

/// One transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptItem {
    /// A message or an already-answered choice.
    Bubble(Bubble),
    /// An unanswered decision point. Always the last row.
    Prompt {
        /// Conversation awaiting a pick.
        conversation_id: &'static str,
        /// Responses offered to the player.
        options: Vec<DialogueChoice>,
    },
}

impl TranscriptItem {
    /// Returns whether the row is a bubble.
    pub fn is_bubble(&self) -> bool {
        matches!(self, Self::Bubble(_))
    }
}

/// Converts a scripted option into the callback payload for `conversation_id`.
pub fn to_dialogue_choice(conversation_id: &str, option: &ChoiceOption) -> DialogueChoice {
    DialogueChoice {
        id: option.id.to_string(),
        conversation_id: conversation_id.to_string(),
        text: option.text.to_string(),
        integrity_delta: option.integrity_delta,
        progress_delta: option.progress_delta,
    }
}

/// Returns whether a dependency key is satisfied.
///
/// A key matches a conversation id with a recorded pick, or any recorded option id.
pub fn dependency_met(choices: &ChoiceRecord, key: &str) -> bool {
    choices.contains_key(key) || choices.values().any(|picked| picked == key)
}

fn unlocked(story: StoryProgress, threshold: Option<StoryProgress>) -> bool {
    threshold.map_or(true, |t| story.reached(t))
}

fn resolved_bubble(block: &ChoiceBlock, picked: &str) -> Option<Bubble> {
    block
        .options
        .iter()
        .find(|option| option.id == picked)
        .map(|option| Bubble {
            sender: PLAYER_SENDER,
            text: option.text,
            timestamp: "",
            align: Align::Right,
            glitch: false,
        })
}

/// Builds the transcript for the current story state.
///
/// The result is a prefix of the script: it ends at the first unanswered choice block.
pub fn transcript(story: StoryProgress, choices: &ChoiceRecord) -> Vec<TranscriptItem> {
    transcript_of(CHAT_SCRIPT, story, choices)
}

pub(crate) fn transcript_of(
    script: &[ChatEntry],
    story: StoryProgress,
    choices: &ChoiceRecord,
) -> Vec<TranscriptItem> {
    let mut items = Vec::new();
    for entry in script {
        match entry {
            ChatEntry::Message(message) => {
                if !unlocked(story, message.unlocked_at) {
                    continue;
                }
                if let Some(key) = message.depends_on {
                    if !dependency_met(choices, key) {
                        continue;
                    }
                }
                items.push(TranscriptItem::Bubble(Bubble::from(message)));
            }
            ChatEntry::ChoiceBlock(block) => {
                if !story.reached(block.unlocked_at) {
                    continue;
                }
                match choices.get(block.conversation_id) {
                    Some(picked) => {
                        if let Some(bubble) = resolved_bubble(block, picked) {
                            items.push(TranscriptItem::Bubble(bubble));
                        }
                    }
                    None => {
                        items.push(TranscriptItem::Prompt {
                            conversation_id: block.conversation_id,
                            options: block
                                .options
                                .iter()
                                .map(|option| to_dialogue_choice(block.conversation_id, option))
                                .collect(),
                        });
                        break;
                    }
                }
            }
        }
    }
    items
}

/// Per-window messenger state used to detect freshly arrived messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessengerSession {
    seen_len: usize,
}

impl MessengerSession {
    /// Records the transcript length and returns whether a new-message cue should fire.
    ///
    /// The cue fires when the transcript grew and its last row is a bubble.
    pub fn observe(&mut self, items: &[TranscriptItem]) -> bool {
        let grew = items.len() > self.seen_len;
        self.seen_len = items.len();
        grew && items.last().is_some_and(TranscriptItem::is_bubble)
    }
}
