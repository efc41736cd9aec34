//! Secure messenger dialogue script.

use desktop_app_contract::StoryProgress;

const fn at(thousandths: u32) -> Option<StoryProgress> {
    Some(StoryProgress::from_thousandths(thousandths))
}

const fn delta(thousandths: u32) -> StoryProgress {
    StoryProgress::from_thousandths(thousandths)
}

/// Horizontal placement of a chat bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Incoming message.
    Left,
    /// Sent by the player.
    Right,
    /// System banner.
    Center,
}

impl Align {
    /// CSS modifier for the bubble.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// A scripted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    /// Display name of the sender.
    pub sender: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Clock label.
    pub timestamp: &'static str,
    /// Bubble placement.
    pub align: Align,
    /// Rendered with the glitch effect.
    pub glitch: bool,
    /// Story progress needed before the message shows.
    pub unlocked_at: Option<StoryProgress>,
    /// Conversation id (or option id) that must have been answered first.
    pub depends_on: Option<&'static str>,
}

/// One response inside a [`ChoiceBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Option id recorded once picked.
    pub id: &'static str,
    /// Button and transcript text.
    pub text: &'static str,
    /// Signed integrity delta.
    pub integrity_delta: i32,
    /// Story progress added.
    pub progress_delta: StoryProgress,
}

/// A decision point awaiting a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceBlock {
    /// Conversation id the pick is recorded under.
    pub conversation_id: &'static str,
    /// Story progress needed before the block shows.
    pub unlocked_at: StoryProgress,
    /// Mutually exclusive responses.
    pub options: &'static [ChoiceOption],
}

/// Script entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEntry {
    /// Plain message.
    Message(Message),
    /// Decision point.
    ChoiceBlock(ChoiceBlock),
}

const fn msg(sender: &'static str, text: &'static str, timestamp: &'static str) -> Message {
    Message {
        sender,
        text,
        timestamp,
        align: Align::Left,
        glitch: false,
        unlocked_at: None,
        depends_on: None,
    }
}

const fn void(
    text: &'static str,
    timestamp: &'static str,
    unlocked_at: Option<StoryProgress>,
    depends_on: Option<&'static str>,
) -> ChatEntry {
    ChatEntry::Message(Message {
        unlocked_at,
        depends_on,
        ..msg("VOID", text, timestamp)
    })
}

const fn option(
    id: &'static str,
    text: &'static str,
    integrity_delta: i32,
    progress_delta: StoryProgress,
) -> ChoiceOption {
    ChoiceOption {
        id,
        text,
        integrity_delta,
        progress_delta,
    }
}

const C0_OPTIONS: [ChoiceOption; 3] = [
    option("c0a", "Who is this? Identify yourself.", -5, delta(100)),
    option("c0b", "How did you get this number?", 0, delta(100)),
    option("c0c", "[Say nothing and attempt to trace]", 5, delta(100)),
];

const C1_OPTIONS: [ChoiceOption; 3] = [
    option("c1a", "[REMAIN SILENT]", 5, delta(100)),
    option("c1b", "You're just a terrorist.", -10, delta(100)),
    option("c1c", "Who are \"they\"?", -5, delta(100)),
];

const C2_OPTIONS: [ChoiceOption; 3] = [
    option("c2a", "I am an FBI agent. I serve my country.", 0, delta(100)),
    option("c2b", "What do you want from me?", -5, delta(100)),
    option("c2c", "I'm starting to understand.", 10, delta(100)),
];

/// Full channel script in display order.
pub const CHAT_SCRIPT: &[ChatEntry] = &[
    ChatEntry::Message(msg("CONTROL", "Agent 77, what is your status?", "14:32")),
    ChatEntry::Message(Message {
        align: Align::Right,
        ..msg("AGENT_77", "Control, I am in position.", "14:33")
    }),
    ChatEntry::Message(msg("CONTROL", "Copy that. Maintain radio silence.", "14:33")),
    ChatEntry::Message(Message {
        align: Align::Center,
        glitch: true,
        unlocked_at: at(1100),
        ..msg("UNKNOWN", "...can you hear me?...", "15:01")
    }),
    void(
        "Finally. I've bypassed their firewalls. We can speak freely now, Agent 77.",
        "15:02",
        at(1100),
        None,
    ),
    ChatEntry::ChoiceBlock(ChoiceBlock {
        conversation_id: "c0",
        unlocked_at: delta(1100),
        options: &C0_OPTIONS,
    }),
    void(
        "Clever. But you can't trace a ghost.",
        "15:03",
        at(1200),
        Some("c0c"),
    ),
    void(
        "Call me Void. I know you've been looking for me. But you're just a pawn in their game, chasing shadows they want you to see.",
        "15:03",
        at(1200),
        Some("c0"),
    ),
    void(
        "You want to find the truth? You have to leave your cage. Find what I left for you. Start here: warehouse_b7",
        "15:04",
        at(1200),
        Some("c0"),
    ),
    ChatEntry::Message(Message {
        align: Align::Center,
        unlocked_at: at(1200),
        depends_on: Some("c0"),
        ..msg("SYSTEM", "*** TRACE FAILED | SOURCE UNKNOWN ***", "15:06")
    }),
    void(
        "So, you found my little present. A piece of my past. Does it make you question who the real villain is?",
        "16:22",
        at(2100),
        None,
    ),
    void(
        "They watch you, you know. Every command you type. Every file you open. They see your system integrity dropping and they do nothing. What kind of sacrifice are they willing to make? You.",
        "16:23",
        at(2100),
        None,
    ),
    ChatEntry::ChoiceBlock(ChoiceBlock {
        conversation_id: "c1",
        unlocked_at: delta(2100),
        options: &C1_OPTIONS,
    }),
    void(
        "More breadcrumbs await where the sun rises. Look for the Net-Dive. Your move, Agent. - V",
        "16:25",
        at(2200),
        Some("c1"),
    ),
    void(
        "Persistent. But you're still missing the picture. Every truth is just a deeper lie. They lied to you. They lied about me.",
        "18:15",
        at(3000),
        None,
    ),
    void(
        "Do you ever wonder what sacrifices were made to give you this comfortable life? This job? This sense of purpose? Ask yourself: are you the hero, or just the weapon?",
        "18:16",
        at(3000),
        None,
    ),
    ChatEntry::ChoiceBlock(ChoiceBlock {
        conversation_id: "c2",
        unlocked_at: delta(3000),
        options: &C2_OPTIONS,
    }),
    void(
        "The final piece is close to home. Their home. Find me in the heart of the machine: data_center_europa",
        "18:18",
        at(3100),
        Some("c2"),
    ),
];
