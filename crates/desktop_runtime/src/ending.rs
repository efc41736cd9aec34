use serde::{Deserialize, Serialize};

/// The two outcomes of the final decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// Choice `A`: expose everything.
    Truth,
    /// Choice `B`: join Void.
    Control,
}

const TRUTH_LINES: [&str; 7] = [
    "The Ghost Protocol is executed.",
    "Encrypted files from every federal agency are dumped onto the public web.",
    "Global markets crash. Governments are destabilized. Chaos reigns.",
    "The world you knew is gone, burned away by the harsh light of truth.",
    "But from the ashes, something new might grow.",
    "You are a traitor. A hero. A ghost.",
    "Your sacrifice gave the world a chance to be free.",
];

const CONTROL_LINES: [&str; 7] = [
    "The Ghost Protocol is rewritten.",
    "You and Void become the secret puppeteers of the digital world.",
    "The system remains, but now it serves you.",
    "You manipulate markets, shift political power, and erase threats with a single command.",
    "Order is maintained. But it is an order built on lies, enforced from the shadows.",
    "You have become what you once hunted.",
    "Your sacrifice was your own integrity.",
];

impl Ending {
    pub fn from_choice_id(id: &str) -> Option<Self> {
        match id {
            "A" => Some(Self::Truth),
            "B" => Some(Self::Control),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Truth => "TRUTH",
            Self::Control => "CONTROL",
        }
    }

    pub const fn lines(self) -> &'static [&'static str] {
        match self {
            Self::Truth => &TRUTH_LINES,
            Self::Control => &CONTROL_LINES,
        }
    }
}

/// Line-by-line reveal of the ending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndingState {
    pub ending: Ending,
    revealed: usize,
    pub menu_ready: bool,
}

impl EndingState {
    pub fn new(ending: Ending) -> Self {
        Self {
            ending,
            revealed: 0,
            menu_ready: false,
        }
    }

    pub fn visible_lines(&self) -> &'static [&'static str] {
        &self.ending.lines()[..self.revealed]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.ending.lines().len()
    }

    /// Reveals the next line. Returns whether more remain.
    pub fn reveal_next(&mut self) -> bool {
        if !self.is_complete() {
            self.revealed += 1;
        }
        !self.is_complete()
    }
}
