//! Shared contract types between the game runtime and the embedded mini-apps.
//!
//! Apps never mutate game state directly. They read an [`AppContext`] snapshot and call back into
//! the runtime through the narrow [`AppHost`] trait, which mirrors the callbacks the desktop exposes
//! to its windows: risky actions, repairs, dialogue choices, story advancement, clues, and system
//! shutdowns.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Conversation id reserved for the final branching decision.
pub const FINAL_CHOICE_CONVERSATION: &str = "final_choice";

/// Recorded dialogue picks keyed by conversation id.
pub type ChoiceRecord = BTreeMap<String, String>;

/// Story advancement scalar.
///
/// Held as fixed-point thousandths so threshold comparisons stay exact (`1.1 + 0.1 == 1.2`).
/// Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct StoryProgress(u32);

impl StoryProgress {
    /// Progress of a fresh game.
    pub const ZERO: Self = Self(0);

    /// Builds a progress value from whole thousandths.
    pub const fn from_thousandths(thousandths: u32) -> Self {
        Self(thousandths)
    }

    /// Builds a progress value from a decimal, rounding to the nearest thousandth.
    ///
    /// Negative and non-finite inputs collapse to zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::ZERO;
        }
        let scaled = (value * 1000.0).round();
        if scaled >= f64::from(u32::MAX) {
            Self(u32::MAX)
        } else {
            Self(scaled as u32)
        }
    }

    /// Returns the raw thousandths.
    pub const fn thousandths(self) -> u32 {
        self.0
    }

    /// Returns the decimal form.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 1000.0
    }

    /// Returns whether this progress satisfies `threshold`.
    pub fn reached(self, threshold: StoryProgress) -> bool {
        self >= threshold
    }

    /// Adds `delta`, saturating at the maximum.
    pub fn saturating_add(self, delta: StoryProgress) -> Self {
        Self(self.0.saturating_add(delta.0))
    }

    /// Subtracts `other`, saturating at zero.
    pub fn saturating_sub(self, other: StoryProgress) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<f64> for StoryProgress {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<StoryProgress> for f64 {
    fn from(value: StoryProgress) -> Self {
        value.as_f64()
    }
}

impl fmt::Display for StoryProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let mut frac = self.0 % 1000;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let mut digits: usize = 3;
        while frac % 10 == 0 {
            frac /= 10;
            digits -= 1;
        }
        write!(f, "{whole}.{frac:0digits$}")
    }
}

/// Health band used by agent-desktop styling and terminal diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityBand {
    /// 70 and above.
    Stable,
    /// 40 to 69.
    Unstable,
    /// Below 40.
    Critical,
}

/// System integrity, bounded to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SystemIntegrity(u8);

impl SystemIntegrity {
    /// Upper bound.
    pub const MAX: u8 = 100;
    /// Full health.
    pub const FULL: Self = Self(Self::MAX);

    /// Builds a clamped integrity value.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, i64::from(Self::MAX)) as u8)
    }

    /// Returns the current value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Deducts `cost`, flooring at zero.
    pub fn damage(&mut self, cost: u32) {
        *self = Self::new(i64::from(self.0) - i64::from(cost));
    }

    /// Adds `amount`, capping at [`Self::MAX`].
    pub fn repair(&mut self, amount: u32) {
        *self = Self::new(i64::from(self.0) + i64::from(amount));
    }

    /// Applies a signed delta with clamping on both ends.
    pub fn apply_delta(&mut self, delta: i32) {
        *self = Self::new(i64::from(self.0) + i64::from(delta));
    }

    /// Returns whether integrity reached zero.
    pub const fn is_depleted(self) -> bool {
        self.0 == 0
    }

    /// Returns whether integrity is at the cap.
    pub const fn is_full(self) -> bool {
        self.0 == Self::MAX
    }

    /// Classifies the value for UI feedback.
    pub fn band(self) -> IntegrityBand {
        if self.0 < 40 {
            IntegrityBand::Critical
        } else if self.0 < 70 {
            IntegrityBand::Unstable
        } else {
            IntegrityBand::Stable
        }
    }
}

impl Default for SystemIntegrity {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<f64> for SystemIntegrity {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        Self::new(value.round().clamp(0.0, f64::from(Self::MAX)) as i64)
    }
}

impl From<SystemIntegrity> for f64 {
    fn from(value: SystemIntegrity) -> Self {
        f64::from(value.0)
    }
}

impl fmt::Display for SystemIntegrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A probabilistic operation with asymmetric integrity costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskyAction {
    /// Probability in `0.0..=1.0` that the action succeeds.
    pub success_chance: f64,
    /// Integrity deducted on success.
    pub cost_on_success: u32,
    /// Integrity deducted on failure.
    pub cost_on_failure: u32,
}

impl RiskyAction {
    /// Returns whether `sample` (uniform in `0.0..1.0`) counts as a success.
    pub fn succeeds_with(&self, sample: f64) -> bool {
        sample < self.success_chance
    }

    /// Returns the integrity cost for an outcome.
    pub fn cost(&self, success: bool) -> u32 {
        if success {
            self.cost_on_success
        } else {
            self.cost_on_failure
        }
    }
}

/// One selectable response in a dialogue block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueChoice {
    /// Option id recorded in the [`ChoiceRecord`].
    pub id: String,
    /// Conversation the option belongs to.
    pub conversation_id: String,
    /// Text shown on the button and in the transcript once chosen.
    pub text: String,
    /// Signed integrity delta applied when chosen.
    pub integrity_delta: i32,
    /// Story progress added when chosen.
    pub progress_delta: StoryProgress,
}

impl DialogueChoice {
    /// Builds an option for the final branching decision.
    pub fn final_choice(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            conversation_id: FINAL_CHOICE_CONVERSATION.to_string(),
            text: text.to_string(),
            integrity_delta: 0,
            progress_delta: StoryProgress::ZERO,
        }
    }

    /// Returns whether this is the final branching decision.
    pub fn is_final(&self) -> bool {
        self.conversation_id == FINAL_CHOICE_CONVERSATION
    }
}

/// World objects that push the story forward when investigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clue {
    /// Terminal inside warehouse B7.
    WarehouseTerminal,
    /// Rented PC in the Tokyo cyber cafe.
    CafeTerminal,
    /// Core mainframe at the Europa data center.
    EuropaMainframe,
}

impl Clue {
    /// Stable string id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::WarehouseTerminal => "warehouse_terminal",
            Self::CafeTerminal => "cafe_terminal",
            Self::EuropaMainframe => "europa_mainframe",
        }
    }

    /// Parses a stable string id.
    pub fn from_id(raw: &str) -> Option<Self> {
        match raw {
            "warehouse_terminal" => Some(Self::WarehouseTerminal),
            "cafe_terminal" => Some(Self::CafeTerminal),
            "europa_mainframe" => Some(Self::EuropaMainframe),
            _ => None,
        }
    }

    /// Progress the story is raised to when this clue is found.
    pub const fn progress_target(self) -> StoryProgress {
        match self {
            Self::WarehouseTerminal => StoryProgress::from_thousandths(2000),
            Self::CafeTerminal => StoryProgress::from_thousandths(3000),
            Self::EuropaMainframe => StoryProgress::from_thousandths(3200),
        }
    }
}

/// Read-only game snapshot handed to app logic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppContext {
    /// Current story progress.
    pub story: StoryProgress,
    /// Current integrity.
    pub integrity: SystemIntegrity,
    /// Recorded dialogue picks.
    pub choices: ChoiceRecord,
    /// Generated login password.
    pub password: String,
    /// Current world location id.
    pub location_id: String,
    /// Systems the player has shut down.
    pub disabled_systems: Vec<String>,
}

/// Callback surface the runtime exposes to apps.
pub trait AppHost {
    /// Resolves a risky action with a single random draw and returns whether it succeeded.
    fn perform_risky_action(&mut self, action: RiskyAction) -> bool;

    /// Restores integrity, capped at full health.
    fn repair_system(&mut self, amount: u32);

    /// Records a dialogue choice, or selects the ending for the final decision.
    fn choose(&mut self, choice: DialogueChoice);

    /// Advances the story. Progress never decreases.
    fn advance_story(&mut self, amount: StoryProgress);

    /// Registers a clue found in the world.
    fn find_clue(&mut self, clue: Clue);

    /// Shuts down a named system once, paying `cost` integrity.
    fn disable_system(&mut self, name: &str, cost: u32);
}
