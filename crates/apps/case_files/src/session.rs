use std::collections::{BTreeMap, BTreeSet};

use desktop_app_contract::{AppHost, DialogueChoice, RiskyAction, StoryProgress};

use crate::catalog::{find_file, visible_files, CaseFile, FINAL_CHOICE_UNLOCK, FINAL_FILE_ID};

pub const DECRYPT_RISK: RiskyAction = RiskyAction {
    success_chance: 0.65,
    cost_on_success: 5,
    cost_on_failure: 15,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptStatus {
    Decrypting,
    Succeeded,
    Failed,
}

impl DecryptStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::Decrypting => "DECRYPTING...",
            Self::Succeeded => "DECRYPTION SUCCESSFUL",
            Self::Failed => "DECRYPTION FAILED: Anomaly Detected",
        }
    }
}

/// Deferred decryption attempt, resolved after the processing delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionJob {
    pub file_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilesSession {
    selected: Option<String>,
    decrypted: BTreeSet<String>,
    status: BTreeMap<String, DecryptStatus>,
    busy: bool,
}

impl CaseFilesSession {
    pub fn select(&mut self, file_id: &str) {
        if find_file(file_id).is_some() {
            self.selected = Some(file_id.to_string());
        }
    }

    /// Returns the selected file, falling back to the first visible one.
    pub fn selected_file(&self, story: StoryProgress) -> Option<CaseFile> {
        let visible = visible_files(story);
        self.selected
            .as_deref()
            .and_then(|id| visible.iter().copied().find(|file| file.id == id))
            .or_else(|| visible.first().copied())
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_decrypted(&self, file_id: &str) -> bool {
        self.decrypted.contains(file_id)
    }

    pub fn status(&self, file_id: &str) -> Option<DecryptStatus> {
        self.status.get(file_id).copied()
    }

    /// Whether the decrypt button should be offered for `file_id`.
    pub fn can_attempt(&self, file_id: &str) -> bool {
        let encrypted = find_file(file_id).is_some_and(CaseFile::is_encrypted);
        encrypted
            && !self.busy
            && !self.is_decrypted(file_id)
            && self.status(file_id) != Some(DecryptStatus::Decrypting)
    }

    /// Starts a decryption attempt. Returns `None` while another attempt is in flight.
    pub fn begin_decryption(&mut self, file_id: &str) -> Option<DecryptionJob> {
        if !self.can_attempt(file_id) {
            return None;
        }
        self.busy = true;
        self.status
            .insert(file_id.to_string(), DecryptStatus::Decrypting);
        Some(DecryptionJob {
            file_id: file_id.to_string(),
        })
    }

    /// Resolves a pending attempt through the host's risky-action roll.
    pub fn resolve_decryption(&mut self, job: &DecryptionJob, host: &mut dyn AppHost) -> bool {
        let ok = host.perform_risky_action(DECRYPT_RISK);
        let status = if ok {
            self.decrypted.insert(job.file_id.clone());
            DecryptStatus::Succeeded
        } else {
            DecryptStatus::Failed
        };
        self.status.insert(job.file_id.clone(), status);
        self.busy = false;
        ok
    }
}

/// Options for the final decision, available once the last file unlocks.
pub fn final_choices(story: StoryProgress) -> Option<[DialogueChoice; 2]> {
    story.reached(FINAL_CHOICE_UNLOCK).then(|| {
        [
            DialogueChoice::final_choice("A", "Expose Everything"),
            DialogueChoice::final_choice("B", "Join Void"),
        ]
    })
}

/// Whether `file_id` shows the final decision buttons.
pub fn shows_final_choice(file_id: &str, story: StoryProgress) -> bool {
    file_id == FINAL_FILE_ID && final_choices(story).is_some()
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{Clue, SystemIntegrity};
    use pretty_assertions::assert_eq;

    use super::*;

    struct FixedHost {
        succeed: bool,
        integrity: SystemIntegrity,
        rolls: usize,
    }

    impl AppHost for FixedHost {
        fn perform_risky_action(&mut self, action: RiskyAction) -> bool {
            self.rolls += 1;
            self.integrity.damage(action.cost(self.succeed));
            self.succeed
        }
        fn repair_system(&mut self, _amount: u32) {}
        fn choose(&mut self, _choice: DialogueChoice) {}
        fn advance_story(&mut self, _amount: StoryProgress) {}
        fn find_clue(&mut self, _clue: Clue) {}
        fn disable_system(&mut self, _name: &str, _cost: u32) {}
    }

    fn host(succeed: bool) -> FixedHost {
        FixedHost {
            succeed,
            integrity: SystemIntegrity::FULL,
            rolls: 0,
        }
    }

    #[test]
    fn files_unlock_with_progress() {
        let ids = |story: f64| {
            visible_files(StoryProgress::from_f64(story))
                .iter()
                .map(|f| f.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(1.0), vec!["CYB-001"]);
        assert_eq!(ids(2.0), vec!["CYB-001", "CYB-002"]);
        assert_eq!(ids(4.0), vec!["CYB-001", "CYB-002", "CYB-003", "CYB-004"]);
    }

    #[test]
    fn selection_falls_back_to_first_visible_file() {
        let mut session = CaseFilesSession::default();
        session.select("CYB-003");
        let story = StoryProgress::from_f64(2.0);
        assert_eq!(session.selected_file(story).map(|f| f.id), Some("CYB-001"));
        let story = StoryProgress::from_f64(3.0);
        assert_eq!(session.selected_file(story).map(|f| f.id), Some("CYB-003"));
    }

    #[test]
    fn decryption_is_gated_while_busy() {
        let mut session = CaseFilesSession::default();
        let job = session.begin_decryption("CYB-003").expect("first attempt");
        assert!(session.is_busy());
        assert_eq!(session.begin_decryption("CYB-003"), None);

        let mut host = host(true);
        assert!(session.resolve_decryption(&job, &mut host));
        assert_eq!(host.rolls, 1);
        assert_eq!(host.integrity.value(), 95);
        assert!(session.is_decrypted("CYB-003"));
        assert_eq!(session.status("CYB-003"), Some(DecryptStatus::Succeeded));
        assert_eq!(session.begin_decryption("CYB-003"), None);
    }

    #[test]
    fn failed_decryption_can_be_retried() {
        let mut session = CaseFilesSession::default();
        let job = session.begin_decryption("CYB-003").expect("attempt");
        let mut host = host(false);
        assert!(!session.resolve_decryption(&job, &mut host));
        assert_eq!(host.integrity.value(), 85);
        assert_eq!(
            session.status("CYB-003").map(DecryptStatus::message),
            Some("DECRYPTION FAILED: Anomaly Detected")
        );
        assert!(session.can_attempt("CYB-003"));
    }

    #[test]
    fn plain_files_cannot_be_decrypted() {
        let mut session = CaseFilesSession::default();
        assert_eq!(session.begin_decryption("CYB-001"), None);
        assert_eq!(session.begin_decryption("CYB-999"), None);
    }

    #[test]
    fn final_choice_requires_full_progress() {
        assert!(final_choices(StoryProgress::from_f64(3.2)).is_none());
        let [a, b] = final_choices(StoryProgress::from_f64(4.0)).expect("unlocked");
        assert!(a.is_final() && b.is_final());
        assert_eq!(a.id, "A");
        assert_eq!(b.id, "B");
        assert!(shows_final_choice("CYB-004", StoryProgress::from_f64(4.0)));
        assert!(!shows_final_choice("CYB-003", StoryProgress::from_f64(4.0)));
    }
}
