//! Case-file content table.

use desktop_app_contract::StoryProgress;

/// Id of the file holding the final decision.
pub const FINAL_FILE_ID: &str = "CYB-004";
/// Story progress at which the final decision becomes available.
pub const FINAL_CHOICE_UNLOCK: StoryProgress = StoryProgress::from_thousandths(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFile {
    pub id: &'static str,
    pub title: &'static str,
    pub status: &'static str,
    pub summary: &'static str,
    pub details: &'static str,
    /// Extra text revealed only after a successful decryption.
    pub encrypted_details: Option<&'static str>,
    pub unlocked_at: Option<StoryProgress>,
}

impl CaseFile {
    pub fn is_encrypted(&self) -> bool {
        self.encrypted_details.is_some()
    }

    /// Files whose status reads "Active" are flagged red in the list.
    pub fn is_active(&self) -> bool {
        self.status.contains("Active")
    }

    pub fn is_visible_at(&self, story: StoryProgress) -> bool {
        self.unlocked_at.map_or(true, |t| story.reached(t))
    }
}

pub const CASE_FILES: [CaseFile; 4] = [
    CaseFile {
        id: "CYB-001",
        title: "Project Shadowfall",
        status: "Active",
        summary: "Investigating a series of cyberattacks against federal financial institutions. Traces point to a sophisticated actor known as \"Void\".",
        details: "Initial breach vector identified as a zero-day exploit in enterprise VPN software. Data exfiltration focused on sensitive economic forecasts. Team is currently analyzing malware samples for attribution.",
        encrypted_details: None,
        unlocked_at: None,
    },
    CaseFile {
        id: "CYB-002",
        title: "Void's Origin",
        status: "Locked",
        summary: "A fragmented data packet recovered from a derelict warehouse terminal. Contains early writings and code snippets from \"Void\".",
        details: "DATA FRAGMENT 1:\n\"...they built this digital world as a cage. They control the flow of information, the very thoughts we are allowed to have. They call us criminals for seeking knowledge, for wanting to be free. But who is the real criminal? The one who opens a locked door, or the one who built the prison?\n\nThey took everything from me. My research, my name. They buried me in a digital grave. But they forgot one thing... ghosts can haunt the machine.\"\n\nANALYSIS: Subject displays a deep-seated grudge against a corporate or government entity. Suggests a personal motive beyond financial gain.",
        encrypted_details: None,
        unlocked_at: Some(StoryProgress::from_thousandths(2000)),
    },
    CaseFile {
        id: "CYB-003",
        title: "The Puppeteer's Network",
        status: "Locked",
        summary: "Data recovered from a Tokyo cyber cafe reveals a complex network topology. Void is using a distributed network to mask their true location.",
        details: "DATA FRAGMENT 2:\n\"This is my web. Each node a puppet, dancing on my strings. They chase my shadows across the globe, never realizing I am the one pulling.\"\n\n[ FURTHER DATA ENCRYPTED - REQUIRES FIREWALL BREACH ]",
        encrypted_details: Some("The network's central hub appears to be located in Europe. The reference to \"their own backyard\" combined with network traffic analysis points towards a major data hub in Frankfurt, Germany. Recommending field operation to investigate Europa Data Center."),
        unlocked_at: Some(StoryProgress::from_thousandths(3000)),
    },
    CaseFile {
        id: FINAL_FILE_ID,
        title: "The Ghost Protocol",
        status: "Locked - CRITICAL",
        summary: "Final message from Void. A choice must be made.",
        details: "AGENT 77. YOU'VE MADE IT. YOU'VE SEEN THE TRUTH. NOW YOU HAVE A CHOICE.\n\nOPTION A: EXPOSE EVERYTHING. The corruption, the lies, the program that created me. The system will burn, but from the ashes, something new can grow. The world will know chaos, but it will be a world of truth. This is the path of sacrifice for a greater good.\n\nOPTION B: JOIN ME. Together, we can control the system from within. We can be the ghosts in the machine, manipulating events for what WE believe is right. Order will be maintained, but it will be our order. This is the path of control, of power.\n\nTHE CHOICE IS YOURS. THE PROTOCOL IS IN YOUR HANDS. WHAT WILL YOU SACRIFICE?",
        encrypted_details: None,
        unlocked_at: Some(FINAL_CHOICE_UNLOCK),
    },
];

pub fn visible_files(story: StoryProgress) -> Vec<CaseFile> {
    CASE_FILES
        .iter()
        .copied()
        .filter(|file| file.is_visible_at(story))
        .collect()
}

pub fn find_file(id: &str) -> Option<&'static CaseFile> {
    CASE_FILES.iter().find(|file| file.id == id)
}
