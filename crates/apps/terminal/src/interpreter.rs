//! Command interpreter for the agent terminal.

use chrono::{DateTime, Utc};
use desktop_app_contract::{AppContext, AppHost, IntegrityBand, RiskyAction, StoryProgress};

/// Lines printed when a terminal window opens.
pub const BANNER: [&str; 2] = [
    "FBI Secure Terminal v3.1.4",
    "Type \"help\" for a list of commands.",
];

/// The only target `breach` accepts.
pub const BREACH_TARGET: &str = "firewall_europa";
/// Progress at which `breach` becomes available.
pub const BREACH_UNLOCK: StoryProgress = StoryProgress::from_thousandths(3200);
/// Progress granted by a successful breach.
pub const BREACH_REWARD: StoryProgress = StoryProgress::from_thousandths(4000);

/// Odds and costs of a breach attempt.
pub const BREACH_RISK: RiskyAction = RiskyAction {
    success_chance: 0.5,
    cost_on_success: 15,
    cost_on_failure: 25,
};

/// Integrity restored by `repair_core`.
pub const REPAIR_AMOUNT: u32 = 25;

const LAST_LOGIN_OFFSET_MS: u64 = 3_600_000;

/// Long-running work started by a command and finished after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalJob {
    /// `breach firewall_europa`.
    Breach,
    /// `repair_core`.
    Repair,
}

/// Output log and busy flag of one terminal window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSession {
    lines: Vec<String>,
    busy: bool,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self {
            lines: BANNER.iter().map(|line| line.to_string()).collect(),
            busy: false,
        }
    }
}

impl TerminalSession {
    /// Printed lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether a deferred job is still running.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn push(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn push_block(&mut self, text: &str) {
        self.lines.extend(text.split('\n').map(str::to_string));
    }

    /// Runs one input line. Returns the deferred job the command started, if any.
    ///
    /// Input is ignored entirely while a job is pending.
    pub fn submit(&mut self, input: &str, ctx: &AppContext, now_ms: u64) -> Option<TerminalJob> {
        if self.busy {
            return None;
        }
        self.push(format!("> {input}"));

        let normalized = input.trim().to_lowercase();
        let mut words = normalized.split_whitespace();
        let command = words.next().unwrap_or("");
        let argument = words.next();

        match command {
            "clear" => {
                self.lines.clear();
                None
            }
            "breach" if ctx.story.reached(BREACH_UNLOCK) => self.start_breach(argument),
            "diagnostic" => {
                self.diagnostic(ctx);
                None
            }
            "repair_core" => self.start_repair(ctx),
            "help" => {
                self.push(help_text(ctx.story));
                None
            }
            "whoami" => {
                self.push_block("user: AGENT_77\nauthorization: LEVEL 5 CLEARANCE");
                None
            }
            "status" => {
                self.push("System status: NOMINAL");
                self.push("Network: SECURE_UPLINK_ESTABLISHED");
                self.push(format!(
                    "Last login: {}",
                    format_utc(now_ms.saturating_sub(LAST_LOGIN_OFFSET_MS))
                ));
                None
            }
            "ls" => {
                self.push_block("cases.log\nevidence_locker\nsecure_comms.dat");
                None
            }
            "cat" => {
                match argument.and_then(cat_output) {
                    Some(text) => self.push_block(text),
                    None => self.push("Error: File not found or access denied."),
                }
                None
            }
            _ => {
                self.push(format!("command not found: {input}"));
                None
            }
        }
    }

    fn start_breach(&mut self, target: Option<&str>) -> Option<TerminalJob> {
        if target != Some(BREACH_TARGET) {
            self.push("Error: Invalid target. Valid target: firewall_europa");
            return None;
        }
        self.busy = true;
        self.push("Attempting firewall breach on target: firewall_europa...");
        self.push("Sacrificing system resources for elevated privileges...");
        Some(TerminalJob::Breach)
    }

    fn start_repair(&mut self, ctx: &AppContext) -> Option<TerminalJob> {
        if ctx.integrity.is_full() {
            self.push("System integrity is already at 100%. No repair needed.");
            return None;
        }
        self.busy = true;
        self.push("Initializing core system repair sequence... This may cause temporary instability.");
        Some(TerminalJob::Repair)
    }

    fn diagnostic(&mut self, ctx: &AppContext) {
        self.push("Running system diagnostics...");
        self.push(format!("Core Integrity: {}%", ctx.integrity));
        self.push(match ctx.integrity.band() {
            IntegrityBand::Critical => "CRITICAL DAMAGE DETECTED. IMMEDIATE REPAIR RECOMMENDED.",
            IntegrityBand::Unstable => "WARNING: Minor data corruption detected.",
            IntegrityBand::Stable => "System nominal. All systems green.",
        });
    }

    /// Finishes a deferred job against the host and clears the busy flag.
    pub fn complete(&mut self, job: TerminalJob, story: StoryProgress, host: &mut dyn AppHost) {
        match job {
            TerminalJob::Breach => {
                if host.perform_risky_action(BREACH_RISK) {
                    self.push(">> BREACH SUCCESSFUL. Root access gained. Unlocking final case file...");
                    self.push("> Access CYB-004 for final instructions.");
                    let remaining = BREACH_REWARD.saturating_sub(story);
                    if remaining > StoryProgress::ZERO {
                        host.advance_story(remaining);
                    }
                } else {
                    self.push(">> BREACH FAILED. Counter-intrusion detected! System integrity severely compromised.");
                }
            }
            TerminalJob::Repair => {
                host.repair_system(REPAIR_AMOUNT);
                self.push(format!(
                    ">> REPAIR COMPLETE. System integrity restored by {REPAIR_AMOUNT}%."
                ));
            }
        }
        self.busy = false;
    }
}

/// Output of `help`; `breach` is listed once it unlocks.
pub fn help_text(story: StoryProgress) -> String {
    let mut text = String::from(
        "Available commands: help, whoami, status, clear, ls, cat <file>, diagnostic, repair_core",
    );
    if story.reached(BREACH_UNLOCK) {
        text.push_str(", breach <target>");
    }
    text
}

fn cat_output(file: &str) -> Option<&'static str> {
    match file {
        "cases.log" => Some("CYB-001: ACTIVE\nCYB-002: LOCKED\nCYB-003: LOCKED"),
        "evidence_locker" => Some("Permission denied. Use Evidence Viewer application."),
        "secure_comms.dat" => Some("File is encrypted."),
        _ => None,
    }
}

/// Formats unix milliseconds as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_utc(unix_ms: u64) -> String {
    i64::try_from(unix_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| String::from("UNKNOWN"))
}
