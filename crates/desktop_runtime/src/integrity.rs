//! Integrity changes, risky-action rolls and the crash latch.

use desktop_app_contract::{RiskyAction, SystemIntegrity};
use rand::{Rng, RngCore};

use crate::{
    config::DelayConfig,
    model::{GameState, Screen},
    scheduler::{ScheduledEvent, TimerScope},
};

/// Draws one sample and deducts the matching cost in a single step.
pub fn resolve_risky_action(
    integrity: &mut SystemIntegrity,
    action: RiskyAction,
    rng: &mut dyn RngCore,
) -> bool {
    let success = action.succeeds_with(rng.gen::<f64>());
    integrity.damage(action.cost(success));
    success
}

/// Shuts a named system down once, paying `cost`. Returns whether it was newly disabled.
pub fn disable_system(state: &mut GameState, name: &str, cost: u32) -> bool {
    if state.disabled_systems.iter().any(|s| s == name) {
        return false;
    }
    state.disabled_systems.push(name.to_string());
    state.integrity.damage(cost);
    true
}

/// Outcome of comparing integrity before and after an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrityChange {
    pub damaged: bool,
    pub crashed: bool,
}

/// Starts the damage flash on any decrease and latches the crash when the agent desktop hits zero.
pub fn settle(
    state: &mut GameState,
    before: SystemIntegrity,
    delays: &DelayConfig,
    now_ms: u64,
) -> IntegrityChange {
    let mut change = IntegrityChange::default();
    if state.integrity < before {
        change.damaged = true;
        // A fresh hit restarts the flash.
        if let Some(pending) = state.overlays.damage_flash.take() {
            state.timeline.cancel(pending);
        }
        state.overlays.damage_flash = Some(state.timeline.schedule(
            TimerScope::Session,
            now_ms + delays.damage_flash_ms,
            ScheduledEvent::DamageFlashEnd,
        ));
    }
    if state.screen == Screen::AgentDesktop
        && state.integrity.is_depleted()
        && !state.overlays.crashed
    {
        state.overlays.crashed = true;
        state.overlays.paused = false;
        state.timeline.schedule(
            TimerScope::Session,
            now_ms + delays.crash_reset_ms,
            ScheduledEvent::CrashReset,
        );
        change.crashed = true;
    }
    change
}

/// Opacity of the red agent-desktop tint; zero at 70 integrity and above.
pub fn tint_opacity(integrity: SystemIntegrity) -> f64 {
    (f64::from(70 - i32::from(integrity.value())) / 100.0 * 0.4).max(0.0)
}
