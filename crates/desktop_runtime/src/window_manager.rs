//! Window registry transitions: open, focus, minimize, maximize, close and drag.
//!
//! Every open or focus consumes the next value of a monotonic z counter, so the active window
//! always holds the highest z-index among open windows.

use rand::{Rng, RngCore};

use crate::{
    apps::AppDescriptor,
    config::WindowConfig,
    model::{
        AppId, DesktopState, DragSession, InteractionState, PointerPosition, WindowId,
        WindowRecord, WindowRect,
    },
};

fn window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

fn take_z_index(state: &mut DesktopState) -> u32 {
    let z = state.next_z_index;
    state.next_z_index += 1;
    z
}

/// The visible window already showing `app_id`, if any.
pub fn visible_window_for_app(state: &DesktopState, app_id: AppId) -> Option<WindowId> {
    state
        .windows
        .iter()
        .find(|w| w.app_id == app_id && !w.minimized && !w.closing)
        .map(|w| w.id)
}

/// Creates, raises and activates a new window for `app`.
pub fn open_window(
    state: &mut DesktopState,
    app: &AppDescriptor,
    config: &WindowConfig,
    rng: &mut dyn RngCore,
) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id += 1;
    let (w, h) = app
        .size
        .unwrap_or((config.default_width, config.default_height));
    let rect = WindowRect {
        x: rng.gen_range(config.spawn_x[0]..config.spawn_x[1]),
        y: rng.gen_range(config.spawn_y[0]..config.spawn_y[1]),
        w,
        h,
    };
    let z_index = take_z_index(state);
    state.windows.push(WindowRecord {
        id,
        app_id: app.app_id,
        title: app.title.to_string(),
        rect,
        restore_rect: None,
        z_index,
        minimized: false,
        maximized: false,
        closing: false,
    });
    state.active_window = Some(id);
    id
}

/// Raises and activates `window_id`. Returns whether anything changed.
///
/// Focusing the active window is a no-op. A restored window takes over from any other visible
/// window of the same app, which is minimized in its place.
pub fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    if state.is_active(window_id) {
        return false;
    }
    let z = state.next_z_index;
    let Some(window) = window_mut(state, window_id) else {
        return false;
    };
    let restored_app = window.minimized.then_some(window.app_id);
    window.z_index = z;
    window.minimized = false;
    state.next_z_index += 1;
    state.active_window = Some(window_id);
    if let Some(app_id) = restored_app {
        state
            .windows
            .iter_mut()
            .filter(|w| w.id != window_id && w.app_id == app_id && !w.closing)
            .for_each(|w| w.minimized = true);
    }
    true
}

/// Flips the minimized flag. Returns the new flag, or `None` for an unknown window.
pub fn toggle_minimize(state: &mut DesktopState, window_id: WindowId) -> Option<bool> {
    let window = window_mut(state, window_id)?;
    let minimized = !window.minimized;
    if minimized {
        window.minimized = true;
        if state.is_active(window_id) {
            state.active_window = None;
        }
    } else {
        focus_window(state, window_id);
    }
    Some(minimized)
}

/// Taskbar behaviour: minimize the active visible window, otherwise bring it forward.
pub fn taskbar_click(state: &mut DesktopState, window_id: WindowId) -> Option<bool> {
    let window = state.window(window_id)?;
    if state.is_active(window_id) && !window.minimized {
        toggle_minimize(state, window_id)
    } else {
        focus_window(state, window_id);
        Some(false)
    }
}

/// Fills `viewport`, or restores the pre-maximize rect on the second call.
pub fn toggle_maximize(state: &mut DesktopState, window_id: WindowId, viewport: WindowRect) -> bool {
    let Some(window) = window_mut(state, window_id) else {
        return false;
    };
    if window.maximized {
        if let Some(restore) = window.restore_rect.take() {
            window.rect = restore;
        }
        window.maximized = false;
    } else {
        window.restore_rect = Some(window.rect);
        window.rect = viewport;
        window.maximized = true;
    }
    true
}

/// Marks a window as closing. Returns whether it was newly marked.
pub fn begin_close(state: &mut DesktopState, window_id: WindowId) -> Option<bool> {
    let window = window_mut(state, window_id)?;
    let newly = !window.closing;
    window.closing = true;
    Some(newly)
}

/// Drops a window record. Returns whether it existed.
pub fn remove_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let before = state.windows.len();
    state.windows.retain(|w| w.id != window_id);
    if state.is_active(window_id) {
        state.active_window = None;
    }
    state.windows.len() != before
}

/// Starts a header drag. Maximized windows do not move.
pub fn begin_move(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    pointer: PointerPosition,
) -> bool {
    focus_window(state, window_id);
    let Some(window) = state.window(window_id) else {
        return false;
    };
    if !window.maximized {
        interaction.drags.insert(
            window_id,
            DragSession {
                pointer_start: pointer,
                rect_start: window.rect,
            },
        );
    }
    true
}

/// Moves a dragged window to its start rect plus the pointer delta.
pub fn update_move(
    state: &mut DesktopState,
    interaction: &InteractionState,
    window_id: WindowId,
    pointer: PointerPosition,
) -> bool {
    let Some(drag) = interaction.drags.get(&window_id) else {
        return false;
    };
    let Some(window) = window_mut(state, window_id) else {
        return false;
    };
    let next = drag.rect_start.offset(
        pointer.x - drag.pointer_start.x,
        pointer.y - drag.pointer_start.y,
    );
    if window.rect == next {
        return false;
    }
    window.rect = next;
    true
}

/// Ends the drag of `window_id`; other windows' drags are untouched.
pub fn end_move(interaction: &mut InteractionState, window_id: WindowId) -> bool {
    interaction.drags.remove(&window_id).is_some()
}
