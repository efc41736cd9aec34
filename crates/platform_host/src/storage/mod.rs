//! Save-slot storage contracts.

pub mod save_slot;
