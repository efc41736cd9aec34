pub mod apps;
pub mod components;
pub mod config;
mod effect_executor;
pub mod ending;
mod host;
pub mod input;
pub mod integrity;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod scheduler;
pub mod session;
pub mod story;
pub mod window_manager;
pub mod world;

pub use components::{use_game_runtime, GameProvider, GameRuntimeContext, GameShell};
pub use config::{ConfigError, RuntimeConfig};
pub use host::GameHostContext;
pub use model::*;
pub use persistence::{
    decode_save, delete_save, load_boot_save, load_save, persist_save, SaveError, SaveFile,
    SAVE_SCHEMA_VERSION,
};
pub use reducer::{reduce_game, GameAction, ReduceEnv, ReducerError, RuntimeEffect, SoundCue};
