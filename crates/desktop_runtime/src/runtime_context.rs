//! Runtime provider and context wiring for the game shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, the random source
//! and host bootstrap wiring. UI composition stays in [`crate::components`].

use leptos::*;
use platform_host::unix_time_ms_now;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::RuntimeConfig,
    effect_executor,
    host::GameHostContext,
    model::{GameState, InteractionState},
    reducer::{reduce_game, GameAction, ReduceEnv, RuntimeEffect},
    session::generate_password,
};

#[derive(Clone, Copy)]
/// Leptos context for reading game state and dispatching [`GameAction`] values.
pub struct GameRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<GameHostContext>,
    /// Reactive game state signal.
    pub state: RwSignal<GameState>,
    /// Reactive pointer/drag interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Tunables loaded at startup.
    pub config: StoredValue<RuntimeConfig>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<GameAction>,
}

impl GameRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: GameAction) {
        self.dispatch.call(action);
    }
}

fn install_runtime_orchestration(runtime: GameRuntimeContext) {
    runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`GameRuntimeContext`] to descendant components and boots the saved game.
pub fn GameProvider(
    /// Tunables; defaults to the embedded `runtime.toml`.
    #[prop(optional)]
    config: Option<RuntimeConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_else(RuntimeConfig::embedded);
    let mut seed_rng = StdRng::seed_from_u64(unix_time_ms_now());
    let initial = GameState::new(
        generate_password(&mut seed_rng),
        config.windows.first_z_index,
    );

    let host = store_value(GameHostContext::default());
    let rng = store_value(seed_rng);
    let config = store_value(config);
    let state = create_rw_signal(initial);
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: GameAction| {
        let mut game = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_game = game.clone();
        let previous_ui = ui.clone();
        let now_ms = unix_time_ms_now();

        let outcome = config.with_value(|config| {
            let mut outcome = None;
            rng.update_value(|rng| {
                let mut env = ReduceEnv {
                    config,
                    rng,
                    now_ms,
                };
                outcome = Some(reduce_game(&mut game, &mut ui, action, &mut env));
            });
            outcome
        });

        match outcome {
            Some(Ok(new_effects)) => {
                if game != previous_game {
                    state.set(game);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Some(Err(err)) => logging::warn!("game reducer error: {err}"),
            None => logging::warn!("game runtime disposed; action dropped"),
        }
    });

    let runtime = GameRuntimeContext {
        host,
        state,
        interaction,
        effects,
        config,
        dispatch,
    };

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`GameRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`GameProvider`].
pub fn use_game_runtime() -> GameRuntimeContext {
    use_context::<GameRuntimeContext>().expect("GameRuntimeContext not provided")
}
