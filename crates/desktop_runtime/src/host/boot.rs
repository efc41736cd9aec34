use leptos::{create_effect, logging, spawn_local, Callable, Callback};

use crate::{host::GameHostContext, persistence, reducer::GameAction};

pub(super) fn install_boot_hydration(host: GameHostContext, dispatch: Callback<GameAction>) {
    create_effect(move |_| {
        let dispatch = dispatch;
        let host = host.clone();
        spawn_local(async move {
            let store = host.save_store();
            let save = persistence::load_boot_save(store.as_ref()).await;
            if save.is_none() {
                logging::log!("no saved game found");
            }
            dispatch.call(GameAction::HydrateSave { save });
        });
    });
}
