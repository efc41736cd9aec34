use desktop_runtime::{GameProvider, GameShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Shadowfall" />
        <Meta name="description" content="A narrative desktop-simulator thriller." />

        <main class="site-root">
            <GameEntry />
        </main>
    }
}

#[component]
pub fn GameEntry() -> impl IntoView {
    view! {
        <GameProvider>
            <GameShell />
        </GameProvider>
    }
}
