use super::*;
use crate::world::{
    camera::{scene_offset, scene_transform},
    interactables, location, nearby_interaction, Interactable, SceneRect, PLAYER_SIZE,
};

fn rect_style(rect: &SceneRect) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        rect.x, rect.y, rect.w, rect.h
    )
}

fn prop_view(item: Interactable, debug: bool) -> View {
    let style = rect_style(&item.rect);
    let reach = debug.then(|| {
        let center = item.rect.center();
        let diameter = item.threshold * 2.0;
        view! {
            <div
                class="collision-reach"
                style=format!(
                    "left:{}px;top:{}px;width:{diameter}px;height:{diameter}px;",
                    center.x - item.threshold,
                    center.y - item.threshold
                )
            ></div>
        }
    });

    view! {
        <div class="scene-prop" class:collision-box=debug style=style>
            <img src=item.prop.asset_url() alt="" draggable="false" />
            {item.label.map(|label| view! { <div class="portal-label">{label}</div> })}
        </div>
        {reach}
    }
    .into_view()
}

#[component]
pub(super) fn WorldView() -> impl IntoView {
    let runtime = use_game_runtime();
    let state = runtime.state;
    let zoom = runtime.config.with_value(|config| config.camera.zoom);

    let location_id = create_memo(move |_| state.with(|s| s.location_id));
    let story = create_memo(move |_| state.with(|s| s.story));
    let ready = create_memo(move |_| state.with(|s| s.world.scene_ready));
    let debug = create_memo(move |_| state.with(|s| s.overlays.collision_debug));
    let prompt = create_memo(move |_| {
        state.with(|s| {
            nearby_interaction(s.location_id, s.story, s.world.position).map(|item| item.prompt)
        })
    });

    let scene_style = move || {
        state.with(|s| {
            let size = location(s.location_id).scene.size();
            let offset = scene_offset(s.world.camera, s.viewport, size, zoom);
            format!(
                "width:{}px;height:{}px;transform:{};transform-origin:top left;",
                size.width,
                size.height,
                scene_transform(offset, zoom)
            )
        })
    };
    let player_style = move || {
        state.with(|s| {
            format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;",
                s.world.position.x, s.world.position.y, PLAYER_SIZE.width, PLAYER_SIZE.height
            )
        })
    };
    let sprite = move || state.with(|s| s.world.facing.sprite_url());
    let props = move || {
        let debug = debug.get();
        interactables(location_id.get(), story.get())
            .into_iter()
            .map(|item| prop_view(item, debug))
            .collect_view()
    };

    view! {
        <Show
            when=move || ready.get()
            fallback=|| view! { <div class="world-loading">"Loading Scene..."</div> }
        >
            <div class="world-view">
                <div
                    class="world-scene"
                    data-scene=move || location(location_id.get()).scene.css_id()
                    style=scene_style
                >
                    {props}
                    <div class="world-player" class:collision-box=move || debug.get() style=player_style>
                        <img src=sprite alt="Player character" class="pixelated" draggable="false" />
                    </div>
                </div>
                <div class="world-location">
                    {move || format!("LOCATION: {}", location(location_id.get()).name)}
                </div>
                <div class="world-prompt">
                    {move || prompt.get().map(|text| view! { <p>{text}</p> })}
                </div>
            </div>
        </Show>
    }
}
