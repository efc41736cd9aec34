use crate::{config::CameraConfig, model::Viewport};

use super::{scene::Size, Vec2, PLAYER_SIZE};

/// Moves the camera a fraction of the way toward `target`, snapping once close.
pub fn follow(camera: Vec2, target: Vec2, config: &CameraConfig) -> Vec2 {
    let delta = target.sub(camera);
    if delta.x.abs() < config.snap_epsilon && delta.y.abs() < config.snap_epsilon {
        return target;
    }
    camera.add(delta.scale(config.lerp))
}

/// Screen-space translation of the scaled scene so the camera stays centred without showing
/// anything past the scene edges.
pub fn scene_offset(camera: Vec2, viewport: Viewport, scene: Size, zoom: f64) -> Vec2 {
    let view_w = f64::from(viewport.width);
    let view_h = f64::from(viewport.height);
    let center_x = camera.x + PLAYER_SIZE.width / 2.0;
    let center_y = camera.y + PLAYER_SIZE.height / 2.0;

    let clamp = |target: f64, min: f64| target.min(0.0).max(min);
    Vec2 {
        x: clamp(view_w / 2.0 - center_x * zoom, view_w - scene.width * zoom),
        y: clamp(view_h / 2.0 - center_y * zoom, view_h - scene.height * zoom),
    }
}

/// CSS transform for the scene container.
pub fn scene_transform(offset: Vec2, zoom: f64) -> String {
    format!(
        "translate3d({}px, {}px, 0) scale({zoom})",
        offset.x, offset.y
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn follow_lerps_then_snaps() {
        let config = CameraConfig::default();
        let moved = follow(Vec2::ZERO, Vec2 { x: 100.0, y: 0.0 }, &config);
        assert!((moved.x - 8.0).abs() < 1e-9);
        let target = Vec2 { x: 10.05, y: 9.95 };
        assert_eq!(follow(Vec2 { x: 10.0, y: 10.0 }, target, &config), target);
    }

    #[test]
    fn offset_clamps_at_scene_edges() {
        let viewport = Viewport {
            width: 1000,
            height: 500,
        };
        let hub = Size {
            width: 1200.0,
            height: 1200.0,
        };
        // Top-left corner: the scene cannot slide right or down.
        assert_eq!(scene_offset(Vec2::ZERO, viewport, hub, 5.0), Vec2 { x: 0.0, y: 0.0 });
        // Bottom-right corner: pinned to the far edge.
        let far = Vec2 {
            x: 1152.0,
            y: 1136.0,
        };
        assert_eq!(
            scene_offset(far, viewport, hub, 5.0),
            Vec2 {
                x: -5000.0,
                y: -5500.0
            }
        );
        // Middle: centred on the sprite.
        let mid = Vec2 { x: 576.0, y: 568.0 };
        assert_eq!(
            scene_offset(mid, viewport, hub, 5.0),
            Vec2 {
                x: 500.0 - 600.0 * 5.0,
                y: 250.0 - 600.0 * 5.0
            }
        );
    }

    #[test]
    fn transform_is_css() {
        assert_eq!(
            scene_transform(Vec2 { x: -12.5, y: 0.0 }, 5.0),
            "translate3d(-12.5px, 0px, 0) scale(5)"
        );
    }
}
