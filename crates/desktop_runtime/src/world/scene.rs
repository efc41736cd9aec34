//! Scene geometry and interactable placement.

use desktop_app_contract::{Clue, StoryProgress};

use super::{
    locations::{location, LocationId, LOCATIONS},
    Vec2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Office,
    Warehouse,
    Cafe,
    Hub,
    Datacenter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

pub const PLAYER_SIZE: Size = Size {
    width: 48.0,
    height: 64.0,
};

const PORTAL_SIZE: Size = Size {
    width: 64.0,
    height: 64.0,
};

const DEFAULT_THRESHOLD: f64 = 60.0;
const MAINFRAME_THRESHOLD: f64 = 80.0;

impl SceneKind {
    pub const fn size(self) -> Size {
        let (width, height) = match self {
            Self::Office => (360.0, 360.0),
            Self::Warehouse => (1600.0, 900.0),
            Self::Cafe => (1200.0, 800.0),
            Self::Hub => (1200.0, 1200.0),
            Self::Datacenter => (1600.0, 900.0),
        };
        Size { width, height }
    }

    pub const fn css_id(self) -> &'static str {
        match self {
            Self::Office => "office",
            Self::Warehouse => "warehouse",
            Self::Cafe => "cafe",
            Self::Hub => "hub",
            Self::Datacenter => "datacenter",
        }
    }

    /// Player start: horizontally centred, just above the bottom edge.
    pub fn spawn_point(self) -> Vec2 {
        let size = self.size();
        Vec2 {
            x: size.width / 2.0 - PLAYER_SIZE.width / 2.0,
            y: size.height - PLAYER_SIZE.height - 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl SceneRect {
    fn sized(x: f64, y: f64, size: Size) -> Self {
        Self {
            x,
            y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }
}

/// What pressing the interact key does next to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    AccessLaptop,
    FindClue(Clue),
    Navigate(LocationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    Laptop,
    WarehouseTerminal,
    CafePc,
    Mainframe,
    Portal,
}

impl Prop {
    pub const fn asset_url(self) -> &'static str {
        match self {
            Self::Laptop => "/assets/scenes/laptop.png",
            Self::WarehouseTerminal => "/assets/scenes/terminal_interact.png",
            Self::CafePc => "/assets/scenes/cafe_pc.png",
            Self::Mainframe => "/assets/scenes/mainframe.png",
            Self::Portal => "/assets/scenes/portal.png",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interactable {
    pub kind: InteractionKind,
    pub prop: Prop,
    pub rect: SceneRect,
    /// Maximum centre-to-centre distance at which the prompt shows.
    pub threshold: f64,
    pub prompt: String,
    /// Caption drawn under hub portals.
    pub label: Option<&'static str>,
}

impl Interactable {
    fn new(kind: InteractionKind, prop: Prop, rect: SceneRect, threshold: f64, prompt: &str) -> Self {
        Self {
            kind,
            prop,
            rect,
            threshold,
            prompt: prompt.to_string(),
            label: None,
        }
    }

    pub fn is_within_reach(&self, player: Vec2) -> bool {
        let player_center = Vec2 {
            x: player.x + PLAYER_SIZE.width / 2.0,
            y: player.y + PLAYER_SIZE.height / 2.0,
        };
        player_center.distance(self.rect.center()) < self.threshold
    }
}

fn exit_portal(x: f64, y: f64) -> Interactable {
    Interactable::new(
        InteractionKind::Navigate(LocationId::WorldMap),
        Prop::Portal,
        SceneRect::sized(x, y, PORTAL_SIZE),
        DEFAULT_THRESHOLD,
        "Press [E] to enter World Map",
    )
}

fn hub_portals(size: Size, story: StoryProgress) -> Vec<Interactable> {
    let destinations: Vec<_> = LOCATIONS
        .iter()
        .filter(|l| l.id != LocationId::WorldMap && l.is_unlocked(story))
        .collect();
    let count = destinations.len() as f64;
    let radius_x = size.width * 0.35;
    let radius_y = size.height * 0.25;
    let center_x = size.width / 2.0;
    let center_y = size.height / 2.0;

    destinations
        .into_iter()
        .enumerate()
        .map(|(i, destination)| {
            let angle = i as f64 / count * std::f64::consts::TAU;
            let x = center_x + radius_x * angle.cos() - PORTAL_SIZE.width / 2.0;
            let y = center_y + radius_y * angle.sin() - PORTAL_SIZE.height / 2.0;
            let mut portal = Interactable::new(
                InteractionKind::Navigate(destination.id),
                Prop::Portal,
                SceneRect::sized(x, y, PORTAL_SIZE),
                DEFAULT_THRESHOLD,
                &format!("Press [E] to travel to {}", destination.name),
            );
            portal.label = Some(destination.name);
            portal
        })
        .collect()
}

/// Objects placed in a location, in prompt priority order.
///
/// The exit portal only appears once the world map is reachable.
pub fn interactables(location_id: LocationId, story: StoryProgress) -> Vec<Interactable> {
    let scene = location(location_id).scene;
    let size = scene.size();
    let exit_open = location(LocationId::WorldMap).is_unlocked(story);
    let mut items = Vec::new();

    let exit = match scene {
        SceneKind::Office => {
            items.push(Interactable::new(
                InteractionKind::AccessLaptop,
                Prop::Laptop,
                SceneRect { x: 250.0, y: 160.0, w: 48.0, h: 48.0 },
                DEFAULT_THRESHOLD,
                "Press [E] to access",
            ));
            Some(exit_portal(60.0, 160.0))
        }
        SceneKind::Warehouse => {
            items.push(Interactable::new(
                InteractionKind::FindClue(Clue::WarehouseTerminal),
                Prop::WarehouseTerminal,
                SceneRect { x: size.width - 32.0 - 100.0, y: 200.0, w: 32.0, h: 32.0 },
                DEFAULT_THRESHOLD,
                "Press [E] to interact",
            ));
            Some(exit_portal(
                PORTAL_SIZE.width,
                size.height / 2.0 - PORTAL_SIZE.height / 2.0,
            ))
        }
        SceneKind::Cafe => {
            items.push(Interactable::new(
                InteractionKind::FindClue(Clue::CafeTerminal),
                Prop::CafePc,
                SceneRect { x: 150.0, y: 350.0, w: 48.0, h: 48.0 },
                DEFAULT_THRESHOLD,
                "Press [E] to access PC",
            ));
            Some(exit_portal(
                size.width - PORTAL_SIZE.width * 2.0,
                size.height - PORTAL_SIZE.height - 50.0,
            ))
        }
        SceneKind::Datacenter => {
            items.push(Interactable::new(
                InteractionKind::FindClue(Clue::EuropaMainframe),
                Prop::Mainframe,
                SceneRect { x: size.width / 2.0 - 64.0, y: 250.0, w: 128.0, h: 128.0 },
                MAINFRAME_THRESHOLD,
                "Press [E] to connect to the core",
            ));
            Some(exit_portal(
                PORTAL_SIZE.width,
                size.height - PORTAL_SIZE.height * 2.0,
            ))
        }
        SceneKind::Hub => {
            items.extend(hub_portals(size, story));
            None
        }
    };

    items.extend(exit.filter(|_| exit_open));
    items
}

/// The first interactable in reach of the player, if any.
pub fn nearby_interaction(
    location_id: LocationId,
    story: StoryProgress,
    player: Vec2,
) -> Option<Interactable> {
    interactables(location_id, story)
        .into_iter()
        .find(|item| item.is_within_reach(player))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn progress(value: f64) -> StoryProgress {
        StoryProgress::from_f64(value)
    }

    #[test]
    fn spawn_point_sits_above_bottom_edge() {
        assert_eq!(SceneKind::Office.spawn_point(), Vec2 { x: 156.0, y: 276.0 });
        assert_eq!(SceneKind::Hub.spawn_point(), Vec2 { x: 576.0, y: 1116.0 });
    }

    #[test]
    fn apartment_exit_requires_world_map() {
        let kinds = |story| {
            interactables(LocationId::PlayerRoom, story)
                .into_iter()
                .map(|i| i.kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(progress(0.0)), vec![InteractionKind::AccessLaptop]);
        assert_eq!(
            kinds(progress(1.0)),
            vec![
                InteractionKind::AccessLaptop,
                InteractionKind::Navigate(LocationId::WorldMap)
            ]
        );
    }

    #[test]
    fn hub_lists_unlocked_destinations_without_itself() {
        let portals = interactables(LocationId::WorldMap, progress(2.1));
        let targets: Vec<_> = portals.iter().map(|p| p.kind).collect();
        assert_eq!(
            targets,
            vec![
                InteractionKind::Navigate(LocationId::PlayerRoom),
                InteractionKind::Navigate(LocationId::WarehouseB7),
                InteractionKind::Navigate(LocationId::TokyoCyberCafe),
            ]
        );
        assert_eq!(portals[1].prompt, "Press [E] to travel to Derelict Warehouse B7");
        // First portal sits at angle zero on the ellipse.
        assert_eq!(portals[0].rect.x, 600.0 + 420.0 - 32.0);
        assert_eq!(portals[0].rect.y, 600.0 - 32.0);
    }

    #[test]
    fn proximity_uses_centre_distance() {
        // Laptop centre is (274, 184); player centre offset is (24, 32).
        let near = Vec2 { x: 274.0 - 24.0 + 50.0, y: 184.0 - 32.0 };
        let far = Vec2 { x: 274.0 - 24.0 + 61.0, y: 184.0 - 32.0 };
        let hit = nearby_interaction(LocationId::PlayerRoom, progress(0.0), near);
        assert_eq!(hit.map(|i| i.prompt), Some("Press [E] to access".to_string()));
        assert_eq!(nearby_interaction(LocationId::PlayerRoom, progress(0.0), far), None);
    }

    #[test]
    fn mainframe_has_wider_reach() {
        let items = interactables(LocationId::DataCenterEuropa, progress(3.1));
        assert_eq!(items[0].kind, InteractionKind::FindClue(Clue::EuropaMainframe));
        assert_eq!(items[0].threshold, 80.0);
        assert_eq!(items[0].rect.x, 736.0);
    }
}
