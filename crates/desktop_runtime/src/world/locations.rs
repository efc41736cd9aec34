use desktop_app_contract::StoryProgress;
use serde::{Deserialize, Serialize};

use super::scene::SceneKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationId {
    #[default]
    PlayerRoom,
    WorldMap,
    WarehouseB7,
    TokyoCyberCafe,
    DataCenterEuropa,
}

/// Location id retired from older saves; loads as [`LocationId::PlayerRoom`].
pub const DEPRECATED_LOCATION_ID: &str = "fbi_hq";

impl LocationId {
    pub const fn id(self) -> &'static str {
        match self {
            Self::PlayerRoom => "player_room",
            Self::WorldMap => "world_map",
            Self::WarehouseB7 => "warehouse_b7",
            Self::TokyoCyberCafe => "tokyo_cyber_cafe",
            Self::DataCenterEuropa => "data_center_europa",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        LOCATIONS
            .iter()
            .map(|location| location.id)
            .find(|id| id.id() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: &'static str,
    pub description: &'static str,
    pub scene: SceneKind,
    pub unlocked_at: StoryProgress,
}

impl Location {
    pub fn is_unlocked(&self, story: StoryProgress) -> bool {
        story.reached(self.unlocked_at)
    }
}

pub const LOCATIONS: [Location; 5] = [
    Location {
        id: LocationId::PlayerRoom,
        name: "My Apartment",
        description: "My small apartment. The new laptop is on the desk.",
        scene: SceneKind::Office,
        unlocked_at: StoryProgress::ZERO,
    },
    Location {
        id: LocationId::WorldMap,
        name: "World Map",
        description: "A central hub for navigating to different mission locations.",
        scene: SceneKind::Hub,
        unlocked_at: StoryProgress::from_thousandths(1000),
    },
    Location {
        id: LocationId::WarehouseB7,
        name: "Derelict Warehouse B7",
        description: "An abandoned shipping warehouse at the Port of Baltimore. Potential dead-drop location.",
        scene: SceneKind::Warehouse,
        unlocked_at: StoryProgress::from_thousandths(1100),
    },
    Location {
        id: LocationId::TokyoCyberCafe,
        name: "Net-Dive Cyber Cafe",
        description: "An underground internet cafe in Akihabara, Tokyo. Known haunt for information brokers.",
        scene: SceneKind::Cafe,
        unlocked_at: StoryProgress::from_thousandths(2100),
    },
    Location {
        id: LocationId::DataCenterEuropa,
        name: "Europa Data Center",
        description: "A major internet exchange point. Suspected node for Void's network. Frankfurt, Germany.",
        scene: SceneKind::Datacenter,
        unlocked_at: StoryProgress::from_thousandths(3100),
    },
];

pub fn location(id: LocationId) -> &'static Location {
    match id {
        LocationId::PlayerRoom => &LOCATIONS[0],
        LocationId::WorldMap => &LOCATIONS[1],
        LocationId::WarehouseB7 => &LOCATIONS[2],
        LocationId::TokyoCyberCafe => &LOCATIONS[3],
        LocationId::DataCenterEuropa => &LOCATIONS[4],
    }
}

/// Resolves a persisted location id, remapping the retired one.
///
/// Returns `None` for ids that never existed.
pub fn resolve_saved_location(raw: &str) -> Option<LocationId> {
    if raw == DEPRECATED_LOCATION_ID {
        return Some(LocationId::PlayerRoom);
    }
    LocationId::from_id(raw)
}
