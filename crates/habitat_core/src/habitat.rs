//! The fixed habitat class set and the compiled-in habitat statistics table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the ten categories the habitat model predicts, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HabitatClass {
    Forest,
    HerbaceousVegetation,
    Pasture,
    River,
    SeaLake,
    #[serde(rename = "beach")]
    Beach,
    #[serde(rename = "desert")]
    Desert,
    #[serde(rename = "ice")]
    Ice,
    #[serde(rename = "mountain")]
    Mountain,
    #[serde(rename = "ocean")]
    Ocean,
}

impl HabitatClass {
    /// All classes, indexed the same way as the model's output vector.
    pub const ALL: [HabitatClass; 10] = [
        HabitatClass::Forest,
        HabitatClass::HerbaceousVegetation,
        HabitatClass::Pasture,
        HabitatClass::River,
        HabitatClass::SeaLake,
        HabitatClass::Beach,
        HabitatClass::Desert,
        HabitatClass::Ice,
        HabitatClass::Mountain,
        HabitatClass::Ocean,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Label as emitted by the trained model.
    pub fn label(self) -> &'static str {
        match self {
            HabitatClass::Forest => "Forest",
            HabitatClass::HerbaceousVegetation => "HerbaceousVegetation",
            HabitatClass::Pasture => "Pasture",
            HabitatClass::River => "River",
            HabitatClass::SeaLake => "SeaLake",
            HabitatClass::Beach => "beach",
            HabitatClass::Desert => "desert",
            HabitatClass::Ice => "ice",
            HabitatClass::Mountain => "mountain",
            HabitatClass::Ocean => "ocean",
        }
    }

    /// Statistics record for this class, if the table carries one.
    pub fn record(self) -> Option<&'static HabitatRecord> {
        lookup(self.label())
    }
}

impl fmt::Display for HabitatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HabitatClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown habitat label: {s}"))
    }
}

/// Static statistics for one habitat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitatRecord {
    pub name: &'static str,
    pub area_km2: u64,
    pub loss_percent: f64,
    pub protected_percent: f64,
    pub lat: f64,
    pub lon: f64,
    /// Display color as `#RRGGBB`.
    pub color: &'static str,
    pub description: &'static str,
}

impl HabitatRecord {
    /// Parse the display color into RGB bytes.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }
}

/// Habitat statistics for India, 2023-2024 reporting.
pub static HABITATS: [HabitatRecord; 10] = [
    HabitatRecord {
        name: "Forest",
        area_km2: 713_789,
        loss_percent: 11.0,
        protected_percent: 45.2,
        lat: 22.0,
        lon: 82.0,
        color: "#228B22",
        description: "India's forests cover 21.76% of geographical area and host 80% of terrestrial biodiversity.",
    },
    HabitatRecord {
        name: "HerbaceousVegetation",
        area_km2: 450_000,
        loss_percent: 15.5,
        protected_percent: 8.2,
        lat: 24.5,
        lon: 79.0,
        color: "#9ACD32",
        description: "Grasslands and herbaceous regions support grazing and wildlife corridors but face conversion pressure.",
    },
    HabitatRecord {
        name: "Pasture",
        area_km2: 550_000,
        loss_percent: 12.3,
        protected_percent: 3.5,
        lat: 23.0,
        lon: 75.0,
        color: "#D2B48C",
        description: "Pastures support livestock and rural livelihoods across India.",
    },
    HabitatRecord {
        name: "River",
        area_km2: 195_000,
        loss_percent: 8.0,
        protected_percent: 12.1,
        lat: 25.6,
        lon: 83.0,
        color: "#4169E1",
        description: "India's river systems like Ganga and Brahmaputra are lifelines for millions but face pollution threats.",
    },
    HabitatRecord {
        name: "SeaLake",
        area_km2: 85_000,
        loss_percent: 25.0,
        protected_percent: 18.5,
        lat: 20.5,
        lon: 85.8,
        color: "#00BFFF",
        description: "Lakes and inland seas support aquatic biodiversity but many are shrinking rapidly.",
    },
    HabitatRecord {
        name: "beach",
        area_km2: 7_500,
        loss_percent: 35.0,
        protected_percent: 15.8,
        lat: 13.1,
        lon: 80.3,
        color: "#FFD700",
        description: "India's 7,500 km coastline faces erosion, sea-level rise, and development pressure.",
    },
    HabitatRecord {
        name: "desert",
        area_km2: 317_000,
        loss_percent: 4.2,
        protected_percent: 12.8,
        lat: 27.0,
        lon: 71.0,
        color: "#EDC9Af",
        description: "The Thar Desert spans 317,000 km² and hosts unique arid-zone species.",
    },
    HabitatRecord {
        name: "ice",
        area_km2: 37_000,
        loss_percent: 45.0,
        protected_percent: 25.0,
        lat: 33.5,
        lon: 78.0,
        color: "#ADD8E6",
        description: "Himalayan glaciers covering 37,000 km² are retreating rapidly due to climate change.",
    },
    HabitatRecord {
        name: "mountain",
        area_km2: 590_000,
        loss_percent: 8.5,
        protected_percent: 22.3,
        lat: 32.0,
        lon: 79.0,
        color: "#A9A9A9",
        description: "Mountain ecosystems across Himalayas, Western Ghats, and other ranges harbor endemic species.",
    },
    HabitatRecord {
        name: "ocean",
        area_km2: 2_305_000,
        loss_percent: 12.5,
        protected_percent: 4.8,
        lat: 8.0,
        lon: 77.0,
        color: "#1E90FF",
        description: "India's EEZ of 2.3 million km² supports fisheries and marine biodiversity but needs more protection.",
    },
];

/// Find a habitat record by exact name. A miss is not an error: the caller
/// simply has no supplementary information to show.
pub fn lookup(name: &str) -> Option<&'static HabitatRecord> {
    HABITATS.iter().find(|r| r.name == name)
}
