//! Derived figures shown on the dashboard: quick stats, conservation status,
//! map focus and display formatting.

use crate::habitat::{HABITATS, HabitatRecord};
use serde::Serialize;
use std::fmt;

/// Aggregates over the whole habitat table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuickStats {
    pub total_area_km2: u64,
    pub avg_loss_percent: f64,
    pub avg_protected_percent: f64,
}

impl QuickStats {
    pub fn from_records(records: &[HabitatRecord]) -> Self {
        let total_area_km2 = records.iter().map(|r| r.area_km2).sum();
        let mean = |f: fn(&HabitatRecord) -> f64| {
            if records.is_empty() {
                0.0
            } else {
                records.iter().map(f).sum::<f64>() / records.len() as f64
            }
        };
        Self {
            total_area_km2,
            avg_loss_percent: mean(|r| r.loss_percent),
            avg_protected_percent: mean(|r| r.protected_percent),
        }
    }
}

/// Quick stats over the compiled-in table.
pub fn quick_stats() -> QuickStats {
    QuickStats::from_records(&HABITATS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConservationStatus {
    HighPriority,
    MediumPriority,
    Stable,
}

impl ConservationStatus {
    /// Loss above 10% is high priority, above 5% medium, anything else stable.
    pub fn from_loss(loss_percent: f64) -> Self {
        if loss_percent > 10.0 {
            ConservationStatus::HighPriority
        } else if loss_percent > 5.0 {
            ConservationStatus::MediumPriority
        } else {
            ConservationStatus::Stable
        }
    }

    pub fn of(record: &HabitatRecord) -> Self {
        Self::from_loss(record.loss_percent)
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConservationStatus::HighPriority => "High Priority",
            ConservationStatus::MediumPriority => "Medium Priority",
            ConservationStatus::Stable => "Stable",
        })
    }
}

/// Where the map view centers, and how close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapFocus {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl MapFocus {
    /// Geographic center of India.
    pub const INDIA: MapFocus = MapFocus {
        lat: 20.5937,
        lon: 78.9629,
        zoom: 5,
    };

    pub fn for_selection(selected: Option<&HabitatRecord>) -> Self {
        match selected {
            Some(r) => MapFocus {
                lat: r.lat,
                lon: r.lon,
                zoom: 6,
            },
            None => Self::INDIA,
        }
    }
}

/// `713789` -> `713,789 km²`
pub fn format_area(area_km2: u64) -> String {
    format!("{} km²", group_thousands(area_km2))
}

/// `0.87314` -> `87.31%`
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}%", confidence * 100.0)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
