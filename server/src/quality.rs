//! Static water-quality lookup, nested state -> city -> record.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type QualityMap = HashMap<String, HashMap<String, CityQuality>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuality {
    pub quality_index: u32,
    pub contaminants: Vec<String>,
    pub status: QualityStatus,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    Good,
    Moderate,
    Poor,
}

/// Stock dataset written on first boot when no table file exists yet.
pub fn seed_quality() -> QualityMap {
    let mut table = QualityMap::new();

    table.insert(
        "Maharashtra".to_string(),
        HashMap::from([
            (
                "Mumbai".to_string(),
                city(65, &["Chlorine", "Heavy Metals"], QualityStatus::Moderate),
            ),
            ("Pune".to_string(), city(72, &["Chlorine"], QualityStatus::Good)),
        ]),
    );

    table.insert(
        "Delhi".to_string(),
        HashMap::from([(
            "New Delhi".to_string(),
            city(58, &["Heavy Metals", "Bacteria"], QualityStatus::Poor),
        )]),
    );

    table.insert(
        "Karnataka".to_string(),
        HashMap::from([(
            "Bangalore".to_string(),
            city(68, &["Chlorine", "Chemicals"], QualityStatus::Moderate),
        )]),
    );

    table
}

fn city(quality_index: u32, contaminants: &[&str], status: QualityStatus) -> CityQuality {
    CityQuality {
        quality_index,
        contaminants: contaminants.iter().map(|s| s.to_string()).collect(),
        status,
        last_updated: Utc::now(),
    }
}
