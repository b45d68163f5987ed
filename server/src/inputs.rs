use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many entries the dashboard activity feed shows.
pub const RECENT_WINDOW: usize = 5;

/// One submitted week of household activity, as sent by the input wizard.
/// Amounts the math does not use (`other`) are still kept on the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputRecord {
    pub family_size: u32,
    pub location: Option<Location>,
    pub activities: Activities,
    pub waste: Waste,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub state: String,
    pub city: String,
}

/// Weekly activity amounts: showering in minutes, dishes in washes, laundry
/// in loads, cooking in meals, gardening in hours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activities {
    pub showering: f64,
    pub dishes: f64,
    pub laundry: f64,
    pub cooking: f64,
    pub gardening: f64,
    pub other: f64,
}

/// Weekly waste amounts in kilograms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Waste {
    pub plastic: f64,
    pub organic: f64,
    pub paper: f64,
    pub e_waste: f64,
    pub other: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInput {
    #[serde(flatten)]
    pub record: InputRecord,
    pub timestamp: DateTime<Utc>,
    pub id: i64,
}

/// Append-only per-user entry log plus the derived last-5 slice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserLog {
    pub inputs: Vec<LoggedInput>,
    pub recent_inputs: Vec<LoggedInput>,
}

impl UserLog {
    pub fn append(&mut self, record: InputRecord) -> LoggedInput {
        let now = Utc::now();
        let entry = LoggedInput {
            record,
            timestamp: now,
            id: now.timestamp_millis(),
        };

        self.inputs.push(entry.clone());

        let start = self.inputs.len().saturating_sub(RECENT_WINDOW);
        self.recent_inputs = self.inputs[start..].to_vec();

        entry
    }
}
