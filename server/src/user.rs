use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::{Analysis, SAVINGS_POTENTIAL, composite_score};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub dashboard: Dashboard,
}

impl User {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
            created_at: Utc::now(),
            dashboard: Dashboard::default(),
        }
    }
}

/// Cumulative per-user summary, folded forward on every submitted entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub water_saved: f64,
    pub waste_diverted: f64,
    pub carbon_impact: f64,
    pub ranking: f64,
}

impl Dashboard {
    pub fn apply(&mut self, analysis: &Analysis) {
        self.water_saved += analysis.water_usage * SAVINGS_POTENTIAL;
        self.waste_diverted += analysis.waste_generated.total;
        self.carbon_impact += analysis.carbon_impact;
        self.ranking = composite_score(self);
    }
}

/// What the client gets back about an account. Never the stored record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub email: String,
    pub name: String,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub email: String,
    pub name: String,
    pub score: f64,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}
