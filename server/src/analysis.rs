//! Derived metrics over one submitted entry.
//!
//! Everything here is stateless arithmetic: a record goes in, numbers come
//! out. Persistence and HTTP never reach into this module.
//!
//! ## Constants
//! - Per-activity water multipliers are rough liters-per-unit figures
//! - Carbon factors are kg CO2e per kg of waste
//! - The regional baseline is 135 liters per person per day
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{
    inputs::{InputRecord, Waste},
    user::Dashboard,
};

// Liters per unit of activity.
pub const SHOWER_LITERS_PER_MINUTE: f64 = 10.0;
pub const DISH_LITERS_PER_WASH: f64 = 20.0;
pub const LAUNDRY_LITERS_PER_LOAD: f64 = 50.0;
pub const COOKING_LITERS_PER_MEAL: f64 = 5.0;
pub const GARDENING_LITERS_PER_HOUR: f64 = 30.0;

// Kilograms of CO2 equivalent per kilogram of waste.
pub const PLASTIC_CO2_PER_KG: f64 = 2.5;
pub const ORGANIC_CO2_PER_KG: f64 = 0.5;
pub const PAPER_CO2_PER_KG: f64 = 1.0;

// Regional baselines.
pub const AVG_WATER_PER_PERSON: f64 = 135.0;
pub const AVG_SHOWER_MINUTES: f64 = 10.0;
pub const AVG_DISH_WASHES: f64 = 2.0;

// Fractions applied when folding an analysis into a dashboard and when
// estimating what a user could still cut.
pub const SAVINGS_POTENTIAL: f64 = 0.1;
pub const CARBON_REDUCTION_POTENTIAL: f64 = 0.3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub water_usage: f64,
    pub waste_generated: WasteBreakdown,
    pub inefficiencies: Vec<Inefficiency>,
    pub carbon_impact: f64,
    pub efficiency_score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteBreakdown {
    pub plastic: f64,
    pub organic: f64,
    pub paper: f64,
    pub e_waste: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Showering,
    Dishes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inefficiency {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub issue: &'static str,
    pub impact: Priority,
    pub current: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPlan {
    pub current_state: CurrentState,
    pub recommendations: Vec<Recommendation>,
    pub estimated_impact: EstimatedImpact,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentState {
    pub water_usage: f64,
    pub efficiency_score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedImpact {
    pub water_saved: f64,
    pub carbon_reduced: f64,
}

pub fn analyze(record: &InputRecord) -> Analysis {
    let waste_generated = waste_breakdown(&record.waste);
    let carbon = carbon_impact(&waste_generated);

    Analysis {
        water_usage: water_usage(record),
        inefficiencies: inefficiencies(record),
        carbon_impact: carbon,
        efficiency_score: efficiency_score(record),
        waste_generated,
    }
}

pub fn water_usage(record: &InputRecord) -> f64 {
    let family = family_size(record);
    let activities = &record.activities;

    activities.showering * SHOWER_LITERS_PER_MINUTE * family
        + activities.dishes * DISH_LITERS_PER_WASH * family
        + activities.laundry * LAUNDRY_LITERS_PER_LOAD
        + activities.cooking * COOKING_LITERS_PER_MEAL * family
        + activities.gardening * GARDENING_LITERS_PER_HOUR
}

pub fn waste_breakdown(waste: &Waste) -> WasteBreakdown {
    WasteBreakdown {
        plastic: waste.plastic,
        organic: waste.organic,
        paper: waste.paper,
        e_waste: waste.e_waste,
        // e-waste is tracked but does not count toward the divertible total
        total: waste.plastic + waste.organic + waste.paper,
    }
}

pub fn carbon_impact(waste: &WasteBreakdown) -> f64 {
    waste.plastic * PLASTIC_CO2_PER_KG
        + waste.organic * ORGANIC_CO2_PER_KG
        + waste.paper * PAPER_CO2_PER_KG
}

/// Percentage deviation from the regional per-person baseline, clamped to
/// [0, 100]. Using no water at all maxes out at 100.
pub fn efficiency_score(record: &InputRecord) -> f64 {
    let per_person = water_usage(record) / family_size(record);
    let score = 100.0 - ((per_person - AVG_WATER_PER_PERSON) / AVG_WATER_PER_PERSON * 100.0);

    score.clamp(0.0, 100.0)
}

pub fn inefficiencies(record: &InputRecord) -> Vec<Inefficiency> {
    let family = family_size(record);
    let activities = &record.activities;
    let mut found = Vec::new();

    if activities.showering > AVG_SHOWER_MINUTES * family {
        found.push(Inefficiency {
            kind: ActivityKind::Showering,
            issue: "Shower time exceeds average",
            impact: Priority::High,
            current: activities.showering,
            average: AVG_SHOWER_MINUTES * family,
        });
    }

    if activities.dishes > AVG_DISH_WASHES * family {
        found.push(Inefficiency {
            kind: ActivityKind::Dishes,
            issue: "Dish washing frequency is high",
            impact: Priority::Medium,
            current: activities.dishes,
            average: AVG_DISH_WASHES * family,
        });
    }

    found
}

pub fn recommendations(analysis: &Analysis) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for inefficiency in &analysis.inefficiencies {
        match inefficiency.kind {
            ActivityKind::Showering => recommendations.push(Recommendation {
                priority: Priority::High,
                title: "Reduce shower time",
                description: "Try to reduce shower time by 2-3 minutes",
                impact: "Save ~20-30 liters per day",
                category: "water",
            }),
            ActivityKind::Dishes => recommendations.push(Recommendation {
                priority: Priority::Medium,
                title: "Optimize dish washing",
                description: "Use a dishwasher or wash dishes in batches",
                impact: "Save ~10-15 liters per day",
                category: "water",
            }),
        }
    }

    recommendations.push(Recommendation {
        priority: Priority::Low,
        title: "Fix leaks",
        description: "Check for and fix any water leaks in your home",
        impact: "Save ~20-30 liters per day",
        category: "water",
    });

    recommendations
}

pub fn optimization_plan(
    analysis: &Analysis,
    mut recommendations: Vec<Recommendation>,
) -> OptimizationPlan {
    let water_saved = recommendations
        .iter()
        .map(|rec| estimated_liters(rec.impact))
        .sum();

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));

    OptimizationPlan {
        current_state: CurrentState {
            water_usage: analysis.water_usage,
            efficiency_score: analysis.efficiency_score,
        },
        recommendations,
        estimated_impact: EstimatedImpact {
            water_saved,
            carbon_reduced: analysis.carbon_impact * CARBON_REDUCTION_POTENTIAL,
        },
    }
}

pub fn composite_score(dashboard: &Dashboard) -> f64 {
    dashboard.water_saved * 0.5 + dashboard.waste_diverted * 2.0 + dashboard.carbon_impact * 10.0
}

/// First integer out of an impact blurb like "Save ~20-30 liters per day".
fn estimated_liters(impact: &str) -> f64 {
    let digits = Regex::new(r"(\d+)").unwrap();

    digits
        .find(impact)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

// A submitted family size of 0 would divide per-person figures by zero.
fn family_size(record: &InputRecord) -> f64 {
    record.family_size.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::Activities;

    fn record(family_size: u32, activities: Activities, waste: Waste) -> InputRecord {
        InputRecord {
            family_size,
            location: None,
            activities,
            waste,
        }
    }

    #[test]
    fn zero_activities_use_zero_water() {
        let entry = record(4, Activities::default(), Waste::default());

        assert_eq!(water_usage(&entry), 0.0);
    }

    #[test]
    fn water_usage_sums_per_activity_multipliers() {
        let entry = record(
            2,
            Activities {
                showering: 10.0,
                dishes: 3.0,
                laundry: 2.0,
                cooking: 5.0,
                gardening: 1.0,
                other: 99.0,
            },
            Waste::default(),
        );

        // 10*10*2 + 3*20*2 + 2*50 + 5*5*2 + 1*30, "other" ignored
        assert_eq!(water_usage(&entry), 200.0 + 120.0 + 100.0 + 50.0 + 30.0);
    }

    #[test]
    fn efficiency_score_is_clamped() {
        let heavy = record(
            1,
            Activities {
                showering: 500.0,
                ..Activities::default()
            },
            Waste::default(),
        );
        let idle = record(1, Activities::default(), Waste::default());

        assert_eq!(efficiency_score(&heavy), 0.0);
        assert_eq!(efficiency_score(&idle), 100.0);
    }

    #[test]
    fn zero_family_size_does_not_divide_by_zero() {
        let entry = record(
            0,
            Activities {
                showering: 13.5,
                ..Activities::default()
            },
            Waste::default(),
        );

        // 135 liters for one person sits exactly on the baseline
        assert_eq!(efficiency_score(&entry), 100.0);
    }

    #[test]
    fn carbon_impact_is_nonnegative_and_linear() {
        let waste = waste_breakdown(&Waste {
            plastic: 2.0,
            organic: 4.0,
            paper: 1.0,
            e_waste: 3.0,
            other: 0.0,
        });

        assert_eq!(carbon_impact(&waste), 2.0 * 2.5 + 4.0 * 0.5 + 1.0);
        assert_eq!(carbon_impact(&waste_breakdown(&Waste::default())), 0.0);
    }

    #[test]
    fn e_waste_is_excluded_from_the_total() {
        let waste = waste_breakdown(&Waste {
            plastic: 1.0,
            organic: 1.0,
            paper: 1.0,
            e_waste: 5.0,
            other: 0.0,
        });

        assert_eq!(waste.total, 3.0);
        assert_eq!(waste.e_waste, 5.0);
    }

    #[test]
    fn inefficiencies_compare_against_family_scaled_averages() {
        let entry = record(
            2,
            Activities {
                showering: 25.0,
                dishes: 5.0,
                ..Activities::default()
            },
            Waste::default(),
        );

        let found = inefficiencies(&entry);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, ActivityKind::Showering);
        assert_eq!(found[0].average, 20.0);
        assert_eq!(found[1].kind, ActivityKind::Dishes);
        assert_eq!(found[1].average, 4.0);
    }

    #[test]
    fn plan_sorts_by_priority_and_sums_estimated_liters() {
        let entry = record(
            1,
            Activities {
                showering: 15.0,
                dishes: 4.0,
                ..Activities::default()
            },
            Waste::default(),
        );

        let analysis = analyze(&entry);
        let recommendations = recommendations(&analysis);
        let plan = optimization_plan(&analysis, recommendations);

        let priorities: Vec<Priority> = plan
            .recommendations
            .iter()
            .map(|rec| rec.priority)
            .collect();

        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
        // 20 (shower) + 10 (dishes) + 20 (leaks)
        assert_eq!(plan.estimated_impact.water_saved, 50.0);
    }

    #[test]
    fn dashboard_fold_matches_composite_score() {
        let entry = record(
            1,
            Activities {
                laundry: 2.0,
                ..Activities::default()
            },
            Waste {
                plastic: 1.0,
                organic: 2.0,
                paper: 1.0,
                e_waste: 0.0,
                other: 0.0,
            },
        );

        let analysis = analyze(&entry);
        let mut dashboard = Dashboard::default();
        dashboard.apply(&analysis);

        assert_eq!(dashboard.water_saved, 10.0);
        assert_eq!(dashboard.waste_diverted, 4.0);
        assert_eq!(dashboard.carbon_impact, 4.5);
        assert_eq!(dashboard.ranking, 10.0 * 0.5 + 4.0 * 2.0 + 4.5 * 10.0);
    }
}
