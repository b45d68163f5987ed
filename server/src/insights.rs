//! Trend and prediction summaries over a user's entry log.
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    analysis::{self, WasteBreakdown},
    inputs::{LoggedInput, UserLog},
};

/// How many trailing entries feed the trend and prediction math.
pub const TREND_WINDOW: usize = 4;

pub const NEXT_WEEK_GROWTH: f64 = 1.05;
pub const NEXT_MONTH_GROWTH: f64 = 1.2;

/// Kilograms of waste per person per day, regional figure.
pub const AVG_WASTE_PER_PERSON: f64 = 0.5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub weekly_trends: Vec<WeeklyTrend>,
    pub comparisons: Comparisons,
    pub predictions: Predictions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    pub week: DateTime<Utc>,
    pub water_usage: f64,
    pub waste_generated: WasteBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparisons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_week: Option<WeekComparison>,
    pub regional_average: RegionalAverage,
}

/// Percent changes between the two latest entries, one decimal place.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekComparison {
    pub water_change: String,
    pub waste_change: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalAverage {
    pub water_usage: f64,
    pub waste_generation: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_week: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_month: Option<f64>,
}

pub fn calculate_insights(log: &UserLog) -> Insights {
    let start = log.inputs.len().saturating_sub(TREND_WINDOW);
    let recent = &log.inputs[start..];

    let weekly_trends = recent
        .iter()
        .map(|entry| WeeklyTrend {
            week: entry.timestamp,
            water_usage: analysis::water_usage(&entry.record),
            waste_generated: analysis::waste_breakdown(&entry.record.waste),
        })
        .collect();

    let previous_week = match recent {
        [.., previous, latest] => compare_weeks(previous, latest),
        _ => None,
    };

    Insights {
        weekly_trends,
        comparisons: Comparisons {
            previous_week,
            regional_average: regional_average(),
        },
        predictions: predict_future_waste(&log.inputs),
    }
}

/// Omitted rather than infinite when the base week sits at zero.
fn compare_weeks(previous: &LoggedInput, latest: &LoggedInput) -> Option<WeekComparison> {
    let water_base = analysis::water_usage(&previous.record);
    let waste_base = analysis::waste_breakdown(&previous.record.waste).total;

    if water_base == 0.0 || waste_base == 0.0 {
        return None;
    }

    let water_now = analysis::water_usage(&latest.record);
    let waste_now = analysis::waste_breakdown(&latest.record.waste).total;

    Some(WeekComparison {
        water_change: format!("{:.1}", (water_now - water_base) / water_base * 100.0),
        waste_change: format!("{:.1}", (waste_now - waste_base) / waste_base * 100.0),
    })
}

pub fn regional_average() -> RegionalAverage {
    RegionalAverage {
        water_usage: analysis::AVG_WATER_PER_PERSON,
        waste_generation: AVG_WASTE_PER_PERSON,
    }
}

fn predict_future_waste(inputs: &[LoggedInput]) -> Predictions {
    if inputs.len() < 2 {
        return Predictions::default();
    }

    let start = inputs.len().saturating_sub(TREND_WINDOW);
    let recent = &inputs[start..];

    let mean = recent
        .iter()
        .map(|entry| analysis::waste_breakdown(&entry.record.waste).total)
        .sum::<f64>()
        / recent.len() as f64;

    Predictions {
        next_week: Some(mean * NEXT_WEEK_GROWTH),
        next_month: Some(mean * NEXT_MONTH_GROWTH),
    }
}
