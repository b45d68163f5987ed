use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    analysis::{analyze, composite_score, optimization_plan, recommendations},
    error::AppError,
    inputs::InputRecord,
    insights::{Insights, calculate_insights},
    state::AppState,
    user::{AccountSummary, LeaderboardRow, User},
    utils::{validate_account, validate_email},
};

pub const LEADERBOARD_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub email: String,
}

#[derive(Deserialize)]
pub struct InputsPayload {
    pub email: String,
    pub inputs: InputRecord,
}

#[derive(Deserialize)]
pub struct AnalyzePayload {
    pub inputs: InputRecord,
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<Value>, AppError> {
    validate_account(&payload.email, &payload.password)?;

    let summary = state
        .database
        .users
        .update(|users| {
            if users.contains_key(&payload.email) {
                return Err(AppError::UserExists);
            }

            let user = User::new(payload.name, payload.email.clone(), payload.password);
            let summary = AccountSummary::from(&user);
            users.insert(payload.email, user);

            Ok(summary)
        })
        .await?;

    info!("Registered {}", summary.email);

    Ok(Json(json!({ "success": true, "user": summary })))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>, AppError> {
    let users = state.database.users.read().await?;

    let user = users
        .get(&payload.email)
        .filter(|user| user.password == payload.password)
        .ok_or(AppError::InvalidCredentials)?;

    Ok(Json(json!({ "success": true, "user": AccountSummary::from(user) })))
}

pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Value>, AppError> {
    let users = state.database.users.read().await?;
    let user = users.get(&query.email).ok_or(AppError::UserNotFound)?;

    let logs = state.database.inputs.read().await?;
    let log = logs.get(&query.email).cloned().unwrap_or_default();

    Ok(Json(json!({
        "dashboard": &user.dashboard,
        "recentInputs": &log.recent_inputs,
        "insights": calculate_insights(&log),
    })))
}

pub async fn inputs_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InputsPayload>,
) -> Result<Json<Value>, AppError> {
    validate_email(&payload.email)?;

    let report = analyze(&payload.inputs);

    state
        .database
        .inputs
        .update(|logs| {
            logs.entry(payload.email.clone())
                .or_default()
                .append(payload.inputs.clone());

            Ok(())
        })
        .await?;

    // The dashboard only moves for registered accounts; the entry itself is
    // kept either way, matching how the log and user tables stay decoupled.
    state
        .database
        .users
        .update(|users| {
            if let Some(user) = users.get_mut(&payload.email) {
                user.dashboard.apply(&report);
            }

            Ok(())
        })
        .await?;

    Ok(Json(json!({ "success": true, "analysis": report })))
}

pub async fn quality_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let table = state.database.quality.read().await?;

    Ok(Json(serde_json::to_value(table)?))
}

pub async fn quality_state_handler(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Json<Value>, AppError> {
    let table = state.database.quality.read().await?;

    match table.get(&region) {
        Some(cities) => Ok(Json(serde_json::to_value(cities)?)),
        // Unknown names fall back to the whole table so the map view can
        // still render something.
        None => Ok(Json(serde_json::to_value(&table)?)),
    }
}

pub async fn quality_city_handler(
    State(state): State<Arc<AppState>>,
    Path((region, city)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let table = state.database.quality.read().await?;

    match table.get(&region).and_then(|cities| cities.get(&city)) {
        Some(record) => Ok(Json(serde_json::to_value(record)?)),
        None => Ok(Json(serde_json::to_value(&table)?)),
    }
}

pub async fn analyze_handler(Json(payload): Json<AnalyzePayload>) -> Json<Value> {
    let report = analyze(&payload.inputs);
    let recommendations = recommendations(&report);
    let plan = optimization_plan(&report, recommendations.clone());

    Json(json!({
        "analysis": report,
        "recommendations": recommendations,
        "optimizationPlan": plan,
    }))
}

pub async fn insights_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Insights>, AppError> {
    let logs = state.database.inputs.read().await?;
    let log = logs.get(&user_id).cloned().unwrap_or_default();

    Ok(Json(calculate_insights(&log)))
}

pub async fn leaderboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    let users = state.database.users.read().await?;

    let mut rows: Vec<LeaderboardRow> = users
        .into_values()
        .map(|user| LeaderboardRow {
            score: composite_score(&user.dashboard),
            email: user.email,
            name: user.name,
            dashboard: user.dashboard,
        })
        .collect();

    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows.truncate(LEADERBOARD_LIMIT);

    Ok(Json(rows))
}
