use anyhow::Result;
use reqwest::Client;
use serde_json::{Value, json};

const BASE: &str = "http://localhost:1111";

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::new();

    let register = client
        .post(format!("{BASE}/api/user/register"))
        .json(&json!({
            "email": "smoke@example.com",
            "password": "hunter2",
            "name": "Smoke Test"
        }))
        .send()
        .await?;
    println!("register: {}", register.status());

    let login: Value = client
        .post(format!("{BASE}/api/user/login"))
        .json(&json!({ "email": "smoke@example.com", "password": "hunter2" }))
        .send()
        .await?
        .json()
        .await?;
    println!("login: {login}");

    let analysis: Value = client
        .post(format!("{BASE}/api/user/inputs"))
        .json(&json!({
            "email": "smoke@example.com",
            "inputs": {
                "familySize": 3,
                "activities": { "showering": 25.0, "dishes": 8.0, "laundry": 2.0 },
                "waste": { "plastic": 1.5, "organic": 3.0, "paper": 0.5 }
            }
        }))
        .send()
        .await?
        .json()
        .await?;
    println!("inputs: {analysis}");

    let dashboard: Value = client
        .get(format!("{BASE}/api/user/dashboard?email=smoke@example.com"))
        .send()
        .await?
        .json()
        .await?;
    println!("dashboard: {dashboard}");

    let leaderboard: Value = client
        .get(format!("{BASE}/api/leaderboard"))
        .send()
        .await?
        .json()
        .await?;
    println!("leaderboard: {leaderboard}");

    let mumbai: Value = client
        .get(format!("{BASE}/api/water-quality/Maharashtra/Mumbai"))
        .send()
        .await?
        .json()
        .await?;
    println!("water quality (Mumbai): {mumbai}");

    Ok(())
}
