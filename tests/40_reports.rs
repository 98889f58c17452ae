mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn seed_expenses(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    category_id: i64,
) -> Result<()> {
    for (amount, date) in [(10.00, "2024-01-10"), (20.00, "2024-02-10")] {
        let res = client
            .post(format!("{}/expenses", base_url))
            .bearer_auth(token)
            .json(&json!({ "amount": amount, "category_id": category_id, "date": date }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "seed expense failed");
    }
    Ok(())
}

#[tokio::test]
async fn category_totals_without_range() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let nonce = common::nonce();
    let username = format!("rep_{}", nonce);
    common::register(&client, &server.base_url, &username, "pw1").await?;
    let token = common::login(&client, &server.base_url, &username, "pw1").await?;
    let category = format!("rep_{}", nonce);
    let category_id = common::create_category(&client, &server.base_url, &category).await?;
    seed_expenses(&client, &server.base_url, &token, category_id).await?;

    let res = client
        .get(format!("{}/reports/category-totals", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let rows = res.json::<Vec<serde_json::Value>>().await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["category"], category.as_str());
    assert_eq!(rows[0]["total"].as_f64(), Some(30.0));
    Ok(())
}

#[tokio::test]
async fn category_totals_respects_date_bounds() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let nonce = common::nonce();
    let username = format!("repdate_{}", nonce);
    common::register(&client, &server.base_url, &username, "pw1").await?;
    let token = common::login(&client, &server.base_url, &username, "pw1").await?;
    let category = format!("repdate_{}", nonce);
    let category_id = common::create_category(&client, &server.base_url, &category).await?;
    seed_expenses(&client, &server.base_url, &token, category_id).await?;

    // Only the February expense is >= 2024-02-01
    let rows = client
        .get(format!(
            "{}/reports/category-totals?start=2024-02-01",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total"].as_f64(), Some(20.0));

    // Only the January expense is <= 2024-01-31
    let rows = client
        .get(format!(
            "{}/reports/category-totals?end=2024-01-31",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total"].as_f64(), Some(10.0));

    // Inclusive bounds catch both endpoints
    let rows = client
        .get(format!(
            "{}/reports/category-totals?start=2024-01-10&end=2024-02-10",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(rows[0]["total"].as_f64(), Some(30.0));

    // A range with no expenses omits the category instead of zero-reporting
    let rows = client
        .get(format!(
            "{}/reports/category-totals?start=2025-01-01",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert!(rows.is_empty());
    Ok(())
}

#[tokio::test]
async fn user_id_override_is_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let nonce = common::nonce();

    let alice = format!("alice_{}", nonce);
    let alice_id = common::register(&client, &server.base_url, &alice, "pw1").await?;
    let alice_token = common::login(&client, &server.base_url, &alice, "pw1").await?;

    let bob = format!("bob_{}", nonce);
    let bob_id = common::register(&client, &server.base_url, &bob, "pw2").await?;

    // Asking for someone else's totals is forbidden
    let res = client
        .get(format!(
            "{}/reports/category-totals?user_id={}",
            server.base_url, bob_id
        ))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Naming yourself still works
    let res = client
        .get(format!(
            "{}/reports/category-totals?user_id={}",
            server.base_url, alice_id
        ))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn reports_require_token() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/reports/category-totals", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
