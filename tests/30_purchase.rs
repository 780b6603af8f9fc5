mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_purchase(
    client: &reqwest::Client,
    base_url: &str,
    purchase: &Value,
) -> Result<String> {
    let res = client
        .post(format!("{}/purchase", base_url))
        .json(purchase)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["acknowledged"], true);
    let id = body["insertedId"].as_str().expect("insertedId").to_string();
    Ok(id)
}

#[tokio::test]
async fn create_then_list_by_buyer() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let buyer = format!("{}@test.dev", common::unique_tag("buyer"));
    let purchase = json!({
        "buyerEmail": buyer,
        "foodName": "Momo",
        "price": 8.0,
    });
    let id = create_purchase(&client, &server.base_url, &purchase).await?;

    let res = client
        .get(format!("{}/purchase?email={}", server.base_url, buyer))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let purchases = body.as_array().expect("array body");
    assert_eq!(purchases.len(), 1, "body: {}", body);
    assert_eq!(purchases[0]["_id"], json!(id));
    assert_eq!(purchases[0]["buyerEmail"], json!(buyer));
    assert_eq!(purchases[0]["foodName"], purchase["foodName"]);
    Ok(())
}

#[tokio::test]
async fn buyer_filter_excludes_others() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let buyer = format!("{}@test.dev", common::unique_tag("buyer"));
    let other = format!("{}@test.dev", common::unique_tag("other"));
    create_purchase(
        &client,
        &server.base_url,
        &json!({ "buyerEmail": buyer, "foodName": "Thukpa" }),
    )
    .await?;
    create_purchase(
        &client,
        &server.base_url,
        &json!({ "buyerEmail": other, "foodName": "Dal Bhat" }),
    )
    .await?;

    let res = client
        .get(format!("{}/purchase?email={}", server.base_url, buyer))
        .send()
        .await?;

    let body = res.json::<Value>().await?;
    let purchases = body.as_array().expect("array body");
    assert_eq!(purchases.len(), 1, "body: {}", body);
    assert_eq!(purchases[0]["buyerEmail"], json!(buyer));
    Ok(())
}

#[tokio::test]
async fn delete_removes_purchase() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let buyer = format!("{}@test.dev", common::unique_tag("gone"));
    let id = create_purchase(
        &client,
        &server.base_url,
        &json!({ "buyerEmail": buyer, "foodName": "Sel Roti" }),
    )
    .await?;

    let res = client
        .delete(format!("{}/purchase/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["deletedCount"], 1);

    let listed = client
        .get(format!("{}/purchase?email={}", server.base_url, buyer))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(listed.as_array().expect("array body").len(), 0);
    Ok(())
}
