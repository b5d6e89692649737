mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use common::{money, seed_battery, seed_spare_part, TestApp};

async fn list_sales(app: &TestApp, query: &str) -> (StatusCode, Value) {
    let token = app.token();
    let uri = if query.is_empty() {
        "/api/sales".to_string()
    } else {
        format!("/api/sales?{}", query)
    };
    app.request(Method::GET, &uri, None, Some(&token)).await
}

#[tokio::test]
async fn sale_deducts_stock_and_totals_customer_prices() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 10).await;

    let (status, body) = app
        .post(
            "/api/sales",
            json!({
                "items": [{
                    "productType": "SPARE_PART",
                    "productId": part_id,
                    "quantity": 3,
                    "dealerPrice": "40.00",
                    "customerPrice": "50.00"
                }],
                "paymentType": "CASH",
                "paymentStatus": "PAID",
                "customerName": "Ravi"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(money(&body["totalAmount"]), 150.0);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["paymentStatus"], "PAID");

    let (_, part) = app.get(&format!("/api/spare-parts/{}", part_id)).await;
    assert_eq!(part["quantity"], 7);
}

#[tokio::test]
async fn insufficient_stock_rejects_sale_and_leaves_inventory_alone() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 5).await;

    let (status, body) = app
        .post(
            "/api/sales",
            json!({
                "items": [{
                    "productType": "SPARE_PART",
                    "productId": part_id,
                    "quantity": 6,
                    "dealerPrice": "40.00",
                    "customerPrice": "50.00"
                }],
                "paymentType": "CASH",
                "paymentStatus": "PAID"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["message"],
        "Insufficient stock: Insufficient stock for Spare Part: Brake pad"
    );

    let (_, part) = app.get(&format!("/api/spare-parts/{}", part_id)).await;
    assert_eq!(part["quantity"], 5);

    let (status, sales) = list_sales(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn failing_second_line_rolls_back_the_first() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 10).await;

    let (status, body) = app
        .post(
            "/api/sales",
            json!({
                "items": [
                    {
                        "productType": "SPARE_PART",
                        "productId": part_id,
                        "quantity": 3,
                        "dealerPrice": "40.00",
                        "customerPrice": "50.00"
                    },
                    {
                        "productType": "BATTERY",
                        "productId": 999,
                        "quantity": 1,
                        "dealerPrice": "160.00",
                        "customerPrice": "200.00"
                    }
                ],
                "paymentType": "UPI",
                "paymentStatus": "PENDING"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found: Battery not found: 999");

    // The first line's deduction must not survive the aborted transaction
    let (_, part) = app.get(&format!("/api/spare-parts/{}", part_id)).await;
    assert_eq!(part["quantity"], 10);
}

#[tokio::test]
async fn sale_with_no_items_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .post(
            "/api/sales",
            json!({
                "items": [],
                "paymentType": "CASH",
                "paymentStatus": "PAID"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sale_history_requires_bearer_token() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/sales").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/sales", None, Some("not.a.token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = list_sales(&app, "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn product_type_filter_restricts_items_and_recomputes_totals() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 10).await;
    let battery_id = seed_battery(&app, "Tall Tubular 150Ah", 4).await;

    // One mixed sale and one spare-part-only sale
    let (status, _) = app
        .post(
            "/api/sales",
            json!({
                "items": [
                    {
                        "productType": "SPARE_PART",
                        "productId": part_id,
                        "quantity": 3,
                        "dealerPrice": "40.00",
                        "customerPrice": "50.00"
                    },
                    {
                        "productType": "BATTERY",
                        "productId": battery_id,
                        "quantity": 1,
                        "dealerPrice": "160.00",
                        "customerPrice": "200.00"
                    }
                ],
                "paymentType": "CASH",
                "paymentStatus": "PAID"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(
            "/api/sales",
            json!({
                "items": [{
                    "productType": "SPARE_PART",
                    "productId": part_id,
                    "quantity": 2,
                    "dealerPrice": "40.00",
                    "customerPrice": "50.00"
                }],
                "paymentType": "UPI",
                "paymentStatus": "PENDING"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, sales) = list_sales(&app, "productType=BATTERY").await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().expect("sales array");
    // Both sales appear; the one without batteries collapses to zero
    assert_eq!(sales.len(), 2);

    let mixed = sales
        .iter()
        .find(|s| !s["items"].as_array().map(Vec::is_empty).unwrap_or(true))
        .expect("mixed sale present");
    assert_eq!(money(&mixed["totalAmount"]), 200.0);
    assert_eq!(mixed["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(mixed["items"][0]["productType"], "BATTERY");

    let empty = sales
        .iter()
        .find(|s| s["items"].as_array().map(Vec::is_empty).unwrap_or(false))
        .expect("zero-match sale present");
    assert_eq!(money(&empty["totalAmount"]), 0.0);
}

#[tokio::test]
async fn history_is_ordered_by_sale_date_descending() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 10).await;

    for _ in 0..3 {
        let (status, _) = app
            .post(
                "/api/sales",
                json!({
                    "items": [{
                        "productType": "SPARE_PART",
                        "productId": part_id,
                        "quantity": 1,
                        "dealerPrice": "40.00",
                        "customerPrice": "50.00"
                    }],
                    "paymentType": "CASH",
                    "paymentStatus": "PAID"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, sales) = list_sales(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().expect("sales array");
    assert_eq!(sales.len(), 3);

    let dates: Vec<DateTime<Utc>> = sales
        .iter()
        .map(|s| {
            s["saleDate"]
                .as_str()
                .expect("saleDate")
                .parse()
                .expect("RFC 3339 sale date")
        })
        .collect();
    for pair in dates.windows(2) {
        assert!(pair[0] >= pair[1], "expected descending order: {:?}", dates);
    }
}

#[tokio::test]
async fn payment_status_filter_selects_matching_sales() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 10).await;

    for status_value in ["PAID", "PENDING"] {
        let (status, _) = app
            .post(
                "/api/sales",
                json!({
                    "items": [{
                        "productType": "SPARE_PART",
                        "productId": part_id,
                        "quantity": 1,
                        "dealerPrice": "40.00",
                        "customerPrice": "50.00"
                    }],
                    "paymentType": "CASH",
                    "paymentStatus": status_value
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, sales) = list_sales(&app, "paymentStatus=PENDING").await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().expect("sales array");
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["paymentStatus"], "PENDING");
}

#[tokio::test]
async fn date_range_needs_both_bounds_and_spans_whole_days() {
    let app = TestApp::spawn().await;
    let part_id = seed_spare_part(&app, "Brake pad", 10).await;

    let (status, _) = app
        .post(
            "/api/sales",
            json!({
                "items": [{
                    "productType": "SPARE_PART",
                    "productId": part_id,
                    "quantity": 1,
                    "dealerPrice": "40.00",
                    "customerPrice": "50.00"
                }],
                "paymentType": "CARD",
                "paymentStatus": "PAID"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let today = Utc::now().date_naive();
    let last_week = today - Duration::days(7);
    let yesterday = today - Duration::days(1);

    // Range covering today includes the sale
    let (status, sales) =
        list_sales(&app, &format!("startDate={}&endDate={}", today, today)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales.as_array().map(Vec::len), Some(1));

    // A past range excludes it
    let (status, sales) = list_sales(
        &app,
        &format!("startDate={}&endDate={}", last_week, yesterday),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales.as_array().map(Vec::len), Some(0));

    // A lone bound is ignored and everything comes back
    let (status, sales) = list_sales(&app, &format!("startDate={}", last_week)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales.as_array().map(Vec::len), Some(1));
}
