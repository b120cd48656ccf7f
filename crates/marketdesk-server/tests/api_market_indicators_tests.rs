//! Market-indicator API tests: section grouping, per-tab queries, and
//! whole-batch abort on bad numerics.

mod helpers;

use axum::http::{Method, StatusCode};
use sqlx::SqlitePool;

use helpers::{indicator_csv, send, send_multipart, test_app, Part};

async fn upload_indicators(app: &axum::Router, csv: &str) -> (StatusCode, serde_json::Value) {
    send_multipart(
        app,
        Method::POST,
        "/market-indicators/upload",
        &[
            Part::Text("upload_date", "2025-08-01"),
            Part::Text("data_date", "2025-07-31"),
            Part::Text("data_type", "weekly"),
            Part::File { field: "files", filename: "indicators.csv", bytes: csv.as_bytes() },
        ],
    )
    .await
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sections_and_data_rows_are_stored(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let (status, body) = upload_indicators(&app, &indicator_csv()).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    // 3 section dividers + 4 data rows
    assert_eq!(body["data"]["files"][0]["records_inserted"], 7);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_latest_groups_rows_into_sections(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    upload_indicators(&app, &indicator_csv()).await;

    let (status, body) = send(&app, Method::GET, "/market-indicators/latest").await;
    assert_eq!(status, StatusCode::OK);

    let tabs = &body["data"]["tabs"];
    let returns = tabs["Returns"].as_array().expect("Returns sections");
    assert_eq!(returns.len(), 2);
    assert_eq!(returns[0]["title"], "India Stocks");
    assert_eq!(returns[0]["rows"].as_array().expect("rows").len(), 2);
    assert_eq!(returns[0]["rows"][0][0], "Sensex");
    assert_eq!(returns[0]["rows"][0][2], 80000.0);
    assert_eq!(returns[1]["title"], "Bullion");

    let indices = tabs["Indices"].as_array().expect("Indices sections");
    assert_eq!(indices.len(), 1);
    assert_eq!(indices[0]["title"], "BRICS");

    // empty known tabs are still present
    assert!(tabs["Commodities"].as_array().expect("Commodities").is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_tab_endpoint_returns_flat_rows(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    upload_indicators(&app, &indicator_csv()).await;

    let (status, body) = send(&app, Method::GET, "/market-indicators/tabs/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tab"], "Returns");
    // 2 dividers + 3 data rows in tab 1
    assert_eq!(body["data"]["rows"].as_array().expect("rows").len(), 5);

    let (status, _) = send(&app, Method::GET, "/market-indicators/tabs/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_bad_numeric_aborts_whole_batch(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let csv = "Name,Yr-ago,Curnt,Ch%,Tab\n\
               Sensex,65000,80000,23.1,1\n\
               Broken,sixty-five,80000,1.0,1\n";
    let (status, body) = upload_indicators(&app, csv).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // the valid first row must not have been committed
    let (_, body) = send(&app, Method::GET, "/market-indicators/uploads").await;
    assert!(body["data"].as_array().expect("uploads array").is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_extra_trailing_columns_are_tolerated(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let csv = "Name,Yr-ago,Curnt,Ch%,Tab,Extra\n\
               Sensex,65000,80000,23.1,1,scratch\n";
    let (status, body) = upload_indicators(&app, csv).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    assert_eq!(body["data"]["files"][0]["records_inserted"], 1);
}
