//! IPO category API tests: round-trip, column-count rejection, latest
//! resolution.

mod helpers;

use axum::http::{Method, StatusCode};
use sqlx::SqlitePool;

use helpers::{ipo_csv, send, send_multipart, test_app, Part};

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_then_latest_round_trip(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    let csv = ipo_csv(3);

    let (status, body) = send_multipart(
        &app,
        Method::POST,
        "/ipo/upload",
        &[
            Part::Text("upload_date", "2025-08-01"),
            Part::Text("data_date", "2025-07-31"),
            Part::Text("data_type", "daily"),
            Part::File { field: "files", filename: "ipo_master.csv", bytes: csv.as_bytes() },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["files"][0]["records_inserted"], 3);

    let (status, body) = send(&app, Method::GET, "/ipo/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["upload_date"], "2025-08-01");
    assert_eq!(body["data"]["data_date"], "2025-07-31");

    let rows = body["data"]["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 3);
    // ordered by isin; values round-trip post coercion
    assert_eq!(rows[0]["isin"], "INE000000");
    assert_eq!(rows[0]["co_name"], "Company 0");
    assert_eq!(rows[0]["iss_open"], "2024-02-01");
    assert_eq!(rows[0]["high"], 120.0);
    assert_eq!(rows[0]["exch"], "NSE");
    // empty lead-manager slots coerce to null
    assert_eq!(rows[0]["lm5"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_short_column_file_rejected_without_manifest(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    // 46 of the required 47 columns
    let csv: String = ipo_csv(2)
        .lines()
        .map(|line| {
            let (head, _) = line.rsplit_once(',').expect("strip last column");
            format!("{head}\n")
        })
        .collect();

    let (status, body) = send_multipart(
        &app,
        Method::POST,
        "/ipo/upload",
        &[
            Part::Text("upload_date", "2025-08-01"),
            Part::Text("data_date", "2025-07-31"),
            Part::Text("data_type", "daily"),
            Part::File { field: "files", filename: "short.csv", bytes: csv.as_bytes() },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // nothing retained for query purposes
    let (status, body) = send(&app, Method::GET, "/ipo/uploads").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().expect("uploads array").is_empty());

    let (status, _) = send(&app, Method::GET, "/ipo/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_latest_without_uploads_is_not_found(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let (status, body) = send(&app, Method::GET, "/ipo/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unsupported_extension_rejected(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let (status, body) = send_multipart(
        &app,
        Method::POST,
        "/ipo/upload",
        &[
            Part::Text("upload_date", "2025-08-01"),
            Part::Text("data_date", "2025-07-31"),
            Part::Text("data_type", "daily"),
            Part::File { field: "files", filename: "ipo.pdf", bytes: b"%PDF" },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_multi_file_upload_creates_one_manifest_each(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    let first = ipo_csv(2);
    let second = ipo_csv(4);

    let (status, body) = send_multipart(
        &app,
        Method::POST,
        "/ipo/upload",
        &[
            Part::Text("upload_date", "2025-08-01"),
            Part::Text("data_date", "2025-07-31"),
            Part::Text("data_type", "daily"),
            Part::File { field: "files", filename: "a.csv", bytes: first.as_bytes() },
            Part::File { field: "files", filename: "b.csv", bytes: second.as_bytes() },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");

    let files = body["data"]["files"].as_array().expect("files array");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["records_inserted"], 2);
    assert_eq!(files[1]["records_inserted"], 4);

    let (_, body) = send(&app, Method::GET, "/ipo/uploads").await;
    assert_eq!(body["data"].as_array().expect("uploads array").len(), 2);
}
