//! Heatmap API tests: rank projection, `value` discriminant, and the
//! single-manifest lookup.

mod helpers;

use axum::http::{Method, StatusCode};
use sqlx::SqlitePool;

use helpers::{heatmap_csv, send, send_multipart, test_app, Part};

async fn upload_heatmap(
    app: &axum::Router,
    value: &str,
    date: &str,
    rows: usize,
) -> serde_json::Value {
    let csv = heatmap_csv(rows);
    let (status, body) = send_multipart(
        app,
        Method::POST,
        "/heatmap/upload",
        &[
            Part::Text("upload_date", date),
            Part::Text("data_date", date),
            Part::Text("value", value),
            Part::File { field: "files", filename: "heatmap.csv", bytes: csv.as_bytes() },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_rank_and_measures_are_projected(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    upload_heatmap(&app, "Company", "2025-08-01", 3).await;

    let (status, body) = send(&app, Method::GET, "/heatmap/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["value"], "Company");

    let rows = body["data"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 3);
    // the three scratch columns between rank and name are dropped
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["name"], "Entity 0");
    assert_eq!(rows[0]["cos"], 12);
    assert_eq!(rows[0]["daychper"], 1.2);
    assert_eq!(rows[2]["rank"], 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_each_value_series_has_its_own_latest(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    upload_heatmap(&app, "Company", "2025-07-30", 4).await;
    upload_heatmap(&app, "House", "2025-08-01", 2).await;

    // unfiltered latest is the newest upload overall
    let (_, body) = send(&app, Method::GET, "/heatmap/latest").await;
    assert_eq!(body["data"]["value"], "House");

    let (_, body) = send(&app, Method::GET, "/heatmap/latest?value=Company").await;
    assert_eq!(body["data"]["value"], "Company");
    assert_eq!(body["data"]["rows"].as_array().expect("rows").len(), 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_single_manifest_lookup(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);
    let body = upload_heatmap(&app, "IndSegment", "2025-08-01", 1).await;
    let id = body["data"]["files"][0]["upload_id"].as_i64().expect("upload id");

    let (status, body) = send(&app, Method::GET, &format!("/heatmap/uploads/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["value"], "IndSegment");
    assert_eq!(body["data"]["id"], id);

    let (status, _) = send(&app, Method::GET, "/heatmap/uploads/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_wrong_width_export_rejected(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let (status, body) = send_multipart(
        &app,
        Method::POST,
        "/heatmap/upload",
        &[
            Part::Text("upload_date", "2025-08-01"),
            Part::Text("data_date", "2025-08-01"),
            Part::Text("value", "Company"),
            Part::File { field: "files", filename: "short.csv", bytes: b"1,x,y,z,Entity,12\n" },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
