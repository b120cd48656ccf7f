//! Shared test harness: in-memory app construction, multipart encoding,
//! request helpers, and sample spreadsheet builders.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use marketdesk_server::features::{self, FeatureState};
use marketdesk_server::storage::FileStore;

pub const BOUNDARY: &str = "marketdesk-test-boundary";

/// Build the full API router against a test pool and a throwaway upload
/// directory. The `TempDir` guard must be kept alive by the caller.
pub fn test_app(pool: SqlitePool) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("create temp upload dir");
    let state = FeatureState {
        db: pool,
        files: FileStore::new(dir.path()),
    };
    (features::router(state), dir)
}

/// One field of a multipart request.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
}

/// Encode parts into a multipart/form-data body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            },
            Part::File { field, filename, bytes } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            },
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart request, returning status and parsed JSON body.
pub async fn send_multipart(
    app: &Router,
    method: Method,
    uri: &str,
    parts: &[Part<'_>],
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("build request");

    send_request(app, request).await
}

/// Send a bodyless request, returning status and parsed JSON body.
pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");

    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Fetch raw bytes (file downloads).
pub async fn send_raw(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    (status, bytes.to_vec())
}

// ============================================================================
// Sample spreadsheet builders
// ============================================================================

/// A 47-column IPO CSV with `n` rows of recognizable values.
pub fn ipo_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let mut fields: Vec<String> = Vec::with_capacity(47);
        fields.push(format!("INE{i:06}"));
        fields.push(format!("Company {i}"));
        fields.push(format!("Banker {i}"));
        // seven date columns
        fields.push("01-02-2024".to_string());
        fields.push("05-02-2024".to_string());
        fields.push("08-02-2024".to_string());
        fields.push("09-02-2024".to_string());
        fields.push("12-02-2024".to_string());
        fields.push("14-02-2024".to_string());
        // high..iss_qty
        fields.push(format!("{}", 120.0 + i as f64));
        fields.push(format!("{}", 95.5 + i as f64));
        fields.push("100".to_string());
        fields.push("10".to_string());
        fields.push("5000".to_string());
        fields.push("50".to_string());
        fields.push("112".to_string());
        fields.push("12".to_string());
        fields.push("15-02-2024".to_string());
        fields.push("130".to_string());
        fields.push("3.4".to_string());
        // text tail: exch..industry
        fields.push("NSE".to_string());
        fields.push("BOOK".to_string());
        fields.push("FRESH".to_string());
        fields.push("EXPANSION".to_string());
        fields.push("MH".to_string());
        fields.push("CFO".to_string());
        fields.push("FINTECH".to_string());
        // lm1..lm15
        for j in 1..=15 {
            fields.push(if j <= 2 { format!("LM{j}") } else { String::new() });
        }
        // mktmkr1..mktmkr5
        for _ in 0..5 {
            fields.push(String::new());
        }
        assert_eq!(fields.len(), 47);
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// A market-indicator CSV: header line, then sections and data rows.
pub fn indicator_csv() -> String {
    "Name,Yr-ago,Curnt,Ch%,Tab\n\
     India Stocks,Yr-ago,Curnt,,1\n\
     Sensex,65000,80000,23.1,1\n\
     Nifty,19500,24400,25.1,1\n\
     Bullion,Yr-ago,Curnt,,1\n\
     Gold,60000,72000,20.0,1\n\
     BRICS,Yr-ago,Curnt,,2\n\
     Bovespa,118000,127000,7.6,2\n"
        .to_string()
}

/// A 13-column volume/value/trade tab CSV.
pub fn volume_tab_csv(tag: &str, n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!(
            "{tag} Co {i},INE{i:06},1000.5,250.25,{vol},2,1.5,10,21,60,245,990,110\n",
            vol = 100_000 + i,
        ));
    }
    out
}

/// A 21-column heatmap CSV (rank, three ignored columns, 17 measures).
pub fn heatmap_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!(
            "{rank},x,y,z,Entity {i},12,50000,150,1.2,40000,{rank},300,2.5,900,7.5,1200,10.1,2400,20.2,4800,40.4\n",
            rank = i + 1,
        ));
    }
    out
}

/// An 8-column industry-trend CSV.
pub fn trend_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!("Sector {i},12,0.5,1.5,2.5,3.5,4.5,5.5\n"));
    }
    out
}

/// An 8-column most-valued CSV.
pub fn most_valued_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!("House Co {i},0.1,0.2,0.3,0.4,0.5,0.6,0.7\n"));
    }
    out
}

/// A 33-column stock-pulse CSV (leading index, 31 fields, pulse score).
pub fn stock_pulse_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let mut fields: Vec<String> = Vec::with_capacity(33);
        fields.push(format!("{}", i + 1));
        fields.push(format!("5{i:05}"));
        fields.push(format!("SCRIP{i}"));
        fields.push(format!("C{i:04}"));
        fields.push(format!("INE{i:06}"));
        fields.push("10".to_string());
        fields.push(format!("{}", 250.5 + i as f64));
        // dma_5..dma_245
        for dma in [251.0, 248.0, 240.0, 230.0] {
            fields.push(format!("{dma}"));
        }
        fields.push("310".to_string());
        fields.push("12-01-2025".to_string());
        fields.push("190".to_string());
        fields.push("03-04-2024".to_string());
        fields.push("90000".to_string());
        // dvma_5..dvma_245
        for dvma in [88000.0, 85000.0, 81000.0, 76000.0] {
            fields.push(format!("{dvma}"));
        }
        fields.push("140000".to_string());
        fields.push("20-05-2025".to_string());
        fields.push("40000".to_string());
        fields.push("11-11-2024".to_string());
        // myrh..myruldt
        fields.push("320".to_string());
        fields.push("12-01-2025".to_string());
        fields.push("185".to_string());
        fields.push("03-04-2024".to_string());
        fields.push("305".to_string());
        fields.push("15-06-2025".to_string());
        fields.push("200".to_string());
        fields.push("02-02-2025".to_string());
        fields.push(format!("{}", 60 + i));
        assert_eq!(fields.len(), 33);
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// A 5-column yearly IPO summary CSV.
pub fn ipo_year_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!("{},{},{},{},{}\n", 2020 + i, 40 + i, 5000.5, 12000.25, 8.4));
    }
    out
}

/// A 7-column per-company IPO CSV.
pub fn ipo_company_csv(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!(
            "Listing {i},10-01-2024,100,145.5,500,727.5,45.5\n"
        ));
    }
    out
}
