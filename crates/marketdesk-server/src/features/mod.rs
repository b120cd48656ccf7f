//! Feature modules implementing the marketdesk API
//!
//! Each spreadsheet category is a vertical slice owning its column layout
//! and routes. The repeated upload/list/latest/download/update/delete
//! machinery lives once in [`shared`] and is parameterized by the slice's
//! [`shared::Category`] descriptor; slices only add what is genuinely theirs
//! (the market-indicator section grouping, the volume/trade group commands).
//!
//! # Categories
//!
//! - **market_indicators**: per-tab indicator rows with section dividers
//! - **industry_trend**: industry stock-trend table
//! - **most_valued**: most-valued rankings per house
//! - **ipo**: 47-column IPO master sheet
//! - **stock_pulse**: 33-column screener export
//! - **heatmap**: ranked heatmap, discriminated by entity kind
//! - **ipo_heatmap**: yearly summary and per-company IPO series
//! - **volume_trade**: volume/value/trade tabs correlated by group id

pub mod heatmap;
pub mod industry_trend;
pub mod ipo;
pub mod ipo_heatmap;
pub mod market_indicators;
pub mod most_valued;
pub mod shared;
pub mod stock_pulse;
pub mod volume_trade;

use axum::Router;
use sqlx::SqlitePool;

use crate::storage::FileStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// SQLite connection pool
    pub db: SqlitePool,
    /// Local filesystem store for uploaded spreadsheets
    pub files: FileStore,
}

/// Creates the main API router with all category routes mounted
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/market-indicators", market_indicators::routes())
        .nest("/industry-trend", industry_trend::routes())
        .nest("/most-valued", most_valued::routes())
        .nest("/ipo", ipo::routes())
        .nest("/stock-pulse", stock_pulse::routes())
        .nest("/heatmap", heatmap::routes())
        .nest("/ipo-heatmap/yearwise", ipo_heatmap::yearwise_routes())
        .nest("/ipo-heatmap/companies", ipo_heatmap::company_routes())
        .nest("/volume-trade", volume_trade::routes())
        .with_state(state)
}
