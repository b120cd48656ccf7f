use axum::Router;

use super::{COMPANIES, YEARWISE};
use crate::features::shared::routes::category_router;
use crate::features::FeatureState;

pub fn yearwise_routes() -> Router<FeatureState> {
    category_router(&YEARWISE)
}

pub fn company_routes() -> Router<FeatureState> {
    category_router(&COMPANIES)
}
