use axum::Router;

use super::CATEGORY;
use crate::features::shared::routes::category_router;
use crate::features::FeatureState;

pub fn routes() -> Router<FeatureState> {
    category_router(&CATEGORY)
}
