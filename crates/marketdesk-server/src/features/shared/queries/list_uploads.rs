//! List a category's upload history, newest first

use sqlx::SqlitePool;

use crate::features::shared::{manifests, Category};

#[tracing::instrument(skip(pool), fields(category = cat.slug))]
pub async fn handle(
    pool: &SqlitePool,
    cat: &'static Category,
) -> Result<Vec<serde_json::Value>, sqlx::Error> {
    let uploads = manifests::list_all(pool, cat).await?;
    Ok(uploads.iter().map(|u| u.to_json(cat)).collect())
}
