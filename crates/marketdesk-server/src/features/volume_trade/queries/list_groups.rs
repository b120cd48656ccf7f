//! List upload groups: manifests joined by group id, one entry per group
//! with a slot per tab

use serde::Serialize;
use sqlx::SqlitePool;

use super::super::CATEGORY;
use crate::features::shared::manifests;

#[derive(Debug, Clone, Serialize)]
pub struct GroupSlot {
    pub file_id: i64,
    pub file_name: String,
    pub file_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group_id: String,
    pub upload_date: chrono::NaiveDate,
    pub data_date: chrono::NaiveDate,
    pub volume: Option<GroupSlot>,
    pub value: Option<GroupSlot>,
    pub trade: Option<GroupSlot>,
}

/// Newest-first group listing. Manifests are already ordered latest-first;
/// groups keep the position of their first (newest) member.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &SqlitePool) -> Result<Vec<GroupSummary>, sqlx::Error> {
    let uploads = manifests::list_all(pool, &CATEGORY).await?;

    let mut groups: Vec<GroupSummary> = Vec::new();
    for upload in uploads {
        let group_id = upload.group_id.clone().unwrap_or_default();

        let idx = match groups.iter().position(|g| g.group_id == group_id) {
            Some(i) => i,
            None => {
                groups.push(GroupSummary {
                    group_id: group_id.clone(),
                    upload_date: upload.upload_date,
                    data_date: upload.data_date,
                    volume: None,
                    value: None,
                    trade: None,
                });
                groups.len() - 1
            },
        };
        let entry = &mut groups[idx];

        let slot = GroupSlot {
            file_id: upload.id,
            file_name: upload.file_name.clone(),
            file_link: CATEGORY.file_link(upload.id),
        };
        match upload.data_type.as_str() {
            "volume" => entry.volume = Some(slot),
            "value" => entry.value = Some(slot),
            "trade" => entry.trade = Some(slot),
            _ => {},
        }
    }

    Ok(groups)
}
