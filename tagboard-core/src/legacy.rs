//! Conversion of legacy single-category posts to hashtag lists.
//!
//! Older records carry a `categoryId` and no `hashtags`. Migration fills the
//! hashtag list from the category and leaves the category in place so older
//! clients keep working.

use serde_json::Value;
use tagboard_types::{
    MigrationFailure, MigrationPreview, MigrationProgress, MigrationResult, MigrationStatus,
    RawPost,
};

use crate::error::{BoardError, BoardResult};
use crate::hashtag::normalize_hashtags;

/// Records written per batch
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Convert a legacy category into a hashtag list using the normal
/// normalization rules. A blank category converts to an empty list.
pub fn convert_category_to_hashtags(category_id: &str) -> Vec<String> {
    normalize_hashtags([category_id.trim()])
}

/// Records that still need migrating
pub fn find_legacy_posts(records: &[RawPost]) -> Vec<&RawPost> {
    records.iter().filter(|record| record.is_legacy()).collect()
}

pub fn migration_status(records: &[RawPost]) -> MigrationStatus {
    let legacy_posts = records.iter().filter(|r| r.is_legacy()).count();
    let migrated_posts = records.iter().filter(|r| r.has_hashtag_field()).count();

    MigrationStatus {
        total_posts: records.len(),
        legacy_posts,
        migrated_posts,
        migration_complete: legacy_posts == 0,
    }
}

/// What migration would write, without touching the records
pub fn dry_run_migration(records: &[RawPost]) -> Vec<MigrationPreview> {
    find_legacy_posts(records)
        .into_iter()
        .filter_map(|record| {
            let category = record.category_str()?;
            Some(MigrationPreview {
                id: record.id.clone(),
                category_id: category.to_string(),
                converted_hashtags: convert_category_to_hashtags(category),
            })
        })
        .collect()
}

/// Fill one record's hashtag list from its category
pub fn migrate_post(record: &mut RawPost) -> BoardResult<Vec<String>> {
    let category = record
        .category_str()
        .ok_or_else(|| BoardError::InvalidCategory(format!("{:?}", record.category_id)))?;

    let hashtags = convert_category_to_hashtags(category);
    if hashtags.is_empty() {
        return Err(BoardError::InvalidCategory(category.to_string()));
    }

    record.hashtags = Some(Value::Array(
        hashtags.iter().cloned().map(Value::String).collect(),
    ));
    Ok(hashtags)
}

/// Migrate every legacy record in batches of `batch_size`, reporting
/// progress after each batch. Records that cannot be converted are left
/// untouched and listed in the result.
pub fn migrate_posts<F>(records: &mut [RawPost], batch_size: usize, mut on_progress: F) -> MigrationResult
where
    F: FnMut(&MigrationProgress),
{
    let pending: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_legacy())
        .map(|(i, _)| i)
        .collect();

    let mut result = MigrationResult {
        total_processed: pending.len(),
        ..Default::default()
    };

    if pending.is_empty() {
        tracing::info!("No legacy posts to migrate");
        return result;
    }

    tracing::info!("Migrating {} legacy posts", pending.len());
    let batch_size = batch_size.max(1);

    for (batch_index, batch) in pending.chunks(batch_size).enumerate() {
        for &i in batch {
            let record = &mut records[i];
            match migrate_post(record) {
                Ok(hashtags) => {
                    tracing::debug!(id = %record.id, ?hashtags, "migrated post");
                    result.success_count += 1;
                }
                Err(e) => {
                    tracing::warn!(id = %record.id, "failed to migrate post: {}", e);
                    result.error_count += 1;
                    result.errors.push(MigrationFailure {
                        id: record.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let current = ((batch_index + 1) * batch_size).min(pending.len());
        let progress = MigrationProgress {
            current,
            total: pending.len(),
            percentage: rounded_percentage(current, pending.len()),
            current_doc_id: batch.last().map(|&i| records[i].id.clone()),
        };
        tracing::debug!(current, total = progress.total, "migration batch done");
        on_progress(&progress);
    }

    tracing::info!(
        "Migration complete: {} succeeded, {} failed",
        result.success_count,
        result.error_count
    );
    result
}

/// `current / total` as a percentage, rounded half up
fn rounded_percentage(current: usize, total: usize) -> u8 {
    ((current * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy(id: &str, category: Value) -> RawPost {
        serde_json::from_value(json!({
            "id": id,
            "text": "hello",
            "categoryId": category,
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    fn migrated(id: &str) -> RawPost {
        serde_json::from_value(json!({
            "id": id,
            "hashtags": ["感想"],
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_category() {
        assert_eq!(convert_category_to_hashtags("感想"), vec!["感想"]);
        assert_eq!(convert_category_to_hashtags("  #News "), vec!["news"]);
        assert!(convert_category_to_hashtags("   ").is_empty());
    }

    #[test]
    fn test_status_counts() {
        let records = vec![legacy("a", json!("質問")), migrated("b"), migrated("c")];
        let status = migration_status(&records);
        assert_eq!(status.total_posts, 3);
        assert_eq!(status.legacy_posts, 1);
        assert_eq!(status.migrated_posts, 2);
        assert!(!status.migration_complete);
    }

    #[test]
    fn test_dry_run_skips_non_string_categories() {
        let records = vec![legacy("a", json!("応援")), legacy("b", json!(5)), migrated("c")];
        let preview = dry_run_migration(&records);
        assert_eq!(
            preview,
            vec![MigrationPreview {
                id: "a".to_string(),
                category_id: "応援".to_string(),
                converted_hashtags: vec!["応援".to_string()],
            }]
        );
        assert!(records[0].hashtags.is_none());
    }

    #[test]
    fn test_migrate_posts_in_batches() {
        let mut records = vec![
            legacy("a", json!("感想")),
            migrated("b"),
            legacy("c", json!("Info")),
            legacy("d", json!("  ")),
        ];
        let mut progress = Vec::new();
        let result = migrate_posts(&mut records, 2, |p| progress.push(p.clone()));

        assert_eq!(result.total_processed, 3);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.errors[0].id, "d");

        assert_eq!(records[0].hashtags, Some(json!(["感想"])));
        assert_eq!(records[2].hashtags, Some(json!(["info"])));
        assert_eq!(records[2].category_str(), Some("Info"));
        assert!(records[3].hashtags.is_none());

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].current, 2);
        assert_eq!(progress[0].percentage, 67);
        assert_eq!(progress[0].current_doc_id.as_deref(), Some("c"));
        assert_eq!(progress[1].current, 3);
        assert_eq!(progress[1].percentage, 100);

        assert_eq!(migration_status(&records).legacy_posts, 1);
    }

    #[test]
    fn test_progress_percentage_rounds() {
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(3, 3), 100);
    }

    #[test]
    fn test_migrate_nothing_pending() {
        let mut records = vec![migrated("a")];
        let mut calls = 0;
        let result = migrate_posts(&mut records, DEFAULT_BATCH_SIZE, |_| calls += 1);
        assert_eq!(result, MigrationResult::default());
        assert_eq!(calls, 0);
    }
}
