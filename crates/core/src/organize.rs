use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::categorize::category_for;
use crate::error::OrganizeError;
use crate::model::{CategoryBucket, FileRecord, OrganizedResult, PlanSummary, Strategy};

/// Partitions `records` into category buckets under `strategy`.
///
/// `now` is the single reference instant for date-relative categories in
/// this pass. Bucket creation follows first-seen order and bucket contents
/// follow input order.
pub fn organize(
    records: &[FileRecord],
    strategy: Strategy,
    now: DateTime<Utc>,
) -> Result<OrganizedResult, OrganizeError> {
    if records.is_empty() {
        return Err(OrganizeError::EmptyInput);
    }

    let mut buckets: Vec<CategoryBucket> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for record in records {
        let label = category_for(record, strategy, now);
        let index = match index_by_label.get(&label) {
            Some(index) => *index,
            None => {
                buckets.push(CategoryBucket {
                    label: label.clone(),
                    files: Vec::new(),
                });
                index_by_label.insert(label, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[index].files.push(record.clone());
    }

    let summary = PlanSummary {
        category_count: buckets.len(),
        file_count: records.len(),
        strategy_label: strategy.label().to_string(),
    };

    debug!(
        strategy = strategy.label(),
        files = summary.file_count,
        categories = summary.category_count,
        "organize pass complete"
    );

    Ok(OrganizedResult {
        strategy,
        buckets,
        summary,
    })
}

/// Same as [`organize`], capturing the current time once for the whole pass.
pub fn organize_now(
    records: &[FileRecord],
    strategy: Strategy,
) -> Result<OrganizedResult, OrganizeError> {
    organize(records, strategy, Utc::now())
}
