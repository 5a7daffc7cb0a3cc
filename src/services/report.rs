//! Final report assembly

use super::aggregate::aggregate;
use super::reconcile::CategoryBucket;
use crate::models::{CategoryReport, Report};

/// Human label of a category: numeral prefix stripped, prefixed with `Item `.
///
/// `"1. SMS"` becomes `"Item SMS"`, `"2.1 Obras"` becomes `"Item Obras"`.
#[must_use]
pub fn category_label(name: &str) -> String {
    let trimmed = name.trim_start();
    let mut rest = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());

    if rest.len() < trimmed.len() {
        if let Some(after_dot) = rest.strip_prefix('.') {
            let after_minor = after_dot.trim_start_matches(|c: char| c.is_ascii_digit());
            rest = if after_minor.len() < after_dot.len() {
                after_minor.strip_prefix('.').unwrap_or(after_minor)
            } else {
                after_dot
            };
        }
    }

    format!("Item {}", rest.trim())
}

/// Turn per-category buckets into the nested report.
///
/// Buckets whose names map to the same label are merged.
#[must_use]
pub fn assemble(buckets: Vec<CategoryBucket>) -> Report {
    let mut merged: Vec<(String, Vec<_>)> = Vec::new();

    for bucket in buckets {
        let label = category_label(&bucket.name);
        match merged.iter_mut().find(|(l, _)| *l == label) {
            Some((_, outcomes)) => {
                log::warn!("Category '{}' shares label '{label}'", bucket.name);
                outcomes.extend(bucket.outcomes);
            }
            None => merged.push((label, bucket.outcomes)),
        }
    }

    Report {
        categories: merged
            .into_iter()
            .map(|(label, outcomes)| CategoryReport {
                label,
                items: aggregate(outcomes),
            })
            .collect(),
    }
}
