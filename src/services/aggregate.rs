//! Aggregation of leaf outcomes into logical items

use super::reconcile::LeafOutcome;
use crate::models::{ItemId, ItemReport, ItemStatus, PendingFolder, Report, ReportSummary};
use std::collections::BTreeMap;

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Status from the number of filled folders out of the expected total
#[must_use]
pub fn derive_status(filled: usize, total: usize) -> ItemStatus {
    if filled == 0 {
        ItemStatus::NotStarted
    } else if filled == total {
        ItemStatus::Complete
    } else {
        ItemStatus::InProgress
    }
}

/// `filled / total * 100` rounded to two decimals, `0.0` when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completion_percentage(filled: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(filled as f64 / total as f64 * 100.0)
}

/// Fold the outcomes sharing one identifier into an item.
///
/// The justified flag counts the folder as filled and is dropped here.
#[must_use]
pub fn aggregate_item(outcomes: Vec<LeafOutcome>) -> ItemReport {
    let count_total = outcomes.len();
    let count_filled = outcomes
        .iter()
        .filter(|o| o.record.qtd > 0 || o.justified)
        .count();
    let soma_total = outcomes.iter().map(|o| o.record.qtd).sum();

    ItemReport {
        status: derive_status(count_filled, count_total),
        soma_total,
        previsao_pastas: u32::try_from(count_total).unwrap_or(u32::MAX),
        percentual_conclusao: completion_percentage(count_filled, count_total),
        diretorios: outcomes.into_iter().map(|o| o.record).collect(),
    }
}

/// Group outcomes by identifier, keeping walk order inside each group.
#[must_use]
pub fn aggregate(outcomes: Vec<LeafOutcome>) -> BTreeMap<ItemId, ItemReport> {
    let mut grouped: BTreeMap<ItemId, Vec<LeafOutcome>> = BTreeMap::new();
    for outcome in outcomes {
        grouped.entry(outcome.id.clone()).or_default().push(outcome);
    }

    grouped
        .into_iter()
        .map(|(id, group)| (id, aggregate_item(group)))
        .collect()
}

/// Dashboard counters for a report
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(report: &Report) -> ReportSummary {
    let mut complete = 0;
    let mut in_progress = 0;
    let mut not_started = 0;

    for (_, _, item) in report.iter_items() {
        match item.status {
            ItemStatus::Complete => complete += 1,
            ItemStatus::InProgress => in_progress += 1,
            ItemStatus::NotStarted => not_started += 1,
        }
    }

    let total_items = complete + in_progress + not_started;

    ReportSummary {
        total_items,
        complete,
        in_progress,
        not_started,
        pending: in_progress + not_started,
        completion_rate: completion_percentage(complete, total_items),
    }
}

/// Folders with no evidence, in report order
#[must_use]
pub fn pending_folders(report: &Report) -> Vec<PendingFolder> {
    report
        .iter_items()
        .flat_map(|(label, id, item)| {
            item.diretorios
                .iter()
                .filter(|record| record.qtd == 0)
                .map(move |record| PendingFolder {
                    category: label.to_string(),
                    item: id.clone(),
                    diretorio: record.diretorio.clone(),
                })
        })
        .collect()
}
