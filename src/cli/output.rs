//! Output formatting for CLI

use crate::models::{AuditReport, AuditResponse, ItemStatus};
use crate::services::aggregate::{pending_folders, summarize};
use std::fmt::Write;

/// Get ANSI color code for an item status
fn color_for_status(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Complete => "\x1b[32m",
        ItemStatus::InProgress => "\x1b[33m",
        ItemStatus::NotStarted => "\x1b[31m",
    }
}

/// Reset ANSI color
const COLOR_RESET: &str = "\x1b[0m";

/// Format an audit as a human-readable table
#[must_use]
pub fn format_text(audit: &AuditReport, show_pending: bool) -> String {
    let mut out = String::new();
    let report = &audit.report;

    let _ = writeln!(out, "{}", audit.root);

    if report.categories.is_empty() {
        let _ = writeln!(out, "No categories found.");
        return out;
    }

    for category in &report.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", category.label);
        let _ = writeln!(
            out,
            "  {:<10} {:<14} {:>8} {:>8} {:>8}",
            "Item", "Status", "Files", "Folders", "%"
        );
        let _ = writeln!(out, "  {}", "─".repeat(52));

        for (id, item) in &category.items {
            let _ = writeln!(
                out,
                "  {:<10} {}{:<14}{} {:>8} {:>8} {:>7.2}%",
                id.to_string(),
                color_for_status(item.status),
                item.status.as_str(),
                COLOR_RESET,
                item.soma_total,
                item.previsao_pastas,
                item.percentual_conclusao
            );
        }
    }

    let summary = summarize(report);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Items: {}  Complete: {}  In progress: {}  Not started: {}  Completion: {:.2}%",
        summary.total_items,
        summary.complete,
        summary.in_progress,
        summary.not_started,
        summary.completion_rate
    );

    if show_pending {
        let pending = pending_folders(report);
        let _ = writeln!(out);
        if pending.is_empty() {
            let _ = writeln!(out, "No pending folders.");
        } else {
            let _ = writeln!(out, "Pending folders: {}", pending.len());
            for folder in &pending {
                let _ = writeln!(
                    out,
                    "  [{}] {} {}",
                    folder.category, folder.item, folder.diretorio
                );
            }
        }
    }

    out
}

/// Format an audit response envelope as JSON
#[must_use]
pub fn format_json(response: &AuditResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
}
