//! Period selection
//!
//! Monthly archives live side by side under a base directory, one folder per
//! month named like `10. Outubro`. A selector may be a month name, a month
//! number, or a literal folder name.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the base directory of monthly archives.
pub const BASE_PATH_ENV: &str = "IDFA_BASE_PATH";

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Month number (1-12) for a name such as `"Março"`, `"marco"` or `"3"`.
#[must_use]
pub fn month_number(selector: &str) -> Option<u32> {
    let trimmed = selector.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let folded = fold(trimmed);
    MONTHS
        .iter()
        .position(|name| fold(name) == folded)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// Folder names a month may be stored under, preferred first.
#[must_use]
pub fn month_folder_candidates(month: u32) -> Vec<String> {
    let Some(name) = usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTHS.get(idx))
    else {
        return Vec::new();
    };
    vec![format!("{month:02}. {name}"), format!("{month}. {name}")]
}

/// Resolve a period selector to an archive root under `base`.
///
/// The returned path is not guaranteed to exist; the audit reports a missing
/// root explicitly.
///
/// # Errors
/// `Error::InvalidInput` for an empty selector or one that escapes `base`.
pub fn resolve_period_root(base: &Path, selector: &str) -> Result<PathBuf> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("empty period selector".to_string()));
    }
    if trimmed.contains(['/', '\\']) || trimmed == ".." {
        return Err(Error::InvalidInput(format!(
            "period selector must be a single folder name: {trimmed}"
        )));
    }

    let Some(month) = month_number(trimmed) else {
        return Ok(base.join(trimmed));
    };

    let candidates = month_folder_candidates(month);
    let resolved = candidates
        .iter()
        .map(|name| base.join(name))
        .find(|path| path.is_dir())
        .unwrap_or_else(|| base.join(&candidates[0]));

    log::debug!("Period '{trimmed}' resolved to {}", resolved.display());
    Ok(resolved)
}

/// Base directory from [`BASE_PATH_ENV`], if set and non-empty.
#[must_use]
pub fn base_from_env() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
