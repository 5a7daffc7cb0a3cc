//! Compliance Archive Audit Library
//!
//! This library reconciles a monthly document archive against the folder
//! taxonomy it is expected to follow, and reports per item how many evidence
//! files were found, whether every expected folder is populated, and an
//! overall completion percentage.

pub mod cli;
pub mod io;
pub mod models;
pub mod period;
pub mod services;
pub mod taxonomy;

pub use models::{
    AuditReport, AuditResponse, FolderRecord, ItemId, ItemReport, ItemStatus, Report,
};
pub use taxonomy::{Category, IdentifierScheme, Taxonomy, TaxonomyNode};

use std::path::Path;
use std::result;

/// Name stem of the marker file meaning "no records were required this period".
pub const SENTINEL_STEM: &str = "Não houveram registros no período";

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    RootNotFound(String),
    Taxonomy(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::RootNotFound(path) => write!(f, "Archive root not found: {path}"),
            Error::Taxonomy(msg) => write!(f, "Invalid taxonomy: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Options for auditing an archive
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub taxonomy: Taxonomy,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            taxonomy: Taxonomy::reference(),
        }
    }
}

impl AuditResponse {
    /// Run an audit and wrap the outcome in the transport envelope.
    ///
    /// A missing root becomes an `erro` envelope; any other failure is
    /// returned to the caller.
    pub fn from_audit<P: AsRef<Path>>(root: P, opts: &AuditOptions) -> Result<Self> {
        match audit_archive(root, opts) {
            Ok(audit) => Ok(audit.into()),
            Err(Error::RootNotFound(path)) => Ok(AuditResponse::root_not_found(&path)),
            Err(e) => Err(e),
        }
    }
}

/// Audit an archive root and return the assembled report
///
/// # Arguments
/// * `root` - The archive root holding the category folders
/// * `opts` - Audit options
///
/// # Errors
/// `Error::Taxonomy` when a category or folder name does not name a single
/// child directory, `Error::RootNotFound` when `root` does not exist,
/// `Error::InvalidInput` when it is not a directory. Nothing below the root
/// is fatal.
pub fn audit_archive<P: AsRef<Path>>(root: P, opts: &AuditOptions) -> Result<AuditReport> {
    opts.taxonomy.validate()?;

    let root = root.as_ref();
    let root_display = root.to_string_lossy().to_string();

    if !root.exists() {
        return Err(Error::RootNotFound(root_display));
    }

    if !root.is_dir() {
        return Err(Error::InvalidInput(format!(
            "Path is not a directory: {root_display}"
        )));
    }

    log::info!("Auditing archive at {root_display}");

    let special = services::sentinel::collect_special_dirs(root);
    let mut context = services::reconcile::ScanContext::new(root, special);
    services::reconcile::reconcile(&opts.taxonomy, &mut context);

    let buckets = context.into_buckets();
    let report = services::report::assemble(buckets);

    log::info!(
        "Audit finished: {} items across {} categories",
        report.item_count(),
        report.categories.len()
    );

    Ok(AuditReport {
        root: root_display,
        report,
    })
}

/// Resolve a period selector under `base` and audit the resulting root
///
/// # Errors
/// Same as [`audit_archive`]; an unknown period yields `Error::RootNotFound`.
pub fn audit_period<P: AsRef<Path>>(
    base: P,
    selector: &str,
    opts: &AuditOptions,
) -> Result<AuditReport> {
    let root = period::resolve_period_root(base.as_ref(), selector)?;
    audit_archive(root, opts)
}
