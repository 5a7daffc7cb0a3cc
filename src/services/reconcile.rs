//! Taxonomy-driven reconciliation against the archive on disk
//!
//! The walk descends the expected tree depth-first in lock-step with the
//! filesystem. Every leaf yields exactly one [`LeafOutcome`], whether or not
//! its directory exists:
//!
//! - existing directory: direct files other than the sentinel are counted;
//!   an empty directory that is justified reports a single placeholder entry
//! - missing or unreadable directory: always excused with the placeholder
//!
//! The justified flag is inherited downwards and never cleared.

use super::identifier::compute_identifier;
use super::sentinel::is_sentinel;
use crate::models::{FolderRecord, ItemId};
use crate::taxonomy::{IdentifierScheme, Taxonomy, TaxonomyNode};
use crate::SENTINEL_STEM;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One leaf's classification before aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafOutcome {
    pub id: ItemId,
    pub record: FolderRecord,
    pub justified: bool,
}

/// Leaf outcomes of one top-level category in walk order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub name: String,
    pub outcomes: Vec<LeafOutcome>,
}

/// Per-audit state: archive root, sentinel directories and results so far
#[derive(Debug)]
pub struct ScanContext {
    root: PathBuf,
    special: HashSet<PathBuf>,
    buckets: Vec<CategoryBucket>,
}

impl ScanContext {
    #[must_use]
    pub fn new(root: &Path, special: HashSet<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            special,
            buckets: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn is_special(&self, dir: &Path) -> bool {
        self.special.contains(dir)
    }

    #[must_use]
    pub fn into_buckets(self) -> Vec<CategoryBucket> {
        self.buckets
    }
}

struct Walker<'a> {
    ctx: &'a ScanContext,
    numeral: String,
    scheme: IdentifierScheme,
}

impl Walker<'_> {
    fn walk(
        &self,
        disk: &Path,
        node: &TaxonomyNode,
        segments: &[String],
        justified: bool,
        out: &mut Vec<LeafOutcome>,
    ) {
        match node {
            TaxonomyNode::Interior(children) => {
                for (name, child) in children {
                    let child_path = disk.join(name);
                    let child_justified = justified || self.ctx.is_special(&child_path);

                    let mut child_segments = segments.to_vec();
                    child_segments.push(name.clone());

                    self.walk(&child_path, child, &child_segments, child_justified, out);
                }
            }
            TaxonomyNode::Leaf => out.push(self.classify_leaf(disk, segments, justified)),
        }
    }

    fn classify_leaf(&self, disk: &Path, segments: &[String], inherited: bool) -> LeafOutcome {
        let relative = segments.join("/");
        let id = compute_identifier(&self.numeral, self.scheme, segments);

        let (record, justified) = match list_real_files(disk) {
            Some(files) => {
                let justified = inherited || self.ctx.is_special(disk);
                if justified && files.is_empty() {
                    (excused_record(&relative), true)
                } else {
                    let record = FolderRecord {
                        diretorio: relative,
                        qtd: files.len() as u64,
                        itens: files,
                    };
                    (record, justified)
                }
            }
            None => {
                log::debug!("Missing leaf {} excused", disk.display());
                (excused_record(&relative), true)
            }
        };

        log::trace!(
            "Leaf {} -> {id}: qtd={} justified={justified}",
            disk.display(),
            record.qtd
        );

        LeafOutcome {
            id,
            record,
            justified,
        }
    }
}

fn excused_record(relative: &str) -> FolderRecord {
    let diretorio = if relative.is_empty() {
        SENTINEL_STEM.to_string()
    } else {
        format!("{relative}/{SENTINEL_STEM}")
    };
    FolderRecord {
        diretorio,
        qtd: 1,
        itens: vec![SENTINEL_STEM.to_string()],
    }
}

/// Names of the direct child files of `dir`, excluding sentinels, sorted.
///
/// `None` when `dir` is not a listable directory.
fn list_real_files(dir: &Path) -> Option<Vec<String>> {
    if !dir.is_dir() {
        return None;
    }

    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(err) => {
            log::warn!("Cannot list {}: {err}; treating as missing", dir.display());
            return None;
        }
    };

    let mut names: Vec<String> = read_dir
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(err) => {
                log::warn!("Failed to read entry in {}: {err}", dir.display());
                None
            }
        })
        .filter(|path| path.is_file() && !is_sentinel(path))
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .collect();

    names.sort();
    Some(names)
}

/// Walk every category of `taxonomy` and record its leaf outcomes in `ctx`.
pub fn reconcile(taxonomy: &Taxonomy, ctx: &mut ScanContext) {
    for category in &taxonomy.categories {
        let walker = Walker {
            ctx,
            numeral: category.numeral(),
            scheme: category.scheme(),
        };

        let disk = ctx.root().join(&category.name);
        let mut outcomes = Vec::with_capacity(category.tree.leaf_count());
        walker.walk(&disk, &category.tree, &[], false, &mut outcomes);

        log::debug!(
            "Category '{}' reconciled: {} leaves",
            category.name,
            outcomes.len()
        );

        ctx.buckets.push(CategoryBucket {
            name: category.name.clone(),
            outcomes,
        });
    }
}
