//! Expected folder taxonomy
//!
//! A taxonomy is a list of top-level categories, each owning a tree of
//! folder names. An empty mapping marks a leaf: a directory scanned on disk.
//! Children iterate in sorted name order so every walk is reproducible.

mod reference;

use crate::services::identifier::category_numeral;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A name must join onto its parent as exactly one new path component.
fn is_single_component(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// Node of the expected folder tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, TaxonomyNode>",
    into = "BTreeMap<String, TaxonomyNode>"
)]
pub enum TaxonomyNode {
    Leaf,
    Interior(BTreeMap<String, TaxonomyNode>),
}

impl From<BTreeMap<String, TaxonomyNode>> for TaxonomyNode {
    fn from(children: BTreeMap<String, TaxonomyNode>) -> Self {
        if children.is_empty() {
            TaxonomyNode::Leaf
        } else {
            TaxonomyNode::Interior(children)
        }
    }
}

impl From<TaxonomyNode> for BTreeMap<String, TaxonomyNode> {
    fn from(node: TaxonomyNode) -> Self {
        match node {
            TaxonomyNode::Leaf => BTreeMap::new(),
            TaxonomyNode::Interior(children) => children,
        }
    }
}

impl TaxonomyNode {
    #[must_use]
    pub fn leaf() -> Self {
        TaxonomyNode::Leaf
    }

    /// Build an interior node from `(folder name, child)` pairs.
    #[must_use]
    pub fn interior<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, TaxonomyNode)>,
        S: Into<String>,
    {
        children
            .into_iter()
            .map(|(name, child)| (name.into(), child))
            .collect::<BTreeMap<_, _>>()
            .into()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TaxonomyNode::Leaf)
    }

    /// Number of leaves below (or at) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            TaxonomyNode::Leaf => 1,
            TaxonomyNode::Interior(children) => children.values().map(Self::leaf_count).sum(),
        }
    }

    fn validate(&self, trail: &str) -> Result<()> {
        if let TaxonomyNode::Interior(children) = self {
            for (name, child) in children {
                if !is_single_component(name) {
                    return Err(Error::Taxonomy(format!(
                        "invalid folder name '{name}' under '{trail}'"
                    )));
                }
                child.validate(&format!("{trail}/{name}"))?;
            }
        }
        Ok(())
    }
}

/// How a category turns leaf paths into identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierScheme {
    /// `category.<first number of segment 0>.<number after dot in segment 1>`
    CategoryPrefixed,
    /// `<X.Y taken from segment 0>.<first number of segment 1>`
    SectionDotted,
}

impl IdentifierScheme {
    /// Scheme used when a category does not name one.
    #[must_use]
    pub fn for_numeral(numeral: &str) -> Self {
        match numeral {
            "1" | "4" => IdentifierScheme::CategoryPrefixed,
            _ => IdentifierScheme::SectionDotted,
        }
    }
}

/// A top-level category folder and its expected subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<IdentifierScheme>,
    pub tree: TaxonomyNode,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, tree: TaxonomyNode) -> Self {
        Self {
            name: name.into(),
            scheme: None,
            tree,
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: IdentifierScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Leading numeral of the category name, `"0"` when it has none.
    #[must_use]
    pub fn numeral(&self) -> String {
        category_numeral(&self.name)
    }

    #[must_use]
    pub fn scheme(&self) -> IdentifierScheme {
        self.scheme
            .unwrap_or_else(|| IdentifierScheme::for_numeral(&self.numeral()))
    }
}

/// The full expected archive layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: Vec<Category>,
}

impl Taxonomy {
    /// The reference layout of the monthly compliance archive.
    #[must_use]
    pub fn reference() -> Self {
        reference::reference_taxonomy()
    }

    /// Parse and validate a taxonomy from JSON.
    ///
    /// # Errors
    /// `Error::Taxonomy` for malformed JSON or invalid folder names.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let taxonomy: Taxonomy =
            serde_json::from_str(raw).map_err(|e| Error::Taxonomy(e.to_string()))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Load a taxonomy from a JSON file.
    ///
    /// # Errors
    /// `Error::Io` when the file cannot be read, `Error::Taxonomy` otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded taxonomy from {}", path.as_ref().display());
        Self::from_json_str(&raw)
    }

    /// Check category and folder names.
    ///
    /// # Errors
    /// `Error::Taxonomy` describing the first offending name.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Taxonomy("no categories defined".to_string()));
        }
        for category in &self.categories {
            if !is_single_component(&category.name) {
                return Err(Error::Taxonomy(format!(
                    "invalid category name '{}'",
                    category.name
                )));
            }
            category.tree.validate(&category.name)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.categories.iter().map(|c| c.tree.leaf_count()).sum()
    }
}
