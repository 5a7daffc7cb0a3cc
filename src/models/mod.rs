//! Data models for folder records, aggregated items and the report envelope

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Dotted three-part identifier of a logical item, e.g. `1.2.1`.
///
/// Segments are digit runs. Ordering compares each segment numerically so
/// `1.2.1` sorts before `1.10.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId {
    parts: [String; 3],
}

impl ItemId {
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            parts: [x.into(), y.into(), z.into()],
        }
    }

    #[must_use]
    pub fn parts(&self) -> [&str; 3] {
        [&self.parts[0], &self.parts[1], &self.parts[2]]
    }
}

fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let ta = a.trim_start_matches('0');
    let tb = b.trim_start_matches('0');
    ta.len()
        .cmp(&tb.len())
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.cmp(b))
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .iter()
            .zip(other.parts.iter())
            .map(|(a, b)| numeric_cmp(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.parts[0], self.parts[1], self.parts[2])
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        let valid = segments.len() == 3
            && segments
                .iter()
                .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()));
        if !valid {
            return Err(format!("invalid item identifier '{s}'"));
        }
        Ok(Self::new(segments[0], segments[1], segments[2]))
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Completion state of a logical item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "Não Iniciado")]
    NotStarted,
    #[serde(rename = "Em Andamento")]
    InProgress,
    #[serde(rename = "Concluído")]
    Complete,
}

impl ItemStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::NotStarted => "Não Iniciado",
            ItemStatus::InProgress => "Em Andamento",
            ItemStatus::Complete => "Concluído",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Não Iniciado" => Some(ItemStatus::NotStarted),
            "Em Andamento" => Some(ItemStatus::InProgress),
            "Concluído" => Some(ItemStatus::Complete),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one physical leaf folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub diretorio: String,
    pub qtd: u64,
    pub itens: Vec<String>,
}

/// One logical item aggregated over every folder sharing its identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub status: ItemStatus,
    pub soma_total: u64,
    pub previsao_pastas: u32,
    pub percentual_conclusao: f64,
    pub diretorios: Vec<FolderRecord>,
}

/// Items of one top-level category, keyed by identifier
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub label: String,
    pub items: BTreeMap<ItemId, ItemReport>,
}

/// Final nested report.
///
/// Serializes as a JSON object keyed by category label, keeping the
/// taxonomy's category order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub categories: Vec<CategoryReport>,
}

impl Report {
    /// Look up an item across all categories.
    #[must_use]
    pub fn find_item(&self, id: &ItemId) -> Option<&ItemReport> {
        self.categories
            .iter()
            .find_map(|category| category.items.get(id))
    }

    #[must_use]
    pub fn category(&self, label: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Iterate `(category label, identifier, item)` in report order.
    pub fn iter_items(&self) -> impl Iterator<Item = (&str, &ItemId, &ItemReport)> {
        self.categories.iter().flat_map(|category| {
            category
                .items
                .iter()
                .map(move |(id, item)| (category.label.as_str(), id, item))
        })
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.label, &category.items)?;
        }
        map.end()
    }
}

struct ReportVisitor;

impl<'de> Visitor<'de> for ReportVisitor {
    type Value = Report;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category labels to items")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Report, A::Error> {
        let mut categories = Vec::new();
        while let Some((label, items)) =
            access.next_entry::<String, BTreeMap<ItemId, ItemReport>>()?
        {
            categories.push(CategoryReport { label, items });
        }
        Ok(Report { categories })
    }
}

impl<'de> Deserialize<'de> for Report {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReportVisitor)
    }
}

/// A report together with the archive root it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub root: String,
    pub report: Report,
}

/// Transport envelope returned to callers of the query interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum AuditResponse {
    #[serde(rename = "ok")]
    Ok { result: Report, path: String },
    #[serde(rename = "erro")]
    Error { messagem: String },
}

impl AuditResponse {
    /// Error envelope for an archive root that does not exist.
    #[must_use]
    pub fn root_not_found(path: &str) -> Self {
        AuditResponse::Error {
            messagem: format!("O período não foi encontrado em {path}"),
        }
    }
}

impl From<AuditReport> for AuditResponse {
    fn from(audit: AuditReport) -> Self {
        AuditResponse::Ok {
            result: audit.report,
            path: audit.root,
        }
    }
}

/// Dashboard-level counters over a whole report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_items: usize,
    pub complete: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub pending: usize,
    pub completion_rate: f64,
}

/// A folder that holds no evidence and was not excused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFolder {
    pub category: String,
    pub item: ItemId,
    pub diretorio: String,
}
