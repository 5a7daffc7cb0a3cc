//! Parquet export of audit reports
//!
//! A report is flattened to one row per folder record, with the item's
//! aggregate columns repeated on each of its rows. A trailing metadata row
//! carries the scanned root and leaves every other column null.

use crate::models::{
    AuditReport, CategoryReport, FolderRecord, ItemId, ItemReport, ItemStatus, Report,
};
use arrow_array::{
    Array, ArrayRef, Float64Array, RecordBatch, StringArray, UInt32Array, UInt64Array,
};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Error, ErrorKind, Result};
use std::path::Path;
use std::sync::Arc;

/// File names never contain `/`, so it separates the `itens` list.
const ITEM_SEPARATOR: char = '/';

/// Return the Arrow schema shared by export writers and readers.
#[must_use]
pub fn export_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("category", DataType::Utf8, true),
        Field::new("item", DataType::Utf8, true),
        Field::new("status", DataType::Utf8, true),
        Field::new("soma_total", DataType::UInt64, true),
        Field::new("previsao_pastas", DataType::UInt32, true),
        Field::new("percentual_conclusao", DataType::Float64, true),
        Field::new("diretorio", DataType::Utf8, true),
        Field::new("qtd", DataType::UInt64, true),
        Field::new("itens", DataType::Utf8, true),
        Field::new("meta_scan_root", DataType::Utf8, true),
    ]))
}

struct FlatRow<'a> {
    category: &'a str,
    item: String,
    report: &'a ItemReport,
    record: &'a FolderRecord,
}

fn flatten(report: &Report) -> Vec<FlatRow<'_>> {
    report
        .iter_items()
        .flat_map(|(category, id, item)| {
            item.diretorios.iter().map(move |record| FlatRow {
                category,
                item: id.to_string(),
                report: item,
                record,
            })
        })
        .collect()
}

/// Write an audit report to a Parquet file.
pub fn write_report<P: AsRef<Path>>(path: P, audit: &AuditReport) -> Result<()> {
    let file_path = path.as_ref();

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(file_path)?;
    let schema = export_schema();
    let props = WriterProperties::builder().build();
    let mut writer =
        ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(Error::other)?;

    let rows = flatten(&audit.report);
    if !rows.is_empty() {
        let batch = create_rows_batch(&schema, &rows)?;
        writer.write(&batch).map_err(Error::other)?;
    }

    let metadata_batch = create_metadata_batch(&schema, &audit.root)?;
    writer.write(&metadata_batch).map_err(Error::other)?;

    writer.close().map_err(Error::other)?;
    log::debug!("Exported {} rows to {}", rows.len(), file_path.display());
    Ok(())
}

/// Read an audit report back from a Parquet file.
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<AuditReport> {
    let file = File::open(path.as_ref())?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

    let mut reader = builder
        .build()
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

    let mut root: Option<String> = None;
    let mut categories: Vec<CategoryReport> = Vec::new();

    for batch_result in &mut reader {
        let batch = batch_result.map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

        for row_idx in 0..batch.num_rows() {
            if let Some(scan_root) = get_string_value(&batch, "meta_scan_root", row_idx)? {
                root.get_or_insert(scan_root);
                continue;
            }

            let label = require(get_string_value(&batch, "category", row_idx)?, "category")?;
            let (id, item, record) = extract_row(&batch, row_idx)?;

            let items = match categories.iter().position(|c| c.label == label) {
                Some(idx) => &mut categories[idx].items,
                None => {
                    categories.push(CategoryReport {
                        label,
                        items: BTreeMap::new(),
                    });
                    &mut categories
                        .last_mut()
                        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "empty category list"))?
                        .items
                }
            };

            items.entry(id).or_insert(item).diretorios.push(record);
        }
    }

    let root = root.ok_or_else(|| Error::new(ErrorKind::InvalidData, "No metadata found"))?;

    Ok(AuditReport {
        root,
        report: Report { categories },
    })
}

fn create_rows_batch(schema: &Arc<Schema>, rows: &[FlatRow<'_>]) -> Result<RecordBatch> {
    let len = rows.len();

    let categories: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| Some(r.category)).collect::<Vec<_>>(),
    ));
    let items: ArrayRef = Arc::new(StringArray::from(
        rows.iter()
            .map(|r| Some(r.item.as_str()))
            .collect::<Vec<_>>(),
    ));
    let statuses: ArrayRef = Arc::new(StringArray::from(
        rows.iter()
            .map(|r| Some(r.report.status.as_str()))
            .collect::<Vec<_>>(),
    ));
    let totals: ArrayRef = Arc::new(UInt64Array::from(
        rows.iter()
            .map(|r| Some(r.report.soma_total))
            .collect::<Vec<_>>(),
    ));
    let expected: ArrayRef = Arc::new(UInt32Array::from(
        rows.iter()
            .map(|r| Some(r.report.previsao_pastas))
            .collect::<Vec<_>>(),
    ));
    let percentages: ArrayRef = Arc::new(Float64Array::from(
        rows.iter()
            .map(|r| Some(r.report.percentual_conclusao))
            .collect::<Vec<_>>(),
    ));
    let dirs: ArrayRef = Arc::new(StringArray::from(
        rows.iter()
            .map(|r| Some(r.record.diretorio.as_str()))
            .collect::<Vec<_>>(),
    ));
    let counts: ArrayRef = Arc::new(UInt64Array::from(
        rows.iter().map(|r| Some(r.record.qtd)).collect::<Vec<_>>(),
    ));
    let joined: Vec<String> = rows
        .iter()
        .map(|r| r.record.itens.join(&ITEM_SEPARATOR.to_string()))
        .collect();
    let file_lists: ArrayRef = Arc::new(StringArray::from(
        joined.iter().map(|s| Some(s.as_str())).collect::<Vec<_>>(),
    ));
    let meta_roots: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; len]));

    RecordBatch::try_new(
        schema.clone(),
        vec![
            categories,
            items,
            statuses,
            totals,
            expected,
            percentages,
            dirs,
            counts,
            file_lists,
            meta_roots,
        ],
    )
    .map_err(Error::other)
}

fn create_metadata_batch(schema: &Arc<Schema>, root: &str) -> Result<RecordBatch> {
    let categories: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let items: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let statuses: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let totals: ArrayRef = Arc::new(UInt64Array::from(vec![None::<u64>; 1]));
    let expected: ArrayRef = Arc::new(UInt32Array::from(vec![None::<u32>; 1]));
    let percentages: ArrayRef = Arc::new(Float64Array::from(vec![None::<f64>; 1]));
    let dirs: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let counts: ArrayRef = Arc::new(UInt64Array::from(vec![None::<u64>; 1]));
    let file_lists: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let meta_roots: ArrayRef = Arc::new(StringArray::from(vec![Some(root); 1]));

    RecordBatch::try_new(
        schema.clone(),
        vec![
            categories,
            items,
            statuses,
            totals,
            expected,
            percentages,
            dirs,
            counts,
            file_lists,
            meta_roots,
        ],
    )
    .map_err(Error::other)
}

fn require<T>(value: Option<T>, column: &str) -> Result<T> {
    value.ok_or_else(|| Error::new(ErrorKind::InvalidData, format!("Missing {column}")))
}

fn extract_row(batch: &RecordBatch, row: usize) -> Result<(ItemId, ItemReport, FolderRecord)> {
    let id: ItemId = require(get_string_value(batch, "item", row)?, "item")?
        .parse()
        .map_err(|e: String| Error::new(ErrorKind::InvalidData, e))?;
    let status_label = require(get_string_value(batch, "status", row)?, "status")?;
    let status = ItemStatus::from_label(&status_label).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Unknown status: {status_label}"),
        )
    })?;
    let soma_total = require(get_u64_value(batch, "soma_total", row)?, "soma_total")?;
    let previsao_pastas = require(
        get_u32_value(batch, "previsao_pastas", row)?,
        "previsao_pastas",
    )?;
    let percentual_conclusao = require(
        get_f64_value(batch, "percentual_conclusao", row)?,
        "percentual_conclusao",
    )?;

    let diretorio = require(get_string_value(batch, "diretorio", row)?, "diretorio")?;
    let qtd = require(get_u64_value(batch, "qtd", row)?, "qtd")?;
    let joined = require(get_string_value(batch, "itens", row)?, "itens")?;
    let itens = if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(ITEM_SEPARATOR).map(str::to_string).collect()
    };

    let item = ItemReport {
        status,
        soma_total,
        previsao_pastas,
        percentual_conclusao,
        diretorios: Vec::new(),
    };
    let record = FolderRecord {
        diretorio,
        qtd,
        itens,
    };

    Ok((id, item, record))
}

fn column<'a, A: Array + 'static>(batch: &'a RecordBatch, col_name: &str) -> Result<&'a A> {
    let col = batch.column_by_name(col_name).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Missing column: {col_name}"),
        )
    })?;

    col.as_any().downcast_ref::<A>().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Invalid type for: {col_name}"),
        )
    })
}

fn get_string_value(batch: &RecordBatch, col_name: &str, row: usize) -> Result<Option<String>> {
    let array = column::<StringArray>(batch, col_name)?;
    Ok((!array.is_null(row)).then(|| array.value(row).to_string()))
}

fn get_u32_value(batch: &RecordBatch, col_name: &str, row: usize) -> Result<Option<u32>> {
    let array = column::<UInt32Array>(batch, col_name)?;
    Ok((!array.is_null(row)).then(|| array.value(row)))
}

fn get_u64_value(batch: &RecordBatch, col_name: &str, row: usize) -> Result<Option<u64>> {
    let array = column::<UInt64Array>(batch, col_name)?;
    Ok((!array.is_null(row)).then(|| array.value(row)))
}

fn get_f64_value(batch: &RecordBatch, col_name: &str, row: usize) -> Result<Option<f64>> {
    let array = column::<Float64Array>(batch, col_name)?;
    Ok((!array.is_null(row)).then(|| array.value(row)))
}
