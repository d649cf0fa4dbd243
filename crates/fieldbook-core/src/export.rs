//! Import and export at the file boundary.
//!
//! Two transportable formats: a JSON mirror of the full data set
//! (lossless, re-importable) and a CSV table of the work collection for
//! spreadsheet use. Exported files follow the `<prefix>_<date>.<ext>`
//! naming convention; same-day collisions overwrite at the OS level and
//! are not handled here.

use chrono::NaiveDate;

use crate::error::{FieldbookError, Result};
use crate::model::{AppData, WorkEntry};

/// CSV header for the work table.
const TABLE_HEADER: [&str; 10] = [
    "client",
    "date",
    "service",
    "location",
    "hours",
    "price",
    "amount",
    "payment_status",
    "phone",
    "notes",
];

/// Render the full data set as pretty-printed JSON, the external file
/// format. `import_json` accepts exactly this shape.
pub fn export_json(data: &AppData) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| FieldbookError::Persistence(format!("Serialize failed: {}", e)))
}

/// Parse an external JSON file into a data set.
///
/// The payload must carry array-typed top-level `work` and `expenses`
/// keys; anything else is rejected before any state is touched.
///
/// # Errors
///
/// Returns `FieldbookError::InvalidFormat` on unreadable JSON, a missing
/// or non-array collection, or entries that fail to parse.
pub fn import_json(raw: &str) -> Result<AppData> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| FieldbookError::InvalidFormat(format!("Unreadable JSON: {}", e)))?;

    let work_ok = value.get("work").map(|v| v.is_array()).unwrap_or(false);
    let expenses_ok = value.get("expenses").map(|v| v.is_array()).unwrap_or(false);
    if !work_ok || !expenses_ok {
        return Err(FieldbookError::InvalidFormat(
            "Expected top-level work and expenses arrays".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| FieldbookError::InvalidFormat(format!("Malformed entry: {}", e)))
}

/// Render the work collection as a CSV table, one quoted row per entry,
/// with the billed amount computed into its own column.
///
/// # Errors
///
/// Returns `FieldbookError::NoData` when the collection is empty; an
/// empty table export is meaningless, and the guard is deliberate.
pub fn export_table(work: &[WorkEntry]) -> Result<String> {
    if work.is_empty() {
        return Err(FieldbookError::NoData);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(TABLE_HEADER)
        .map_err(|e| FieldbookError::Persistence(format!("CSV write failed: {}", e)))?;

    for entry in work {
        let date = entry.date.to_string();
        let hours = entry.hours.to_string();
        let price = entry.price.to_string();
        let amount = entry.amount().to_string();
        writer
            .write_record([
                entry.name.as_str(),
                date.as_str(),
                entry.service.as_str(),
                entry.location.as_deref().unwrap_or(""),
                hours.as_str(),
                price.as_str(),
                amount.as_str(),
                entry.pay_status.as_str(),
                entry.phone.as_deref().unwrap_or(""),
                entry.notes.as_deref().unwrap_or(""),
            ])
            .map_err(|e| FieldbookError::Persistence(format!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FieldbookError::Persistence(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| FieldbookError::Persistence(format!("CSV encoding failed: {}", e)))
}

/// Date-stamped export file name: `<prefix>_<YYYY-MM-DD>.<ext>`.
pub fn export_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", prefix, date, extension)
}
