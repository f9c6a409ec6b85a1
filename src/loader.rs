use crate::types::{ProjectRecord, RawRow};
use crate::util::{parse_date_safe, parse_f64_safe};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Columns the dashboard cannot run without. A missing column is a load
/// failure, never a silently empty series.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Date",
    "Client Sector",
    "Status",
    "Lead Source",
    "Project Name",
    "PET Bottles Diverted",
    "Sale Price (INR)",
    "Profit (INR)",
    "NRC Rating",
    "Square Footage Installed",
];

// Loaded tables, memoized per source path. The table behind the Arc is
// read-only after first population, so handing clones of the Arc to
// concurrent renders is safe.
static TABLE_CACHE: Lazy<Mutex<HashMap<String, Arc<Vec<ProjectRecord>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Load the project table through the process-wide cache. The file is read
/// and parsed at most once per path; later calls return the cached table
/// until [`invalidate`] is called or the process restarts.
pub fn load_cached(path: &str) -> Result<Arc<Vec<ProjectRecord>>, Box<dyn Error>> {
    let mut cache = TABLE_CACHE.lock().unwrap();
    if let Some(table) = cache.get(path) {
        return Ok(Arc::clone(table));
    }
    let table = Arc::new(load_table(path)?);
    cache.insert(path.to_string(), Arc::clone(&table));
    Ok(table)
}

/// Drop the cached table for `path`, forcing the next [`load_cached`] to
/// re-read the file.
pub fn invalidate(path: &str) {
    TABLE_CACHE.lock().unwrap().remove(path);
}

/// Read and parse the CSV at `path`, bypassing the cache.
///
/// Fails loudly: a missing file, a missing required column, or a value that
/// does not parse all abort the load with a message naming the problem and
/// (for values) the offending line. No row is ever dropped on the quiet.
pub fn load_table(path: &str) -> Result<Vec<ProjectRecord>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("cannot open {}: {}", path, e))?;

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(format!("{}: missing required column(s): {}", path, missing.join(", ")).into());
    }

    let mut records: Vec<ProjectRecord> = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // Header occupies line 1; first data row is line 2.
        let line = idx + 2;
        let row = result.map_err(|e| format!("{} line {}: {}", path, line, e))?;

        let date = parse_date_safe(row.date.as_deref())
            .ok_or_else(|| bad_value(path, line, "Date", row.date.as_deref()))?;
        let pet_bottles_diverted = parse_f64_safe(row.pet_bottles_diverted.as_deref())
            .ok_or_else(|| {
                bad_value(path, line, "PET Bottles Diverted", row.pet_bottles_diverted.as_deref())
            })?;
        let sale_price = parse_f64_safe(row.sale_price.as_deref())
            .ok_or_else(|| bad_value(path, line, "Sale Price (INR)", row.sale_price.as_deref()))?;
        let profit = parse_f64_safe(row.profit.as_deref())
            .ok_or_else(|| bad_value(path, line, "Profit (INR)", row.profit.as_deref()))?;
        let nrc_rating = parse_f64_safe(row.nrc_rating.as_deref())
            .ok_or_else(|| bad_value(path, line, "NRC Rating", row.nrc_rating.as_deref()))?;
        let square_footage = parse_f64_safe(row.square_footage.as_deref()).ok_or_else(|| {
            bad_value(path, line, "Square Footage Installed", row.square_footage.as_deref())
        })?;

        let client_sector = label_or(row.client_sector, "Unknown");
        let status = label_or(row.status, "Unknown");
        let lead_source = label_or(row.lead_source, "Unknown");
        let project_name = label_or(row.project_name, "Unnamed Project");

        records.push(ProjectRecord {
            date,
            client_sector,
            status,
            lead_source,
            project_name,
            pet_bottles_diverted,
            sale_price,
            profit,
            nrc_rating,
            square_footage,
        });
    }

    Ok(records)
}

fn label_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn bad_value(path: &str, line: usize, column: &str, value: Option<&str>) -> Box<dyn Error> {
    format!(
        "{} line {}: column '{}' has unparseable value {:?}",
        path,
        line,
        column,
        value.unwrap_or("")
    )
    .into()
}
