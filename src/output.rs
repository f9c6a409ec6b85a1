// Presentation shell: KPI card row, text rendering of chart specs, the
// detail table, and JSON export. Nothing in here transforms data; it only
// arranges values the pipeline already computed.
use crate::charts::ChartSpec;
use crate::metrics::KpiSummary;
use crate::types::{DetailRow, ProjectRecord};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table};

const BAR_WIDTH: usize = 40;

/// Print the five KPI cards as one row of labeled values.
pub fn render_kpis(k: &KpiSummary) {
    let avg_nrc = match k.avg_nrc {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    };
    println!(
        "Total Projects: {} | PET Bottles Diverted: {} | Total Revenue: ₹{} | Total Profit: ₹{} | Avg NRC Rating: {}",
        format_int(k.total_projects as i64),
        format_number(k.total_bottles, 0),
        format_number(k.total_revenue, 0),
        format_number(k.total_profit, 0),
        avg_nrc
    );
}

/// Render one chart spec as labeled horizontal bars. Bars are scaled against
/// the largest absolute value across all traces so grouped traces compare
/// visually. An empty spec prints a placeholder instead of erroring.
pub fn render_chart(spec: &ChartSpec) {
    println!("\n{}", spec.title);
    if spec.traces.iter().all(|t| t.values.is_empty()) {
        println!("  (no data)");
        return;
    }
    let max = spec
        .traces
        .iter()
        .flat_map(|t| t.values.iter())
        .fold(0.0f64, |m, v| m.max(v.abs()));
    // Small-magnitude series (NRC ratings) need decimals to be readable.
    let decimals = if max < 10.0 { 2 } else { 0 };
    for trace in &spec.traces {
        if spec.show_legend {
            if let Some(name) = &trace.name {
                println!("  [{}]", name);
            }
        }
        let label_width = trace
            .categories
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in trace.categories.iter().zip(&trace.values) {
            let bar_len = if max > 0.0 {
                ((value.abs() / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            println!(
                "  {:>width$}  {} {}",
                label,
                "█".repeat(bar_len),
                format_number(*value, decimals),
                width = label_width
            );
        }
    }
}

/// Print the unabridged detail table of the current Filtered View.
pub fn render_table(view: &[ProjectRecord]) {
    if view.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let rows: Vec<DetailRow> = view.iter().map(DetailRow::from_record).collect();
    let table_str = Table::new(rows).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Write any serializable value (in practice the dashboard payload) as
/// pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_payload;
    use crate::filters::FilterSelection;

    #[test]
    fn payload_json_round_trips_through_a_file() {
        let payload = build_payload(&[], &FilterSelection::full(&[]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        write_json(path.to_str().unwrap(), &payload).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["metrics"]["total_projects"], 0);
        assert_eq!(parsed["charts"].as_array().unwrap().len(), 6);
        assert!(parsed["rows"].as_array().unwrap().is_empty());
    }
}
