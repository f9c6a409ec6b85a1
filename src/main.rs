// Entry point and interactive dashboard flow.
//
// The terminal menu stands in for the reactive UI layer: it owns the current
// filter selection between renders and re-runs the whole
// load (cached) → filter → aggregate → chart → render pipeline after every
// change. Rendering reads only the payload the pipeline returned.
mod charts;
mod dashboard;
mod filters;
mod loader;
mod metrics;
mod output;
mod types;
mod util;

use chrono::NaiveDate;
use filters::FilterSelection;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use types::ProjectRecord;

const DATA_PATH: &str = "cleaned_project_data.csv";

// In-memory app state: the cached table handle plus the live filter
// selection. The table itself is never mutated after load.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        table: None,
        selection: None,
    })
});

struct AppState {
    table: Option<Arc<Vec<ProjectRecord>>>,
    selection: Option<FilterSelection>,
}

/// Read a single line of input after printing the common "Enter choice:"
/// prompt. Reused for the menus and the multi-select inputs.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_line_with_prompt(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask whether to go back to the menu after a render. `true` for `Y`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the CSV through the cache and reset the filter
/// selection to the full span.
fn handle_load() {
    loader::invalidate(DATA_PATH);
    match loader::load_cached(DATA_PATH) {
        Ok(table) => {
            println!(
                "Processing dataset... ({} rows loaded)\n",
                util::format_int(table.len() as i64)
            );
            let selection = FilterSelection::full(&table);
            let mut state = APP_STATE.lock().unwrap();
            state.table = Some(table);
            state.selection = Some(selection);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn current_state() -> Option<(Arc<Vec<ProjectRecord>>, FilterSelection)> {
    let state = APP_STATE.lock().unwrap();
    match (&state.table, &state.selection) {
        (Some(t), Some(s)) => Some((Arc::clone(t), s.clone())),
        _ => {
            println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
            None
        }
    }
}

/// Handle option [2]: the filter sub-menu. Option lists always come from the
/// full loaded table, so narrowing one control never hides another's choices.
fn handle_filters() {
    let Some((table, _)) = current_state() else {
        return;
    };
    loop {
        let sel = match APP_STATE.lock().unwrap().selection.clone() {
            Some(s) => s,
            None => return,
        };
        println!("Filters:");
        println!(
            "[1] Date range (currently {} to {})",
            sel.start.format("%Y-%m-%d"),
            sel.end.format("%Y-%m-%d")
        );
        println!("[2] Client sectors ({} selected)", sel.sectors.len());
        println!("[3] Project statuses ({} selected)", sel.statuses.len());
        println!("[4] Reset to full selection");
        println!("[5] Back\n");
        match read_choice().as_str() {
            "1" => {
                let updated = prompt_date_range(&table, sel.start, sel.end);
                if let Some((start, end)) = updated {
                    let mut state = APP_STATE.lock().unwrap();
                    if let Some(s) = state.selection.as_mut() {
                        s.start = start;
                        s.end = end;
                    }
                }
            }
            "2" => {
                let options = filters::distinct_sectors(&table);
                if let Some(chosen) = prompt_labels("client sectors", &options, &sel.sectors) {
                    let mut state = APP_STATE.lock().unwrap();
                    if let Some(s) = state.selection.as_mut() {
                        s.sectors = chosen;
                    }
                }
            }
            "3" => {
                let options = filters::distinct_statuses(&table);
                if let Some(chosen) = prompt_labels("project statuses", &options, &sel.statuses) {
                    let mut state = APP_STATE.lock().unwrap();
                    if let Some(s) = state.selection.as_mut() {
                        s.statuses = chosen;
                    }
                }
            }
            "4" => {
                let mut state = APP_STATE.lock().unwrap();
                state.selection = Some(FilterSelection::full(&table));
                println!("Selection reset.\n");
            }
            "5" => return,
            _ => println!("Invalid choice. Please enter 1-5.\n"),
        }
    }
}

/// Prompt for a new inclusive date interval. Blank input keeps the current
/// bound; a malformed date or an inverted interval leaves both unchanged.
fn prompt_date_range(
    table: &[ProjectRecord],
    cur_start: NaiveDate,
    cur_end: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    if let Some((min, max)) = filters::date_bounds(table) {
        println!(
            "Dates in the dataset span {} to {}.",
            min.format("%Y-%m-%d"),
            max.format("%Y-%m-%d")
        );
    }
    let start = match prompt_date("Start date", cur_start) {
        Some(d) => d,
        None => return None,
    };
    let end = match prompt_date("End date", cur_end) {
        Some(d) => d,
        None => return None,
    };
    if start > end {
        println!("Start date is after end date; keeping the current range.\n");
        return None;
    }
    Some((start, end))
}

fn prompt_date(label: &str, current: NaiveDate) -> Option<NaiveDate> {
    let input = read_line_with_prompt(&format!(
        "{} (YYYY-MM-DD) [{}]: ",
        label,
        current.format("%Y-%m-%d")
    ));
    if input.is_empty() {
        return Some(current);
    }
    match util::parse_date_safe(Some(&input)) {
        Some(d) => Some(d),
        None => {
            println!("Unrecognized date {:?}; keeping the current range.\n", input);
            None
        }
    }
}

/// Multi-select prompt over `options`. Returns the new selection in option
/// order, or `None` to keep the current one. An explicit 'none' yields an
/// empty selection (and therefore an empty dashboard), mirroring a cleared
/// multi-select control.
fn prompt_labels(kind: &str, options: &[String], current: &[String]) -> Option<Vec<String>> {
    println!("Available {}:", kind);
    for (i, opt) in options.iter().enumerate() {
        let mark = if current.contains(opt) { "*" } else { " " };
        println!("  [{}]{} {}", i + 1, mark, opt);
    }
    let input = read_line_with_prompt("Numbers (comma-separated), 'all', 'none', or blank to keep: ");
    if input.is_empty() {
        return None;
    }
    match input.to_lowercase().as_str() {
        "all" => return Some(options.to_vec()),
        "none" => return Some(Vec::new()),
        _ => {}
    }
    let mut chosen: Vec<String> = Vec::new();
    for token in input.split(',') {
        match token.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => {
                let label = &options[n - 1];
                if !chosen.contains(label) {
                    chosen.push(label.clone());
                }
            }
            _ => {
                println!("Ignoring invalid entry {:?}.", token.trim());
            }
        }
    }
    // Keep option-list order so repeated selections compare equal.
    let ordered: Vec<String> = options.iter().filter(|o| chosen.contains(o)).cloned().collect();
    Some(ordered)
}

/// Handle option [3]: run the pipeline and render every dashboard section in
/// the fixed order: KPI cards, six charts, detail table.
fn handle_render() {
    let Some((table, selection)) = current_state() else {
        return;
    };
    let payload = dashboard::build_payload(&table, &selection);

    println!("Echo Friendly Acoustics - Interactive Dashboard");
    println!(
        "(Filtered: {} to {}, {} of {} projects)\n",
        selection.start.format("%Y-%m-%d"),
        selection.end.format("%Y-%m-%d"),
        util::format_int(payload.metrics.total_projects as i64),
        util::format_int(table.len() as i64)
    );
    output::render_kpis(&payload.metrics);
    for chart in &payload.charts {
        output::render_chart(chart);
    }
    println!("\nProject Details");
    output::render_table(&payload.rows);
}

/// Handle option [4]: write the full dashboard payload as JSON.
fn handle_export() {
    let Some((table, selection)) = current_state() else {
        return;
    };
    let payload = dashboard::build_payload(&table, &selection);
    let path = read_line_with_prompt("Output path [dashboard_payload.json]: ");
    let path = if path.is_empty() {
        "dashboard_payload.json".to_string()
    } else {
        path
    };
    match output::write_json(&path, &payload) {
        Ok(()) => println!("Payload written to {}\n", path),
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

fn main() {
    loop {
        println!("Echo Friendly Acoustics Dashboard");
        println!("[1] Load the data file");
        println!("[2] Adjust filters");
        println!("[3] Render dashboard");
        println!("[4] Export dashboard payload (JSON)");
        println!("[5] Exit\n");
        match read_choice().as_str() {
            "1" => handle_load(),
            "2" => handle_filters(),
            "3" => {
                println!();
                handle_render();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "4" => handle_export(),
            "5" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-5.\n"),
        }
    }
}
