use crate::types::ProjectRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Current state of the three filter controls: an inclusive date interval
/// plus the selected sector and status labels.
///
/// An empty `sectors` or `statuses` list means "nothing selected" and yields
/// an empty view; there is no implicit select-all fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sectors: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterSelection {
    /// Default selection: the table's full date span with every distinct
    /// sector and status selected. Matches the whole table by construction.
    pub fn full(data: &[ProjectRecord]) -> FilterSelection {
        let (start, end) = date_bounds(data).unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        FilterSelection {
            start,
            end,
            sectors: distinct_sectors(data),
            statuses: distinct_statuses(data),
        }
    }
}

/// Min and max dates present in the table; `None` when the table is empty.
/// These bound the date-range control.
pub fn date_bounds(data: &[ProjectRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let first = data.first()?.date;
    let (min, max) = data
        .iter()
        .fold((first, first), |(lo, hi), r| (lo.min(r.date), hi.max(r.date)));
    Some((min, max))
}

/// Distinct sector labels in first-appearance order. Always derived from the
/// full table so narrowing one filter never shrinks another filter's options.
pub fn distinct_sectors(data: &[ProjectRecord]) -> Vec<String> {
    distinct(data, |r| &r.client_sector)
}

/// Distinct status labels in first-appearance order, from the full table.
pub fn distinct_statuses(data: &[ProjectRecord]) -> Vec<String> {
    distinct(data, |r| &r.status)
}

fn distinct<F>(data: &[ProjectRecord], key: F) -> Vec<String>
where
    F: Fn(&ProjectRecord) -> &str,
{
    let mut out: Vec<String> = Vec::new();
    for r in data {
        let k = key(r);
        if !out.iter().any(|s| s == k) {
            out.push(k.to_string());
        }
    }
    out
}

/// Reduce the full table to the Filtered View: conjunction of the date
/// interval (inclusive, calendar-day granularity) and both label sets.
/// Recomputed in full on every call; row order of the source is preserved.
pub fn apply(data: &[ProjectRecord], sel: &FilterSelection) -> Vec<ProjectRecord> {
    data.iter()
        .filter(|r| r.date >= sel.start && r.date <= sel.end)
        .filter(|r| sel.sectors.iter().any(|s| *s == r.client_sector))
        .filter(|r| sel.statuses.iter().any(|s| *s == r.status))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, sector: &str, status: &str) -> ProjectRecord {
        ProjectRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            client_sector: sector.to_string(),
            status: status.to_string(),
            lead_source: "Referral".to_string(),
            project_name: format!("{} {}", sector, date),
            pet_bottles_diverted: 100.0,
            sale_price: 1000.0,
            profit: 250.0,
            nrc_rating: 0.8,
            square_footage: 400.0,
        }
    }

    fn sample() -> Vec<ProjectRecord> {
        vec![
            record("2024-01-10", "Education", "Completed"),
            record("2024-02-20", "Corporate", "Ongoing"),
            record("2024-03-05", "Education", "Ongoing"),
            record("2024-04-01", "Hospitality", "Completed"),
        ]
    }

    #[test]
    fn full_selection_matches_whole_table() {
        let data = sample();
        let view = apply(&data, &FilterSelection::full(&data));
        assert_eq!(view, data);
    }

    #[test]
    fn view_rows_satisfy_every_predicate() {
        let data = sample();
        let sel = FilterSelection {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            sectors: vec!["Education".to_string(), "Corporate".to_string()],
            statuses: vec!["Ongoing".to_string()],
        };
        let view = apply(&data, &sel);
        assert_eq!(view.len(), 2);
        for r in &view {
            assert!(r.date >= sel.start && r.date <= sel.end);
            assert!(sel.sectors.contains(&r.client_sector));
            assert!(sel.statuses.contains(&r.status));
        }
    }

    #[test]
    fn date_interval_is_inclusive() {
        let data = sample();
        let mut sel = FilterSelection::full(&data);
        sel.start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        sel.end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let view = apply(&data, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].client_sector, "Education");
    }

    #[test]
    fn empty_label_set_yields_empty_view() {
        let data = sample();
        let mut sel = FilterSelection::full(&data);
        sel.sectors.clear();
        assert!(apply(&data, &sel).is_empty());

        let mut sel = FilterSelection::full(&data);
        sel.statuses.clear();
        assert!(apply(&data, &sel).is_empty());
    }

    #[test]
    fn out_of_range_selection_matches_nothing() {
        let data = sample();
        let mut sel = FilterSelection::full(&data);
        sel.start = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        sel.end = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
        assert!(apply(&data, &sel).is_empty());
        sel.sectors = vec!["No Such Sector".to_string()];
        assert!(apply(&data, &sel).is_empty());
    }

    #[test]
    fn options_come_from_full_table_in_first_appearance_order() {
        let data = sample();
        assert_eq!(
            distinct_sectors(&data),
            vec!["Education", "Corporate", "Hospitality"]
        );
        assert_eq!(distinct_statuses(&data), vec!["Completed", "Ongoing"]);
        assert_eq!(
            date_bounds(&data),
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
            ))
        );
        assert_eq!(date_bounds(&[]), None);
    }
}
