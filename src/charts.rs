// The six dashboard charts. Each builder is a stateless transform of the
// Filtered View into a `ChartSpec`: a renderer-agnostic description of a
// horizontal bar figure (trace arrays, colors, layout knobs). Builders never
// fail; an empty view produces an empty-but-valid spec.
use crate::types::ProjectRecord;
use serde::Serialize;
use std::cmp::Ordering;

pub const PRIMARY: &str = "#667eea";
pub const SECONDARY: &str = "#764ba2";

/// One bar series: parallel category/value arrays plus a fill color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    /// Legend label; `None` for single-trace charts with the legend hidden.
    pub name: Option<String>,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Single,
    Group,
}

/// Complete specification of one horizontal bar chart, ready to hand to a
/// rendering layer. Categories run along the y axis, values along x.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub orientation: char,
    pub bar_mode: BarMode,
    pub height: u32,
    pub show_legend: bool,
    pub traces: Vec<BarTrace>,
}

/// All six charts in their fixed dashboard order.
pub fn build_all(view: &[ProjectRecord]) -> Vec<ChartSpec> {
    vec![
        revenue_vs_profit_by_project(view),
        revenue_by_sector(view),
        bottles_by_sector(view),
        nrc_by_project(view),
        revenue_by_lead_source(view),
        square_footage_by_project(view),
    ]
}

/// Chart 1: per-project revenue and profit side by side, ordered by revenue.
pub fn revenue_vs_profit_by_project(view: &[ProjectRecord]) -> ChartSpec {
    let ordered = sorted_by(view, |r| r.sale_price);
    let categories: Vec<String> = ordered.iter().map(|r| r.project_name.clone()).collect();
    ChartSpec {
        title: "Revenue vs Profit by Project".to_string(),
        orientation: 'h',
        bar_mode: BarMode::Group,
        height: 400,
        show_legend: true,
        traces: vec![
            BarTrace {
                name: Some("Revenue".to_string()),
                categories: categories.clone(),
                values: ordered.iter().map(|r| r.sale_price).collect(),
                color: PRIMARY.to_string(),
            },
            BarTrace {
                name: Some("Profit".to_string()),
                categories,
                values: ordered.iter().map(|r| r.profit).collect(),
                color: SECONDARY.to_string(),
            },
        ],
    }
}

/// Chart 2: revenue summed per client sector.
pub fn revenue_by_sector(view: &[ProjectRecord]) -> ChartSpec {
    grouped_chart(
        "Revenue by Client Sector",
        view,
        |r| &r.client_sector,
        |r| r.sale_price,
        PRIMARY,
    )
}

/// Chart 3: PET bottles diverted summed per client sector.
pub fn bottles_by_sector(view: &[ProjectRecord]) -> ChartSpec {
    grouped_chart(
        "PET Bottles Diverted by Sector",
        view,
        |r| &r.client_sector,
        |r| r.pet_bottles_diverted,
        SECONDARY,
    )
}

/// Chart 4: per-project NRC rating, lowest first.
pub fn nrc_by_project(view: &[ProjectRecord]) -> ChartSpec {
    per_record_chart("NRC Performance Ratings", view, |r| r.nrc_rating, PRIMARY, 400)
}

/// Chart 5: revenue summed per lead source.
pub fn revenue_by_lead_source(view: &[ProjectRecord]) -> ChartSpec {
    grouped_chart(
        "Revenue by Lead Source",
        view,
        |r| &r.lead_source,
        |r| r.sale_price,
        SECONDARY,
    )
}

/// Chart 6: per-project installed square footage.
pub fn square_footage_by_project(view: &[ProjectRecord]) -> ChartSpec {
    per_record_chart(
        "Square Footage Installed",
        view,
        |r| r.square_footage,
        PRIMARY,
        400,
    )
}

// Stable ascending sort of the view by one numeric field. `sort_by` is
// stable, so equal values keep their original row order and chart output is
// deterministic.
fn sorted_by<F>(view: &[ProjectRecord], key: F) -> Vec<&ProjectRecord>
where
    F: Fn(&ProjectRecord) -> f64,
{
    let mut refs: Vec<&ProjectRecord> = view.iter().collect();
    refs.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    refs
}

fn per_record_chart<F>(
    title: &str,
    view: &[ProjectRecord],
    value: F,
    color: &str,
    height: u32,
) -> ChartSpec
where
    F: Fn(&ProjectRecord) -> f64,
{
    let ordered = sorted_by(view, &value);
    ChartSpec {
        title: title.to_string(),
        orientation: 'h',
        bar_mode: BarMode::Single,
        height,
        show_legend: false,
        traces: vec![BarTrace {
            name: None,
            categories: ordered.iter().map(|r| r.project_name.clone()).collect(),
            values: ordered.iter().map(|r| value(r)).collect(),
            color: color.to_string(),
        }],
    }
}

// Group-by-sum in first-appearance order, then a stable ascending sort by
// total. First-appearance accumulation keeps ties deterministic.
fn group_sum<K, V>(view: &[ProjectRecord], key: K, value: V) -> Vec<(String, f64)>
where
    K: Fn(&ProjectRecord) -> &str,
    V: Fn(&ProjectRecord) -> f64,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    for r in view {
        let k = key(r);
        match groups.iter_mut().find(|(g, _)| g == k) {
            Some((_, total)) => *total += value(r),
            None => groups.push((k.to_string(), value(r))),
        }
    }
    groups.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    groups
}

fn grouped_chart<K, V>(
    title: &str,
    view: &[ProjectRecord],
    key: K,
    value: V,
    color: &str,
) -> ChartSpec
where
    K: Fn(&ProjectRecord) -> &str,
    V: Fn(&ProjectRecord) -> f64,
{
    let groups = group_sum(view, key, value);
    ChartSpec {
        title: title.to_string(),
        orientation: 'h',
        bar_mode: BarMode::Single,
        height: 350,
        show_legend: false,
        traces: vec![BarTrace {
            name: None,
            categories: groups.iter().map(|(g, _)| g.clone()).collect(),
            values: groups.iter().map(|(_, v)| *v).collect(),
            color: color.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, sector: &str, lead: &str, price: f64, profit: f64) -> ProjectRecord {
        ProjectRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            client_sector: sector.to_string(),
            status: "Completed".to_string(),
            lead_source: lead.to_string(),
            project_name: name.to_string(),
            pet_bottles_diverted: price / 10.0,
            sale_price: price,
            profit,
            nrc_rating: 0.75,
            square_footage: 500.0,
        }
    }

    #[test]
    fn sector_revenue_groups_and_sorts_ascending() {
        // {A, B, A} with prices {100, 200, 300}: A sums to 400, B to 200.
        let view = vec![
            record("p1", "A", "Referral", 100.0, 10.0),
            record("p2", "B", "Referral", 200.0, 20.0),
            record("p3", "A", "Referral", 300.0, 30.0),
        ];
        let spec = revenue_by_sector(&view);
        assert_eq!(spec.traces.len(), 1);
        assert_eq!(spec.traces[0].categories, vec!["B", "A"]);
        assert_eq!(spec.traces[0].values, vec![200.0, 400.0]);
    }

    #[test]
    fn equal_totals_keep_first_appearance_order() {
        let view = vec![
            record("p1", "Zeta", "Referral", 150.0, 10.0),
            record("p2", "Alpha", "Referral", 150.0, 10.0),
            record("p3", "Mid", "Referral", 50.0, 5.0),
        ];
        let spec = revenue_by_sector(&view);
        assert_eq!(spec.traces[0].categories, vec!["Mid", "Zeta", "Alpha"]);
    }

    #[test]
    fn per_record_order_is_non_decreasing() {
        let view = vec![
            record("big", "A", "Referral", 900.0, 90.0),
            record("small", "A", "Referral", 100.0, 10.0),
            record("mid", "A", "Referral", 500.0, 50.0),
        ];
        let spec = revenue_vs_profit_by_project(&view);
        assert_eq!(spec.traces[0].categories, vec!["small", "mid", "big"]);
        let values = &spec.traces[0].values;
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        // Profit trace follows the revenue ordering, not its own.
        assert_eq!(spec.traces[1].values, vec![10.0, 50.0, 90.0]);
    }

    #[test]
    fn chart_one_carries_two_named_traces() {
        let view = vec![record("p", "A", "Referral", 100.0, 25.0)];
        let spec = revenue_vs_profit_by_project(&view);
        assert_eq!(spec.bar_mode, BarMode::Group);
        assert!(spec.show_legend);
        assert_eq!(spec.traces[0].name.as_deref(), Some("Revenue"));
        assert_eq!(spec.traces[1].name.as_deref(), Some("Profit"));
        assert_eq!(spec.traces[0].color, PRIMARY);
        assert_eq!(spec.traces[1].color, SECONDARY);
    }

    #[test]
    fn empty_view_yields_empty_but_valid_specs() {
        let specs = build_all(&[]);
        assert_eq!(specs.len(), 6);
        for spec in &specs {
            assert!(!spec.traces.is_empty());
            for trace in &spec.traces {
                assert!(trace.categories.is_empty());
                assert!(trace.values.is_empty());
            }
            assert_eq!(spec.orientation, 'h');
        }
    }

    #[test]
    fn fixed_chart_order_and_titles() {
        let titles: Vec<String> = build_all(&[]).into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Revenue vs Profit by Project",
                "Revenue by Client Sector",
                "PET Bottles Diverted by Sector",
                "NRC Performance Ratings",
                "Revenue by Lead Source",
                "Square Footage Installed",
            ]
        );
    }
}
