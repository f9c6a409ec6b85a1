use crate::types::ProjectRecord;
use crate::util::mean;
use serde::Serialize;

/// The five KPI values shown in the card row. Pure function of the Filtered
/// View; an empty view resolves to zeros and a `None` average rather than
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_projects: usize,
    pub total_bottles: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// `None` when the view is empty; rendered as "N/A".
    pub avg_nrc: Option<f64>,
}

pub fn summarize(view: &[ProjectRecord]) -> KpiSummary {
    let nrc: Vec<f64> = view.iter().map(|r| r.nrc_rating).collect();
    KpiSummary {
        total_projects: view.len(),
        total_bottles: view.iter().map(|r| r.pet_bottles_diverted).sum(),
        total_revenue: view.iter().map(|r| r.sale_price).sum(),
        total_profit: view.iter().map(|r| r.profit).sum(),
        avg_nrc: mean(&nrc),
    }
}
