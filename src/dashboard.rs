use crate::charts::{build_all, ChartSpec};
use crate::filters::{apply, FilterSelection};
use crate::metrics::{summarize, KpiSummary};
use crate::types::ProjectRecord;
use serde::Serialize;

/// Everything one render needs, as plain data: the KPI values, the six chart
/// specs in dashboard order, and the unabridged rows of the Filtered View.
/// Computation ends here; rendering and transport are someone else's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPayload {
    pub metrics: KpiSummary,
    pub charts: Vec<ChartSpec>,
    pub rows: Vec<ProjectRecord>,
}

/// One full filter→aggregate→chart pass over the loaded table. Synchronous
/// and side-effect free; identical inputs produce an identical payload.
pub fn build_payload(data: &[ProjectRecord], sel: &FilterSelection) -> DashboardPayload {
    let view = apply(data, sel);
    let metrics = summarize(&view);
    let charts = build_all(&view);
    DashboardPayload {
        metrics,
        charts,
        rows: view,
    }
}
