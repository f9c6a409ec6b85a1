use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Raw CSV row as exported by the project tracker. Every field is an
/// `Option<String>` so a ragged row still deserializes and the loader can
/// report exactly which value is bad instead of losing the row to serde.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Client Sector")]
    pub client_sector: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Lead Source")]
    pub lead_source: Option<String>,
    #[serde(rename = "Project Name")]
    pub project_name: Option<String>,
    #[serde(rename = "PET Bottles Diverted")]
    pub pet_bottles_diverted: Option<String>,
    #[serde(rename = "Sale Price (INR)")]
    pub sale_price: Option<String>,
    #[serde(rename = "Profit (INR)")]
    pub profit: Option<String>,
    #[serde(rename = "NRC Rating")]
    pub nrc_rating: Option<String>,
    #[serde(rename = "Square Footage Installed")]
    pub square_footage: Option<String>,
}

/// One acoustic-treatment project, fully typed. Records are immutable after
/// load; filtering, KPIs, and charts only ever borrow or clone them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub date: NaiveDate,
    pub client_sector: String,
    pub status: String,
    pub lead_source: String,
    pub project_name: String,
    pub pet_bottles_diverted: f64,
    pub sale_price: f64,
    pub profit: f64,
    pub nrc_rating: f64,
    pub square_footage: f64,
}

/// Row of the "Project Details" table at the bottom of the dashboard.
/// Values are pre-formatted strings so `tabled` prints them as displayed.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DetailRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Project Name")]
    #[tabled(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "Client Sector")]
    #[tabled(rename = "Client Sector")]
    pub client_sector: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
    #[serde(rename = "Lead Source")]
    #[tabled(rename = "Lead Source")]
    pub lead_source: String,
    #[serde(rename = "PET Bottles Diverted")]
    #[tabled(rename = "PET Bottles Diverted")]
    pub pet_bottles_diverted: String,
    #[serde(rename = "Sale Price (INR)")]
    #[tabled(rename = "Sale Price (INR)")]
    pub sale_price: String,
    #[serde(rename = "Profit (INR)")]
    #[tabled(rename = "Profit (INR)")]
    pub profit: String,
    #[serde(rename = "NRC Rating")]
    #[tabled(rename = "NRC Rating")]
    pub nrc_rating: String,
    #[serde(rename = "Square Footage Installed")]
    #[tabled(rename = "Square Footage Installed")]
    pub square_footage: String,
}

impl DetailRow {
    pub fn from_record(r: &ProjectRecord) -> Self {
        DetailRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            project_name: r.project_name.clone(),
            client_sector: r.client_sector.clone(),
            status: r.status.clone(),
            lead_source: r.lead_source.clone(),
            pet_bottles_diverted: crate::util::format_number(r.pet_bottles_diverted, 0),
            sale_price: crate::util::format_number(r.sale_price, 0),
            profit: crate::util::format_number(r.profit, 0),
            nrc_rating: format!("{:.2}", r.nrc_rating),
            square_footage: crate::util::format_number(r.square_footage, 0),
        }
    }
}
