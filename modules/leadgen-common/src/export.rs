use chrono::{DateTime, Local};
use csv::Writer;
use tracing::debug;

use crate::error::LeadGenError;
use crate::types::Lead;

pub const CSV_HEADERS: [&str; 10] = [
    "Company",
    "Industry",
    "Location",
    "Website",
    "LinkedIn URL",
    "Contact",
    "Employees",
    "Priority",
    "Outreach Angle",
    "Last Updated",
];

/// Serialize leads to CSV bytes with a fixed 10-column header.
/// An empty lead list is rejected rather than producing a header-only file.
pub fn leads_to_csv(leads: &[Lead]) -> Result<Vec<u8>, LeadGenError> {
    if leads.is_empty() {
        return Err(LeadGenError::Export(
            "No leads provided for export".to_string(),
        ));
    }

    debug!("Exporting {} leads to CSV", leads.len());

    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS).map_err(csv_error)?;

    for lead in leads {
        let priority = lead.priority.to_string();
        wtr.write_record([
            lead.company.as_str(),
            lead.industry.as_str(),
            lead.location.as_str(),
            lead.website.as_deref().unwrap_or_default(),
            lead.linkedin_url.as_deref().unwrap_or_default(),
            lead.contact.as_str(),
            lead.employees.as_str(),
            priority.as_str(),
            lead.outreach_angle.as_str(),
            lead.last_updated.as_str(),
        ])
        .map_err(csv_error)?;
    }

    wtr.into_inner()
        .map_err(|e| LeadGenError::Export(format!("Failed to flush CSV: {e}")))
}

/// `leads_export_YYYYMMDD_HHMMSS.csv`
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("leads_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn csv_error(e: csv::Error) -> LeadGenError {
    LeadGenError::Export(format!("Failed to write CSV: {e}"))
}
