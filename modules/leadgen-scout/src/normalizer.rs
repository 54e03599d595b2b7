// Lead normalization.
//
// Every source adapter produces a `RawLeadRecord`; this module is the only
// place a `Lead` is constructed. Normalization never fails: each missing
// field degrades to a sentinel.

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use leadgen_common::{
    Lead, Priority, CONTACT_NOT_AVAILABLE, NOT_AVAILABLE, UNKNOWN_COMPANY, UNKNOWN_EMPLOYEES,
};

/// Keyword → angle, matched case-insensitively as a substring of the
/// industry. First match wins, so order matters.
const OUTREACH_ANGLES: [(&str, &str); 6] = [
    ("technology", "Digital transformation solutions"),
    ("healthcare", "HIPAA-compliant solutions"),
    ("finance", "Regulatory compliance tools"),
    ("manufacturing", "Operational efficiency improvements"),
    ("retail", "Customer experience enhancement"),
    ("education", "Learning management solutions"),
];

pub const DEFAULT_OUTREACH_ANGLE: &str = "Business growth solutions";

/// Company-level fields in the shape every adapter agrees on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOrganization {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub estimated_num_employees: Option<u64>,
    pub primary_phone: Option<String>,
}

/// Best-known individual at the organization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPerson {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLeadRecord {
    pub organization: RawOrganization,
    pub person: RawPerson,
}

/// Normalize a record, stamping it with today's local date.
pub fn normalize(record: &RawLeadRecord) -> Lead {
    normalize_on(record, Local::now().date_naive())
}

pub fn normalize_on(record: &RawLeadRecord, today: NaiveDate) -> Lead {
    let org = &record.organization;

    let company = present(&org.name).unwrap_or(UNKNOWN_COMPANY).to_string();
    let industry = org.industry.clone().unwrap_or_default();

    let (employees, priority) = match org.estimated_num_employees {
        Some(count) if count > 0 => (count.to_string(), priority_for_employees(count)),
        _ => (UNKNOWN_EMPLOYEES.to_string(), Priority::Low),
    };

    Lead {
        id: Uuid::new_v4(),
        location: format_location(
            org.city.as_deref().unwrap_or_default(),
            org.region.as_deref().unwrap_or_default(),
        ),
        website: Some(sentinel_or(&org.website_url)),
        linkedin_url: Some(sentinel_or(&org.linkedin_url)),
        contact: resolve_contact(record),
        employees,
        priority,
        outreach_angle: outreach_angle_for_industry(&industry).to_string(),
        last_updated: today.format("%Y-%m-%d").to_string(),
        company,
        industry,
    }
}

pub fn priority_for_employees(count: u64) -> Priority {
    match count {
        0..=49 => Priority::Low,
        50..=199 => Priority::Medium,
        _ => Priority::High,
    }
}

pub fn outreach_angle_for_industry(industry: &str) -> &'static str {
    let industry = industry.to_lowercase();
    OUTREACH_ANGLES
        .iter()
        .find(|(keyword, _)| industry.contains(keyword))
        .map(|(_, angle)| *angle)
        .unwrap_or(DEFAULT_OUTREACH_ANGLE)
}

/// `"{city}, {region}"` with dangling separators stripped from either end.
pub fn format_location(city: &str, region: &str) -> String {
    format!("{city}, {region}")
        .trim_matches(|c| c == ',' || c == ' ')
        .to_string()
}

/// Phone, then name (with email), then the sentinel.
pub fn resolve_contact(record: &RawLeadRecord) -> String {
    if let Some(phone) = present(&record.organization.primary_phone) {
        return phone.to_string();
    }

    match (present(&record.person.name), present(&record.person.email)) {
        (Some(name), Some(email)) => format!("{name} ({email})"),
        (Some(name), None) => name.to_string(),
        _ => CONTACT_NOT_AVAILABLE.to_string(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn sentinel_or(value: &Option<String>) -> String {
    match present(value) {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
