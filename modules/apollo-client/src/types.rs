use serde::{Deserialize, Serialize};

/// Employee-count buckets sent with every organization search so Apollo
/// returns companies of all sizes.
pub const EMPLOYEE_RANGES: [&str; 8] = [
    "1,10", "11,50", "51,200", "201,500", "501,1000", "1001,5000", "5001,10000", "10001+",
];

// --- Request ---

/// Body for `POST /organizations/search`.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationSearch {
    pub q_organization_keywords: String,
    pub organization_locations: Vec<String>,
    pub page: u32,
    pub per_page: u32,
    pub organization_num_employees_ranges: Vec<String>,
}

impl OrganizationSearch {
    /// Build a search for `industry` around `location`.
    ///
    /// The location is split on `", "`: `"Austin, TX, USA"` searches
    /// `"Austin, TX"`, a bare `"Austin"` searches `"Austin"`.
    pub fn new(industry: &str, location: &str, page: u32, per_page: u32) -> Self {
        let mut parts = location.split(", ");
        let city = parts.next().unwrap_or(location);
        let region = parts.next().unwrap_or("");

        let organization_locations = if region.is_empty() {
            vec![city.to_string()]
        } else {
            vec![format!("{city}, {region}")]
        };

        Self {
            q_organization_keywords: industry.to_string(),
            organization_locations,
            page,
            per_page,
            organization_num_employees_ranges: EMPLOYEE_RANGES
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

// --- Response ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryPhone {
    #[serde(default)]
    pub number: Option<String>,
}

/// An organization record as returned by Apollo. Every field is optional;
/// Apollo omits or nulls fields freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub estimated_num_employees: Option<u64>,
    #[serde(default)]
    pub primary_phone: Option<PrimaryPhone>,
}

/// A person attached to an organization via `organization_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub people: Vec<Person>,
}
