// Source adapters: each converts one source's raw shape into a
// `RawLeadRecord` for the normalizer.

use std::collections::HashMap;

use apollo_client::{Organization, Person, SearchResponse};
use leadgen_common::{Lead, NOT_AVAILABLE};

use crate::normalizer::{RawLeadRecord, RawOrganization, RawPerson};
use crate::sources::{DirectoryRow, ListingRow};

// --- Structured source ---

/// One record per organization, in source order. The primary contact is the
/// first person whose `organization_id` points at the organization.
pub fn structured_records(response: &SearchResponse) -> Vec<RawLeadRecord> {
    let people_by_org = index_people(&response.people);

    response
        .organizations
        .iter()
        .map(|org| {
            let person = org
                .id
                .as_deref()
                .and_then(|id| people_by_org.get(id))
                .and_then(|people| people.first())
                .map(|p| RawPerson {
                    name: p.name.clone(),
                    email: p.email.clone(),
                })
                .unwrap_or_default();

            RawLeadRecord {
                organization: structured_organization(org),
                person,
            }
        })
        .collect()
}

fn index_people(people: &[Person]) -> HashMap<&str, Vec<&Person>> {
    let mut index: HashMap<&str, Vec<&Person>> = HashMap::new();
    for person in people {
        if let Some(org_id) = person.organization_id.as_deref() {
            index.entry(org_id).or_default().push(person);
        }
    }
    index
}

fn structured_organization(org: &Organization) -> RawOrganization {
    RawOrganization {
        name: org.name.clone(),
        industry: org.industry.clone(),
        city: org.city.clone(),
        region: org.state.clone(),
        website_url: org.website_url.clone(),
        linkedin_url: org.linkedin_url.clone(),
        estimated_num_employees: org.estimated_num_employees,
        primary_phone: org.primary_phone.as_ref().and_then(|p| p.number.clone()),
    }
}

// --- Directory source ---

/// Directory rows carry no person data; the phone is applied after
/// normalization by [`apply_directory_phone`].
pub fn directory_record(row: &DirectoryRow) -> RawLeadRecord {
    let (city, region) = split_location(&row.location);
    RawLeadRecord {
        organization: RawOrganization {
            name: scraped(&row.company),
            industry: Some(row.industry.clone()),
            city: Some(city),
            region: Some(region),
            website_url: scraped(&row.website),
            ..Default::default()
        },
        person: RawPerson::default(),
    }
}

/// Overwrite the lead's contact with the scraped phone, unless the scraper
/// found none.
pub fn apply_directory_phone(lead: &mut Lead, row: &DirectoryRow) {
    if row.contact_phone != NOT_AVAILABLE {
        lead.contact = format!("Phone: {}", row.contact_phone);
    }
}

// --- Listing source ---

pub fn listing_record(row: &ListingRow) -> RawLeadRecord {
    let (city, region) = split_location(&row.location);
    RawLeadRecord {
        organization: RawOrganization {
            name: scraped(&row.company),
            industry: Some(row.industry.clone()),
            city: Some(city),
            region: Some(region),
            website_url: scraped(&row.website),
            linkedin_url: scraped(&row.linkedin_url),
            ..Default::default()
        },
        person: RawPerson::default(),
    }
}

/// First comma segment is the city, the second is the region. Anything past
/// the second comma is dropped.
pub fn split_location(location: &str) -> (String, String) {
    let mut parts = location.split(',');
    let city = parts.next().unwrap_or_default().trim().to_string();
    let region = parts.next().unwrap_or_default().trim().to_string();
    (city, region)
}

fn scraped(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == NOT_AVAILABLE {
        None
    } else {
        Some(value.to_string())
    }
}
