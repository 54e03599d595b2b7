pub mod adapters;
pub mod normalizer;
pub mod paging;
pub mod retrieval;
pub mod scrape;
pub mod sources;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use normalizer::{normalize, RawLeadRecord, RawOrganization, RawPerson};
pub use retrieval::{HybridOptions, LeadRetriever, RetrievalSettings};
pub use scrape::ScrapeSource;
