//! Services - orchestration over the ports.

mod credentials;
mod ingestion;
mod search;

pub use credentials::CredentialStore;
pub use ingestion::{IngestError, PostIngestionService, PostReceipt, PostSubmission};
pub use search::{DEFAULT_RANGE_KM, ProximityQuery, ProximitySearchService};

#[cfg(test)]
mod tests;
