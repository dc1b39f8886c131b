//! Business logic services.
//!
//! Services sit between the storage layer and the user-facing surfaces:
//! startup ([`bootstrap`]), the write-through [`RecordStore`], title search
//! ([`filter`]), the [`SeedLoader`], and the [`InteractionController`] state
//! machine that ties them together.

mod bootstrap;
mod controller;
mod filter;
mod seed;
mod store;

pub use bootstrap::{InitOutcome, bootstrap};
pub use controller::{
    ADD_HEADING, Draft, EDIT_HEADING, InteractionController, Mode, PendingDelete, status_for,
};
pub use filter::{SearchQuery, filter};
pub use seed::{
    FileSeedSource, HttpSeedSource, SeedHttpConfig, SeedLoader, SeedSource, StaticSeedSource,
    build_http_client, parse_seed_document, source_for_location,
};
pub use store::RecordStore;
