pub mod applications;
pub mod offers;
pub mod seed;

pub use applications::{application_router, ApplicationTracker, InMemoryApplicationRepository};
pub use offers::{offer_router, OfferCatalog, OfferFilters};
