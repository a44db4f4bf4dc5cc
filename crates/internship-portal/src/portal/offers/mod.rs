//! Offer discovery: catalog, category filters, and text search.

pub mod catalog;
pub mod domain;
pub mod filter;
pub mod router;

pub use catalog::OfferCatalog;
pub use domain::{filter_options, FilterOptionGroup, Offer, OfferCategory, OfferId};
pub use filter::{FilterError, OfferFilters};
pub use router::{offer_router, parse_search_params, OfferSearchResponse};
