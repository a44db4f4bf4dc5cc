use tracing::debug;

use super::domain::{Offer, OfferId};
use super::filter::OfferFilters;

/// Read-only collection of open positions in publication order.
#[derive(Debug, Clone, Default)]
pub struct OfferCatalog {
    offers: Vec<Offer>,
}

impl OfferCatalog {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn get(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.iter().find(|offer| &offer.id == id)
    }

    /// Offers matching the text query and every selected category, in catalog order.
    ///
    /// An empty query matches everything; the query is not trimmed.
    pub fn search(&self, query: &str, filters: &OfferFilters) -> Vec<&Offer> {
        let needle = query.to_lowercase();
        let results: Vec<&Offer> = self
            .offers
            .iter()
            .filter(|offer| needle.is_empty() || offer.mentions(&needle))
            .filter(|offer| filters.matches(offer))
            .collect();

        debug!(
            query,
            matched = results.len(),
            total = self.offers.len(),
            "offer search evaluated"
        );
        results
    }
}
