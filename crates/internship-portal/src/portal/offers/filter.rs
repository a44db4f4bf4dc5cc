use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{Offer, OfferCategory};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter category '{0}'")]
    UnknownCategory(String),
}

/// Selected values per category.
///
/// A category with no selected values imposes no constraint. Selected
/// categories are combined with AND; values within one category with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfferFilters {
    selected: BTreeMap<OfferCategory, BTreeSet<String>>,
}

impl OfferFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `(category name, value)` pairs, rejecting unknown category names.
    pub fn from_named<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filters = Self::default();
        for (name, value) in pairs {
            let category = name.as_ref().parse::<OfferCategory>()?;
            filters.select(category, value);
        }
        Ok(filters)
    }

    pub fn select(&mut self, category: OfferCategory, value: impl Into<String>) {
        self.selected
            .entry(category)
            .or_default()
            .insert(value.into());
    }

    pub fn deselect(&mut self, category: OfferCategory, value: &str) {
        if let Some(values) = self.selected.get_mut(&category) {
            values.remove(value);
            if values.is_empty() {
                self.selected.remove(&category);
            }
        }
    }

    /// Mirror a checkbox change.
    pub fn toggle(&mut self, category: OfferCategory, value: &str, checked: bool) {
        if checked {
            self.select(category, value);
        } else {
            self.deselect(category, value);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.values().all(BTreeSet::is_empty)
    }

    pub fn values(&self, category: OfferCategory) -> Option<&BTreeSet<String>> {
        self.selected.get(&category)
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        self.selected.iter().all(|(category, values)| {
            values.is_empty() || values.contains(offer.category_value(*category))
        })
    }
}
