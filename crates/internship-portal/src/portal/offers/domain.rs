use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::applications::NewApplication;
use super::filter::FilterError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub String);

impl OfferId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Published internship position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub company: String,
    pub position: String,
    pub description: String,
    pub area: String,
    pub region: String,
    pub work_mode: String,
    pub duration: String,
    pub schedule: String,
    pub address: String,
    pub applicants: u32,
    pub requirements: Vec<String>,
}

impl Offer {
    pub fn category_value(&self, category: OfferCategory) -> &str {
        match category {
            OfferCategory::Area => &self.area,
            OfferCategory::Region => &self.region,
            OfferCategory::WorkMode => &self.work_mode,
            OfferCategory::Duration => &self.duration,
            OfferCategory::Schedule => &self.schedule,
        }
    }

    /// Case-insensitive substring match over position, company, and description.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        [&self.position, &self.company, &self.description]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl NewApplication {
    pub fn for_offer(offer: &Offer, applied_on: NaiveDate) -> Self {
        Self {
            company: offer.company.clone(),
            position: offer.position.clone(),
            applied_on,
        }
    }
}

/// Categorical attributes an offer can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferCategory {
    Area,
    Region,
    WorkMode,
    Duration,
    Schedule,
}

impl OfferCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Area,
            Self::Region,
            Self::WorkMode,
            Self::Duration,
            Self::Schedule,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Region => "region",
            Self::WorkMode => "work_mode",
            Self::Duration => "duration",
            Self::Schedule => "schedule",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::Region => "Region",
            Self::WorkMode => "Work Mode",
            Self::Duration => "Duration",
            Self::Schedule => "Schedule",
        }
    }

    /// Values the portal offers as checkboxes for this category.
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Area => &[
                "Desarrollo Web",
                "Data Science",
                "Ciberseguridad",
                "Bases de datos",
                "Machine Learning",
                "Desarrollo Mobile",
                "Cloud Computing",
                "Inteligencia Artificial",
            ],
            Self::Region => &[
                "Región Metropolitana",
                "Región de Valparaíso",
                "Región del Biobío",
                "Región de la Araucanía",
            ],
            Self::WorkMode => &["Presencial", "Online", "Híbrido"],
            Self::Duration => &["3 meses", "4 meses", "5 meses", "6 meses"],
            Self::Schedule => &["8:00-17:00", "9:00-18:00", "10:00-19:00", "Flexible"],
        }
    }
}

impl fmt::Display for OfferCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OfferCategory {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "area" => Ok(Self::Area),
            "region" => Ok(Self::Region),
            "work_mode" | "workmode" | "modalidad" => Ok(Self::WorkMode),
            "duration" | "duracion" | "duración" => Ok(Self::Duration),
            "schedule" | "horario" => Ok(Self::Schedule),
            _ => Err(FilterError::UnknownCategory(s.to_string())),
        }
    }
}

/// Checkbox group rendered by the offer search form.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptionGroup {
    pub category: OfferCategory,
    pub label: &'static str,
    pub values: &'static [&'static str],
}

pub fn filter_options() -> Vec<FilterOptionGroup> {
    OfferCategory::ordered()
        .into_iter()
        .map(|category| FilterOptionGroup {
            category,
            label: category.label(),
            values: category.options(),
        })
        .collect()
}
