use chrono::NaiveDate;
use internship_portal::config::PortalConfig;
use internship_portal::error::AppError;
use internship_portal::portal::offers::OfferCategory;
use internship_portal::portal::{seed, ApplicationTracker, InMemoryApplicationRepository, OfferCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The two in-memory components shared by every route and command.
#[derive(Clone)]
pub(crate) struct Portal {
    pub(crate) tracker: Arc<ApplicationTracker<InMemoryApplicationRepository>>,
    pub(crate) catalog: Arc<OfferCatalog>,
}

impl Portal {
    pub(crate) fn load(config: &PortalConfig) -> Result<Self, AppError> {
        let (repository, catalog) = if config.seed_demo_data {
            (seed::seeded_repository()?, seed::standard_catalog())
        } else {
            (
                InMemoryApplicationRepository::default(),
                OfferCatalog::default(),
            )
        };

        info!(
            seeded = config.seed_demo_data,
            offers = catalog.len(),
            "portal state initialised"
        );

        Ok(Self {
            tracker: Arc::new(ApplicationTracker::new(Arc::new(repository))),
            catalog: Arc::new(catalog),
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parse a `category=value` command-line filter.
pub(crate) fn parse_filter(raw: &str) -> Result<(OfferCategory, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=VALUE, got '{raw}'"))?;
    let category = name
        .trim()
        .parse::<OfferCategory>()
        .map_err(|err| err.to_string())?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("filter '{raw}' has no value"));
    }
    Ok((category, value.to_string()))
}
