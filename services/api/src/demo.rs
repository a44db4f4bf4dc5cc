use crate::console::{decline_acknowledged, render_applications, render_dashboard, render_offers};
use crate::infra::Portal;
use chrono::NaiveDate;
use internship_portal::config::PortalConfig;
use internship_portal::error::AppError;
use internship_portal::portal::applications::{
    ApplicationId, ApplicationQuery, ApplicationStatus, NewApplication, SortKey, SortOrder,
};
use internship_portal::portal::offers::{OfferCategory, OfferFilters, OfferId};

/// Walk the seeded portal through a typical student session.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let portal = Portal::load(&PortalConfig {
        seed_demo_data: true,
    })?;

    println!("Internship portal demo");
    render_dashboard(&portal.tracker.status_counts()?);

    println!("\nAll applications, newest first");
    render_applications(&portal.tracker.list(&ApplicationQuery::default())?);

    println!("\nAccepted applications by response date");
    let accepted = ApplicationQuery {
        status: Some(ApplicationStatus::Accepted),
        sort_key: SortKey::ResponseDate,
        sort_order: SortOrder::Descending,
    };
    render_applications(&portal.tracker.list(&accepted)?);

    println!("\nConfirming application 1");
    let confirmed = portal.tracker.confirm(&ApplicationId::new("1"))?;
    render_applications(std::slice::from_ref(&confirmed));

    println!("\nTrying to confirm application 4 before the company answers");
    match portal.tracker.confirm(&ApplicationId::new("4")) {
        Ok(application) => render_applications(std::slice::from_ref(&application)),
        Err(err) => println!("  refused: {err}"),
    }

    println!("\nDeclining application 2 without acknowledgement");
    if let Err(err) = decline_acknowledged(&portal, "2", false) {
        println!("  refused: {err}");
    }
    println!("Declining application 2 with acknowledgement");
    let declined = decline_acknowledged(&portal, "2", true)?;
    render_applications(std::slice::from_ref(&declined));

    println!("\nOffers mentioning \"data\"");
    render_offers(
        &portal.catalog.search("data", &OfferFilters::new()),
        portal.catalog.len(),
    );

    println!("\nHybrid offers in the Metropolitan region");
    let mut filters = OfferFilters::new();
    filters.select(OfferCategory::WorkMode, "Híbrido");
    filters.select(OfferCategory::Region, "Región Metropolitana");
    render_offers(&portal.catalog.search("", &filters), portal.catalog.len());

    let offer_id = OfferId::new("6");
    if let Some(offer) = portal.catalog.get(&offer_id) {
        let applied_on = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default();
        println!("\nApplying to offer {offer_id}");
        let application = portal
            .tracker
            .submit(NewApplication::for_offer(offer, applied_on))?;
        render_applications(std::slice::from_ref(&application));
    }

    println!();
    render_dashboard(&portal.tracker.status_counts()?);
    Ok(())
}
