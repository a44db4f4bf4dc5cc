use crate::infra::{parse_filter, Portal};
use clap::Args;
use internship_portal::config::AppConfig;
use internship_portal::error::AppError;
use internship_portal::portal::applications::{
    Application, ApplicationAction, ApplicationId, ApplicationQuery, StatusCount,
};
use internship_portal::portal::offers::{filter_options, Offer, OfferCategory, OfferFilters};

#[derive(Args, Debug, Default)]
pub(crate) struct ApplicationListArgs {
    /// Only show one status (awaiting, accepted, rejected, confirmed, declined or all)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Field to order by: application_date or response_date
    #[arg(long)]
    pub(crate) sort_by: Option<String>,
    /// Sort direction: asc or desc
    #[arg(long)]
    pub(crate) order: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OfferSearchArgs {
    /// Case-insensitive text matched against position, company and description
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Category filter as CATEGORY=VALUE; repeat to combine
    #[arg(long, value_parser = parse_filter)]
    pub(crate) filter: Vec<(OfferCategory, String)>,
}

fn load_portal() -> Result<Portal, AppError> {
    let config = AppConfig::load()?;
    Portal::load(&config.portal)
}

pub(crate) fn list_applications(args: ApplicationListArgs) -> Result<(), AppError> {
    let portal = load_portal()?;
    let query = ApplicationQuery::parse(
        args.status.as_deref(),
        args.sort_by.as_deref(),
        args.order.as_deref(),
    )?;
    let applications = portal.tracker.list(&query)?;

    println!(
        "Applications by {} ({})",
        query.sort_key.label(),
        query.sort_order.label()
    );
    render_applications(&applications);
    Ok(())
}

pub(crate) fn confirm_application(id: &str) -> Result<(), AppError> {
    let portal = load_portal()?;
    let application = portal.tracker.confirm(&ApplicationId::new(id))?;
    println!("Internship confirmed");
    render_applications(std::slice::from_ref(&application));
    Ok(())
}

pub(crate) fn decline_application(id: &str, acknowledged: bool) -> Result<(), AppError> {
    let portal = load_portal()?;
    let application = decline_acknowledged(&portal, id, acknowledged)?;
    println!("Internship declined");
    render_applications(std::slice::from_ref(&application));
    Ok(())
}

/// Decline only once the user has explicitly accepted that it cannot be undone.
pub(crate) fn decline_acknowledged(
    portal: &Portal,
    id: &str,
    acknowledged: bool,
) -> Result<Application, AppError> {
    ApplicationAction::Decline
        .check_acknowledged(acknowledged)
        .map_err(|error| {
            AppError::Unconfirmed(format!("application {id}: {error}; rerun with --yes"))
        })?;
    Ok(portal.tracker.decline(&ApplicationId::new(id))?)
}

pub(crate) fn search_offers(args: OfferSearchArgs) -> Result<(), AppError> {
    let portal = load_portal()?;
    let mut filters = OfferFilters::new();
    for (category, value) in args.filter {
        filters.select(category, value);
    }
    let query = args.query.unwrap_or_default();

    let results = portal.catalog.search(&query, &filters);
    render_offers(&results, portal.catalog.len());
    Ok(())
}

pub(crate) fn list_filter_options() -> Result<(), AppError> {
    for group in filter_options() {
        println!("{} ({})", group.label, group.category.key());
        for value in group.values {
            println!("  - {value}");
        }
    }
    Ok(())
}

pub(crate) fn render_applications(applications: &[Application]) {
    if applications.is_empty() {
        println!("  (no applications)");
        return;
    }

    for application in applications {
        let responded = application
            .response_date()
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {} | {} | {} | applied {} | responded {}",
            application.id(),
            application.company(),
            application.position(),
            application.status().display_name(),
            application.application_date(),
            responded
        );
        if let Some(comment) = application.comment() {
            println!("      comment: {comment}");
        }
        let actions = application.allowed_actions();
        if !actions.is_empty() {
            let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
            println!("      next: {}", labels.join(", "));
        }
    }
}

pub(crate) fn render_dashboard(counts: &[StatusCount]) {
    let total: usize = counts.iter().map(|entry| entry.count).sum();
    println!("Dashboard: {total} applications");
    for entry in counts {
        println!("  - {}: {}", entry.label, entry.count);
    }
}

pub(crate) fn render_offers(offers: &[&Offer], total: usize) {
    println!("{} of {} offers", offers.len(), total);
    for offer in offers {
        println!(
            "  [{}] {} @ {} | {} | {} | {} | {} applicants",
            offer.id,
            offer.position,
            offer.company,
            offer.area,
            offer.region,
            offer.work_mode,
            offer.applicants
        );
    }
}
