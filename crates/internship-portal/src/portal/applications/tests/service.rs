use super::common::*;
use std::sync::Arc;

use crate::portal::applications::domain::{
    Application, ApplicationQuery, ApplicationStatus, NewApplication, SortKey, SortOrder,
};
use crate::portal::applications::repository::{ApplicationRepository, RepositoryError};
use crate::portal::applications::{
    ApplicationAction, ApplicationServiceError, ApplicationTracker, Transition,
};

fn listed_ids(applications: &[Application]) -> Vec<&str> {
    applications
        .iter()
        .map(|application| application.id().as_str())
        .collect()
}

#[test]
fn confirm_on_awaiting_application_is_refused() {
    let (tracker, repository) = seeded_tracker();
    let before = repository.all().expect("list succeeds");

    match tracker.confirm(&id("4")) {
        Err(ApplicationServiceError::InvalidTransition(error)) => {
            assert_eq!(error.from, ApplicationStatus::Awaiting);
            assert_eq!(error.action, ApplicationAction::Confirm);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }

    let after = repository.all().expect("list succeeds");
    assert_eq!(before, after);
    assert_eq!(
        tracker.get(&id("4")).expect("present").status(),
        ApplicationStatus::Awaiting
    );
}

#[test]
fn confirm_accepted_application_keeps_response_date() {
    let (tracker, _) = seeded_tracker();
    let before = tracker.get(&id("1")).expect("present");
    assert_eq!(before.status(), ApplicationStatus::Accepted);

    let confirmed = tracker.confirm(&id("1")).expect("accepted can be confirmed");
    assert_eq!(confirmed.status(), ApplicationStatus::Confirmed);
    assert_eq!(confirmed.response_date(), before.response_date());
    assert_response_invariant(&confirmed);

    let stored = tracker.get(&id("1")).expect("present");
    assert_eq!(stored, confirmed);
}

#[test]
fn decline_is_terminal_and_guarded() {
    let (tracker, repository) = seeded_tracker();

    let declined = tracker.decline(&id("2")).expect("accepted can be declined");
    assert_eq!(declined.status(), ApplicationStatus::Declined);

    let snapshot = repository.all().expect("list succeeds");
    assert!(matches!(
        tracker.confirm(&id("2")),
        Err(ApplicationServiceError::InvalidTransition(_))
    ));
    assert!(matches!(
        tracker.decline(&id("2")),
        Err(ApplicationServiceError::InvalidTransition(_))
    ));
    assert!(matches!(
        tracker.decline(&id("3")),
        Err(ApplicationServiceError::InvalidTransition(_))
    ));
    assert_eq!(repository.all().expect("list succeeds"), snapshot);
}

#[test]
fn missing_application_reports_not_found() {
    let (tracker, _) = seeded_tracker();

    match tracker.confirm(&id("99")) {
        Err(ApplicationServiceError::NotFound(missing)) => assert_eq!(missing, id("99")),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(matches!(
        tracker.decline(&id("99")),
        Err(ApplicationServiceError::NotFound(_))
    ));
}

#[test]
fn invariant_holds_after_every_transition() {
    let (tracker, repository) = seeded_tracker();

    tracker
        .accept(&id("4"), date(2024, 1, 28))
        .expect("awaiting can be accepted");
    tracker
        .reject(&id("5"), date(2024, 1, 30), Some("Position filled".to_string()))
        .expect("awaiting can be rejected");
    tracker.confirm(&id("4")).expect("accepted can be confirmed");
    tracker.decline(&id("1")).expect("accepted can be declined");
    assert!(matches!(
        tracker.confirm(&id("5")),
        Err(ApplicationServiceError::InvalidTransition(_))
    ));

    for application in repository.all().expect("list succeeds") {
        assert_response_invariant(&application);
    }
    assert_eq!(
        tracker.get(&id("5")).expect("present").comment(),
        Some("Position filled")
    );
}

#[test]
fn default_list_is_newest_application_first() {
    let (tracker, _) = seeded_tracker();
    let applications = tracker
        .list(&ApplicationQuery::default())
        .expect("list succeeds");
    assert_eq!(listed_ids(&applications), vec!["5", "4", "1", "2", "3"]);
}

#[test]
fn list_filters_by_exact_status() {
    let (tracker, _) = seeded_tracker();
    let query = ApplicationQuery {
        status: Some(ApplicationStatus::Accepted),
        ..ApplicationQuery::default()
    };
    let applications = tracker.list(&query).expect("list succeeds");
    assert_eq!(listed_ids(&applications), vec!["1", "2"]);

    let query = ApplicationQuery {
        status: Some(ApplicationStatus::Confirmed),
        ..ApplicationQuery::default()
    };
    assert!(tracker.list(&query).expect("list succeeds").is_empty());
}

#[test]
fn missing_response_dates_sort_as_earliest() {
    let (tracker, _) = seeded_tracker();

    let descending = ApplicationQuery {
        sort_key: SortKey::ResponseDate,
        ..ApplicationQuery::default()
    };
    let applications = tracker.list(&descending).expect("list succeeds");
    assert_eq!(listed_ids(&applications), vec!["1", "2", "3", "4", "5"]);

    let ascending = ApplicationQuery {
        sort_key: SortKey::ResponseDate,
        sort_order: SortOrder::Ascending,
        ..ApplicationQuery::default()
    };
    let applications = tracker.list(&ascending).expect("list succeeds");
    assert_eq!(listed_ids(&applications), vec!["4", "5", "3", "2", "1"]);
}

#[test]
fn sorting_by_response_date_when_all_awaiting_keeps_insertion_order() {
    let tracker = tracker_with(vec![
        Application::new(id("x"), "A", "Intern", date(2024, 3, 1)),
        Application::new(id("y"), "B", "Intern", date(2024, 1, 1)),
        Application::new(id("z"), "C", "Intern", date(2024, 2, 1)),
    ]);

    for sort_order in [SortOrder::Descending, SortOrder::Ascending] {
        let query = ApplicationQuery {
            sort_key: SortKey::ResponseDate,
            sort_order,
            ..ApplicationQuery::default()
        };
        let applications = tracker.list(&query).expect("list succeeds");
        assert_eq!(listed_ids(&applications), vec!["x", "y", "z"]);
    }
}

#[test]
fn ties_keep_original_relative_order() {
    let tracker = tracker_with(vec![
        Application::new(id("first"), "A", "Intern", date(2024, 1, 10)),
        Application::new(id("newer"), "B", "Intern", date(2024, 1, 20)),
        Application::new(id("second"), "C", "Intern", date(2024, 1, 10)),
    ]);

    let descending = tracker
        .list(&ApplicationQuery::default())
        .expect("list succeeds");
    assert_eq!(listed_ids(&descending), vec!["newer", "first", "second"]);

    let ascending = tracker
        .list(&ApplicationQuery {
            sort_order: SortOrder::Ascending,
            ..ApplicationQuery::default()
        })
        .expect("list succeeds");
    assert_eq!(listed_ids(&ascending), vec!["first", "second", "newer"]);
}

#[test]
fn listing_never_mutates_the_store() {
    let (tracker, repository) = seeded_tracker();
    let before = repository.all().expect("list succeeds");

    let query = ApplicationQuery {
        sort_order: SortOrder::Descending.toggled(),
        ..ApplicationQuery::default()
    };
    let _ = tracker.list(&query).expect("list succeeds");

    assert_eq!(repository.all().expect("list succeeds"), before);
}

#[test]
fn submit_creates_awaiting_application() {
    let (tracker, _) = seeded_tracker();
    let created = tracker
        .submit(NewApplication {
            company: "  Acme  ".to_string(),
            position: "Backend Intern".to_string(),
            applied_on: date(2024, 2, 1),
        })
        .expect("submission succeeds");

    assert_eq!(created.status(), ApplicationStatus::Awaiting);
    assert_eq!(created.company(), "Acme");
    assert!(created.id().as_str().starts_with("app-"));
    assert_response_invariant(&created);
    assert_eq!(tracker.get(created.id()).expect("stored"), created);
}

#[test]
fn submit_rejects_blank_fields() {
    let (tracker, repository) = seeded_tracker();
    let result = tracker.submit(NewApplication {
        company: "Acme".to_string(),
        position: "   ".to_string(),
        applied_on: date(2024, 2, 1),
    });

    assert!(matches!(result, Err(ApplicationServiceError::Validation(_))));
    assert_eq!(repository.all().expect("list succeeds").len(), 5);
}

#[test]
fn status_counts_cover_every_status() {
    let (tracker, _) = seeded_tracker();
    tracker.confirm(&id("1")).expect("accepted can be confirmed");

    let counts = tracker.status_counts().expect("counts computed");
    let tally: Vec<(ApplicationStatus, usize)> =
        counts.iter().map(|entry| (entry.status, entry.count)).collect();
    assert_eq!(
        tally,
        vec![
            (ApplicationStatus::Awaiting, 2),
            (ApplicationStatus::Accepted, 1),
            (ApplicationStatus::Rejected, 1),
            (ApplicationStatus::Confirmed, 1),
            (ApplicationStatus::Declined, 0),
        ]
    );
}

#[test]
fn repository_failures_propagate() {
    let tracker = ApplicationTracker::new(Arc::new(UnavailableRepository));

    assert!(matches!(
        tracker.list(&ApplicationQuery::default()),
        Err(ApplicationServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        tracker.confirm(&id("1")),
        Err(ApplicationServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn applying_transitions_directly_matches_tracker_behavior() {
    let (tracker, _) = seeded_tracker();
    let stored = tracker.get(&id("2")).expect("present");
    let expected = stored.apply(Transition::Confirm).expect("accepted");

    assert_eq!(tracker.confirm(&id("2")).expect("accepted"), expected);
}

#[test]
fn racing_terminal_transitions_resolve_to_exactly_one() {
    let (tracker, repository) = gated_tracker(2);

    let (confirmed, declined) = std::thread::scope(|scope| {
        let confirm = scope.spawn(|| tracker.confirm(&id("1")));
        let decline = scope.spawn(|| tracker.decline(&id("1")));
        (
            confirm.join().expect("confirm thread completes"),
            decline.join().expect("decline thread completes"),
        )
    });

    let stored = repository
        .fetch(&id("1"))
        .expect("store readable")
        .expect("present");
    match (confirmed, declined) {
        (Ok(winner), Err(ApplicationServiceError::InvalidTransition(error))) => {
            assert_eq!(winner.status(), ApplicationStatus::Confirmed);
            assert_eq!(error.from, ApplicationStatus::Confirmed);
            assert_eq!(stored, winner);
        }
        (Err(ApplicationServiceError::InvalidTransition(error)), Ok(winner)) => {
            assert_eq!(winner.status(), ApplicationStatus::Declined);
            assert_eq!(error.from, ApplicationStatus::Declined);
            assert_eq!(stored, winner);
        }
        other => panic!("expected exactly one terminal transition to win, got {other:?}"),
    }
    assert_response_invariant(&stored);
}

#[test]
fn update_if_refuses_stale_snapshot() {
    let (_, repository) = seeded_tracker();
    let stale = repository
        .fetch(&id("1"))
        .expect("store readable")
        .expect("present");

    let confirmed = stale.apply(Transition::Confirm).expect("accepted can be confirmed");
    assert!(repository
        .update_if(&stale, confirmed.clone())
        .expect("store writable"));

    let declined = stale.apply(Transition::Decline).expect("accepted can be declined");
    assert!(!repository.update_if(&stale, declined).expect("store writable"));
    assert_eq!(
        repository.fetch(&id("1")).expect("store readable"),
        Some(confirmed)
    );
}

#[test]
fn response_before_application_date_is_rejected() {
    let (tracker, repository) = seeded_tracker();
    let before = repository.all().expect("store readable");

    // Application 4 was submitted on 2024-01-20.
    let error = tracker.accept(&id("4"), date(2024, 1, 19)).unwrap_err();
    assert!(matches!(error, ApplicationServiceError::Validation(_)));
    let error = tracker
        .reject(&id("5"), date(2024, 1, 1), Some("Too late".to_string()))
        .unwrap_err();
    assert!(matches!(error, ApplicationServiceError::Validation(_)));

    assert_eq!(repository.all().expect("store readable"), before);

    let same_day = tracker
        .accept(&id("4"), date(2024, 1, 20))
        .expect("same-day answer is allowed");
    assert_eq!(same_day.response_date(), Some(date(2024, 1, 20)));
}
