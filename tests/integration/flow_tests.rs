//! Dashboard flows end to end: event card, check-in/out, reports

use chrono::{Duration, Utc};
use tokio_test::{assert_err, assert_ok};

use hams_dashboard::{
    models::{
        animal::AnimalForm,
        enums::ReportEntity,
        event::{EventForm, EventTypeForm},
        user::LoginForm,
    },
    services::{
        assignment::{AssignAction, CheckAction, CheckMode, EventAssignment},
        cache::{QueryCache, QueryKey},
        events::EventAssignees,
        notify::Toast,
        queries::keys,
        status::{StatusDetail, StatusIndex},
    },
    AppError,
};

use crate::support::{user_with, Backend, STARTED_EVENT, UPCOMING_EVENT};

async fn warm(cache: &QueryCache, keys: &[QueryKey]) {
    for key in keys {
        let _: i32 = cache.fetch(key.clone(), || async { Ok(1) }).await.unwrap();
    }
}

fn kito_form() -> AnimalForm {
    AnimalForm {
        name: "Kito".into(),
        species: "Lemur catta".into(),
        description: "Ring-tailed lemur".into(),
        image: "http://localhost:8000/static/kito.png".into(),
        handling_enabled: true,
        max_daily_checkout_hours: 2,
        max_daily_checkouts: 3,
        rest_time: 1.0,
        tier: 1,
        zoo_id: 1,
    }
}

#[tokio::test]
async fn test_started_event_offers_check_in_and_resets_cache() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();

    let user = assert_ok!(services.queries.user().await);
    let details = assert_ok!(services.queries.event(STARTED_EVENT).await);
    let statuses = assert_ok!(services.queries.animal_statuses(None).await);
    assert!(services.cache.contains(&keys::event_by_id(STARTED_EVENT)).await);

    let mut card = EventAssignment::from_event(&details);
    assert_eq!(card.enter_check_view(Utc::now()), Some(CheckMode::CheckIn));

    let index = StatusIndex::new(statuses);
    let milo = index.line(6, StatusDetail::Verbose);
    assert_eq!(milo.render(), "✘ Checked Out (Reading Hour)");

    let panel = card.check_panel_mut().unwrap();
    panel.select_all(true);
    assert_eq!(panel.selected(), vec![4, 6]);
    let ids = match panel.action(Some(&user)) {
        Some(CheckAction::Submit(CheckMode::CheckIn)) => panel.selected(),
        other => panic!("expected check-in submit, got {:?}", other),
    };

    let message = assert_ok!(
        services
            .checkinout
            .submit(&user, STARTED_EVENT, CheckMode::CheckIn, &ids)
            .await
    );
    assert_eq!(message.message, "Animals checked in");
    assert!(services.cache.is_empty().await);
    assert_eq!(notifier.toasts(), vec![Toast::Success("Animals checked in".into())]);

    let hit = backend
        .recorder
        .last(&format!("/events/{}/checkin", STARTED_EVENT))
        .unwrap();
    assert_eq!(hit.method, "PUT");
    assert_eq!(hit.body, r#"{"animal_ids":[4,6]}"#);

    // Reads after the reset hit the backend again
    assert_ok!(services.queries.event(STARTED_EVENT).await);
    assert_eq!(
        backend.recorder.count(&format!("/events/{}", STARTED_EVENT)),
        2
    );
}

#[tokio::test]
async fn test_rejected_check_in_keeps_cache_and_toasts_detail() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();

    let user = assert_ok!(services.queries.user().await);
    assert_ok!(services.queries.animal_statuses(None).await);
    let cached = services.cache.len().await;

    let err = assert_err!(
        services
            .checkinout
            .submit(&user, STARTED_EVENT, CheckMode::CheckIn, &[4, 99])
            .await
    );
    assert!(matches!(err, AppError::Api { status: 400, .. }));
    assert_eq!(services.cache.len().await, cached);
    assert_eq!(
        notifier.toasts(),
        vec![Toast::Error("Animal 99 is not checked out for this event".into())]
    );
}

#[tokio::test]
async fn test_upcoming_event_offers_check_out() {
    let backend = Backend::start().await;
    let (services, _notifier) = backend.services();

    let user = assert_ok!(services.queries.user().await);
    let details = assert_ok!(services.queries.event(UPCOMING_EVENT).await);
    let mut card = EventAssignment::from_event(&details);

    assert_eq!(
        card.animal_action(Utc::now()),
        AssignAction::Proceed(CheckMode::CheckOut)
    );
    // The same event seen after its start flips to check-in
    assert_eq!(
        card.animal_action(Utc::now() + Duration::days(2)),
        AssignAction::Proceed(CheckMode::CheckIn)
    );

    assert_eq!(card.enter_check_view(Utc::now()), Some(CheckMode::CheckOut));
    let panel = card.check_panel_mut().unwrap();
    panel.toggle(4);
    assert_eq!(panel.action(Some(&user)), Some(CheckAction::Submit(CheckMode::CheckOut)));

    let selected = panel.selected();
    assert_ok!(
        services
            .checkinout
            .submit(&user, UPCOMING_EVENT, CheckMode::CheckOut, &selected)
            .await
    );
    let hit = backend
        .recorder
        .last(&format!("/events/{}/checkout", UPCOMING_EVENT))
        .unwrap();
    assert_eq!(hit.body, r#"{"animal_ids":[4]}"#);
}

#[tokio::test]
async fn test_edited_assignment_must_be_saved_first() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();

    let details = assert_ok!(services.queries.event(STARTED_EVENT).await);
    let mut card = EventAssignment::from_event(&details);

    card.animals_mut().toggle(5);
    assert_eq!(card.animal_action(Utc::now()), AssignAction::Save);
    assert_eq!(card.enter_check_view(Utc::now()), None);

    let message = assert_ok!(services.events.save_animals(&mut card).await);
    assert_eq!(message.message, "Animals reassigned");
    assert!(!card.animals().is_dirty());
    assert!(!services.cache.contains(&keys::event_by_id(STARTED_EVENT)).await);
    assert_eq!(notifier.toasts(), vec![Toast::Success("Animals reassigned".into())]);

    let hit = backend
        .recorder
        .last(&format!("/events/{}/animals", STARTED_EVENT))
        .unwrap();
    assert_eq!(hit.body, r#"{"animal_ids":[4,5,6]}"#);

    assert_eq!(card.enter_check_view(Utc::now()), Some(CheckMode::CheckIn));
}

#[tokio::test]
async fn test_report_download_names_file() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();

    let user = assert_ok!(services.queries.user().await);
    let today = Utc::now().date_naive();
    let report = assert_ok!(
        services
            .reports
            .download(&user, today - Duration::days(7), today, ReportEntity::Animals, today)
            .await
    );
    assert_eq!(report.file_name, "report-Animals.csv");
    assert!(!report.content.is_empty());
    assert_eq!(
        notifier.toasts(),
        vec![Toast::Success("Report downloaded successfully".into())]
    );

    let err = assert_err!(
        services
            .reports
            .download(&user, today, today - Duration::days(1), ReportEntity::Animals, today)
            .await
    );
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(backend.recorder.count("/admin/reports"), 1);
}

#[tokio::test]
async fn test_animal_update_drops_animal_keys_only() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();
    let cache = &services.cache;
    warm(
        cache,
        &[
            keys::animals(),
            keys::animal_statuses(Some(1)),
            keys::animal_by_id(4),
            keys::animal_audit(4),
            keys::animal_audit(5),
            keys::groups(),
            keys::event_types(),
        ],
    )
    .await;

    let keeper = user_with(&["update_animals"]);
    assert_ok!(services.animals.update(&keeper, 4, &kito_form()).await);

    assert!(!cache.contains(&keys::animals()).await);
    assert!(!cache.contains(&keys::animal_statuses(Some(1))).await);
    assert!(!cache.contains(&keys::animal_by_id(4)).await);
    assert!(!cache.contains(&keys::animal_audit(4)).await);
    assert!(cache.contains(&keys::animal_audit(5)).await);
    assert!(cache.contains(&keys::groups()).await);
    assert!(cache.contains(&keys::event_types()).await);
    assert_eq!(notifier.toasts(), vec![Toast::Success("Changes saved".into())]);

    let hit = backend.recorder.last("/animals/4").unwrap();
    assert_eq!(hit.method, "PUT");
}

#[tokio::test]
async fn test_availability_needs_its_own_permission() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();
    warm(&services.cache, &[keys::animals()]).await;

    let keeper = user_with(&["make_animal_unavailable"]);
    let err = assert_err!(services.animals.set_available(&keeper, 4, true).await);
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(backend.recorder.count("/animals/4/available"), 0);
    assert!(services.cache.contains(&keys::animals()).await);
    assert_eq!(
        notifier.toasts(),
        vec![Toast::Error("Your role does not grant make_animal_available".into())]
    );

    assert_ok!(services.animals.set_available(&keeper, 4, false).await);
    assert_eq!(backend.recorder.count("/animals/4/unavailable"), 1);
    assert!(!services.cache.contains(&keys::animals()).await);
}

#[tokio::test]
async fn test_login_and_logout_empty_the_cache() {
    let backend = Backend::start().await;
    let (services, notifier) = backend.services();
    warm(&services.cache, &[keys::user(), keys::events()]).await;

    let form = LoginForm {
        username: "keeper".into(),
        password: "secret123".into(),
    };
    assert_ok!(services.users.login(&form).await);
    assert!(services.cache.is_empty().await);

    warm(&services.cache, &[keys::user(), keys::zoos()]).await;
    assert_ok!(services.users.logout().await);
    assert!(services.cache.is_empty().await);
    assert!(!services.api.session().is_authenticated());

    assert_eq!(
        notifier.toasts(),
        vec![
            Toast::Success("Logged in successfully".into()),
            Toast::Success("Logged out".into()),
        ]
    );
}

#[tokio::test]
async fn test_event_type_create_refreshes_event_types() {
    let backend = Backend::start().await;
    let (services, _notifier) = backend.services();
    warm(&services.cache, &[keys::event_types(), keys::groups()]).await;
    let form = EventTypeForm {
        name: "Education".into(),
        zoo_id: 1,
        group_id: None,
    };

    let handler = user_with(&["checkin_animals"]);
    assert_err!(services.organization.create_event_type(&handler, &form).await);
    assert_eq!(backend.recorder.count("/event-type/"), 0);

    let admin = user_with(&["create_event_type"]);
    assert_ok!(services.organization.create_event_type(&admin, &form).await);
    assert_eq!(backend.recorder.count("/event-type/"), 1);
    assert!(!services.cache.contains(&keys::event_types()).await);
    assert!(services.cache.contains(&keys::groups()).await);
}

#[tokio::test]
async fn test_event_create_refreshes_events_and_animals() {
    let backend = Backend::start().await;
    let (services, _notifier) = backend.services();
    warm(
        &services.cache,
        &[keys::events(), keys::event_by_id(1), keys::animals(), keys::zoos()],
    )
    .await;

    let today = Utc::now().date_naive() + Duration::days(1);
    let form = EventForm {
        name: "Reading Hour".into(),
        description: "Story time with ambassador animals".into(),
        from: today,
        to: today,
        start_time: chrono::NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        zoo_id: 1,
        event_type_id: 1,
    };
    let assignees = EventAssignees {
        user_ids: vec![3],
        animal_ids: vec![4, 6],
        checkout_immediately: false,
    };

    let organizer = user_with(&["create_events"]);
    assert_ok!(
        services
            .events
            .create(&organizer, &form, assignees, &Utc, today)
            .await
    );

    let hit = backend.recorder.last("/events").unwrap();
    assert!(hit.body.contains(r#""animal_ids":[4,6]"#));
    assert!(!services.cache.contains(&keys::events()).await);
    assert!(!services.cache.contains(&keys::event_by_id(1)).await);
    assert!(!services.cache.contains(&keys::animals()).await);
    assert!(services.cache.contains(&keys::zoos()).await);
}
