//! API client integration tests

use hams_dashboard::{
    models::{
        animal::AnimalForm,
        enums::ReportEntity,
        user::{LoginForm, PermissionName},
    },
    services::session::SessionStore,
    AppError,
};
use chrono::NaiveDate;
use tokio_test::{assert_err, assert_ok};

use crate::support::{Backend, TOKEN};

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    let client = backend.client(session.clone());

    let token = assert_ok!(
        client
            .login(&LoginForm {
                username: "keeper".into(),
                password: "secret123".into(),
            })
            .await
    );
    assert_eq!(token.access_token, TOKEN);
    assert_eq!(session.token().as_deref(), Some(TOKEN));

    let me = assert_ok!(client.get_authenticated_user().await);
    assert_eq!(me.username, "keeper");
    assert!(me.has_permission(PermissionName::CheckinAnimals));
    assert!(!me.has_permission(PermissionName::DeleteAnimals));

    let hit = backend.recorder.last("/users/me/").unwrap();
    assert_eq!(hit.authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_login_rejected_keeps_current_session() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    session.store(TOKEN).unwrap();
    let client = backend.client(session.clone());

    let err = assert_err!(
        client
            .login(&LoginForm {
                username: "keeper".into(),
                password: "wrong-password".into(),
            })
            .await
    );
    match err {
        AppError::Api { status, ref detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Incorrect username or password");
        }
        other => panic!("expected a rejected credential, got {:?}", other),
    }

    // The signed-in session is untouched
    assert_eq!(session.token().as_deref(), Some(TOKEN));
    assert_ok!(client.get_authenticated_user().await);
}

#[tokio::test]
async fn test_unauthorized_clears_stale_token() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    session.store("expired-token").unwrap();
    let client = backend.client(session.clone());

    let err = assert_err!(client.get_authenticated_user().await);
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(!session.is_authenticated());

    // Next request goes out without any Authorization header
    assert_err!(client.get_animals_with_status(None).await);
    let hit = backend.recorder.last("/animals/status").unwrap();
    assert!(hit.authorization.is_none());
}

#[tokio::test]
async fn test_validation_detail_is_flattened() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    session.store(TOKEN).unwrap();
    let client = backend.client(session);

    let form = AnimalForm {
        name: "Kito".into(),
        species: "Lemur catta".into(),
        description: "Ring-tailed lemur".into(),
        image: "http://localhost/kito.png".into(),
        handling_enabled: true,
        max_daily_checkout_hours: 2,
        max_daily_checkouts: 3,
        rest_time: 1.0,
        tier: 1,
        zoo_id: 1,
    };
    let err = assert_err!(client.create_animal(&form).await);
    match err {
        AppError::Api { status, detail } => {
            assert_eq!(status, 422);
            assert_eq!(detail, "name: field required; tier: ensure this value is less than 5");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_filter_query() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    session.store(TOKEN).unwrap();
    let client = backend.client(session);

    let all = assert_ok!(client.get_animals_with_status(None).await);
    assert_eq!(all.len(), 3);
    assert_eq!(backend.recorder.last("/animals/status").unwrap().query, None);

    assert_ok!(client.get_animals_with_status(Some(1)).await);
    assert_eq!(
        backend.recorder.last("/animals/status").unwrap().query.as_deref(),
        Some("zoo_id=1")
    );
}

#[tokio::test]
async fn test_report_query_and_bytes() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    session.store(TOKEN).unwrap();
    let client = backend.client(session);

    let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
    let bytes = assert_ok!(client.get_report(from, to, ReportEntity::Users).await);
    assert_eq!(bytes, b"id,name\n4,Kito\n".to_vec());

    let hit = backend.recorder.last("/admin/reports").unwrap();
    assert_eq!(
        hit.query.as_deref(),
        Some("from_=2024-05-01&to=2024-05-07&entity=users")
    );
}

#[tokio::test]
async fn test_upload_sends_file_part() {
    let backend = Backend::start().await;
    let session = SessionStore::in_memory();
    session.store(TOKEN).unwrap();
    let client = backend.client(session);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kito.png");
    std::fs::write(&path, b"\x89PNG fake").unwrap();

    let uploaded = assert_ok!(client.upload_file(&path).await);
    assert_eq!(uploaded.file_url, "http://localhost:8000/static/kito.png");

    let hit = backend.recorder.last("/upload").unwrap();
    assert!(hit.body.contains("name=\"file\""));
    assert!(hit.body.contains("filename=\"kito.png\""));
}
