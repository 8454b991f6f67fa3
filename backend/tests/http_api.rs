//! End-to-end HTTP coverage over the real routing table and SQLite
//! adapters, with sessions carried between requests as a browser would.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, App, Error};
use serde_json::{json, Value};
use vetclinic_backend::domain::ports::NotificationOutbox;
use vetclinic_backend::inbound::http::HttpState;
use vetclinic_backend::outbound::persistence::{
    run_pending_migrations, DbPool, DieselAppointmentRepository, DieselNotificationOutbox,
    DieselUserRepository, DieselVaccinationRepository, PoolConfig,
};
use vetclinic_backend::server;

fn test_state() -> (actix_web::web::Data<HttpState>, Arc<DieselNotificationOutbox>) {
    let pool = DbPool::new(PoolConfig::new(":memory:").with_max_size(1))
        .expect("pool builds against memory database");
    run_pending_migrations(&pool).expect("migrations apply");
    let outbox = Arc::new(DieselNotificationOutbox::new(pool.clone()));
    let state = actix_web::web::Data::new(HttpState::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselAppointmentRepository::new(pool.clone())),
        Arc::new(DieselVaccinationRepository::new(pool)),
        outbox.clone(),
    ));
    (state, outbox)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(server::session_middleware(Key::generate(), false))
                .configure(server::routes),
        )
        .await
    };
}

fn cookies_of(res: &ServiceResponse) -> Vec<Cookie<'static>> {
    res.response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect()
}

fn with_cookies(
    req: test::TestRequest,
    cookies: &[Cookie<'static>],
) -> test::TestRequest {
    cookies
        .iter()
        .fold(req, |req, cookie| req.cookie(cookie.clone()))
}

async fn register_user<S>(app: &S, username: &str, role: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": username, "password": "pw1", "role": role }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201, "registering {username}");
}

async fn login_user<S>(app: &S, username: &str, password: &str) -> Vec<Cookie<'static>>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 200, "logging in {username}");
    cookies_of(&res)
}

#[actix_web::test]
async fn appointment_lifecycle_end_to_end() {
    let (state, outbox) = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "owner").await;
    register_user(&app, "bob", "vet").await;
    let alice = login_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::post().uri("/request"), &alice)
            .set_json(json!({ "pet_name": "Rex", "date": "2024-01-01", "reason": "checkup" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["owner"], "alice");
    let id = created["id"].as_i64().expect("id is numeric");

    // Owner sees their own requests on the dashboard.
    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/dashboard"), &alice).to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    let mine: Value = test::read_body_json(res).await;
    assert_eq!(mine.as_array().expect("array body").len(), 1);

    // The vet sees everything and decides.
    let bob = login_user(&app, "bob", "pw1").await;
    let res = test::call_service(
        &app,
        with_cookies(
            test::TestRequest::get().uri(&format!("/update/{id}/Approved")),
            &bob,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["status"], "Approved");

    // A decision may be revised.
    let res = test::call_service(
        &app,
        with_cookies(
            test::TestRequest::get().uri(&format!("/update/{id}/Rejected")),
            &bob,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["status"], "Rejected");

    // Both write paths queued a notification instead of sending inline.
    let pending = outbox.pending(10).await.expect("pending loads");
    let subjects: Vec<&str> = pending.iter().map(|entry| entry.subject()).collect();
    assert_eq!(
        subjects,
        vec![
            "New Appointment Request",
            "Appointment Status Updated",
            "Appointment Status Updated",
        ]
    );
    assert_eq!(pending[0].body(), "New appointment request for Rex on 2024-01-01");
    assert_eq!(pending[2].body(), "Appointment for Rex is Rejected");
}

#[actix_web::test]
async fn authentication_and_role_boundaries() {
    let (state, _outbox) = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "owner").await;
    register_user(&app, "bob", "vet").await;

    // No session at all.
    let res = test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request())
        .await;
    assert_eq!(res.status(), 401);

    // Owner hitting vet-only surfaces.
    let alice = login_user(&app, "alice", "pw1").await;
    for uri in ["/analytics", "/vaccination", "/report/Rex", "/update/1/Approved"] {
        let res = test::call_service(
            &app,
            with_cookies(test::TestRequest::get().uri(uri), &alice).to_request(),
        )
        .await;
        assert_eq!(res.status(), 403, "owner must not reach {uri}");
    }

    // Vet filing an appointment request.
    let bob = login_user(&app, "bob", "pw1").await;
    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::post().uri("/request"), &bob)
            .set_json(json!({ "pet_name": "Rex", "date": "2024-01-01", "reason": "checkup" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 403);

    // Unknown status token is a 400, unknown id a 404.
    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/update/1/Cancelled"), &bob).to_request(),
    )
    .await;
    assert_eq!(res.status(), 400);
    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/update/9999/Approved"), &bob).to_request(),
    )
    .await;
    assert_eq!(res.status(), 404);
}

#[actix_web::test]
async fn registration_conflicts_and_bad_credentials() {
    let (state, _outbox) = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "owner").await;

    // Same username again, any role.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": "alice", "password": "pw2", "role": "vet" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 409);

    // Roles outside the closed set never reach the store.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": "carol", "password": "pw1", "role": "admin" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 400);

    // Wrong password and unknown username read identically.
    for (username, password) in [("alice", "wrong"), ("nobody", "pw1")] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/")
                .set_json(json!({ "username": username, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), 401);
        assert!(cookies_of(&res).is_empty(), "no session on failed login");
    }
}

#[actix_web::test]
async fn logout_invalidates_the_session_cookie() {
    let (state, _outbox) = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "owner").await;
    let alice = login_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/dashboard"), &alice).to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/logout"), &alice).to_request(),
    )
    .await;
    assert_eq!(res.status(), 204);
    let purged = cookies_of(&res);

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/dashboard"), &purged).to_request(),
    )
    .await;
    assert_eq!(res.status(), 401);
}

#[actix_web::test]
async fn vaccinations_analytics_and_report() {
    let (state, _outbox) = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "owner").await;
    register_user(&app, "bob", "vet").await;
    let alice = login_user(&app, "alice", "pw1").await;
    let bob = login_user(&app, "bob", "pw1").await;

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::post().uri("/request"), &alice)
            .set_json(json!({ "pet_name": "Rex", "date": "2024-01-01", "reason": "checkup" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201);

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::post().uri("/vaccination"), &bob)
            .set_json(json!({
                "pet_name": "Rex",
                "vaccine": "Rabies",
                "given_date": "2024-01-01",
                "next_due": "2025-01-01"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201);

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/vaccination"), &bob).to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    let ledger: Value = test::read_body_json(res).await;
    assert_eq!(ledger.as_array().expect("array body").len(), 1);
    assert_eq!(ledger[0]["vaccine"], "Rabies");

    // Any authenticated user may view the calendar.
    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/calendar"), &alice).to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/analytics"), &bob).to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    let counts: Value = test::read_body_json(res).await;
    assert_eq!(counts["pending"], 1);
    assert_eq!(counts["approved"], 0);
    assert_eq!(counts["rejected"], 0);

    let res = test::call_service(
        &app,
        with_cookies(test::TestRequest::get().uri("/report/Rex"), &bob).to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()
            .get("content-type")
            .expect("content type present"),
        "application/pdf"
    );
    let body = test::read_body(res).await;
    assert!(body.starts_with(b"%PDF"));
}
