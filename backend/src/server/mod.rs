//! Server construction and middleware wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};

use crate::domain::ports::MailTransport;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::{appointments, auth, dashboard, reports, vaccinations, HttpState};
use crate::outbound::mailer::{LogMailer, OutboxWorker, SmtpMailer};
use crate::outbound::persistence::{
    run_pending_migrations, DbPool, DieselAppointmentRepository, DieselNotificationOutbox,
    DieselUserRepository, DieselVaccinationRepository, PoolConfig,
};

/// Register every application route.
///
/// Shared between the real server and the HTTP integration tests so both
/// exercise the same routing table.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(dashboard::dashboard)
        .service(dashboard::calendar)
        .service(appointments::request_appointment)
        .service(appointments::update_status)
        .service(vaccinations::record_vaccination)
        .service(vaccinations::list_vaccinations)
        .service(reports::analytics)
        .service(reports::report);
}

/// Cookie-backed session middleware with a two-hour lifetime.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build()
}

/// Build the dependency graph and drive the HTTP listener.
///
/// Applies pending migrations before accepting traffic, spawns the outbox
/// worker, and flips the readiness probe once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the pool, migrations, socket bind,
/// or mail transport setup fails.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let migration_pool = pool.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_pool))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let outbox = Arc::new(DieselNotificationOutbox::new(pool.clone()));
    let http_state = web::Data::new(HttpState::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselAppointmentRepository::new(pool.clone())),
        Arc::new(DieselVaccinationRepository::new(pool.clone())),
        outbox.clone(),
    ));

    let transport: Arc<dyn MailTransport> = match &config.smtp {
        Some(settings) => Arc::new(
            SmtpMailer::new(settings).map_err(|err| std::io::Error::other(err.to_string()))?,
        ),
        None => Arc::new(LogMailer),
    };
    tokio::spawn(OutboxWorker::new(outbox, transport, config.outbox_poll).run());

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;

    // Actix handles the shutdown signal itself; this watcher only flips
    // liveness so load balancers stop routing while connections drain.
    let drain_state = health_state.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drain_state.mark_unhealthy();
        }
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(session_middleware(key.clone(), cookie_secure))
            .configure(routes)
            .service(ready)
            .service(live)
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
