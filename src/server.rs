//! HTTP server assembly: route table, state injection and graceful
//! shutdown.

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::handlers::{self, appointment, auth, business, owner, pet, procedure, service};
use crate::state::AppState;

/// Builds the full route table over the given state. Public so tests can
/// drive the router without a listener.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/register/dono", post(auth::register_owner))
        .route("/auth/register/petshop", post(auth::register_business))
        .route("/auth/logout", get(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/profile", get(auth::me))
        // Owners
        .route("/donos", post(owner::create))
        .route("/donos/{id}", put(owner::update).delete(owner::delete))
        .route("/donos/{id}/localizacao", put(owner::update_location))
        .route("/donos/{id}/pets", get(owner::list_pets))
        .route("/donos/{id}/agendamentos", get(owner::list_appointments))
        // Businesses
        .route("/petshops", post(business::create).get(business::list))
        .route(
            "/petshops/{id}",
            get(business::get)
                .put(business::update)
                .delete(business::delete),
        )
        .route("/petshops/{id}/endereco", put(business::update_address))
        .route(
            "/petshops/{id}/servicos",
            get(service::list_by_business).post(service::create_for_business),
        )
        .route(
            "/petshops/{id}/agendamentos",
            get(business::list_appointments),
        )
        // Services
        .route(
            "/servicos/{id}",
            get(service::get)
                .put(service::update)
                .delete(service::delete),
        )
        // Pets
        .route("/pets", post(pet::create))
        .route("/pets/{id}", get(pet::get).put(pet::update))
        .route("/pets/{id}/procedimentos", get(pet::list_procedures))
        // Appointments
        .route("/agendamentos", post(appointment::create))
        .route(
            "/agendamentos/{id}",
            get(appointment::get).put(appointment::update),
        )
        .route("/agendamentos/{id}/status", put(appointment::update_status))
        // Procedures
        .route("/procedimentos", post(procedure::create))
        .with_state(state)
}

/// Runs the API until SIGINT/SIGTERM.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    if config.uses_dev_secret() {
        tracing::warn!("using the built-in development JWT secret; set JWT_SECRET in production");
    }
    let bind_address = config.bind_address;
    let state = Arc::new(AppState::new(Arc::new(config)));
    let router = build_router(state);

    let listener = TcpListener::bind(bind_address).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(bind = %actual_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(?err, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(?err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
