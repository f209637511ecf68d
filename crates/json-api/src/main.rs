//! Cakeshop JSON API Server

use std::{process, sync::Arc};

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info};

use cakeshop_app::{context::AppContext, domain::tenants::records::TenantUuid};

use crate::{
    config::ServerConfig, context::FixedContextResolver, observability::Observability,
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod carts;
mod config;
mod context;
mod envelope;
mod errors;
mod extensions;
mod healthcheck;
mod money;
mod observability;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Cakeshop JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "tracing subscriber failed to initialise, eprintln is the only sink"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    errors::configure(config.server.app_env);

    let addr = config.socket_addr();

    info!(app_env = ?config.server.app_env, "starting server on {addr}");

    let app = match AppContext::from_database_url(&config.database.database_url).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let tenant = config.context.tenant_uuid.map(TenantUuid::from_uuid);

    if tenant.is_none() {
        info!("DEFAULT_TENANT_UUID is unset; tenant-scoped routes will reject requests");
    }

    let state = State::from_app_context(app, Arc::new(FixedContextResolver::new(tenant)));

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router());

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
