//! Server bootstrap: pool construction, migrations, and the Actix app.

pub mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::{HttpState, routes};
use crate::outbound::HickoryMxResolver;
use crate::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// Build the pool, apply migrations, and serve until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let pool = DbPool::new(
        PoolConfig::new(config.database_url()).with_max_size(config.pool_max_size()),
    )
    .map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let resolver = Arc::new(HickoryMxResolver::from_system());
    let state = HttpState::new(pool, resolver);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays shared.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .wrap(middleware::NormalizePath::trim())
            .configure(routes)
            .service(health::ready)
            .service(health::live);

        #[cfg(debug_assertions)]
        {
            app = app.service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        app
    })
    .bind(config.bind_addr())?;

    info!(addr = %config.bind_addr(), "listening");
    health_state.mark_ready();
    server.run().await
}
