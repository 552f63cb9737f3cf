mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::build_info::BuildInfo;
use services::session::PgSessionResolver;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    let resolver = Arc::new(PgSessionResolver::new(pool, config.session_resolve_timeout));
    let build = BuildInfo::from_env(config.cookie_secure, config.failure_policy);
    tracing::info!(
        version = %build.version,
        commit = %build.commit,
        env = %build.env,
        failure_policy = config.failure_policy.as_str(),
        "build info loaded"
    );

    let state = state::AppState::new(resolver, config.failure_policy, build);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "dashgate listening");
    axum::serve(listener, app).await.expect("server failed");
}
