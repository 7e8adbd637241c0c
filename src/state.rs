use bridgeschool_auth::TokenVerifier;
use bridgeschool_config::{CorsConfig, JwtConfig, ServerConfig};
use sqlx::PgPool;
use tracing::error;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: TokenVerifier,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        server_config: ServerConfig,
    ) -> Self {
        Self {
            db,
            verifier: TokenVerifier::new(&jwt_config),
            jwt_config,
            cors_config,
            server_config,
        }
    }
}

/// Loads configuration once, connects to the database and applies migrations.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    if jwt_config.secret.is_none() {
        error!("NEXTAUTH_SECRET is not set; every protected request will fail with 500");
    }

    let db = bridgeschool_db::init_db_pool_from_env().await?;
    bridgeschool_db::run_migrations(&db).await?;

    Ok(AppState::new(
        db,
        jwt_config,
        CorsConfig::from_env(),
        ServerConfig::from_env(),
    ))
}

#[cfg(any(test, feature = "test-utils"))]
impl AppState {
    /// State over a pool that only connects on first use, for exercising
    /// routes that never reach the database.
    pub fn lazy(jwt_config: JwtConfig) -> anyhow::Result<Self> {
        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://bridgeschool@127.0.0.1:1/unused")?;

        Ok(Self::new(
            db,
            jwt_config,
            CorsConfig::from_lookup(|_| None),
            ServerConfig::from_lookup(|_| None),
        ))
    }
}
