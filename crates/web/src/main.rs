use anyhow::Context;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod gates;
mod middleware;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::submissions::handlers::submit_result,
        features::results::handlers::get_result,
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::get_leaderboard_all,
        features::consent::handlers::grant_consent,
        features::consent::handlers::revoke_consent,
        features::admin::handlers::list_results,
        features::admin::handlers::override_result,
        features::admin::handlers::delete_result,
        features::admin::handlers::set_minor,
    ),
    components(
        schemas(
            storage::dto::submission::SubmitResultRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::SubmissionStatus,
            storage::dto::result::ResultResponse,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::dto::leaderboard::TierBucketResponse,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::consent::GrantConsentRequest,
            storage::dto::consent::ConsentResponse,
            storage::dto::admin::OverrideResultRequest,
            storage::dto::admin::SetMinorRequest,
            storage::models::Tier,
            storage::models::UpsertOutcome,
            storage::models::ShooterResult,
            storage::models::ConsentRecord,
            storage::services::promotion::PromotionEvent,
        )
    ),
    tags(
        (name = "submissions", description = "Score submission endpoints"),
        (name = "results", description = "Personal result endpoints"),
        (name = "leaderboard", description = "Tiered leaderboard endpoints"),
        (name = "consent", description = "Data-processing consent endpoints"),
        (name = "admin", description = "Administrative endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting scoreboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    db.init_schema()
        .await
        .context("Failed to initialize schema")?;
    tracing::info!("Database ready at {}", config.database_url);

    let state = AppState::new(db, &config);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let app = axum::Router::new()
        .nest("/api/submissions", features::submissions::routes::routes())
        .nest("/api/results", features::results::routes::routes())
        .nest("/api/leaderboard", features::leaderboard::routes::routes())
        .nest("/api/consent", features::consent::routes::routes())
        .nest("/api/admin", features::admin::routes::routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
