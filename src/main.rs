use fantasy_wiki::{app_router, connect, ensure_database_exists, model, run_migrations, AppConfig, AppState, ENTITIES};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fantasy_wiki=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    model::validate(&ENTITIES)?;

    ensure_database_exists(&config.database_url).await?;
    let pool = connect(&config).await?;
    run_migrations(&pool).await?;
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let app = app_router(AppState::new(pool, config));

    tracing::info!("fantasy wiki listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
