use trivia_api::{db, server::app::run_server, settings::Settings, telemetry::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let settings = Settings::load()?;
    let pool = db::establish_connection(&settings.db_path).await?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(pool, &settings.address()).await
}
