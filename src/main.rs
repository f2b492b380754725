use passgate::{app, config::AppConfig, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;
    let listener = app::bind(&config).await?;
    let state = AppState::init(config).await?;

    app::serve(listener, app::build_app(state)).await
}
