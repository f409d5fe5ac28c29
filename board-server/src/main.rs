use board_server::config::ServerConfig;
use board_server::feed::{DirectorySource, SharedFeed};
use board_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Load provider data (fail fast if unavailable)
    tracing::info!(dir = %config.data_dir.display(), "loading train data");
    let feed = SharedFeed::load(DirectorySource::new(&config.data_dir))?;
    {
        let snapshot = feed.snapshot().await;
        tracing::info!(
            stations = snapshot.stations().len(),
            trains = snapshot.trains().len(),
            "loaded train data"
        );
    }

    // Spawn background task to refresh the feed
    let feed_refresh = feed.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match feed_refresh.refresh().await {
                Ok(summary) => tracing::info!(
                    stations = summary.stations,
                    trains = summary.trains,
                    "refreshed train data"
                ),
                Err(e) => tracing::warn!(error = %e, "failed to refresh train data"),
            }
        }
    });

    let state = AppState::new(feed, config.window, config.refresh_interval);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "station boards listening");
    tracing::info!("open http://{} in your browser", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
