use anyhow::Context;

use wirecast_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wirecast_observability::init();

    let config = ApiConfig::from_env()?;
    let app = wirecast_api::app::build_app().context("failed to build endpoint registry")?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
