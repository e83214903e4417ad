// Engine main entry point
use table_engine::build_store;
use table_engine::config::settings::EngineSettings;
use table_engine::services::table_rows_service::TableRowsEngine;
use table_engine::services::TableRowsServer;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting table engine...");

    let settings = EngineSettings::from_env()?;
    let addr = settings.listen_addr().parse()?;
    info!("Engine will listen on {}", addr);

    let table_store = build_store(&settings)?;
    let table_rows_service = TableRowsEngine::new(table_store, settings.fetch_chunk_size);

    Server::builder()
        .add_service(TableRowsServer::new(table_rows_service))
        .serve(addr)
        .await?;

    Ok(())
}
