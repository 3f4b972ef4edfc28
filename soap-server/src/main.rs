use std::sync::Arc;

use log::info;
use soap_server::{
    AppState, Config, InMemoryPersonRepository, PersonRepository, SqlitePersonRepository,
    StorageConfig,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let repo: Arc<dyn PersonRepository> = match &config.storage {
        StorageConfig::Memory => Arc::new(InMemoryPersonRepository::new()),
        StorageConfig::SqliteMemory => Arc::new(SqlitePersonRepository::open_in_memory()?),
        StorageConfig::SqliteFile(path) => Arc::new(SqlitePersonRepository::open(path)?),
    };

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("event=server_start addr={addr} storage={:?}", config.storage);
    soap_server::run(listener, AppState::new(repo)).await?;
    Ok(())
}
