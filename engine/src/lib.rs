// Table-rows engine: in-memory tables served over gRPC.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

use std::sync::Arc;
use tokio::sync::RwLock;

use config::settings::EngineSettings;
use data::csv_loader::CsvTableLoader;
use data::table_store::TableStore;

/// Builds the table store, loading the configured seed CSV if there is one.
pub fn build_store(settings: &EngineSettings) -> anyhow::Result<Arc<RwLock<TableStore>>> {
    let mut store = TableStore::new();
    if let Some(seed) = &settings.seed {
        let (descriptor, records) = CsvTableLoader::load_table_from_csv(&seed.csv_path, &seed.schema, &seed.table)?;
        store.create_table(descriptor, records);
    }
    Ok(Arc::new(RwLock::new(store)))
}
