// Handler for the GetTable RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::table_store::TableStore;
use crate::services::convert::require_table;
use crate::services::{GetTableRequest, TableInfo};

pub async fn handle_get_table(
    req_payload: GetTableRequest,
    table_store: Arc<RwLock<TableStore>>,
) -> Result<Response<TableInfo>, Status> {
    let table = require_table(req_payload.table)?;
    let store = table_store.read().await;
    let descriptor = store.table(&table.schema, &table.name)?;
    Ok(Response::new(TableInfo::from(descriptor)))
}
