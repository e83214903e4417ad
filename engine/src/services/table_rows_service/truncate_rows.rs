// Handler for the TruncateRows RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::table_store::TableStore;
use crate::services::convert::require_table;
use crate::services::{MutationResponse, TruncateRowsRequest};

pub async fn handle_truncate_rows(
    req_payload: TruncateRowsRequest,
    table_store: Arc<RwLock<TableStore>>,
) -> Result<Response<MutationResponse>, Status> {
    let table = require_table(req_payload.table)?;
    let mut store = table_store.write().await;
    let rows_affected = store.truncate(&table.schema, &table.name)?;
    drop(store);

    tracing::info!(table = %table.name, rows_affected, "Truncated table");
    Ok(Response::new(MutationResponse { rows_affected }))
}
