// Handler for the DeleteRows RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::table_store::TableStore;
use crate::services::convert::{require_table, rows_from_records};
use crate::services::{DeleteRowsRequest, MutationResponse};

pub async fn handle_delete_rows(
    req_payload: DeleteRowsRequest,
    table_store: Arc<RwLock<TableStore>>,
) -> Result<Response<MutationResponse>, Status> {
    let table = require_table(req_payload.table)?;
    let rows = rows_from_records(req_payload.rows)?;

    let mut store = table_store.write().await;
    let rows_affected = store.delete_rows(&table.schema, &table.name, &rows)?;
    drop(store);

    tracing::info!(table = %table.name, requested = rows.len(), rows_affected, "Deleted rows");
    Ok(Response::new(MutationResponse { rows_affected }))
}
