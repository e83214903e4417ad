// Handler for the DeleteAllRows RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::decode_query;
use crate::data::table_store::TableStore;
use crate::services::{DeleteAllRowsRequest, MutationResponse};

pub async fn handle_delete_all_rows(
    req_payload: DeleteAllRowsRequest,
    table_store: Arc<RwLock<TableStore>>,
) -> Result<Response<MutationResponse>, Status> {
    let query = decode_query(req_payload.table, Vec::new(), req_payload.filters)?;

    let mut store = table_store.write().await;
    let rows_affected = store.delete_all_rows(&query.table.schema, &query.table.name, &query.filters)?;
    drop(store);

    tracing::info!(table = %query.table.name, filters = query.filters.len(), rows_affected, "Deleted all matching rows");
    Ok(Response::new(MutationResponse { rows_affected }))
}
