// Handler for the CountRows RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::decode_query;
use crate::data::table_store::TableStore;
use crate::services::{CountRowsRequest, CountRowsResponse};

pub async fn handle_count_rows(
    req_payload: CountRowsRequest,
    table_store: Arc<RwLock<TableStore>>,
) -> Result<Response<CountRowsResponse>, Status> {
    let query = decode_query(req_payload.table, Vec::new(), req_payload.filters)?;
    let store = table_store.read().await;
    let count = store.count_rows(&query.table.schema, &query.table.name, &query.filters)?;
    Ok(Response::new(CountRowsResponse { count }))
}
