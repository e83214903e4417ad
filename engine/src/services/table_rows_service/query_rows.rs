// Handler for the QueryRows RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::decode_query;
use crate::data::table_store::TableStore;
use crate::services::convert::records_from_rows;
use crate::services::{QueryRowsRequest, QueryRowsResponse};

pub async fn handle_query_rows(
    req_payload: QueryRowsRequest,
    table_store: Arc<RwLock<TableStore>>,
) -> Result<Response<QueryRowsResponse>, Status> {
    let page = req_payload.page;
    let limit = req_payload.limit;
    let query = decode_query(req_payload.table, req_payload.sorts, req_payload.filters)?;

    let store = table_store.read().await;
    let rows = store.query_rows(&query.table.schema, &query.table.name, page, limit, &query.sorts, &query.filters)?;
    drop(store);

    tracing::debug!(table = %query.table.name, page, limit, returned = rows.len(), "Served row page");
    Ok(Response::new(QueryRowsResponse { rows: records_from_rows(&rows)? }))
}
