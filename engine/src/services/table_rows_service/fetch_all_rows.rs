// Handler for the FetchAllRows RPC
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers::decode_query;
use crate::data::table_store::TableStore;
use crate::services::convert::records_from_rows;
use crate::services::{FetchAllRowsRequest, QueryRowsResponse};

pub async fn handle_fetch_all_rows(
    req_payload: FetchAllRowsRequest,
    table_store: Arc<RwLock<TableStore>>,
    chunk_size: usize,
) -> Result<Response<ReceiverStream<Result<QueryRowsResponse, Status>>>, Status> {
    let query = decode_query(req_payload.table, req_payload.sorts, req_payload.filters)?;

    // Snapshot under the read lock, then stream without holding it
    let store = table_store.read().await;
    let rows = store.fetch_all_rows(&query.table.schema, &query.table.name, &query.sorts, &query.filters)?;
    drop(store);

    let (tx, rx) = mpsc::channel(4);
    let table_for_log = query.table.name.clone();
    let chunk_size = chunk_size.max(1);

    tokio::spawn(async move {
        tracing::debug!(table = %table_for_log, total = rows.len(), chunk_size, "Streaming full result set");
        for chunk in rows.chunks(chunk_size) {
            let message = records_from_rows(chunk)
                .map(|rows| QueryRowsResponse { rows })
                .map_err(Status::from);
            let failed = message.is_err();
            if let Err(e) = tx.send(message).await {
                tracing::warn!(error = ?e, table = %table_for_log, "Client went away during FetchAllRows");
                return;
            }
            if failed {
                return;
            }
        }
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
