// The TableRows gRPC service. Each RPC is handled in its own submodule.
use super::{
    CountRowsRequest, CountRowsResponse, DeleteAllRowsRequest, DeleteRowsRequest, FetchAllRowsRequest,
    GetTableRequest, MutationResponse, QueryRowsRequest, QueryRowsResponse, TableInfo, TableRows,
    TruncateRowsRequest,
};
use crate::data::table_store::TableStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod count_rows;
pub mod delete_all_rows;
pub mod delete_rows;
pub mod fetch_all_rows;
pub mod get_table;
pub mod helpers;
pub mod query_rows;
pub mod truncate_rows;

pub struct TableRowsEngine {
    table_store: Arc<RwLock<TableStore>>,
    fetch_chunk_size: usize,
}

impl TableRowsEngine {
    pub fn new(table_store: Arc<RwLock<TableStore>>, fetch_chunk_size: usize) -> Self {
        TableRowsEngine { table_store, fetch_chunk_size }
    }
}

fn table_name(table: &Option<super::TableRef>) -> String {
    table.as_ref().map(|t| format!("{}.{}", t.schema, t.name)).unwrap_or_default()
}

#[tonic::async_trait]
impl TableRows for TableRowsEngine {
    async fn get_table(&self, request: Request<GetTableRequest>) -> Result<Response<TableInfo>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(table = %table_name(&req_payload.table), "Received GetTableRequest");
        get_table::handle_get_table(req_payload, self.table_store.clone()).await
    }

    async fn query_rows(&self, request: Request<QueryRowsRequest>) -> Result<Response<QueryRowsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            table = %table_name(&req_payload.table),
            page = req_payload.page,
            limit = req_payload.limit,
            sorts = req_payload.sorts.len(),
            filters = req_payload.filters.len(),
            "Received QueryRowsRequest"
        );
        query_rows::handle_query_rows(req_payload, self.table_store.clone()).await
    }

    async fn count_rows(&self, request: Request<CountRowsRequest>) -> Result<Response<CountRowsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            table = %table_name(&req_payload.table),
            filters = req_payload.filters.len(),
            "Received CountRowsRequest"
        );
        count_rows::handle_count_rows(req_payload, self.table_store.clone()).await
    }

    async fn delete_rows(&self, request: Request<DeleteRowsRequest>) -> Result<Response<MutationResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            table = %table_name(&req_payload.table),
            rows = req_payload.rows.len(),
            "Received DeleteRowsRequest"
        );
        delete_rows::handle_delete_rows(req_payload, self.table_store.clone()).await
    }

    async fn delete_all_rows(&self, request: Request<DeleteAllRowsRequest>) -> Result<Response<MutationResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            table = %table_name(&req_payload.table),
            filters = req_payload.filters.len(),
            "Received DeleteAllRowsRequest"
        );
        delete_all_rows::handle_delete_all_rows(req_payload, self.table_store.clone()).await
    }

    async fn truncate_rows(&self, request: Request<TruncateRowsRequest>) -> Result<Response<MutationResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(table = %table_name(&req_payload.table), "Received TruncateRowsRequest");
        truncate_rows::handle_truncate_rows(req_payload, self.table_store.clone()).await
    }

    type FetchAllRowsStream = ReceiverStream<Result<QueryRowsResponse, Status>>;
    async fn fetch_all_rows(&self, request: Request<FetchAllRowsRequest>) -> Result<Response<Self::FetchAllRowsStream>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            table = %table_name(&req_payload.table),
            sorts = req_payload.sorts.len(),
            filters = req_payload.filters.len(),
            "Received FetchAllRowsRequest"
        );
        fetch_all_rows::handle_fetch_all_rows(req_payload, self.table_store.clone(), self.fetch_chunk_size).await
    }
}
