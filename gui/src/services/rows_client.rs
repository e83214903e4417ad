// Client side of the TableRows service
use async_trait::async_trait;
use grid_shared::models::{Filter, Row, Sort, TableDescriptor};
use table_engine::services::convert::{records_from_rows, rows_from_records, table_ref};
use table_engine::services::{
    CountRowsRequest, DeleteAllRowsRequest, DeleteRowsRequest, FetchAllRowsRequest, FilterSpec, GetTableRequest,
    QueryRowsRequest, SortSpec, TableRowsClient, TruncateRowsRequest,
};
use tonic::transport::{Channel, Endpoint};

use crate::error::GridError;

/// One page of a table view.
#[derive(Debug, Clone, PartialEq)]
pub struct RowsQuery {
    pub schema: String,
    pub table: String,
    /// 1-based
    pub page: u32,
    pub rows_per_page: u32,
    pub sorts: Vec<Sort>,
    pub filters: Vec<Filter>,
}

/// Remote row queries and mutations used by the grid.
#[async_trait]
pub trait TableRowsApi: Send + Sync {
    async fn get_table(&self, schema: &str, name: &str) -> Result<TableDescriptor, GridError>;

    async fn query_rows(&self, query: &RowsQuery) -> Result<Vec<Row>, GridError>;

    async fn count_rows(&self, table: &TableDescriptor, filters: &[Filter]) -> Result<u64, GridError>;

    async fn delete_rows(&self, table: &TableDescriptor, rows: &[Row]) -> Result<u64, GridError>;

    async fn delete_all_rows(&self, table: &TableDescriptor, filters: &[Filter]) -> Result<u64, GridError>;

    async fn truncate_rows(&self, table: &TableDescriptor) -> Result<u64, GridError>;

    /// The complete filtered and sorted result set, ignoring pagination.
    async fn fetch_all_rows(&self, table: &TableDescriptor, filters: &[Filter], sorts: &[Sort]) -> Result<Vec<Row>, GridError>;
}

#[derive(Clone)]
pub struct GrpcRowsClient {
    client: TableRowsClient<Channel>,
}

fn filter_specs(filters: &[Filter]) -> Vec<FilterSpec> {
    filters.iter().map(FilterSpec::from).collect()
}

fn sort_specs(sorts: &[Sort]) -> Vec<SortSpec> {
    sorts.iter().map(SortSpec::from).collect()
}

impl GrpcRowsClient {
    /// The channel connects on first use, so the UI can start before the engine.
    pub fn connect_lazy(endpoint: String) -> Result<Self, GridError> {
        tracing::info!(endpoint = %endpoint, "Configured table engine client");
        let channel = Endpoint::from_shared(endpoint)?.connect_lazy();
        Ok(Self { client: TableRowsClient::new(channel) })
    }
}

#[async_trait]
impl TableRowsApi for GrpcRowsClient {
    async fn get_table(&self, schema: &str, name: &str) -> Result<TableDescriptor, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(GetTableRequest { table: Some(table_ref(schema, name)) });
        let info = client.get_table(request).await?.into_inner();
        Ok(TableDescriptor::from(info))
    }

    async fn query_rows(&self, query: &RowsQuery) -> Result<Vec<Row>, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(QueryRowsRequest {
            table: Some(table_ref(&query.schema, &query.table)),
            page: query.page,
            limit: query.rows_per_page,
            sorts: sort_specs(&query.sorts),
            filters: filter_specs(&query.filters),
        });
        let response = client.query_rows(request).await?.into_inner();
        Ok(rows_from_records(response.rows)?)
    }

    async fn count_rows(&self, table: &TableDescriptor, filters: &[Filter]) -> Result<u64, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(CountRowsRequest {
            table: Some(table_ref(&table.schema, &table.name)),
            filters: filter_specs(filters),
        });
        Ok(client.count_rows(request).await?.into_inner().count)
    }

    async fn delete_rows(&self, table: &TableDescriptor, rows: &[Row]) -> Result<u64, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(DeleteRowsRequest {
            table: Some(table_ref(&table.schema, &table.name)),
            rows: records_from_rows(rows)?,
        });
        Ok(client.delete_rows(request).await?.into_inner().rows_affected)
    }

    async fn delete_all_rows(&self, table: &TableDescriptor, filters: &[Filter]) -> Result<u64, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(DeleteAllRowsRequest {
            table: Some(table_ref(&table.schema, &table.name)),
            filters: filter_specs(filters),
        });
        Ok(client.delete_all_rows(request).await?.into_inner().rows_affected)
    }

    async fn truncate_rows(&self, table: &TableDescriptor) -> Result<u64, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(TruncateRowsRequest { table: Some(table_ref(&table.schema, &table.name)) });
        Ok(client.truncate_rows(request).await?.into_inner().rows_affected)
    }

    async fn fetch_all_rows(&self, table: &TableDescriptor, filters: &[Filter], sorts: &[Sort]) -> Result<Vec<Row>, GridError> {
        let mut client = self.client.clone();
        let request = tonic::Request::new(FetchAllRowsRequest {
            table: Some(table_ref(&table.schema, &table.name)),
            sorts: sort_specs(sorts),
            filters: filter_specs(filters),
        });
        let mut stream = client.fetch_all_rows(request).await?.into_inner();

        let mut rows = Vec::new();
        while let Some(chunk) = stream.message().await? {
            rows.extend(rows_from_records(chunk.rows)?);
        }
        tracing::debug!(table = %table.qualified_name(), rows = rows.len(), "Fetched full result set");
        Ok(rows)
    }
}
