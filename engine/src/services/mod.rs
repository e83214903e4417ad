// gRPC surface of the engine: generated code, domain conversions and the service itself.
pub mod generated {
    tonic::include_proto!("table_rows");
}

pub mod convert;
pub mod table_rows_service;

pub use generated::table_rows_client::TableRowsClient;
pub use generated::table_rows_server::{TableRows, TableRowsServer};
pub use generated::{
    ColumnInfo, CountRowsRequest, CountRowsResponse, DeleteAllRowsRequest, DeleteRowsRequest,
    FetchAllRowsRequest, FilterSpec, GetTableRequest, MutationResponse, QueryRowsRequest,
    QueryRowsResponse, RowRecord, SortSpec, TableInfo, TableRef, TruncateRowsRequest,
};
