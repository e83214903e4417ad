pub mod csv_export;
pub mod models;
pub mod utils;

pub use csv_export::export_rows_to_csv;
pub use models::{Column, Filter, FilterOperator, Row, Sort, TableDescriptor};
