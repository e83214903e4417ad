pub mod csv_loader;
pub mod filter;
pub mod table_store;
