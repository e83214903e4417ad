// Request decoding shared by the TableRows handlers
use grid_shared::models::{Filter, Sort};

use crate::error::EngineError;
use crate::services::convert::{filters_from_specs, require_table, sorts_from_specs};
use crate::services::{FilterSpec, SortSpec, TableRef};

pub struct DecodedQuery {
    pub table: TableRef,
    pub sorts: Vec<Sort>,
    pub filters: Vec<Filter>,
}

pub fn decode_query(
    table: Option<TableRef>,
    sorts: Vec<SortSpec>,
    filters: Vec<FilterSpec>,
) -> Result<DecodedQuery, EngineError> {
    Ok(DecodedQuery {
        table: require_table(table)?,
        sorts: sorts_from_specs(sorts),
        filters: filters_from_specs(filters)?,
    })
}
