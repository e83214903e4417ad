// Conversions between the shared domain models and the generated protobuf messages.
// Used by the service here and by the GUI's client.
use grid_shared::models::{Column, Filter, Row, Sort, TableDescriptor};
use serde_json::{Map, Value};

use super::{ColumnInfo, FilterSpec, RowRecord, SortSpec, TableInfo, TableRef};
use crate::error::EngineError;

pub fn table_ref(schema: &str, name: &str) -> TableRef {
    TableRef { schema: schema.to_string(), name: name.to_string() }
}

pub fn require_table(table: Option<TableRef>) -> Result<TableRef, EngineError> {
    table.ok_or_else(|| EngineError::InvalidRequest("Missing table reference".to_string()))
}

impl From<&TableDescriptor> for TableInfo {
    fn from(table: &TableDescriptor) -> Self {
        TableInfo {
            schema: table.schema.clone(),
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name.clone(),
                    data_type: c.data_type.clone(),
                    is_primary_key: c.is_primary_key,
                })
                .collect(),
        }
    }
}

impl From<TableInfo> for TableDescriptor {
    fn from(info: TableInfo) -> Self {
        TableDescriptor {
            schema: info.schema,
            name: info.name,
            columns: info
                .columns
                .into_iter()
                .map(|c| Column {
                    name: c.name,
                    data_type: c.data_type,
                    is_primary_key: c.is_primary_key,
                })
                .collect(),
        }
    }
}

impl From<&Sort> for SortSpec {
    fn from(sort: &Sort) -> Self {
        SortSpec { column: sort.column.clone(), ascending: sort.ascending }
    }
}

impl From<SortSpec> for Sort {
    fn from(spec: SortSpec) -> Self {
        Sort { column: spec.column, ascending: spec.ascending }
    }
}

impl From<&Filter> for FilterSpec {
    fn from(filter: &Filter) -> Self {
        FilterSpec {
            column: filter.column.clone(),
            operator: filter.operator.as_str().to_string(),
            value: filter.value.clone(),
        }
    }
}

impl TryFrom<FilterSpec> for Filter {
    type Error = EngineError;

    fn try_from(spec: FilterSpec) -> Result<Self, Self::Error> {
        let operator = spec.operator.parse().map_err(EngineError::InvalidFilter)?;
        Ok(Filter { column: spec.column, operator, value: spec.value })
    }
}

pub fn to_row_record(row: &Row) -> Result<RowRecord, EngineError> {
    Ok(RowRecord {
        idx: row.idx as u64,
        values_json: serde_json::to_string(&row.values)?,
    })
}

pub fn from_row_record(record: RowRecord) -> Result<Row, EngineError> {
    let values: Map<String, Value> = serde_json::from_str(&record.values_json)?;
    Ok(Row { idx: record.idx as usize, values })
}

pub fn sorts_from_specs(specs: Vec<SortSpec>) -> Vec<Sort> {
    specs.into_iter().map(Sort::from).collect()
}

pub fn filters_from_specs(specs: Vec<FilterSpec>) -> Result<Vec<Filter>, EngineError> {
    specs.into_iter().map(Filter::try_from).collect()
}

pub fn rows_from_records(records: Vec<RowRecord>) -> Result<Vec<Row>, EngineError> {
    records.into_iter().map(from_row_record).collect()
}

pub fn records_from_rows(rows: &[Row]) -> Result<Vec<RowRecord>, EngineError> {
    rows.iter().map(to_row_record).collect()
}
