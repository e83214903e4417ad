// In-memory table storage backing the TableRows service.
use grid_shared::models::{Filter, Row, Sort, TableDescriptor};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::filter::{compare_values, matches_all};
use crate::error::EngineError;

type Record = Map<String, Value>;

struct TableData {
    descriptor: TableDescriptor,
    records: Vec<Record>,
}

pub struct TableStore {
    // Keyed by "schema.name"
    tables: HashMap<String, TableData>,
}

fn key(schema: &str, name: &str) -> String {
    format!("{}.{}", schema, name)
}

impl TableStore {
    pub fn new() -> Self {
        TableStore { tables: HashMap::new() }
    }

    /// Registers (or replaces) a table with its initial records.
    pub fn create_table(&mut self, descriptor: TableDescriptor, records: Vec<Record>) -> usize {
        let count = records.len();
        tracing::info!(table = %descriptor.qualified_name(), rows = count, "Registering table");
        self.tables.insert(
            key(&descriptor.schema, &descriptor.name),
            TableData { descriptor, records },
        );
        count
    }

    pub fn table(&self, schema: &str, name: &str) -> Result<&TableDescriptor, EngineError> {
        self.data(schema, name).map(|t| &t.descriptor)
    }

    /// One page of the filtered, sorted rows. `page` is 1-based and `idx` is the
    /// position within the returned page.
    pub fn query_rows(
        &self,
        schema: &str,
        name: &str,
        page: u32,
        limit: u32,
        sorts: &[Sort],
        filters: &[Filter],
    ) -> Result<Vec<Row>, EngineError> {
        if page == 0 {
            return Err(EngineError::InvalidRequest("page is 1-based".to_string()));
        }
        if limit == 0 {
            return Err(EngineError::InvalidRequest("limit must be positive".to_string()));
        }
        let data = self.data(schema, name)?;
        let selected = Self::select(data, sorts, filters)?;
        let offset = (page as usize - 1) * limit as usize;

        Ok(selected
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .enumerate()
            .map(|(idx, record)| Row::new(idx, record.clone()))
            .collect())
    }

    /// Every filtered, sorted row with `idx` set to its position in the full result.
    pub fn fetch_all_rows(&self, schema: &str, name: &str, sorts: &[Sort], filters: &[Filter]) -> Result<Vec<Row>, EngineError> {
        let data = self.data(schema, name)?;
        let selected = Self::select(data, sorts, filters)?;
        Ok(selected
            .into_iter()
            .enumerate()
            .map(|(idx, record)| Row::new(idx, record.clone()))
            .collect())
    }

    pub fn count_rows(&self, schema: &str, name: &str, filters: &[Filter]) -> Result<u64, EngineError> {
        let data = self.data(schema, name)?;
        Self::check_columns(&data.descriptor, filters.iter().map(|f| f.column.as_str()))?;
        let mut count = 0u64;
        for record in &data.records {
            if matches_all(filters, record)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Deletes the stored records identified by `rows`. Rows are matched on the
    /// primary-key columns, or on every column when the table has none.
    pub fn delete_rows(&mut self, schema: &str, name: &str, rows: &[Row]) -> Result<u64, EngineError> {
        let data = self.table_mut(schema, name)?;
        let mut key_columns: Vec<String> = data.descriptor.primary_keys().map(|c| c.name.clone()).collect();
        if key_columns.is_empty() {
            key_columns = data.descriptor.columns.iter().map(|c| c.name.clone()).collect();
        }

        let before = data.records.len();
        data.records.retain(|record| {
            !rows.iter().any(|row| {
                key_columns
                    .iter()
                    .all(|col| record.get(col).unwrap_or(&Value::Null) == row.get(col).unwrap_or(&Value::Null))
            })
        });
        Ok((before - data.records.len()) as u64)
    }

    pub fn delete_all_rows(&mut self, schema: &str, name: &str, filters: &[Filter]) -> Result<u64, EngineError> {
        let data = self.table_mut(schema, name)?;
        Self::check_columns(&data.descriptor, filters.iter().map(|f| f.column.as_str()))?;

        // Evaluate everything first so a bad filter leaves the table untouched
        let mut doomed = Vec::with_capacity(data.records.len());
        for record in &data.records {
            doomed.push(matches_all(filters, record)?);
        }

        let before = data.records.len();
        let mut flags = doomed.into_iter();
        data.records.retain(|_| !flags.next().unwrap_or(false));
        Ok((before - data.records.len()) as u64)
    }

    pub fn truncate(&mut self, schema: &str, name: &str) -> Result<u64, EngineError> {
        let data = self.table_mut(schema, name)?;
        let removed = data.records.len() as u64;
        data.records.clear();
        Ok(removed)
    }

    fn data(&self, schema: &str, name: &str) -> Result<&TableData, EngineError> {
        self.tables
            .get(&key(schema, name))
            .ok_or_else(|| EngineError::TableNotFound(key(schema, name)))
    }

    fn table_mut(&mut self, schema: &str, name: &str) -> Result<&mut TableData, EngineError> {
        self.tables
            .get_mut(&key(schema, name))
            .ok_or_else(|| EngineError::TableNotFound(key(schema, name)))
    }

    fn check_columns<'a>(descriptor: &TableDescriptor, columns: impl IntoIterator<Item = &'a str>) -> Result<(), EngineError> {
        for column in columns {
            if descriptor.column(column).is_none() {
                return Err(EngineError::UnknownColumn {
                    table: descriptor.qualified_name(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    fn select<'a>(data: &'a TableData, sorts: &[Sort], filters: &[Filter]) -> Result<Vec<&'a Record>, EngineError> {
        Self::check_columns(
            &data.descriptor,
            filters.iter().map(|f| f.column.as_str()).chain(sorts.iter().map(|s| s.column.as_str())),
        )?;

        let mut selected = Vec::new();
        for record in &data.records {
            if matches_all(filters, record)? {
                selected.push(record);
            }
        }

        if !sorts.is_empty() {
            selected.sort_by(|a, b| {
                sorts
                    .iter()
                    .map(|s| sort_order(a.get(&s.column), b.get(&s.column), s.ascending))
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }
        Ok(selected)
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

// Direction flips the comparison but NULLs stay last either way.
fn sort_order(a: Option<&Value>, b: Option<&Value>, ascending: bool) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ if ascending => compare_values(a, b),
        _ => compare_values(a, b).reverse(),
    }
}
