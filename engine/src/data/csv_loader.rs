// Loads a table from a comma-delimited CSV file with a header row
use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, StringRecord};
use grid_shared::models::{Column, TableDescriptor};
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::BufReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InferredType {
    Int,
    Float,
    Bool,
    Text,
}

impl InferredType {
    fn data_type(self) -> &'static str {
        match self {
            InferredType::Int => "int8",
            InferredType::Float => "float8",
            InferredType::Bool => "bool",
            InferredType::Text => "text",
        }
    }

    // Widens the current guess so that `field` still fits.
    fn widen(self, field: &str) -> Self {
        if field.is_empty() {
            return self;
        }
        match self {
            InferredType::Int if field.parse::<i64>().is_ok() => InferredType::Int,
            InferredType::Int | InferredType::Float if field.parse::<f64>().is_ok() => InferredType::Float,
            InferredType::Bool if field.parse::<bool>().is_ok() => InferredType::Bool,
            _ => InferredType::Text,
        }
    }
}

pub struct CsvTableLoader;

impl CsvTableLoader {
    /// Reads `file_path` into a table descriptor plus its records. A column named `id`
    /// (any case) becomes the primary key; empty fields load as NULL.
    pub fn load_table_from_csv(file_path: &str, schema: &str, table: &str) -> Result<(TableDescriptor, Vec<Map<String, Value>>)> {
        let file = File::open(file_path).map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path, e))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(anyhow!("CSV file '{}' has no header row", file_path));
        }

        let mut raw: Vec<StringRecord> = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", idx + 2, e))?;
            raw.push(record);
        }

        let types = Self::infer_types(&headers, &raw);
        let columns: Vec<Column> = headers
            .iter()
            .zip(&types)
            .map(|(name, ty)| {
                let column = Column::new(name, ty.data_type());
                if name.eq_ignore_ascii_case("id") {
                    column.primary_key()
                } else {
                    column
                }
            })
            .collect();

        let mut records = Vec::with_capacity(raw.len());
        for (line, record) in raw.iter().enumerate() {
            let mut values = Map::new();
            for ((name, ty), field) in headers.iter().zip(&types).zip(record.iter()) {
                let value = Self::to_value(field, *ty)
                    .ok_or_else(|| anyhow!("Error parsing '{}' at line {}: '{}'", name, line + 2, field))?;
                values.insert(name.to_string(), value);
            }
            records.push(values);
        }

        tracing::debug!(path = %file_path, rows = records.len(), columns = columns.len(), "Loaded CSV table");
        Ok((TableDescriptor::new(schema, table, columns), records))
    }

    fn infer_types(headers: &StringRecord, records: &[StringRecord]) -> Vec<InferredType> {
        (0..headers.len())
            .map(|col| {
                let mut ty = InferredType::Int;
                let mut seen_value = false;
                for record in records {
                    let field = record.get(col).unwrap_or("");
                    if field.is_empty() {
                        continue;
                    }
                    // Bool only wins when the first value already looks like one
                    if !seen_value && field.parse::<bool>().is_ok() {
                        ty = InferredType::Bool;
                    }
                    seen_value = true;
                    ty = ty.widen(field);
                }
                if seen_value {
                    ty
                } else {
                    InferredType::Text
                }
            })
            .collect()
    }

    fn to_value(field: &str, ty: InferredType) -> Option<Value> {
        if field.is_empty() {
            return Some(Value::Null);
        }
        match ty {
            InferredType::Int => field.parse::<i64>().ok().map(Value::from),
            InferredType::Float => field.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number),
            InferredType::Bool => field.parse::<bool>().ok().map(Value::Bool),
            InferredType::Text => Some(Value::String(field.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_table_infers_types_and_primary_key() {
        let csv_content = "\
ID,name,score,active
1,ada,9.5,true
2,grace,,false
3,alan,7,";
        let tmp_file = create_test_csv(csv_content);
        let (table, records) = CsvTableLoader::load_table_from_csv(tmp_file.path().to_str().unwrap(), "public", "people").unwrap();

        assert_eq!(table.qualified_name(), "public.people");
        let types: Vec<&str> = table.columns.iter().map(|c| c.data_type.as_str()).collect();
        assert_eq!(types, vec!["int8", "text", "float8", "bool"]);
        assert!(table.columns[0].is_primary_key);
        assert!(!table.columns[1].is_primary_key);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("ID"), Some(&json!(1)));
        assert_eq!(records[0].get("score"), Some(&json!(9.5)));
        assert_eq!(records[1].get("score"), Some(&Value::Null));
        assert_eq!(records[2].get("score"), Some(&json!(7.0)));
        assert_eq!(records[2].get("active"), Some(&Value::Null));
    }

    #[test]
    fn test_load_table_header_only() {
        let tmp_file = create_test_csv("id,name");
        let (table, records) = CsvTableLoader::load_table_from_csv(tmp_file.path().to_str().unwrap(), "public", "empty").unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[1].data_type, "text");
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_table_missing_file() {
        let result = CsvTableLoader::load_table_from_csv("non_existent_file.csv", "public", "x");
        assert!(result.unwrap_err().to_string().contains("Failed to open CSV file"));
    }

    #[test]
    fn test_load_table_ragged_record_fails() {
        let tmp_file = create_test_csv("id,name\n1,ada,extra");
        let result = CsvTableLoader::load_table_from_csv(tmp_file.path().to_str().unwrap(), "public", "x");
        assert!(result.unwrap_err().to_string().contains("line 2"));
    }
}
