// CSV serialization of grid rows for the "Export to CSV" action.
use anyhow::{anyhow, Result};
use csv::WriterBuilder;

use crate::models::{Column, Row};
use crate::utils::cell_text;

/// Renders `rows` as comma-delimited CSV with a header row of column names.
/// Field order follows `columns`; values missing from a row are written as empty fields.
pub fn export_rows_to_csv(columns: &[Column], rows: &[Row]) -> Result<String> {
    let mut wtr = WriterBuilder::new().delimiter(b',').from_writer(Vec::new());

    wtr.write_record(columns.iter().map(|c| c.name.as_str()))?;
    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| row.get(&c.name).map(cell_text).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).map_err(|e| anyhow!("CSV output is not valid UTF-8: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn row(idx: usize, value: Value) -> Row {
        let values: Map<String, Value> = value.as_object().cloned().unwrap();
        Row::new(idx, values)
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "int8").primary_key(),
            Column::new("name", "text"),
            Column::new("meta", "jsonb"),
        ]
    }

    #[test]
    fn test_export_follows_column_order() {
        let rows = vec![row(0, json!({"name": "ada", "meta": {"a": 1}, "id": 1}))];
        let csv = export_rows_to_csv(&columns(), &rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,name,meta"));
        assert_eq!(lines.next(), Some(r#"1,ada,"{""a"":1}""#));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_nulls_and_missing_as_empty() {
        let rows = vec![row(0, json!({"id": 2, "name": null}))];
        let csv = export_rows_to_csv(&columns(), &rows).unwrap();
        assert_eq!(csv.lines().nth(1), Some("2,,"));
    }

    #[test]
    fn test_export_quotes_commas_and_newlines() {
        let rows = vec![row(0, json!({"id": 3, "name": "Lovelace, Ada\nCountess", "meta": true}))];
        let csv = export_rows_to_csv(&columns(), &rows).unwrap();
        assert!(csv.contains("3,\"Lovelace, Ada\nCountess\",true"));
    }

    #[test]
    fn test_export_with_no_rows_keeps_header() {
        let csv = export_rows_to_csv(&columns(), &[]).unwrap();
        assert_eq!(csv, "id,name,meta\n");
    }
}
