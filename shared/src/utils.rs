// Small formatting helpers shared by the engine, the CSV export and the GUI labels.
use serde_json::Value;

/// Groups digits in threes with commas, e.g. `1200000` -> `"1,200,000"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"row"` for exactly one, `"rows"` otherwise.
pub fn row_noun(count: u64) -> &'static str {
    if count == 1 {
        "row"
    } else {
        "rows"
    }
}

/// Plain text of a cell: strings unquoted, NULL empty, anything else as compact JSON.
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
