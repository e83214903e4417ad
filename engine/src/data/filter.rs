// Filter evaluation and value ordering for the in-memory table store.
use grid_shared::models::{Filter, FilterOperator};
use grid_shared::utils::cell_text;
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::error::EngineError;

/// Returns true when the row satisfies `filter`. SQL-style: comparisons against NULL are false.
pub fn matches(filter: &Filter, values: &Map<String, Value>) -> Result<bool, EngineError> {
    let cell = values.get(&filter.column).unwrap_or(&Value::Null);

    if filter.operator == FilterOperator::Is {
        return match_is(cell, &filter.value);
    }
    if cell.is_null() {
        return Ok(false);
    }

    let matched = match filter.operator {
        FilterOperator::Equal => compare_to_text(cell, &filter.value) == Ordering::Equal,
        FilterOperator::NotEqual => compare_to_text(cell, &filter.value) != Ordering::Equal,
        FilterOperator::GreaterThan => compare_to_text(cell, &filter.value) == Ordering::Greater,
        FilterOperator::LessThan => compare_to_text(cell, &filter.value) == Ordering::Less,
        FilterOperator::GreaterOrEqual => compare_to_text(cell, &filter.value) != Ordering::Less,
        FilterOperator::LessOrEqual => compare_to_text(cell, &filter.value) != Ordering::Greater,
        FilterOperator::Like => like(&cell_text(cell), &filter.value),
        FilterOperator::ILike => like(&cell_text(cell).to_lowercase(), &filter.value.to_lowercase()),
        FilterOperator::In => filter
            .value
            .split(',')
            .map(str::trim)
            .any(|candidate| compare_to_text(cell, candidate) == Ordering::Equal),
        FilterOperator::Is => unreachable!("handled above"),
    };
    Ok(matched)
}

pub fn matches_all(filters: &[Filter], values: &Map<String, Value>) -> Result<bool, EngineError> {
    for filter in filters {
        if !matches(filter, values)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn match_is(cell: &Value, expected: &str) -> Result<bool, EngineError> {
    match expected.trim().to_lowercase().as_str() {
        "null" => Ok(cell.is_null()),
        "not null" => Ok(!cell.is_null()),
        "true" => Ok(cell.as_bool() == Some(true)),
        "false" => Ok(cell.as_bool() == Some(false)),
        other => Err(EngineError::InvalidFilter(format!(
            "'is' expects null, not null, true or false, got '{}'",
            other
        ))),
    }
}

// Numeric when both sides are numbers, boolean when both are booleans, text otherwise.
fn compare_to_text(cell: &Value, raw: &str) -> Ordering {
    match cell {
        Value::Number(n) => match (n.as_f64(), raw.trim().parse::<f64>()) {
            (Some(lhs), Ok(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
            _ => cell_text(cell).as_str().cmp(raw),
        },
        Value::Bool(b) => match raw.trim().parse::<bool>() {
            Ok(rhs) => b.cmp(&rhs),
            Err(_) => cell_text(cell).as_str().cmp(raw),
        },
        _ => cell_text(cell).as_str().cmp(raw),
    }
}

/// Ordering used by sorts. NULLs (and missing values) sort after everything else.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => x.to_string().cmp(&y.to_string()),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => cell_text(a).cmp(&cell_text(b)),
    }
}

// SQL LIKE: `%` matches any run, `_` matches one character.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // dp[j]: pattern[..i] matches text[..j]
    let mut dp = vec![false; text.len() + 1];
    dp[0] = true;
    for p in &pattern {
        let mut next = vec![false; text.len() + 1];
        match p {
            '%' => {
                let mut seen = false;
                for j in 0..=text.len() {
                    seen = seen || dp[j];
                    next[j] = seen;
                }
            }
            '_' => {
                for j in 1..=text.len() {
                    next[j] = dp[j - 1];
                }
            }
            c => {
                for j in 1..=text.len() {
                    next[j] = dp[j - 1] && text[j - 1] == *c;
                }
            }
        }
        dp = next;
    }
    dp[text.len()]
}
