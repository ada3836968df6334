//! SQL literal rendering.
//!
//! Used wherever a statement is shipped as plain text: PostgreSQL inserts over
//! the simple-query protocol, demonstration mutations and dry-run plans.

use super::value::Value;

/// Escape a string for a single-quoted SQL literal by doubling embedded quotes.
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if c == '\'' {
            result.push('\'');
        }
        result.push(c);
    }
    result
}

/// Render a value as a SQL literal.
pub fn quote_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) if f.fract() == 0.0 => format!("{:.2}", f),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => format!("'{}'", escape_string(s)),
    }
}

/// Render a `LIKE` pattern literal matching `fragment` anywhere in the column.
pub fn like_contains(fragment: &str) -> String {
    format!("'%{}%'", escape_string(fragment))
}

/// Render a parenthesised, comma separated tuple of literals.
pub fn values_tuple(row: &[Value]) -> String {
    let literals: Vec<String> = row.iter().map(quote_literal).collect();
    format!("({})", literals.join(", "))
}
