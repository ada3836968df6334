//! Cell conversion for the PostgreSQL backend.
//!
//! The simple-query protocol returns every cell as text; the column types
//! reported by a prepared statement decide how each cell is parsed back.

use ::postgres::types::Type;

use crate::db::Value;

/// How a result column's text cells should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Integer,
    Real,
    Text,
}

impl CellKind {
    pub fn for_type(ty: &Type) -> Self {
        if *ty == Type::INT2 || *ty == Type::INT4 || *ty == Type::INT8 {
            CellKind::Integer
        } else if *ty == Type::FLOAT4 || *ty == Type::FLOAT8 || *ty == Type::NUMERIC {
            CellKind::Real
        } else {
            CellKind::Text
        }
    }
}

/// Convert a text cell to a `Value`, falling back to text when parsing fails.
pub fn convert_cell(cell: Option<&str>, kind: CellKind) -> Value {
    let Some(text) = cell else { return Value::Null };
    match kind {
        CellKind::Integer => text
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(text.to_string())),
        CellKind::Real => text
            .parse::<f64>()
            .map(Value::Real)
            .unwrap_or_else(|_| Value::Text(text.to_string())),
        CellKind::Text => Value::Text(text.to_string()),
    }
}
