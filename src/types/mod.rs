//! Shared result types.

mod dump;

pub use dump::TableDump;
