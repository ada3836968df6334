//! Database operations over the clinic schema.
//!
//! - `bootstrap` - plan and run the reset/create/seed procedure
//! - `dump` - full-table listings
//! - `report` - demonstration queries
//! - `integrity` - schema-derived integrity checks

pub mod bootstrap;
pub mod dump;
pub mod integrity;
pub mod report;
