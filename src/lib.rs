//! vet_clinic library - veterinary clinic schema bootstrap
//!
//! Creates, seeds and verifies the clinic schema (positions, clinics, staff,
//! owners, pets and examinations) on SQLite or PostgreSQL, and provides the
//! command execution and output formatting behind the `vet_clinic` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod output;
pub mod queries;
pub mod seed;
pub mod types;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
