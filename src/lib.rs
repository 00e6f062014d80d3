//! Genomic sequence range queries over indexed stores.
//!
//! A query is an organism identifier plus a location such as
//! `chr1:100..200:-1`. [`QueryService`] parses and validates the location,
//! resolves the organism's backend through a
//! [`SequenceIndexRegistry`](registry::SequenceIndexRegistry), fetches the
//! range and reverse-complements reverse-strand results.

pub mod config;
pub mod error;
pub mod handlers;
pub mod location;
pub mod registry;
pub mod sequence;
pub mod service;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Error, Result};
pub use service::QueryService;
