//! Socrata SODA client for the SPARCS datasets.

mod client;

pub use client::{DEFAULT_PAGE_SIZE, SocrataClient, append_records};
