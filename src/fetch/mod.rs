//! HTTP plumbing and the per-year download driver.

mod basic;
mod client;
mod download;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use download::{YearTable, fetch_all_years};
