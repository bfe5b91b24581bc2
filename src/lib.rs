pub mod cohort;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod infra;
pub mod output;
pub mod registry;
pub mod schema;
pub mod services;
pub mod table;
