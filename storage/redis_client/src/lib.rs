pub mod client;
pub mod config;
pub mod status_store;
