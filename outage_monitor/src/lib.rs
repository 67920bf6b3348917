pub mod change_detection;
pub mod check;
pub mod config;
pub mod contracts;
pub mod data;
pub mod fetch_outages;
pub mod place;
pub mod query;
pub mod resolve_status;
