pub mod configuration;
pub mod http_client;
pub mod tracing;
pub mod warsaw_date_time;
