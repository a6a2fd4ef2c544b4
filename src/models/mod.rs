pub mod address;
pub mod api_response;
pub mod network_config;
pub mod query;
pub mod token;
