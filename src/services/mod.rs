pub mod balance_service;
pub mod blockchain_service;
pub mod network_config;
pub mod provider;
pub mod query_service;
pub mod units;
