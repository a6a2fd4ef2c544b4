use crate::{errors::CustomError, models::network_config::NetworkConfig};

pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Alchemy endpoint for Ethereum mainnet, the only network balances are read from.
pub fn get_network_config(api_key: &str, rpc_url_override: Option<&str>) -> Result<NetworkConfig, CustomError> {
    let rpc_url = match rpc_url_override {
        Some(url) => url.to_string(),
        None => {
            if api_key.trim().is_empty() {
                return Err(CustomError::ConfigError(
                    "ALCHEMY_API_KEY must not be empty".to_string(),
                ));
            }
            format!("https://eth-mainnet.g.alchemy.com/v2/{}", api_key.trim())
        }
    };

    Ok(NetworkConfig {
        chain_id: ETHEREUM_MAINNET_CHAIN_ID,
        name: "Ethereum Mainnet".to_string(),
        rpc_url,
    })
}
