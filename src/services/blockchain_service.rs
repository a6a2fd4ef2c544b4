use std::sync::Arc;

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use log::{debug, info, warn};

use crate::{
    errors::CustomError,
    models::{
        address::WalletAddress,
        network_config::NetworkConfig,
        token::{RawTokenBalance, TokenBalancesResponse, TokenMetadata},
    },
};

use super::provider::TokenDataProvider;

const GET_TOKEN_BALANCES: &str = "alchemy_getTokenBalances";
const GET_TOKEN_METADATA: &str = "alchemy_getTokenMetadata";
const ERC20_TOKEN_SPEC: &str = "erc20";

/// Alchemy's enhanced JSON-RPC API, spoken over an ethers HTTP provider.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: Arc<Provider<Http>>,
    config: NetworkConfig,
}

impl BlockchainClient {
    pub fn new(config: NetworkConfig) -> Result<Self, CustomError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| CustomError::NetworkError(e.to_string()))?;

        Ok(Self {
            provider: Arc::new(provider),
            config,
        })
    }

    pub fn network_name(&self) -> &str {
        &self.config.name
    }

    /// Checks the endpoint answers and serves the expected chain.
    pub async fn check_connection(&self) -> Result<(), CustomError> {
        let connected_chain_id = self.provider.get_chainid().await?;

        if connected_chain_id.as_u64() != self.config.chain_id {
            return Err(CustomError::NetworkError(format!(
                "Connected chain ID {} doesn't match {} ({})",
                connected_chain_id, self.config.name, self.config.chain_id
            )));
        }

        info!("Connected to {}", self.config.name);
        Ok(())
    }
}

#[async_trait]
impl TokenDataProvider for BlockchainClient {
    async fn list_balances(&self, address: &WalletAddress) -> Result<Vec<RawTokenBalance>, CustomError> {
        let response: TokenBalancesResponse = self
            .provider
            .request(GET_TOKEN_BALANCES, (address.as_str(), ERC20_TOKEN_SPEC))
            .await?;

        if let Some(page_key) = &response.page_key {
            warn!(
                "{} holds more tokens than one page, only the first page is shown (next page key {})",
                address, page_key
            );
        }

        Ok(response.token_balances)
    }

    async fn get_metadata(&self, contract_address: &str) -> Result<TokenMetadata, CustomError> {
        debug!("Fetching metadata for {}", contract_address);
        let metadata: TokenMetadata = self
            .provider
            .request(GET_TOKEN_METADATA, [contract_address])
            .await?;
        Ok(metadata)
    }
}
