use async_trait::async_trait;

use crate::{
    errors::CustomError,
    models::{
        address::WalletAddress,
        token::{RawTokenBalance, TokenMetadata},
    },
};

/// Source of raw ERC-20 balances and token metadata.
#[async_trait]
pub trait TokenDataProvider: Send + Sync {
    /// Lists the ERC-20 balances held by `address`, in provider order.
    async fn list_balances(&self, address: &WalletAddress) -> Result<Vec<RawTokenBalance>, CustomError>;

    /// Returns name, symbol, decimals and logo of one token contract.
    async fn get_metadata(&self, contract_address: &str) -> Result<TokenMetadata, CustomError>;
}
