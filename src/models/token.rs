use serde::{Deserialize, Serialize};

pub const DEFAULT_DECIMALS: u16 = 18;

/// One entry of `alchemy_getTokenBalances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenBalance {
    pub contract_address: String,
    /// Hex (`0x…`) or decimal integer in the token's smallest unit. `None` when
    /// the provider could not read the contract.
    pub token_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
impl RawTokenBalance {
    pub fn new(contract_address: impl Into<String>, token_balance: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            token_balance: Some(token_balance.into()),
            error: None,
        }
    }
}

// `Provider::request` bounds its result type by `Serialize` as well
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesResponse {
    pub token_balances: Vec<RawTokenBalance>,
    #[serde(default)]
    pub page_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// Wider than ERC-20's `uint8` so oversized values reach the range check
    /// in the normalizer instead of failing the whole payload.
    pub decimals: Option<u16>,
    pub logo: Option<String>,
}

impl TokenMetadata {
    pub fn resolved_decimals(&self) -> u16 {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }
}

/// A non-zero balance ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayToken {
    pub contract_address: String,
    pub raw_balance: String,
    pub formatted_balance: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: u16,
    pub logo: Option<String>,
}
