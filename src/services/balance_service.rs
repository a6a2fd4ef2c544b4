use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use futures::{stream, StreamExt, TryStreamExt};
use log::{debug, warn};

use crate::{
    errors::CustomError,
    models::{
        address::WalletAddress,
        token::{DisplayToken, TokenMetadata},
    },
};

use super::{
    provider::TokenDataProvider,
    units::{format_units, parse_raw_balance, MAX_DECIMALS},
};

/// Turns the provider's raw balances into display records.
#[derive(Clone)]
pub struct BalanceNormalizer {
    provider: Arc<dyn TokenDataProvider>,
    metadata_concurrency: usize,
}

impl BalanceNormalizer {
    pub fn new(provider: Arc<dyn TokenDataProvider>, metadata_concurrency: usize) -> Self {
        Self {
            provider,
            metadata_concurrency: metadata_concurrency.max(1),
        }
    }

    /// Lists balances of `address`, enriches each with its token metadata and
    /// drops zero balances. Output keeps the provider's order.
    ///
    /// Any provider or parse failure aborts the whole call; nothing partial is
    /// returned.
    pub async fn fetch_display_tokens(&self, address: &WalletAddress) -> Result<Vec<DisplayToken>, CustomError> {
        let balances = self.provider.list_balances(address).await?;
        debug!("{} raw balances listed for {}", balances.len(), address);

        let readable: Vec<(&str, &str)> = balances
            .iter()
            .filter_map(|entry| match entry.token_balance.as_deref() {
                Some(raw) => Some((entry.contract_address.as_str(), raw)),
                None => {
                    warn!(
                        "Skipping {}: provider returned no balance ({})",
                        entry.contract_address,
                        entry.error.as_deref().unwrap_or("no error given")
                    );
                    None
                }
            })
            .collect();

        let mut seen = HashSet::new();
        let contracts: Vec<&str> = readable
            .iter()
            .map(|(contract, _)| *contract)
            .filter(|contract| seen.insert(*contract))
            .collect();

        // `buffered` yields in input order whatever the concurrency
        let fetched: Vec<TokenMetadata> = stream::iter(contracts.iter().copied())
            .map(|contract| self.provider.get_metadata(contract))
            .buffered(self.metadata_concurrency)
            .try_collect()
            .await?;
        let metadata: HashMap<&str, TokenMetadata> = contracts.into_iter().zip(fetched).collect();

        let mut tokens = Vec::with_capacity(readable.len());
        for (contract, raw) in readable {
            let token_metadata = metadata.get(contract).cloned().unwrap_or_default();
            if let Some(token) = normalize(contract, raw, token_metadata)? {
                tokens.push(token);
            }
        }

        Ok(tokens)
    }
}

/// Builds the display record for one balance, `None` when it is zero.
pub fn normalize(
    contract_address: &str,
    raw_balance: &str,
    metadata: TokenMetadata,
) -> Result<Option<DisplayToken>, CustomError> {
    let amount = parse_raw_balance(raw_balance)?;
    if amount.is_zero() {
        return Ok(None);
    }

    let decimals = metadata.resolved_decimals();
    if decimals > MAX_DECIMALS {
        return Err(CustomError::InvalidAmountError(format!(
            "{contract_address} declares {decimals} decimals"
        )));
    }

    Ok(Some(DisplayToken {
        contract_address: contract_address.to_string(),
        raw_balance: raw_balance.to_string(),
        formatted_balance: format_units(amount, decimals),
        name: metadata.name,
        symbol: metadata.symbol,
        decimals,
        logo: metadata.logo,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::token::RawTokenBalance, services::provider::mock::MockProvider};

    const OWNER: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
    const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const DUST: &str = "0x0000000000000000000000000000000000000001";

    fn weth() -> TokenMetadata {
        TokenMetadata {
            name: Some("Wrapped Ether".into()),
            symbol: Some("WETH".into()),
            decimals: Some(18),
            logo: Some("https://static.alchemyapi.io/images/assets/2396.png".into()),
        }
    }

    fn usdc() -> TokenMetadata {
        TokenMetadata {
            name: Some("USD Coin".into()),
            symbol: Some("USDC".into()),
            decimals: Some(6),
            logo: None,
        }
    }

    fn owner() -> WalletAddress {
        WalletAddress::parse(OWNER).unwrap()
    }

    #[test]
    fn normalize_uses_default_decimals() {
        let token = normalize(WETH, "1000000000000000000", TokenMetadata::default())
            .unwrap()
            .unwrap();
        assert_eq!(token.decimals, 18);
        assert_eq!(token.formatted_balance, "1.0");
        assert_eq!(token.raw_balance, "1000000000000000000");
        assert_eq!(token.name, None);
    }

    #[test]
    fn normalize_accepts_up_to_256_decimals() {
        let wide = TokenMetadata {
            decimals: Some(256),
            ..TokenMetadata::default()
        };
        let token = normalize(WETH, "1", wide).unwrap().unwrap();
        assert_eq!(token.decimals, 256);

        let oversized = TokenMetadata {
            decimals: Some(257),
            ..TokenMetadata::default()
        };
        assert!(matches!(
            normalize(WETH, "1", oversized),
            Err(CustomError::InvalidAmountError(_))
        ));
    }

    #[test]
    fn normalize_drops_zero() {
        assert_eq!(normalize(WETH, "0", weth()).unwrap(), None);
        assert_eq!(normalize(USDC, "0x00", usdc()).unwrap(), None);
    }

    #[tokio::test]
    async fn formats_and_filters_in_provider_order() {
        let provider = Arc::new(
            MockProvider::new()
                .with_balances(
                    OWNER,
                    vec![
                        RawTokenBalance::new(USDC, "0x5f5e100"),
                        RawTokenBalance::new(DUST, "0x0"),
                        RawTokenBalance::new(WETH, "0x0de0b6b3a7640000"),
                    ],
                )
                .with_metadata(WETH, weth())
                .with_metadata(USDC, usdc()),
        );
        let normalizer = BalanceNormalizer::new(provider.clone(), 1);

        let tokens = normalizer.fetch_display_tokens(&owner()).await.unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].symbol.as_deref(), Some("USDC"));
        assert_eq!(tokens[0].formatted_balance, "100.0");
        assert_eq!(tokens[1].symbol.as_deref(), Some("WETH"));
        assert_eq!(tokens[1].formatted_balance, "1.0");
        assert_eq!(provider.list_calls(), 1);
        assert_eq!(provider.metadata_calls(), vec![USDC, DUST, WETH]);
    }

    #[tokio::test]
    async fn fetches_metadata_once_per_distinct_contract() {
        let provider = Arc::new(
            MockProvider::new()
                .with_balances(
                    OWNER,
                    vec![
                        RawTokenBalance::new(WETH, "1"),
                        RawTokenBalance::new(USDC, "2"),
                        RawTokenBalance::new(WETH, "3"),
                    ],
                )
                .with_metadata(WETH, weth())
                .with_metadata(USDC, usdc()),
        );
        let normalizer = BalanceNormalizer::new(provider.clone(), 4);

        let tokens = normalizer.fetch_display_tokens(&owner()).await.unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(provider.metadata_calls(), vec![WETH, USDC]);
        assert_eq!(tokens[2].formatted_balance, "0.000000000000000003");
    }

    #[tokio::test]
    async fn order_is_kept_with_concurrent_metadata_fetches() {
        let contracts: Vec<String> = (1..=20).map(|i| format!("0x{i:040x}")).collect();
        let balances = contracts
            .iter()
            .map(|contract| RawTokenBalance::new(contract.as_str(), "1000000"))
            .collect();
        let provider = Arc::new(MockProvider::new().with_balances(OWNER, balances));
        let normalizer = BalanceNormalizer::new(provider, 8);

        let tokens = normalizer.fetch_display_tokens(&owner()).await.unwrap();

        let order: Vec<&str> = tokens.iter().map(|t| t.contract_address.as_str()).collect();
        assert_eq!(order, contracts.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn entries_without_balance_are_skipped() {
        let provider = Arc::new(
            MockProvider::new()
                .with_balances(
                    OWNER,
                    vec![
                        RawTokenBalance {
                            contract_address: DUST.into(),
                            token_balance: None,
                            error: Some("execution reverted".into()),
                        },
                        RawTokenBalance::new(USDC, "1500000"),
                    ],
                )
                .with_metadata(USDC, usdc()),
        );
        let normalizer = BalanceNormalizer::new(provider.clone(), 1);

        let tokens = normalizer.fetch_display_tokens(&owner()).await.unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].formatted_balance, "1.5");
        assert_eq!(provider.metadata_calls(), vec![USDC]);
    }

    #[tokio::test]
    async fn metadata_failure_discards_everything() {
        let provider = Arc::new(
            MockProvider::new()
                .with_balances(OWNER, vec![RawTokenBalance::new(WETH, "1")])
                .failing_metadata("upstream timeout"),
        );
        let normalizer = BalanceNormalizer::new(provider, 1);

        let result = normalizer.fetch_display_tokens(&owner()).await;

        assert!(matches!(result, Err(CustomError::ProviderError(_))));
    }

    #[tokio::test]
    async fn unparseable_balance_fails_the_query() {
        let provider = Arc::new(
            MockProvider::new()
                .with_balances(OWNER, vec![RawTokenBalance::new(WETH, "not-a-number")])
                .with_metadata(WETH, weth()),
        );
        let normalizer = BalanceNormalizer::new(provider, 1);

        let result = normalizer.fetch_display_tokens(&owner()).await;

        assert!(matches!(result, Err(CustomError::InvalidAmountError(_))));
    }
}
