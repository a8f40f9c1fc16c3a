//! ERC20 token deployments and accept-list resolution.
//!
//! Conversion-style payment networks accept a basket of ERC20 tokens, named
//! by symbol in the draft. Before a request can be submitted each symbol
//! must resolve to exactly one contract address on the selected chain;
//! [`TokenRegistry::resolve`] performs that resolution, preserving input
//! order for downstream consumers that index positionally.

use alloy_primitives::{Address, address};

/// A known ERC20 deployment on a specific chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDeployment {
    /// Ticker symbol (e.g. `"USDC"`).
    pub symbol: &'static str,
    /// Chain id the contract is deployed on.
    pub chain: &'static str,
    /// Contract address.
    pub address: Address,
    /// Token decimals.
    pub decimals: u32,
}

/// Well-known ERC20 deployments per chain.
pub static ERC20_TOKENS: &[TokenDeployment] = &[
    TokenDeployment {
        symbol: "DAI",
        chain: "mainnet",
        address: address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
        decimals: 18,
    },
    TokenDeployment {
        symbol: "USDC",
        chain: "mainnet",
        address: address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
        decimals: 6,
    },
    TokenDeployment {
        symbol: "USDT",
        chain: "mainnet",
        address: address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
        decimals: 6,
    },
    TokenDeployment {
        symbol: "USDC",
        chain: "matic",
        address: address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
        decimals: 6,
    },
    TokenDeployment {
        symbol: "DAI",
        chain: "matic",
        address: address!("0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
        decimals: 18,
    },
    TokenDeployment {
        symbol: "USDC",
        chain: "base",
        address: address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
        decimals: 6,
    },
    TokenDeployment {
        symbol: "fUSDT",
        chain: "sepolia",
        address: address!("0xF046b3CA5ae2879c6bAcC4D42fAF363eE8379F78"),
        decimals: 6,
    },
    TokenDeployment {
        symbol: "fUSDC",
        chain: "sepolia",
        address: address!("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
        decimals: 6,
    },
];

/// A symbol that resolved to zero or more than one deployment on a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Token {0:?} is missing or ambiguous on the selected chain")]
pub struct AmbiguousOrMissingToken(pub String);

/// Lookup table of ERC20 deployments.
///
/// # Example
///
/// ```
/// use rnf_types::tokens::TokenRegistry;
///
/// let registry = TokenRegistry::default();
/// let addresses = registry
///     .resolve(&["USDC".into(), "DAI".into()], "mainnet")
///     .unwrap();
/// assert_eq!(addresses.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    deployments: Vec<TokenDeployment>,
}

impl TokenRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            deployments: Vec::new(),
        }
    }

    /// Creates a registry from an explicit deployment slice.
    pub fn from_deployments(deployments: &[TokenDeployment]) -> Self {
        Self {
            deployments: deployments.to_vec(),
        }
    }

    /// Builder-style method: registers an extra deployment and returns `self`.
    pub fn with_deployment(mut self, deployment: TokenDeployment) -> Self {
        self.deployments.push(deployment);
        self
    }

    /// Returns the deployments on a given chain.
    pub fn on_chain<'a>(&'a self, chain: &'a str) -> impl Iterator<Item = &'a TokenDeployment> {
        self.deployments.iter().filter(move |d| d.chain == chain)
    }

    /// Resolves each symbol to its unique deployment address on `chain`.
    ///
    /// The output order matches the input order. Fails on the first symbol
    /// with zero or multiple matching deployments; no partial result is
    /// returned.
    pub fn resolve(
        &self,
        symbols: &[String],
        chain: &str,
    ) -> Result<Vec<Address>, AmbiguousOrMissingToken> {
        let mut addresses = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let mut matches = self
                .on_chain(chain)
                .filter(|d| d.symbol == symbol.as_str());
            match (matches.next(), matches.next()) {
                (Some(deployment), None) => addresses.push(deployment.address),
                _ => return Err(AmbiguousOrMissingToken(symbol.clone())),
            }
        }
        Ok(addresses)
    }
}

impl Default for TokenRegistry {
    /// A registry pre-populated with [`ERC20_TOKENS`].
    fn default() -> Self {
        Self::from_deployments(ERC20_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_preserves_input_order() {
        let registry = TokenRegistry::default();
        let addresses = registry
            .resolve(&["USDT".into(), "DAI".into(), "USDC".into()], "mainnet")
            .unwrap();
        assert_eq!(
            addresses,
            vec![
                address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
                address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
                address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            ]
        );
    }

    #[test]
    fn test_resolve_fails_on_missing_symbol() {
        let registry = TokenRegistry::default();
        // DAI has no deployment on Base; the whole resolution fails.
        let err = registry
            .resolve(&["USDC".into(), "DAI".into()], "base")
            .unwrap_err();
        assert_eq!(err, AmbiguousOrMissingToken("DAI".into()));
    }

    #[test]
    fn test_resolve_fails_on_duplicate_symbol() {
        let registry = TokenRegistry::default().with_deployment(TokenDeployment {
            symbol: "USDC",
            chain: "base",
            address: Address::ZERO,
            decimals: 6,
        });
        let err = registry.resolve(&["USDC".into()], "base").unwrap_err();
        assert_eq!(err, AmbiguousOrMissingToken("USDC".into()));
    }

    #[test]
    fn test_resolve_is_scoped_to_chain() {
        let registry = TokenRegistry::default();
        let mainnet = registry.resolve(&["USDC".into()], "mainnet").unwrap();
        let matic = registry.resolve(&["USDC".into()], "matic").unwrap();
        assert_ne!(mainnet, matic);
    }
}
