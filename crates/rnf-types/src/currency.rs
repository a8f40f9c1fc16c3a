//! Settlement families and the currency registry.
//!
//! Every payable currency is classified into a [`SettlementFamily`], the
//! class of payment mechanism used to settle it, and described by a
//! [`CurrencyRecord`] carrying its symbol, decimal precision, home chain,
//! and (for token families) its on-chain address.
//!
//! The [`CurrencyRegistry`] is a read-only lookup table loaded once at
//! startup. [`default_currencies`] provides a curated default list covering
//! all five families; applications can overlay it with
//! [`CurrencyRegistry::with_currency`] and [`CurrencyRegistry::without`]
//! before handing the registry to the pipeline.

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The class of settlement mechanism for a currency.
///
/// Wire tags follow the canonical request format: `"ETH"`, `"BTC"`,
/// `"ISO4217"`, `"ERC20"`, `"ERC777"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementFamily {
    /// Native chain token (ETH, MATIC, BNB, ...).
    #[serde(rename = "ETH")]
    Native,
    /// Bitcoin-style address-based settlement.
    #[serde(rename = "BTC")]
    Bitcoin,
    /// Fiat currency, declared off-chain (USD, EUR, ...).
    #[serde(rename = "ISO4217")]
    Fiat,
    /// ERC20-style token.
    #[serde(rename = "ERC20")]
    Token20,
    /// ERC777 streamable token (Superfluid super tokens).
    #[serde(rename = "ERC777")]
    StreamToken,
}

impl SettlementFamily {
    /// The wire tag for this family.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SettlementFamily::Native => "ETH",
            SettlementFamily::Bitcoin => "BTC",
            SettlementFamily::Fiat => "ISO4217",
            SettlementFamily::Token20 => "ERC20",
            SettlementFamily::StreamToken => "ERC777",
        }
    }

    /// Human-readable description for currency pickers.
    pub const fn description(&self) -> &'static str {
        match self {
            SettlementFamily::Native => "Native Token (Ethereum, MATIC, etc.)",
            SettlementFamily::Bitcoin => "Bitcoin",
            SettlementFamily::Fiat => "Fiat Currency (USD, EUR, etc.)",
            SettlementFamily::Token20 => "ERC20 Token (DAI, USDC, etc.)",
            SettlementFamily::StreamToken => {
                "Superfluid streamable Token (ETHx, USDCx, DAIx, etc.)"
            }
        }
    }
}

impl fmt::Display for SettlementFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry in the currency registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    /// Unique registry id (e.g. `"USDC-mainnet"`, `"EUR"`).
    pub id: String,
    /// Ticker symbol (e.g. `"USDC"`).
    pub symbol: String,
    /// Number of fractional digits in one settlement unit.
    pub decimals: u32,
    /// Settlement family of this currency.
    #[serde(rename = "type")]
    pub family: SettlementFamily,
    /// Home chain, absent for fiat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Token contract address, present for `Token20`/`StreamToken`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl CurrencyRecord {
    fn new(
        id: &str,
        symbol: &str,
        decimals: u32,
        family: SettlementFamily,
        network: Option<&str>,
        address: Option<Address>,
    ) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
            decimals,
            family,
            network: network.map(str::to_string),
            address,
        }
    }
}

/// The default currency list, covering all five settlement families.
///
/// Token addresses are the canonical deployments on their chains; the
/// Sepolia entries are the faucet test tokens used by integration
/// environments.
pub fn default_currencies() -> Vec<CurrencyRecord> {
    use SettlementFamily::*;
    vec![
        // Native tokens
        CurrencyRecord::new("ETH-mainnet", "ETH", 18, Native, Some("mainnet"), None),
        CurrencyRecord::new("ETH-sepolia", "ETH", 18, Native, Some("sepolia"), None),
        CurrencyRecord::new("MATIC-matic", "MATIC", 18, Native, Some("matic"), None),
        CurrencyRecord::new("BNB-bsc", "BNB", 18, Native, Some("bsc"), None),
        CurrencyRecord::new("AVAX-avalanche", "AVAX", 18, Native, Some("avalanche"), None),
        CurrencyRecord::new("ETH-base", "ETH", 18, Native, Some("base"), None),
        // Bitcoin
        CurrencyRecord::new("BTC-mainnet", "BTC", 8, Bitcoin, Some("mainnet"), None),
        CurrencyRecord::new("BTC-testnet", "BTC", 8, Bitcoin, Some("testnet"), None),
        // Fiat
        CurrencyRecord::new("USD", "USD", 2, Fiat, None, None),
        CurrencyRecord::new("EUR", "EUR", 2, Fiat, None, None),
        CurrencyRecord::new("GBP", "GBP", 2, Fiat, None, None),
        CurrencyRecord::new("CHF", "CHF", 2, Fiat, None, None),
        CurrencyRecord::new("JPY", "JPY", 0, Fiat, None, None),
        // ERC20 tokens
        CurrencyRecord::new(
            "DAI-mainnet",
            "DAI",
            18,
            Token20,
            Some("mainnet"),
            Some(address!("0x6B175474E89094C44Da98b954EedeAC495271d0F")),
        ),
        CurrencyRecord::new(
            "USDC-mainnet",
            "USDC",
            6,
            Token20,
            Some("mainnet"),
            Some(address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
        ),
        CurrencyRecord::new(
            "USDT-mainnet",
            "USDT",
            6,
            Token20,
            Some("mainnet"),
            Some(address!("0xdAC17F958D2ee523a2206206994597C13D831ec7")),
        ),
        CurrencyRecord::new(
            "USDC-matic",
            "USDC",
            6,
            Token20,
            Some("matic"),
            Some(address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359")),
        ),
        CurrencyRecord::new(
            "DAI-matic",
            "DAI",
            18,
            Token20,
            Some("matic"),
            Some(address!("0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063")),
        ),
        CurrencyRecord::new(
            "USDC-base",
            "USDC",
            6,
            Token20,
            Some("base"),
            Some(address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")),
        ),
        CurrencyRecord::new(
            "fUSDT-sepolia",
            "fUSDT",
            6,
            Token20,
            Some("sepolia"),
            Some(address!("0xF046b3CA5ae2879c6bAcC4D42fAF363eE8379F78")),
        ),
        CurrencyRecord::new(
            "fUSDC-sepolia",
            "fUSDC",
            6,
            Token20,
            Some("sepolia"),
            Some(address!("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238")),
        ),
        // ERC777 super tokens
        CurrencyRecord::new(
            "USDCx-matic",
            "USDCx",
            18,
            StreamToken,
            Some("matic"),
            Some(address!("0xCAa7349CEA390F89641fe306D93591f87595dc1F")),
        ),
        CurrencyRecord::new(
            "ETHx-sepolia",
            "ETHx",
            18,
            StreamToken,
            Some("sepolia"),
            Some(address!("0x30a6933Ca9230361972E413a15dC8114c952414e")),
        ),
    ]
}

/// A currency id with no entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Currency {0:?} not found")]
pub struct CurrencyNotFound(pub String);

/// Read-only currency lookup table, preserving registration order.
///
/// # Example
///
/// ```
/// use rnf_types::currency::{CurrencyRegistry, SettlementFamily};
///
/// let registry = CurrencyRegistry::default();
/// let usdc = registry.lookup("USDC-mainnet").unwrap();
/// assert_eq!(usdc.decimals, 6);
///
/// let on_matic = registry.list_by_family(SettlementFamily::Token20, Some("matic"));
/// assert!(on_matic.iter().all(|c| c.network.as_deref() == Some("matic")));
/// ```
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    records: Vec<CurrencyRecord>,
    by_id: HashMap<String, usize>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Creates a registry from an explicit record list.
    pub fn from_records(records: impl IntoIterator<Item = CurrencyRecord>) -> Self {
        let mut registry = Self::new();
        for record in records {
            registry.register(record);
        }
        registry
    }

    /// Registers a record, replacing any existing record with the same id.
    pub fn register(&mut self, record: CurrencyRecord) {
        match self.by_id.get(&record.id) {
            Some(&index) => self.records[index] = record,
            None => {
                self.by_id.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Builder-style overlay: registers an extra record and returns `self`.
    pub fn with_currency(mut self, record: CurrencyRecord) -> Self {
        self.register(record);
        self
    }

    /// Builder-style overlay: removes the record with the given id, if any.
    pub fn without(mut self, id: &str) -> Self {
        if let Some(index) = self.by_id.remove(id) {
            self.records.remove(index);
            for slot in self.by_id.values_mut() {
                if *slot > index {
                    *slot -= 1;
                }
            }
        }
        self
    }

    /// Looks up a currency record by id.
    pub fn lookup(&self, id: &str) -> Result<&CurrencyRecord, CurrencyNotFound> {
        self.get(id).ok_or_else(|| CurrencyNotFound(id.to_string()))
    }

    /// Looks up a currency record by id, returning `None` when absent.
    pub fn get(&self, id: &str) -> Option<&CurrencyRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    /// Lists currencies of a settlement family, optionally restricted to an
    /// exact chain, in registration order.
    pub fn list_by_family(
        &self,
        family: SettlementFamily,
        chain: Option<&str>,
    ) -> Vec<&CurrencyRecord> {
        self.records
            .iter()
            .filter(|record| record.family == family)
            .filter(|record| match chain {
                Some(chain) => record.network.as_deref() == Some(chain),
                None => true,
            })
            .collect()
    }

    /// Returns the number of registered currencies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no currencies are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CurrencyRegistry {
    /// A registry pre-populated with [`default_currencies`].
    fn default() -> Self {
        Self::from_records(default_currencies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let registry = CurrencyRegistry::default();
        let dai = registry.lookup("DAI-mainnet").unwrap();
        assert_eq!(dai.symbol, "DAI");
        assert_eq!(dai.decimals, 18);
        assert_eq!(dai.family, SettlementFamily::Token20);

        assert_eq!(
            registry.lookup("DOGE-mainnet"),
            Err(CurrencyNotFound("DOGE-mainnet".into()))
        );
    }

    #[test]
    fn test_list_by_family_filters_by_chain() {
        let registry = CurrencyRegistry::default();

        let erc20 = registry.list_by_family(SettlementFamily::Token20, None);
        assert!(erc20.len() >= 6);

        let sepolia = registry.list_by_family(SettlementFamily::Token20, Some("sepolia"));
        let ids: Vec<&str> = sepolia.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["fUSDT-sepolia", "fUSDC-sepolia"]);

        let fiat = registry.list_by_family(SettlementFamily::Fiat, None);
        assert!(fiat.iter().all(|c| c.network.is_none()));
    }

    #[test]
    fn test_overlay_replaces_and_removes() {
        let replacement = CurrencyRecord::new(
            "fUSDC-sepolia",
            "fUSDC",
            18, // deliberately different
            SettlementFamily::Token20,
            Some("sepolia"),
            None,
        );
        let registry = CurrencyRegistry::default()
            .without("fUSDT-sepolia")
            .with_currency(replacement);

        assert!(registry.get("fUSDT-sepolia").is_none());
        assert_eq!(registry.lookup("fUSDC-sepolia").unwrap().decimals, 18);
    }

    #[test]
    fn test_family_wire_tags() {
        assert_eq!(
            serde_json::to_string(&SettlementFamily::Token20).unwrap(),
            "\"ERC20\""
        );
        assert_eq!(
            serde_json::to_string(&SettlementFamily::Fiat).unwrap(),
            "\"ISO4217\""
        );
        let family: SettlementFamily = serde_json::from_str("\"ERC777\"").unwrap();
        assert_eq!(family, SettlementFamily::StreamToken);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let registry = CurrencyRegistry::default();
        let json = serde_json::to_value(registry.lookup("USDC-base").unwrap()).unwrap();
        assert_eq!(json["type"], "ERC20");
        assert_eq!(json["network"], "base");
        let addr: Address = json["address"].as_str().unwrap().parse().unwrap();
        assert_eq!(addr, address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"));
    }
}
