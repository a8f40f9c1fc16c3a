//! Known payment chains, grouped by the settlement families that can use them.
//!
//! A [`ChainInfo`] pairs a stable chain id (the string that appears in request
//! payloads, e.g. `"matic"`) with a human-readable name. Chains are organized
//! into static family tables:
//!
//! - [`EVM_CHAINS`] — EVM-compatible chains (native, ERC20 and ERC777 settlement)
//! - [`BTC_CHAINS`] — Bitcoin mainnet and testnet
//! - [`NEAR_CHAINS`] — NEAR and Aurora chains, accepted as reference-based targets
//! - [`DECLARATIVE_CHAINS`] — chains only reachable through declarative payments
//!
//! [`candidate_chains`] answers "which chains can settle this family" and is
//! total: a family with no chain concept (fiat) yields the empty slice.

use crate::currency::SettlementFamily;

/// A known chain with its payload id and display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    /// Stable chain id used in request payloads (e.g. `"mainnet"`, `"matic"`).
    pub id: &'static str,
    /// Human-readable chain name (e.g. `"Polygon"`).
    pub name: &'static str,
}

/// EVM-compatible chains.
pub static EVM_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        id: "mainnet",
        name: "Ethereum",
    },
    ChainInfo {
        id: "rinkeby",
        name: "Ethereum Rinkeby",
    },
    ChainInfo {
        id: "bsc",
        name: "Binance Smart Chain",
    },
    ChainInfo {
        id: "bsctest",
        name: "Binance Smart Chain Testnet",
    },
    ChainInfo {
        id: "matic",
        name: "Polygon",
    },
    ChainInfo {
        id: "optimism",
        name: "Optimism",
    },
    ChainInfo {
        id: "avalanche",
        name: "Avalanche",
    },
    ChainInfo {
        id: "sepolia",
        name: "Sepolia",
    },
    ChainInfo {
        id: "zksyncera",
        name: "zkSync Mainnet",
    },
    ChainInfo {
        id: "zksynceratestnet",
        name: "zkSync Testnet",
    },
    ChainInfo {
        id: "base",
        name: "Base",
    },
];

/// Bitcoin-family chains.
pub static BTC_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        id: "mainnet",
        name: "Bitcoin",
    },
    ChainInfo {
        id: "testnet",
        name: "Bitcoin Testnet",
    },
];

/// NEAR-family chains. Not candidates for currency selection, but valid
/// targets for reference-based payment networks.
pub static NEAR_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        id: "aurora",
        name: "Aurora",
    },
    ChainInfo {
        id: "aurora-testnet",
        name: "Aurora Testnet",
    },
    ChainInfo {
        id: "near",
        name: "NEAR",
    },
    ChainInfo {
        id: "near-testnet",
        name: "NEAR Testnet",
    },
];

/// Chains reachable only through declarative payment networks.
pub static DECLARATIVE_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        id: "tron",
        name: "Tron",
    },
    ChainInfo {
        id: "solana",
        name: "Solana",
    },
];

/// Returns the candidate chains for a settlement family.
///
/// Total over all families: fiat has no chain concept and yields the empty
/// slice rather than an error.
///
/// # Example
///
/// ```
/// use rnf_types::chains::candidate_chains;
/// use rnf_types::currency::SettlementFamily;
///
/// let evm = candidate_chains(SettlementFamily::Token20);
/// assert!(evm.iter().any(|c| c.id == "matic"));
/// assert!(candidate_chains(SettlementFamily::Fiat).is_empty());
/// ```
pub fn candidate_chains(family: SettlementFamily) -> &'static [ChainInfo] {
    match family {
        SettlementFamily::Bitcoin => BTC_CHAINS,
        SettlementFamily::Native | SettlementFamily::Token20 | SettlementFamily::StreamToken => {
            EVM_CHAINS
        }
        SettlementFamily::Fiat => &[],
    }
}

/// Returns `true` if `id` names an EVM-compatible chain.
pub fn is_evm_chain(id: &str) -> bool {
    EVM_CHAINS.iter().any(|c| c.id == id)
}

/// Returns `true` if `id` names any known chain, in any family.
pub fn is_known_chain(id: &str) -> bool {
    [EVM_CHAINS, BTC_CHAINS, NEAR_CHAINS, DECLARATIVE_CHAINS]
        .iter()
        .any(|table| table.iter().any(|c| c.id == id))
}

/// Looks up a chain by id, searching EVM chains first, then the other
/// family tables. Note `"mainnet"` resolves to Ethereum; the Bitcoin chain
/// of the same id is reachable through [`BTC_CHAINS`] directly.
pub fn chain_by_id(id: &str) -> Option<&'static ChainInfo> {
    [EVM_CHAINS, BTC_CHAINS, NEAR_CHAINS, DECLARATIVE_CHAINS]
        .iter()
        .find_map(|table| table.iter().find(|c| c.id == id))
}
