//! Payment-network variants and the selector state machine.
//!
//! A payment network describes how a payment is detected and enforced
//! on-chain. Eight mutually exclusive parameter shapes exist, each a strict
//! superset of the previous one: declarative → address-based →
//! reference-based → fee/stream reference-based → conversion variants.
//!
//! The shapes are modeled as one base struct of strictly shared fields
//! ([`DeclarativeFields`]) plus a closed set of variant structs, switched
//! over by [`PaymentNetworkParams`], a union tagged by the `id` field on the
//! wire. Exactly one variant is active at a time.
//!
//! Switching the network id goes through
//! [`PaymentNetworkParams::switch_to`], which preserves fields whose name
//! and role are shared between the old and new shapes (a payment address
//! survives a move from reference-based to fee-reference-based) and
//! discards everything else, applying the new shape's defaults.
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "id": "pn-fee-reference-based",
//!   "paymentAddress": "0xA...",
//!   "feeAddress": "0x0000000000000000000000000000000000000000",
//!   "feeAmount": "0"
//! }
//! ```

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;
use std::str::FromStr;

use crate::chains::{is_evm_chain, is_known_chain};
use crate::validation::ValidationError;

/// Identifier of a payment-network variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentNetworkId {
    #[serde(rename = "pn-any-declarative")]
    AnyDeclarative,
    #[serde(rename = "pn-address-based")]
    AddressBased,
    #[serde(rename = "pn-reference-based")]
    ReferenceBased,
    #[serde(rename = "pn-fee-reference-based")]
    FeeReferenceBased,
    #[serde(rename = "pn-stream-reference-based")]
    StreamReferenceBased,
    #[serde(rename = "pn-any-to-any-conversion")]
    AnyToAnyConversion,
    #[serde(rename = "pn-any-to-erc20")]
    AnyToErc20,
    #[serde(rename = "pn-any-to-eth")]
    AnyToEth,
}

impl PaymentNetworkId {
    /// All variant identifiers, in extension order.
    pub const ALL: &'static [PaymentNetworkId] = &[
        PaymentNetworkId::AnyDeclarative,
        PaymentNetworkId::AddressBased,
        PaymentNetworkId::ReferenceBased,
        PaymentNetworkId::FeeReferenceBased,
        PaymentNetworkId::StreamReferenceBased,
        PaymentNetworkId::AnyToAnyConversion,
        PaymentNetworkId::AnyToErc20,
        PaymentNetworkId::AnyToEth,
    ];

    /// The wire id of this variant.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentNetworkId::AnyDeclarative => "pn-any-declarative",
            PaymentNetworkId::AddressBased => "pn-address-based",
            PaymentNetworkId::ReferenceBased => "pn-reference-based",
            PaymentNetworkId::FeeReferenceBased => "pn-fee-reference-based",
            PaymentNetworkId::StreamReferenceBased => "pn-stream-reference-based",
            PaymentNetworkId::AnyToAnyConversion => "pn-any-to-any-conversion",
            PaymentNetworkId::AnyToErc20 => "pn-any-to-erc20",
            PaymentNetworkId::AnyToEth => "pn-any-to-eth",
        }
    }

    /// Human-readable description for network pickers.
    pub const fn description(&self) -> &'static str {
        match self {
            PaymentNetworkId::AnyDeclarative => {
                "Payer declares payment sent. Receiver declares payment received."
            }
            PaymentNetworkId::AddressBased => {
                "Receiver generates a dedicated address. A block explorer detects all payments to that address."
            }
            PaymentNetworkId::ReferenceBased => {
                "Payments carry a payment reference and are detected on the target chain."
            }
            PaymentNetworkId::FeeReferenceBased => {
                "Reference-based payment via smart contract with an optional fee."
            }
            PaymentNetworkId::StreamReferenceBased => "Superfluid stream",
            PaymentNetworkId::AnyToAnyConversion => {
                "Pay in any currency, converted before reaching the receiver."
            }
            PaymentNetworkId::AnyToErc20 => "Swap to ERC20 before sending to receiver",
            PaymentNetworkId::AnyToEth => {
                "Swap to native token before sending to receiver. Only works on EVM-compatible chains."
            }
        }
    }
}

impl fmt::Display for PaymentNetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown payment-network id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment network id {0:?}")]
pub struct UnknownPaymentNetwork(pub String);

impl FromStr for PaymentNetworkId {
    type Err = UnknownPaymentNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownPaymentNetwork(s.to_string()))
    }
}

/// The chain selected for a variant is outside the set that variant can
/// settle on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Chain {chain:?} cannot be used with payment network {id}")]
pub struct InvalidChainForVariant {
    pub id: PaymentNetworkId,
    pub chain: String,
}

/// A variant failed validation: either a field-level shape violation or an
/// incompatible chain selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentParamsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidChain(#[from] InvalidChainForVariant),
}

/// Fields shared by every payment-network variant.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarativeFields {
    /// Free-form payment instructions shown to the payer.
    pub payment_info: Option<String>,
    /// Free-form refund instructions.
    pub refund_info: Option<String>,
    pub receiver_delegate: Option<String>,
    pub payer_delegate: Option<String>,
    pub salt: Option<String>,
}

/// Parameters for `pn-address-based`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBasedParams {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
}

/// Parameters for `pn-reference-based`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceBasedParams {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
    /// Target chain the payment is detected on.
    pub payment_network_name: Option<String>,
}

/// Parameters for `pn-fee-reference-based`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeReferenceBasedParams {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
    pub payment_network_name: Option<String>,
    /// Fee recipient; the zero address when no fee is collected.
    #[serde(default = "zero_address")]
    pub fee_address: Address,
    /// Fee in settlement units.
    #[serde(default = "default_fee_amount")]
    pub fee_amount: String,
}

impl Default for FeeReferenceBasedParams {
    fn default() -> Self {
        Self {
            declarative: DeclarativeFields::default(),
            payment_address: String::new(),
            refund_address: None,
            payment_network_name: None,
            fee_address: Address::ZERO,
            fee_amount: default_fee_amount(),
        }
    }
}

/// Parameters for `pn-stream-reference-based`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamReferenceBasedParams {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
    pub payment_network_name: Option<String>,
    /// Stream flow rate in settlement units per second.
    #[serde(default)]
    pub expected_flow_rate: String,
    /// RFC 3339 start date of the stream.
    #[serde(default)]
    pub expected_start_date: String,
}

/// Parameters for `pn-any-to-any-conversion`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyToAnyConversionParams {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
    pub payment_network_name: Option<String>,
    #[serde(default = "zero_address")]
    pub fee_address: Address,
    #[serde(default = "default_fee_amount")]
    pub fee_amount: String,
    /// Maximum age in seconds of the conversion rate used at payment time.
    pub max_rate_timespan: Option<u64>,
    /// Destination chain of the conversion.
    pub network: Option<String>,
}

impl Default for AnyToAnyConversionParams {
    fn default() -> Self {
        Self {
            declarative: DeclarativeFields::default(),
            payment_address: String::new(),
            refund_address: None,
            payment_network_name: None,
            fee_address: Address::ZERO,
            fee_amount: default_fee_amount(),
            max_rate_timespan: None,
            network: None,
        }
    }
}

/// Parameters for `pn-any-to-erc20`.
///
/// In a draft, `accepted_tokens` holds token symbols; assembly resolves them
/// to contract addresses on `network`, in order.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyToErc20Params {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
    pub payment_network_name: Option<String>,
    #[serde(default = "zero_address")]
    pub fee_address: Address,
    #[serde(default = "default_fee_amount")]
    pub fee_amount: String,
    pub max_rate_timespan: Option<u64>,
    /// Destination chain; must be EVM-compatible.
    #[serde(default)]
    pub network: String,
    /// Basket of accepted tokens; at least one is required.
    #[serde(default)]
    pub accepted_tokens: Vec<String>,
}

impl Default for AnyToErc20Params {
    fn default() -> Self {
        Self {
            declarative: DeclarativeFields::default(),
            payment_address: String::new(),
            refund_address: None,
            payment_network_name: None,
            fee_address: Address::ZERO,
            fee_amount: default_fee_amount(),
            max_rate_timespan: None,
            network: String::new(),
            accepted_tokens: Vec::new(),
        }
    }
}

/// Parameters for `pn-any-to-eth`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyToEthParams {
    #[serde(flatten)]
    pub declarative: DeclarativeFields,
    pub payment_address: String,
    pub refund_address: Option<String>,
    pub payment_network_name: Option<String>,
    #[serde(default = "zero_address")]
    pub fee_address: Address,
    #[serde(default = "default_fee_amount")]
    pub fee_amount: String,
    pub max_rate_timespan: Option<u64>,
    /// Destination chain of the conversion.
    #[serde(default)]
    pub network: String,
}

impl Default for AnyToEthParams {
    fn default() -> Self {
        Self {
            declarative: DeclarativeFields::default(),
            payment_address: String::new(),
            refund_address: None,
            payment_network_name: None,
            fee_address: Address::ZERO,
            fee_amount: default_fee_amount(),
            max_rate_timespan: None,
            network: String::new(),
        }
    }
}

fn zero_address() -> Address {
    Address::ZERO
}

fn default_fee_amount() -> String {
    "0".to_string()
}

/// The active payment-network parameter shape, tagged by `id` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum PaymentNetworkParams {
    #[serde(rename = "pn-any-declarative")]
    AnyDeclarative(DeclarativeFields),
    #[serde(rename = "pn-address-based")]
    AddressBased(AddressBasedParams),
    #[serde(rename = "pn-reference-based")]
    ReferenceBased(ReferenceBasedParams),
    #[serde(rename = "pn-fee-reference-based")]
    FeeReferenceBased(FeeReferenceBasedParams),
    #[serde(rename = "pn-stream-reference-based")]
    StreamReferenceBased(StreamReferenceBasedParams),
    #[serde(rename = "pn-any-to-any-conversion")]
    AnyToAnyConversion(AnyToAnyConversionParams),
    #[serde(rename = "pn-any-to-erc20")]
    AnyToErc20(AnyToErc20Params),
    #[serde(rename = "pn-any-to-eth")]
    AnyToEth(AnyToEthParams),
}

/// Superset of all variant fields, used to carry shared values across a
/// variant switch.
#[derive(Debug, Default)]
struct FieldBag {
    declarative: DeclarativeFields,
    payment_address: Option<String>,
    refund_address: Option<String>,
    payment_network_name: Option<String>,
    fee_address: Option<Address>,
    fee_amount: Option<String>,
    expected_flow_rate: Option<String>,
    expected_start_date: Option<String>,
    max_rate_timespan: Option<u64>,
    network: Option<String>,
    accepted_tokens: Option<Vec<String>>,
}

impl FieldBag {
    fn collect(params: &PaymentNetworkParams) -> Self {
        let mut bag = FieldBag::default();
        match params {
            PaymentNetworkParams::AnyDeclarative(p) => {
                bag.declarative = p.clone();
            }
            PaymentNetworkParams::AddressBased(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
            }
            PaymentNetworkParams::ReferenceBased(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
                bag.payment_network_name = p.payment_network_name.clone();
            }
            PaymentNetworkParams::FeeReferenceBased(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
                bag.payment_network_name = p.payment_network_name.clone();
                bag.fee_address = Some(p.fee_address);
                bag.fee_amount = Some(p.fee_amount.clone());
            }
            PaymentNetworkParams::StreamReferenceBased(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
                bag.payment_network_name = p.payment_network_name.clone();
                bag.expected_flow_rate = Some(p.expected_flow_rate.clone());
                bag.expected_start_date = Some(p.expected_start_date.clone());
            }
            PaymentNetworkParams::AnyToAnyConversion(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
                bag.payment_network_name = p.payment_network_name.clone();
                bag.fee_address = Some(p.fee_address);
                bag.fee_amount = Some(p.fee_amount.clone());
                bag.max_rate_timespan = p.max_rate_timespan;
                bag.network = p.network.clone();
            }
            PaymentNetworkParams::AnyToErc20(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
                bag.payment_network_name = p.payment_network_name.clone();
                bag.fee_address = Some(p.fee_address);
                bag.fee_amount = Some(p.fee_amount.clone());
                bag.max_rate_timespan = p.max_rate_timespan;
                bag.network = Some(p.network.clone());
                bag.accepted_tokens = Some(p.accepted_tokens.clone());
            }
            PaymentNetworkParams::AnyToEth(p) => {
                bag.declarative = p.declarative.clone();
                bag.payment_address = Some(p.payment_address.clone());
                bag.refund_address = p.refund_address.clone();
                bag.payment_network_name = p.payment_network_name.clone();
                bag.fee_address = Some(p.fee_address);
                bag.fee_amount = Some(p.fee_amount.clone());
                bag.max_rate_timespan = p.max_rate_timespan;
                bag.network = Some(p.network.clone());
            }
        }
        bag
    }

    fn build(self, id: PaymentNetworkId) -> PaymentNetworkParams {
        match id {
            PaymentNetworkId::AnyDeclarative => {
                PaymentNetworkParams::AnyDeclarative(self.declarative)
            }
            PaymentNetworkId::AddressBased => {
                PaymentNetworkParams::AddressBased(AddressBasedParams {
                    declarative: self.declarative,
                    payment_address: self.payment_address.unwrap_or_default(),
                    refund_address: self.refund_address,
                })
            }
            PaymentNetworkId::ReferenceBased => {
                PaymentNetworkParams::ReferenceBased(ReferenceBasedParams {
                    declarative: self.declarative,
                    payment_address: self.payment_address.unwrap_or_default(),
                    refund_address: self.refund_address,
                    payment_network_name: self.payment_network_name,
                })
            }
            PaymentNetworkId::FeeReferenceBased => {
                PaymentNetworkParams::FeeReferenceBased(FeeReferenceBasedParams {
                    declarative: self.declarative,
                    payment_address: self.payment_address.unwrap_or_default(),
                    refund_address: self.refund_address,
                    payment_network_name: self.payment_network_name,
                    fee_address: self.fee_address.unwrap_or(Address::ZERO),
                    fee_amount: self.fee_amount.unwrap_or_else(default_fee_amount),
                })
            }
            PaymentNetworkId::StreamReferenceBased => {
                PaymentNetworkParams::StreamReferenceBased(StreamReferenceBasedParams {
                    declarative: self.declarative,
                    payment_address: self.payment_address.unwrap_or_default(),
                    refund_address: self.refund_address,
                    payment_network_name: self.payment_network_name,
                    expected_flow_rate: self.expected_flow_rate.unwrap_or_default(),
                    expected_start_date: self.expected_start_date.unwrap_or_default(),
                })
            }
            PaymentNetworkId::AnyToAnyConversion => {
                PaymentNetworkParams::AnyToAnyConversion(AnyToAnyConversionParams {
                    declarative: self.declarative,
                    payment_address: self.payment_address.unwrap_or_default(),
                    refund_address: self.refund_address,
                    payment_network_name: self.payment_network_name,
                    fee_address: self.fee_address.unwrap_or(Address::ZERO),
                    fee_amount: self.fee_amount.unwrap_or_else(default_fee_amount),
                    max_rate_timespan: self.max_rate_timespan,
                    network: self.network,
                })
            }
            PaymentNetworkId::AnyToErc20 => PaymentNetworkParams::AnyToErc20(AnyToErc20Params {
                declarative: self.declarative,
                payment_address: self.payment_address.unwrap_or_default(),
                refund_address: self.refund_address,
                payment_network_name: self.payment_network_name,
                fee_address: self.fee_address.unwrap_or(Address::ZERO),
                fee_amount: self.fee_amount.unwrap_or_else(default_fee_amount),
                max_rate_timespan: self.max_rate_timespan,
                network: self.network.unwrap_or_default(),
                accepted_tokens: self.accepted_tokens.unwrap_or_default(),
            }),
            PaymentNetworkId::AnyToEth => PaymentNetworkParams::AnyToEth(AnyToEthParams {
                declarative: self.declarative,
                payment_address: self.payment_address.unwrap_or_default(),
                refund_address: self.refund_address,
                payment_network_name: self.payment_network_name,
                fee_address: self.fee_address.unwrap_or(Address::ZERO),
                fee_amount: self.fee_amount.unwrap_or_else(default_fee_amount),
                max_rate_timespan: self.max_rate_timespan,
                network: self.network.unwrap_or_default(),
            }),
        }
    }
}

impl PaymentNetworkParams {
    /// The identifier of the active variant.
    pub fn id(&self) -> PaymentNetworkId {
        match self {
            PaymentNetworkParams::AnyDeclarative(_) => PaymentNetworkId::AnyDeclarative,
            PaymentNetworkParams::AddressBased(_) => PaymentNetworkId::AddressBased,
            PaymentNetworkParams::ReferenceBased(_) => PaymentNetworkId::ReferenceBased,
            PaymentNetworkParams::FeeReferenceBased(_) => PaymentNetworkId::FeeReferenceBased,
            PaymentNetworkParams::StreamReferenceBased(_) => PaymentNetworkId::StreamReferenceBased,
            PaymentNetworkParams::AnyToAnyConversion(_) => PaymentNetworkId::AnyToAnyConversion,
            PaymentNetworkParams::AnyToErc20(_) => PaymentNetworkId::AnyToErc20,
            PaymentNetworkParams::AnyToEth(_) => PaymentNetworkId::AnyToEth,
        }
    }

    /// An empty, defaulted variant for the given identifier.
    pub fn empty(id: PaymentNetworkId) -> Self {
        FieldBag::default().build(id)
    }

    /// Transitions to the variant identified by `id`.
    ///
    /// Values are preserved for fields whose name and role are shared with
    /// the current variant; all other fields are discarded and the new
    /// variant's defaults applied. Re-selecting the active identifier is a
    /// no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use rnf_types::payment::{
    ///     PaymentNetworkId, PaymentNetworkParams, ReferenceBasedParams,
    /// };
    ///
    /// let reference = PaymentNetworkParams::ReferenceBased(ReferenceBasedParams {
    ///     payment_address: "0xA".into(),
    ///     ..ReferenceBasedParams::default()
    /// });
    /// let fee = reference.switch_to(PaymentNetworkId::FeeReferenceBased);
    /// match fee {
    ///     PaymentNetworkParams::FeeReferenceBased(p) => {
    ///         assert_eq!(p.payment_address, "0xA");
    ///         assert_eq!(p.fee_amount, "0");
    ///     }
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn switch_to(&self, id: PaymentNetworkId) -> Self {
        if self.id() == id {
            return self.clone();
        }
        tracing::debug!(from = %self.id(), to = %id, "switching payment network variant");
        FieldBag::collect(self).build(id)
    }

    /// Validates the active variant's required fields and chain constraints.
    pub fn validate(&self) -> Result<(), PaymentParamsError> {
        match self {
            PaymentNetworkParams::AnyDeclarative(_) => Ok(()),
            PaymentNetworkParams::AddressBased(p) => require_payment_address(&p.payment_address),
            PaymentNetworkParams::ReferenceBased(p) => {
                require_payment_address(&p.payment_address)?;
                require_known_target(&p.payment_network_name)
            }
            PaymentNetworkParams::FeeReferenceBased(p) => {
                require_payment_address(&p.payment_address)?;
                require_known_target(&p.payment_network_name)
            }
            PaymentNetworkParams::StreamReferenceBased(p) => {
                require_payment_address(&p.payment_address)?;
                require_known_target(&p.payment_network_name)?;
                if p.expected_flow_rate.is_empty() {
                    return Err(ValidationError::new(
                        "parameters.expectedFlowRate",
                        "Expected flow rate is required",
                    )
                    .into());
                }
                if p.expected_start_date.is_empty() {
                    return Err(ValidationError::new(
                        "parameters.expectedStartDate",
                        "Expected start date is required",
                    )
                    .into());
                }
                Ok(())
            }
            PaymentNetworkParams::AnyToAnyConversion(p) => {
                require_payment_address(&p.payment_address)?;
                require_known_target(&p.payment_network_name)?;
                if let Some(network) = &p.network
                    && !is_known_chain(network)
                {
                    return Err(InvalidChainForVariant {
                        id: self.id(),
                        chain: network.clone(),
                    }
                    .into());
                }
                Ok(())
            }
            PaymentNetworkParams::AnyToErc20(p) => {
                require_payment_address(&p.payment_address)?;
                require_known_target(&p.payment_network_name)?;
                if p.accepted_tokens.is_empty() {
                    return Err(ValidationError::new(
                        "parameters.acceptedTokens",
                        "At least one token should be accepted",
                    )
                    .into());
                }
                if p.network.is_empty() {
                    return Err(ValidationError::new(
                        "parameters.network",
                        "A destination chain is required",
                    )
                    .into());
                }
                if !is_evm_chain(&p.network) {
                    return Err(InvalidChainForVariant {
                        id: self.id(),
                        chain: p.network.clone(),
                    }
                    .into());
                }
                Ok(())
            }
            PaymentNetworkParams::AnyToEth(p) => {
                require_payment_address(&p.payment_address)?;
                require_known_target(&p.payment_network_name)?;
                if p.network.is_empty() {
                    return Err(ValidationError::new(
                        "parameters.network",
                        "A destination chain is required",
                    )
                    .into());
                }
                if !is_known_chain(&p.network) {
                    return Err(InvalidChainForVariant {
                        id: self.id(),
                        chain: p.network.clone(),
                    }
                    .into());
                }
                Ok(())
            }
        }
    }
}

impl Default for PaymentNetworkParams {
    fn default() -> Self {
        PaymentNetworkParams::AnyDeclarative(DeclarativeFields::default())
    }
}

fn require_payment_address(payment_address: &str) -> Result<(), PaymentParamsError> {
    if payment_address.is_empty() {
        return Err(ValidationError::new(
            "parameters.paymentAddress",
            "A payment address is required",
        )
        .into());
    }
    Ok(())
}

fn require_known_target(payment_network_name: &Option<String>) -> Result<(), PaymentParamsError> {
    if let Some(name) = payment_network_name
        && !name.is_empty()
        && !is_known_chain(name)
    {
        return Err(ValidationError::new(
            "parameters.paymentNetworkName",
            format!("Unknown chain {name:?}"),
        )
        .into());
    }
    Ok(())
}
