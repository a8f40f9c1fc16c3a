//! Counterparty identities for a payment request.
//!
//! Receiver and payer are identified by an EVM address; address validity is
//! enforced by the [`Address`] type at the deserialization boundary rather
//! than by string checks downstream.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::invoice::UserInfo;
use crate::validation::ValidationError;

/// The kind of identity value. Only EVM addresses are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityType {
    #[serde(rename = "ethereumAddress")]
    EthereumAddress,
}

impl Default for IdentityType {
    fn default() -> Self {
        IdentityType::EthereumAddress
    }
}

/// A counterparty identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "type")]
    pub kind: IdentityType,
    pub value: Address,
}

impl Identity {
    /// An Ethereum-address identity.
    pub fn ethereum(value: Address) -> Self {
        Self {
            kind: IdentityType::EthereumAddress,
            value,
        }
    }
}

/// A counterparty: identity plus an optional profile for the invoice
/// document.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub identity: Identity,
    pub user_info: Option<UserInfo>,
}

impl Party {
    /// A party with no profile.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            user_info: None,
        }
    }
}

/// The counterparties section of a draft: who gets paid and who pays.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySection {
    pub receiver: Party,
    pub payer: Party,
    /// Optional draft metadata; not copied into the assembled request.
    pub timestamp: Option<String>,
    pub nonce: Option<u64>,
}

impl PartySection {
    /// A section with the given counterparties and no metadata.
    pub fn new(receiver: Party, payer: Party) -> Self {
        Self {
            receiver,
            payer,
            timestamp: None,
            nonce: None,
        }
    }

    /// Checks the section's cross-field rule: receiver and payer must be
    /// different identities.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.receiver.identity.value == self.payer.identity.value {
            return Err(ValidationError::new(
                "payer.identity.value",
                "Receiver and payer cannot be the same",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_identity_wire_shape() {
        let identity = Identity::ethereum(address!("0x1111111111111111111111111111111111111111"));
        let json = serde_json::to_value(identity).unwrap();
        assert_eq!(json["type"], "ethereumAddress");
    }

    #[test]
    fn test_rejects_malformed_address() {
        let result: Result<Identity, _> =
            serde_json::from_str(r#"{"type":"ethereumAddress","value":"0x123"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_receiver_must_differ_from_payer() {
        let addr = address!("0x2222222222222222222222222222222222222222");
        let section = PartySection::new(
            Party::new(Identity::ethereum(addr)),
            Party::new(Identity::ethereum(addr)),
        );
        let err = section.validate().unwrap_err();
        assert_eq!(err.path, "payer.identity.value");

        let other = Party::new(Identity::ethereum(address!(
            "0x3333333333333333333333333333333333333333"
        )));
        let section = PartySection::new(section.receiver, other);
        assert!(section.validate().is_ok());
    }
}
