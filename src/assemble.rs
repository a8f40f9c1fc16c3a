//! Final request assembly.
//!
//! [`Assembler::assemble`] turns an edited [`InvoiceDraft`] into an
//! immutable [`AssembledRequest`]: the request info, the resolved
//! payment-network parameters, and the invoice document, ready for an
//! external submission client.
//!
//! Assembly is atomic. Every resolution step (currency lookup, amount
//! scaling, locale resolution, token accept-list resolution) must succeed
//! or the whole operation fails with a typed [`AssembleError`] and no
//! partial payload. A failed submission requires re-deriving the request
//! from the (possibly re-edited) draft; the pipeline never retries on its
//! own.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use rnf_types::amount::{self, AmountError};
use rnf_types::currency::{CurrencyNotFound, CurrencyRegistry, SettlementFamily};
use rnf_types::geo::{self, UnknownLocale};
use rnf_types::identity::Identity;
use rnf_types::invoice::{InvoiceDocument, UserInfo};
use rnf_types::payment::{InvalidChainForVariant, PaymentNetworkParams, PaymentParamsError};
use rnf_types::timestamp::UnixTimestamp;
use rnf_types::tokens::{AmbiguousOrMissingToken, TokenRegistry};
use rnf_types::validation::ValidationError;

use crate::draft::InvoiceDraft;

/// The canonical, chain-qualified currency of an assembled request.
///
/// `value` is the token contract address for address-family currencies and
/// the plain symbol otherwise.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCurrency {
    #[serde(rename = "type")]
    pub family: SettlementFamily,
    pub value: String,
    pub network: Option<String>,
}

/// Core request parameters of the assembled payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub currency: RequestCurrency,
    /// Expected amount in integer settlement units.
    pub expected_amount: String,
    pub receiver: Identity,
    pub payer: Identity,
    pub timestamp: UnixTimestamp,
}

/// The wire-ready request payload. Immutable once built; derived exactly
/// once per submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledRequest {
    pub request_info: RequestInfo,
    /// Active variant with token symbols resolved to addresses.
    pub payment_network: PaymentNetworkParams,
    /// Invoice document with amounts in settlement units and locale codes
    /// replaced by canonical names.
    pub invoice: InvoiceDocument,
}

/// Why a draft could not be assembled. All of these are recoverable by
/// editing the draft and re-submitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssembleError {
    /// A wizard section or identity the payload cannot exist without.
    #[error("Missing required field {0}")]
    MissingRequiredField(&'static str),
    /// A shape or required-field violation in a draft section.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The selected chain is incompatible with the active variant.
    #[error(transparent)]
    InvalidChain(#[from] InvalidChainForVariant),
    /// The draft references a currency id the registry does not know.
    #[error(transparent)]
    CurrencyNotFound(#[from] CurrencyNotFound),
    /// A non-empty country or state code failed to resolve.
    #[error(transparent)]
    UnknownLocale(#[from] UnknownLocale),
    /// An accepted-token symbol resolved to zero or multiple deployments.
    #[error(transparent)]
    Token(#[from] AmbiguousOrMissingToken),
    /// An amount failed to parse or scale.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl From<PaymentParamsError> for AssembleError {
    fn from(err: PaymentParamsError) -> Self {
        match err {
            PaymentParamsError::Validation(err) => AssembleError::Validation(err),
            PaymentParamsError::InvalidChain(err) => AssembleError::InvalidChain(err),
        }
    }
}

/// Assembles drafts against the injected registries.
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'a> {
    currencies: &'a CurrencyRegistry,
    tokens: &'a TokenRegistry,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler over the given lookup tables.
    pub fn new(currencies: &'a CurrencyRegistry, tokens: &'a TokenRegistry) -> Self {
        Self { currencies, tokens }
    }

    /// Derives the immutable request payload from a draft.
    ///
    /// # Errors
    ///
    /// Fails without producing any partial payload when a section is
    /// missing, a section fails validation, the currency is unknown, an
    /// amount cannot be scaled, a locale code does not resolve, or an
    /// accepted-token symbol is missing or ambiguous on the selected chain.
    pub fn assemble(&self, draft: &InvoiceDraft) -> Result<AssembledRequest, AssembleError> {
        let party = draft
            .party
            .as_ref()
            .ok_or(AssembleError::MissingRequiredField("partyInfo"))?;
        let payment = draft
            .payment
            .as_ref()
            .ok_or(AssembleError::MissingRequiredField("paymentInfo"))?;
        let invoice = draft
            .invoice
            .as_ref()
            .ok_or(AssembleError::MissingRequiredField("invoiceInfo"))?;

        party.validate()?;
        payment.params.validate()?;

        let record = self.currencies.lookup(&payment.currency.currency_id)?;
        if payment.currency.family != record.family {
            return Err(ValidationError::new(
                "currency.type",
                format!(
                    "Selected family {} does not match currency {}",
                    payment.currency.family, record.id
                ),
            )
            .into());
        }
        if let Some(chain) = &payment.currency.chain
            && record.network.as_ref() != Some(chain)
        {
            return Err(ValidationError::new(
                "currency.network",
                format!("Currency {} is not on chain {chain}", record.id),
            )
            .into());
        }
        tracing::debug!(currency = %record.id, decimals = record.decimals, "resolved request currency");

        // The headline amount is audit-critical: reject excess precision
        // instead of truncating it away.
        let expected_amount =
            amount::to_settlement_units_strict(&payment.expected_amount, record.decimals)?;

        let value = match (record.family, record.address) {
            (SettlementFamily::Token20 | SettlementFamily::StreamToken, Some(address)) => {
                address.to_string()
            }
            _ => record.symbol.clone(),
        };

        let mut invoice = invoice.clone();
        for item in &mut invoice.invoice_items {
            item.unit_price = scale_or_zero(&item.unit_price, record.decimals)?;
            if let Some(discount) = &item.discount {
                item.discount = Some(scale_or_zero(discount, record.decimals)?);
            }
        }
        invoice.seller_info = resolve_locale(party.receiver.user_info.clone())?;
        invoice.buyer_info = resolve_locale(party.payer.user_info.clone())?;

        let payment_network = match &payment.params {
            PaymentNetworkParams::AnyToErc20(params) => {
                let addresses = self.tokens.resolve(&params.accepted_tokens, &params.network)?;
                let mut resolved = params.clone();
                resolved.accepted_tokens =
                    addresses.into_iter().map(|a| a.to_string()).collect();
                PaymentNetworkParams::AnyToErc20(resolved)
            }
            other => other.clone(),
        };

        let request_info = RequestInfo {
            currency: RequestCurrency {
                family: record.family,
                value,
                network: record.network.clone(),
            },
            expected_amount,
            receiver: party.receiver.identity,
            payer: party.payer.identity,
            timestamp: UnixTimestamp::now(),
        };

        tracing::debug!(
            network = %payment_network.id(),
            items = invoice.invoice_items.len(),
            "assembled request payload"
        );
        Ok(AssembledRequest {
            request_info,
            payment_network,
            invoice,
        })
    }
}

// An unfilled draft amount scales to zero units, like an empty field.
fn scale_or_zero(value: &str, decimals: u32) -> Result<String, AmountError> {
    if value.trim().is_empty() {
        return Ok("0".to_string());
    }
    amount::to_settlement_units(value, decimals)
}

fn resolve_locale(info: Option<UserInfo>) -> Result<Option<UserInfo>, UnknownLocale> {
    let Some(mut info) = info else {
        return Ok(None);
    };
    if let Some(address) = &mut info.address {
        // Absent codes pass through; present codes must resolve.
        if let Some(country_code) = address.country.clone().filter(|c| !c.is_empty()) {
            address.country = Some(geo::resolve_country(&country_code)?.to_string());
            if let Some(state_code) = address.state.clone().filter(|s| !s.is_empty()) {
                address.state = Some(geo::resolve_state(&country_code, &state_code)?.to_string());
            }
        }
    }
    Ok(Some(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, address};

    use rnf_types::invoice::{LineItem, PostalAddress, Tax};
    use rnf_types::identity::{Identity, Party, PartySection};
    use rnf_types::payment::{AnyToErc20Params, ReferenceBasedParams};

    use crate::draft::{CurrencySelection, PaymentSection};

    fn receiver() -> Party {
        let mut party = Party::new(Identity::ethereum(address!(
            "0x1111111111111111111111111111111111111111"
        )));
        party.user_info = Some(UserInfo {
            business_name: Some("Acme Corp".into()),
            address: Some(PostalAddress {
                street: Some("1 Main St".into()),
                city: Some("San Francisco".into()),
                country: Some("US".into()),
                state: Some("CA".into()),
                ..PostalAddress::default()
            }),
            ..UserInfo::default()
        });
        party
    }

    fn payer() -> Party {
        let mut party = Party::new(Identity::ethereum(address!(
            "0x2222222222222222222222222222222222222222"
        )));
        party.user_info = Some(UserInfo {
            address: Some(PostalAddress {
                country: Some("DE".into()),
                ..PostalAddress::default()
            }),
            ..UserInfo::default()
        });
        party
    }

    fn payment(currency_id: &str, family: SettlementFamily, chain: Option<&str>) -> PaymentSection {
        PaymentSection {
            currency: CurrencySelection {
                family,
                chain: chain.map(str::to_string),
                currency_id: currency_id.into(),
            },
            expected_amount: "1.5".into(),
            params: PaymentNetworkParams::ReferenceBased(ReferenceBasedParams {
                payment_address: "0x1111111111111111111111111111111111111111".into(),
                ..ReferenceBasedParams::default()
            }),
        }
    }

    fn invoice() -> InvoiceDocument {
        let mut document = InvoiceDocument::new("INV-1", "2024-02-01T00:00:00Z");
        let mut item = LineItem::new("Consulting", 3.0, "10");
        item.discount = Some("5".into());
        item.tax = Tax::percentage("10");
        item.currency = "fUSDC-sepolia".into();
        document.invoice_items.push(item);
        document
    }

    fn draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new();
        draft.set_party(PartySection::new(receiver(), payer()));
        draft.set_payment(payment(
            "fUSDC-sepolia",
            SettlementFamily::Token20,
            Some("sepolia"),
        ));
        draft.set_invoice(invoice());
        draft
    }

    fn registries() -> (CurrencyRegistry, TokenRegistry) {
        (CurrencyRegistry::default(), TokenRegistry::default())
    }

    #[test]
    fn test_assembles_token_currency_draft() {
        let (currencies, tokens) = registries();
        let assembled = Assembler::new(&currencies, &tokens)
            .assemble(&draft())
            .unwrap();

        assert_eq!(assembled.request_info.expected_amount, "1500000");
        let value: Address = assembled.request_info.currency.value.parse().unwrap();
        assert_eq!(
            value,
            address!("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238")
        );
        assert_eq!(
            assembled.request_info.currency.network.as_deref(),
            Some("sepolia")
        );

        let item = &assembled.invoice.invoice_items[0];
        assert_eq!(item.unit_price, "10000000");
        assert_eq!(item.discount.as_deref(), Some("5000000"));

        let seller = assembled.invoice.seller_info.as_ref().unwrap();
        let seller_address = seller.address.as_ref().unwrap();
        assert_eq!(seller_address.country.as_deref(), Some("United States"));
        assert_eq!(seller_address.state.as_deref(), Some("California"));

        let buyer = assembled.invoice.buyer_info.as_ref().unwrap();
        assert_eq!(
            buyer.address.as_ref().unwrap().country.as_deref(),
            Some("Germany")
        );
    }

    #[test]
    fn test_native_currency_uses_symbol_value() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut section = payment("ETH-mainnet", SettlementFamily::Native, Some("mainnet"));
        section.expected_amount = "2".into();
        draft.set_payment(section);

        let assembled = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap();
        assert_eq!(assembled.request_info.currency.value, "ETH");
        assert_eq!(
            assembled.request_info.expected_amount,
            "2000000000000000000"
        );
    }

    #[test]
    fn test_unknown_currency_fails() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        draft.set_payment(payment("DOGE-much", SettlementFamily::Token20, None));

        let err = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err();
        assert_eq!(
            err,
            AssembleError::CurrencyNotFound(CurrencyNotFound("DOGE-much".into()))
        );
    }

    #[test]
    fn test_unknown_country_fails_whole_assembly() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut party = PartySection::new(receiver(), payer());
        party.receiver.user_info.as_mut().unwrap().address =
            Some(PostalAddress {
                country: Some("ZZ".into()),
                ..PostalAddress::default()
            });
        draft.set_party(party);

        let err = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err();
        assert_eq!(
            err,
            AssembleError::UnknownLocale(UnknownLocale::Country("ZZ".into()))
        );
    }

    #[test]
    fn test_absent_locale_codes_pass_through() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut party = PartySection::new(receiver(), payer());
        party.payer.user_info.as_mut().unwrap().address = Some(PostalAddress::default());
        draft.set_party(party);

        let assembled = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap();
        let buyer_address = assembled.invoice.buyer_info.unwrap().address.unwrap();
        assert_eq!(buyer_address.country, None);
    }

    #[test]
    fn test_missing_accepted_token_fails_whole_assembly() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut section = payment("USDC-base", SettlementFamily::Token20, Some("base"));
        section.params = PaymentNetworkParams::AnyToErc20(AnyToErc20Params {
            payment_address: "0x1111111111111111111111111111111111111111".into(),
            network: "base".into(),
            accepted_tokens: vec!["USDC".into(), "DAI".into()],
            ..AnyToErc20Params::default()
        });
        draft.set_payment(section);

        let err = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err();
        assert_eq!(
            err,
            AssembleError::Token(AmbiguousOrMissingToken("DAI".into()))
        );
    }

    #[test]
    fn test_accepted_tokens_resolve_in_order() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut section = payment("USDC-mainnet", SettlementFamily::Token20, Some("mainnet"));
        section.params = PaymentNetworkParams::AnyToErc20(AnyToErc20Params {
            payment_address: "0x1111111111111111111111111111111111111111".into(),
            network: "mainnet".into(),
            accepted_tokens: vec!["DAI".into(), "USDC".into()],
            ..AnyToErc20Params::default()
        });
        draft.set_payment(section);

        let assembled = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap();
        match assembled.payment_network {
            PaymentNetworkParams::AnyToErc20(params) => {
                let parsed: Vec<Address> = params
                    .accepted_tokens
                    .iter()
                    .map(|t| t.parse().unwrap())
                    .collect();
                assert_eq!(
                    parsed,
                    vec![
                        address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
                        address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                    ]
                );
            }
            other => panic!("unexpected variant {:?}", other.id()),
        }
    }

    #[test]
    fn test_empty_accepted_tokens_fails_validation() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut section = payment("USDC-base", SettlementFamily::Token20, Some("base"));
        section.params = PaymentNetworkParams::AnyToErc20(AnyToErc20Params {
            payment_address: "0x1111111111111111111111111111111111111111".into(),
            network: "base".into(),
            ..AnyToErc20Params::default()
        });
        draft.set_payment(section);

        match Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err() {
            AssembleError::Validation(err) => {
                assert_eq!(err.path, "parameters.acceptedTokens");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_same_receiver_and_payer_fails() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        draft.set_party(PartySection::new(receiver(), receiver()));

        match Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err() {
            AssembleError::Validation(err) => {
                assert_eq!(err.path, "payer.identity.value");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_section_fails() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        draft.invoice = None;

        let err = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err();
        assert_eq!(err, AssembleError::MissingRequiredField("invoiceInfo"));
    }

    #[test]
    fn test_excess_amount_precision_fails() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut section = payment("fUSDC-sepolia", SettlementFamily::Token20, Some("sepolia"));
        section.expected_amount = "0.1234567".into();
        draft.set_payment(section);

        let err = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err();
        assert_eq!(
            err,
            AssembleError::Amount(AmountError::PrecisionOverflow {
                scale: 7,
                decimals: 6
            })
        );
    }

    #[test]
    fn test_family_mismatch_fails() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        draft.set_payment(payment(
            "fUSDC-sepolia",
            SettlementFamily::Native,
            Some("sepolia"),
        ));

        match Assembler::new(&currencies, &tokens).assemble(&draft).unwrap_err() {
            AssembleError::Validation(err) => assert_eq!(err.path, "currency.type"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_line_amounts_scale_to_zero() {
        let (currencies, tokens) = registries();
        let mut draft = draft();
        let mut document = invoice();
        document.invoice_items[0].unit_price = String::new();
        document.invoice_items[0].discount = None;
        draft.set_invoice(document);

        let assembled = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap();
        assert_eq!(assembled.invoice.invoice_items[0].unit_price, "0");
    }

    #[test]
    fn test_payload_wire_shape() {
        let (currencies, tokens) = registries();
        let assembled = Assembler::new(&currencies, &tokens)
            .assemble(&draft())
            .unwrap();

        let json = serde_json::to_value(&assembled).unwrap();
        assert_eq!(json["requestInfo"]["expectedAmount"], "1500000");
        assert_eq!(json["requestInfo"]["currency"]["type"], "ERC20");
        assert_eq!(json["paymentNetwork"]["id"], "pn-reference-based");
        assert_eq!(json["invoice"]["meta"]["format"], "rnf_invoice");
    }
}
