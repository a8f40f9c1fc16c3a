//! The in-progress invoice draft and its wizard state.
//!
//! An invoice is composed in three stages (counterparties, payment,
//! line items) and held in a single [`InvoiceDraft`] until submission.
//! The draft is an explicit owned state object with one writer: every
//! setter replaces a whole section in one atomic transition, so observers
//! never see a half-applied update (e.g. a new payment-network id with the
//! old variant's fields).
//!
//! Abandoning the wizard is just dropping the draft; assembly itself lives
//! in [`crate::assemble`].

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use rnf_types::currency::SettlementFamily;
use rnf_types::identity::PartySection;
use rnf_types::invoice::InvoiceDocument;
use rnf_types::payment::{PaymentNetworkId, PaymentNetworkParams};

/// The three stages of the invoice wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DraftStep {
    /// Counterparties: receiver and payer.
    #[default]
    PartyInfo,
    /// Payment network and currency.
    PaymentInfo,
    /// Line items, terms, and notes.
    InvoiceInfo,
}

impl DraftStep {
    /// The following step; saturates at the last stage.
    pub fn next(self) -> Self {
        match self {
            DraftStep::PartyInfo => DraftStep::PaymentInfo,
            DraftStep::PaymentInfo | DraftStep::InvoiceInfo => DraftStep::InvoiceInfo,
        }
    }

    /// The preceding step; saturates at the first stage.
    pub fn previous(self) -> Self {
        match self {
            DraftStep::PartyInfo | DraftStep::PaymentInfo => DraftStep::PartyInfo,
            DraftStep::InvoiceInfo => DraftStep::PaymentInfo,
        }
    }
}

/// The currency chosen for the request.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySelection {
    /// Settlement family the currency belongs to.
    #[serde(rename = "type")]
    pub family: SettlementFamily,
    /// Chain the user picked, absent for fiat.
    pub chain: Option<String>,
    /// Registry id of the currency (e.g. `"USDC-mainnet"`).
    pub currency_id: String,
}

/// The payment stage of the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSection {
    pub currency: CurrencySelection,
    /// Human-entered decimal amount; scaled to settlement units at assembly.
    pub expected_amount: String,
    /// The active payment-network variant.
    pub params: PaymentNetworkParams,
}

/// The process-wide editable draft, mutated across the wizard stages.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDraft {
    step: DraftStep,
    pub party: Option<PartySection>,
    pub payment: Option<PaymentSection>,
    pub invoice: Option<InvoiceDocument>,
}

impl InvoiceDraft {
    /// An empty draft at the first wizard stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current wizard stage.
    pub fn step(&self) -> DraftStep {
        self.step
    }

    /// Jumps to an arbitrary stage.
    pub fn set_step(&mut self, step: DraftStep) {
        self.step = step;
    }

    /// Advances to the next stage.
    pub fn next(&mut self) {
        self.step = self.step.next();
    }

    /// Returns to the previous stage.
    pub fn previous(&mut self) {
        self.step = self.step.previous();
    }

    /// Replaces the counterparties section.
    pub fn set_party(&mut self, party: PartySection) {
        self.party = Some(party);
    }

    /// Replaces the payment section.
    pub fn set_payment(&mut self, payment: PaymentSection) {
        self.payment = Some(payment);
    }

    /// Replaces the invoice section.
    pub fn set_invoice(&mut self, invoice: InvoiceDocument) {
        self.invoice = Some(invoice);
    }

    /// Switches the payment-network identifier of the payment section,
    /// carrying over shared fields and resetting the rest, as one atomic
    /// transition. A draft without a payment section is left untouched.
    pub fn set_payment_network(&mut self, id: PaymentNetworkId) {
        if let Some(payment) = &mut self.payment {
            payment.params = payment.params.switch_to(id);
        } else {
            tracing::debug!(%id, "ignoring payment network switch before payment stage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnf_types::payment::ReferenceBasedParams;

    fn payment_section(params: PaymentNetworkParams) -> PaymentSection {
        PaymentSection {
            currency: CurrencySelection {
                family: SettlementFamily::Token20,
                chain: Some("sepolia".into()),
                currency_id: "fUSDC-sepolia".into(),
            },
            expected_amount: "1.5".into(),
            params,
        }
    }

    #[test]
    fn test_steps_saturate_at_both_ends() {
        let mut draft = InvoiceDraft::new();
        assert_eq!(draft.step(), DraftStep::PartyInfo);
        draft.previous();
        assert_eq!(draft.step(), DraftStep::PartyInfo);
        draft.next();
        draft.next();
        assert_eq!(draft.step(), DraftStep::InvoiceInfo);
        draft.next();
        assert_eq!(draft.step(), DraftStep::InvoiceInfo);
    }

    #[test]
    fn test_switch_network_is_one_transition() {
        let mut draft = InvoiceDraft::new();
        draft.set_payment(payment_section(PaymentNetworkParams::ReferenceBased(
            ReferenceBasedParams {
                payment_address: "0xA".into(),
                ..ReferenceBasedParams::default()
            },
        )));

        draft.set_payment_network(PaymentNetworkId::FeeReferenceBased);
        let params = &draft.payment.as_ref().unwrap().params;
        assert_eq!(params.id(), PaymentNetworkId::FeeReferenceBased);
        match params {
            PaymentNetworkParams::FeeReferenceBased(p) => {
                assert_eq!(p.payment_address, "0xA");
                assert_eq!(p.fee_amount, "0");
            }
            other => panic!("unexpected variant {:?}", other.id()),
        }
    }

    #[test]
    fn test_switch_network_without_payment_section_is_ignored() {
        let mut draft = InvoiceDraft::new();
        draft.set_payment_network(PaymentNetworkId::AnyToEth);
        assert!(draft.payment.is_none());
    }
}
