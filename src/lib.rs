//! Cross-chain invoice drafting and payment request assembly.
//!
//! This crate drives the composition of an invoice against a blockchain
//! payment request. An invoice is drafted in three stages (counterparties,
//! payment network and currency, line items) and finally assembled into a
//! normalized, wire-ready payload for an external submission client.
//!
//! # Overview
//!
//! The pipeline is pure and synchronous: every resolution step is a lookup
//! over in-memory tables and the in-progress draft. Wallet interaction,
//! transaction broadcast, persistence, and rendering are external
//! collaborators that consume what this crate produces.
//!
//! - Drafting: [`draft::InvoiceDraft`] holds the editable wizard state and
//!   applies payment-network switches as atomic transitions.
//! - Preview: [`rnf_types::totals`] computes per-line and invoice totals for
//!   live display, with the same calculation the final document uses.
//! - Assembly: [`assemble::Assembler`] resolves the draft against the
//!   currency, token, and geography tables into an immutable
//!   [`assemble::AssembledRequest`], atomically.
//!
//! # Modules
//!
//! - [`assemble`] — Final request assembly and its error taxonomy.
//! - [`draft`] — The wizard draft state machine.
//! - [`types`] — Re-export of the `rnf-types` core structures (currencies,
//!   chains, payment-network variants, amounts, invoice documents).
//!
//! # Example
//!
//! ```
//! use rnf_rs::assemble::Assembler;
//! use rnf_rs::draft::{CurrencySelection, InvoiceDraft, PaymentSection};
//! use rnf_rs::types::currency::{CurrencyRegistry, SettlementFamily};
//! use rnf_rs::types::identity::{Identity, Party, PartySection};
//! use rnf_rs::types::invoice::{InvoiceDocument, LineItem};
//! use rnf_rs::types::payment::{PaymentNetworkId, PaymentNetworkParams};
//! use rnf_rs::types::tokens::TokenRegistry;
//!
//! let mut draft = InvoiceDraft::new();
//! draft.set_party(PartySection::new(
//!     Party::new(Identity::ethereum(
//!         "0x1111111111111111111111111111111111111111".parse().unwrap(),
//!     )),
//!     Party::new(Identity::ethereum(
//!         "0x2222222222222222222222222222222222222222".parse().unwrap(),
//!     )),
//! ));
//!
//! let mut params = PaymentNetworkParams::empty(PaymentNetworkId::AddressBased);
//! if let PaymentNetworkParams::AddressBased(p) = &mut params {
//!     p.payment_address = "0x1111111111111111111111111111111111111111".into();
//! }
//! draft.set_payment(PaymentSection {
//!     currency: CurrencySelection {
//!         family: SettlementFamily::Token20,
//!         chain: Some("sepolia".into()),
//!         currency_id: "fUSDC-sepolia".into(),
//!     },
//!     expected_amount: "10.5".into(),
//!     params,
//! });
//!
//! let mut invoice = InvoiceDocument::new("INV-1", "2024-02-01T00:00:00Z");
//! invoice.invoice_items.push(LineItem::new("Consulting", 1.0, "10.5"));
//! draft.set_invoice(invoice);
//!
//! let currencies = CurrencyRegistry::default();
//! let tokens = TokenRegistry::default();
//! let assembled = Assembler::new(&currencies, &tokens).assemble(&draft).unwrap();
//! assert_eq!(assembled.request_info.expected_amount, "10500000");
//! ```

pub mod assemble;
pub mod draft;

pub use rnf_types as types;
