//! The rnf invoice document.
//!
//! An invoice document travels alongside the payment request and is the
//! source of truth for what is being billed: parties, line items, payment
//! terms, free-form notes. The wire format is JSON with camelCase fields,
//! tagged by a fixed `meta` block (`rnf_invoice` / `0.0.3`) so consumers can
//! reject documents they do not understand.
//!
//! # Key Types
//!
//! - [`InvoiceDocument`] - The full document
//! - [`LineItem`] / [`Tax`] - Billable positions
//! - [`UserInfo`] / [`PostalAddress`] - Party profiles
//! - [`PaymentTerms`] - Due date and late-fee terms
//! - [`InvoiceMeta`] - Format/version marker block

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;

/// Format marker that serializes as the literal `"rnf_invoice"`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RnfFormat;

impl RnfFormat {
    pub const VALUE: &'static str = "rnf_invoice";
}

impl Serialize for RnfFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(Self::VALUE)
    }
}

impl<'de> Deserialize<'de> for RnfFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == Self::VALUE {
            Ok(RnfFormat)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected format {:?}, got {s:?}",
                Self::VALUE
            )))
        }
    }
}

/// Format version marker that serializes as the literal `"0.0.3"`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RnfVersion;

impl RnfVersion {
    pub const VALUE: &'static str = "0.0.3";
}

impl Serialize for RnfVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(Self::VALUE)
    }
}

impl<'de> Deserialize<'de> for RnfVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == Self::VALUE {
            Ok(RnfVersion)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected version {:?}, got {s:?}",
                Self::VALUE
            )))
        }
    }
}

/// Meta information about the document format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    /// Always `"rnf_invoice"`.
    pub format: RnfFormat,
    /// Always `"0.0.3"`.
    pub version: RnfVersion,
}

/// A postal address on a party profile.
///
/// Country and state hold ISO codes while the invoice is being drafted; the
/// assembler replaces them with canonical names in the final document.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

/// Profile information for a seller or buyer.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<PostalAddress>,
    pub tax_registration: Option<String>,
    pub company_registration: Option<String>,
    pub miscellaneous: Option<serde_json::Map<String, serde_json::Value>>,
}

/// How a line item's tax amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    /// `amount` is a percentage of the discounted line base.
    Percentage,
    /// `amount` is a fixed addition to the discounted line base.
    Fixed,
}

/// Tax information for a single line item.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    /// Interpretation of `amount`.
    #[serde(rename = "type")]
    pub kind: TaxKind,
    /// Decimal tax amount; absent or empty means no tax.
    #[serde(default)]
    pub amount: Option<String>,
}

impl Tax {
    /// Percentage tax of the given amount.
    pub fn percentage(amount: impl Into<String>) -> Self {
        Self {
            kind: TaxKind::Percentage,
            amount: Some(amount.into()),
        }
    }

    /// Fixed tax of the given amount.
    pub fn fixed(amount: impl Into<String>) -> Self {
        Self {
            kind: TaxKind::Fixed,
            amount: Some(amount.into()),
        }
    }

    /// No tax.
    pub fn none() -> Self {
        Self {
            kind: TaxKind::Percentage,
            amount: None,
        }
    }
}

/// A billable position on the invoice.
///
/// `unit_price` and `discount` are human-entered decimal strings while the
/// invoice is drafted; the assembler rescales them to integer settlement
/// units in the final document.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub reference: Option<String>,
    /// Number of units, zero or more.
    pub quantity: f64,
    /// Price per unit as a decimal string.
    pub unit_price: String,
    /// Absolute discount on the line, applied before tax.
    pub discount: Option<String>,
    pub tax: Tax,
    /// Currency the line is denominated in.
    pub currency: String,
    pub delivery_date: Option<String>,
    pub delivery_period: Option<String>,
}

impl LineItem {
    /// A line item with the given name, quantity, and unit price; no
    /// discount, no tax.
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: None,
            quantity,
            unit_price: unit_price.into(),
            discount: None,
            tax: Tax::none(),
            currency: String::new(),
            delivery_date: None,
            delivery_period: None,
        }
    }
}

/// Payment terms of the invoice.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTerms {
    /// RFC 3339 due date.
    pub due_date: Option<String>,
    pub late_fees_percent: Option<f64>,
    /// Fixed late fee in settlement units.
    pub late_fees_fix: Option<String>,
    pub miscellaneous: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A complete rnf invoice document.
///
/// During drafting, `seller_info`/`buyer_info` are absent; the assembler
/// fills them from the party profiles, with locale codes resolved to
/// canonical names.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub meta: InvoiceMeta,
    /// RFC 3339 creation date.
    pub creation_date: String,
    pub invoice_number: String,
    pub purchase_order_id: Option<String>,
    pub note: Option<String>,
    pub terms: Option<String>,
    pub seller_info: Option<UserInfo>,
    pub buyer_info: Option<UserInfo>,
    pub invoice_items: Vec<LineItem>,
    pub payment_terms: Option<PaymentTerms>,
    pub miscellaneous: Option<serde_json::Map<String, serde_json::Value>>,
}

impl InvoiceDocument {
    /// An empty invoice with the given number and creation date.
    pub fn new(invoice_number: impl Into<String>, creation_date: impl Into<String>) -> Self {
        Self {
            meta: InvoiceMeta::default(),
            creation_date: creation_date.into(),
            invoice_number: invoice_number.into(),
            purchase_order_id: None,
            note: None,
            terms: None,
            seller_info: None,
            buyer_info: None,
            invoice_items: Vec::new(),
            payment_terms: None,
            miscellaneous: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_serializes_as_literals() {
        let meta = InvoiceMeta::default();
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["format"], "rnf_invoice");
        assert_eq!(json["version"], "0.0.3");
    }

    #[test]
    fn test_meta_rejects_other_versions() {
        let result: Result<InvoiceMeta, _> =
            serde_json::from_str(r#"{"format":"rnf_invoice","version":"0.0.2"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_wire_shape() {
        let mut document = InvoiceDocument::new("INV-007", "2024-02-01T00:00:00Z");
        let mut item = LineItem::new("Consulting", 3.0, "10");
        item.discount = Some("5".into());
        item.tax = Tax::percentage("10");
        item.currency = "fUSDC-sepolia".into();
        document.invoice_items.push(item);

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["invoiceNumber"], "INV-007");
        assert_eq!(json["invoiceItems"][0]["unitPrice"], "10");
        assert_eq!(json["invoiceItems"][0]["tax"]["type"], "percentage");
        // Absent optionals are omitted, not null.
        assert!(json.get("note").is_none());
        assert!(json["invoiceItems"][0].get("reference").is_none());
    }

    #[test]
    fn test_document_round_trip() {
        let mut document = InvoiceDocument::new("INV-008", "2024-02-01T00:00:00Z");
        document.note = Some("net 30".into());
        document.payment_terms = Some(PaymentTerms {
            due_date: Some("2024-03-02T00:00:00Z".into()),
            ..PaymentTerms::default()
        });

        let json = serde_json::to_string(&document).unwrap();
        let back: InvoiceDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, document);
    }
}
