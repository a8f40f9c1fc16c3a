//! Line-item and invoice totals.
//!
//! One calculation backs both the live preview and the printable document,
//! so the two can never disagree. The ordering is fixed: discount first,
//! then tax. Public totals are formatted to exactly two fractional digits,
//! rounding halves away from zero.
//!
//! The invoice total is the sum of the per-line *rounded* totals, not a
//! rounded sum. This matches what is displayed per line; see the tests for
//! the cent-level difference.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::invoice::{LineItem, TaxKind};

/// Per-line and invoice-level totals, ready for a rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsPreview {
    /// Rounded total per line, in item order.
    pub line_totals: Vec<String>,
    /// Sum of the rounded line totals.
    pub invoice_total: String,
}

// Unparseable in-progress input previews as zero, like an empty field.
fn parse_or_zero(value: &str) -> Decimal {
    Decimal::from_str(value.trim()).unwrap_or_default()
}

fn line_total_decimal(item: &LineItem) -> Decimal {
    if item.quantity == 0.0 || !item.quantity.is_finite() || item.unit_price.trim().is_empty() {
        return Decimal::ZERO;
    }
    let quantity = Decimal::from_f64(item.quantity).unwrap_or_default();
    let unit_price = parse_or_zero(&item.unit_price);

    let base = quantity * unit_price;
    let after_discount = match &item.discount {
        Some(discount) => base - parse_or_zero(discount),
        None => base,
    };

    let tax_amount = item.tax.amount.as_deref().map(parse_or_zero).unwrap_or_default();
    match item.tax.kind {
        TaxKind::Percentage => after_discount + after_discount * tax_amount / Decimal::ONE_HUNDRED,
        TaxKind::Fixed => after_discount + tax_amount,
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn format2(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Total of a single line: `quantity × unitPrice`, minus discount, plus tax.
///
/// Formatted to exactly two fractional digits. A line with zero quantity or
/// an empty unit price totals `"0.00"`.
///
/// # Example
///
/// ```
/// use rnf_types::invoice::{LineItem, Tax};
/// use rnf_types::totals::line_total;
///
/// let mut item = LineItem::new("Consulting", 3.0, "10");
/// item.discount = Some("5".into());
/// item.tax = Tax::percentage("10");
/// assert_eq!(line_total(&item), "27.50");
/// ```
pub fn line_total(item: &LineItem) -> String {
    format2(round2(line_total_decimal(item)))
}

/// Invoice-level total: the sum of the per-line rounded totals.
pub fn invoice_total(items: &[LineItem]) -> String {
    let sum: Decimal = items.iter().map(|item| round2(line_total_decimal(item))).sum();
    format2(sum)
}

/// Computes every line total and the invoice total in one pass.
pub fn preview(items: &[LineItem]) -> TotalsPreview {
    let rounded: Vec<Decimal> = items
        .iter()
        .map(|item| round2(line_total_decimal(item)))
        .collect();
    let sum: Decimal = rounded.iter().copied().sum();
    TotalsPreview {
        line_totals: rounded.into_iter().map(format2).collect(),
        invoice_total: format2(sum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::Tax;

    fn item(quantity: f64, unit_price: &str) -> LineItem {
        LineItem::new("widget", quantity, unit_price)
    }

    #[test]
    fn test_percentage_tax_after_discount() {
        let mut line = item(3.0, "10");
        line.discount = Some("5".into());
        line.tax = Tax::percentage("10");
        // 3 * 10 = 30, minus 5 = 25, plus 10% = 27.50
        assert_eq!(line_total(&line), "27.50");
    }

    #[test]
    fn test_fixed_tax_without_discount() {
        let mut line = item(2.0, "100");
        line.tax = Tax::fixed("3");
        assert_eq!(line_total(&line), "203.00");
    }

    #[test]
    fn test_zero_quantity_or_empty_price_is_zero() {
        assert_eq!(line_total(&item(0.0, "10")), "0.00");
        assert_eq!(line_total(&item(3.0, "")), "0.00");
        assert_eq!(line_total(&item(3.0, "   ")), "0.00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 1 * 0.005 rounds up to 0.01, not banker's 0.00.
        assert_eq!(line_total(&item(1.0, "0.005")), "0.01");
    }

    #[test]
    fn test_invoice_total_sums_rounded_lines() {
        let lines = vec![item(1.0, "0.005"), item(1.0, "0.005")];
        // Each line rounds to 0.01 before summing; a rounded sum would be 0.01.
        assert_eq!(invoice_total(&lines), "0.02");
    }

    #[test]
    fn test_preview_matches_individual_totals() {
        let mut taxed = item(2.0, "100");
        taxed.tax = Tax::fixed("3");
        let lines = vec![taxed.clone(), item(1.0, "0.40")];

        let preview = preview(&lines);
        assert_eq!(preview.line_totals, vec!["203.00", "0.40"]);
        assert_eq!(preview.invoice_total, "203.40");
        assert_eq!(preview.line_totals[0], line_total(&taxed));
    }

    #[test]
    fn test_fractional_quantity() {
        let line = item(2.5, "4");
        assert_eq!(line_total(&line), "10.00");
    }

    #[test]
    fn test_unparseable_input_previews_as_zero() {
        let mut line = item(2.0, "abc");
        assert_eq!(line_total(&line), "0.00");
        line.unit_price = "10".into();
        line.discount = Some("oops".into());
        assert_eq!(line_total(&line), "20.00");
    }
}
