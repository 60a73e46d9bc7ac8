use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillpoint_core::numeric::round_money;

use crate::models::OrderItem;

/// Order totals split by taxability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub total_non_taxable: Decimal,
    pub total_taxable: Decimal,
    pub collected_tax: Decimal,
    pub total_amount: Decimal,
}

impl PriceSummary {
    /// Sum line totals; an item with zero tax counts as non-taxable.
    pub fn from_items(items: &[OrderItem]) -> Self {
        let mut summary = Self::default();

        for item in items {
            if item.tax.is_zero() {
                summary.total_non_taxable += item.line_total();
            } else {
                summary.total_taxable += item.line_total();
                summary.collected_tax += item.line_tax();
            }
        }

        summary.total_amount = summary.total_non_taxable + summary.total_taxable;
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    /// Cash first, card covers the rest
    #[serde(rename = "Cash → Card")]
    CashThenCard,
    /// Card first, cash covers the rest
    #[serde(rename = "Card → Cash")]
    CardThenCash,
}

/// What the customer handed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    pub method: PaymentMethod,
    #[serde(default)]
    pub cash_paid: Decimal,
    #[serde(default)]
    pub card_paid: Decimal,
}

/// Settled payment for an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub summary: PriceSummary,
    pub cash_paid: Decimal,
    pub card_paid: Decimal,
    pub change_given: Decimal,
    pub transaction_date: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SettlementError {
    #[error("Insufficient amount paid: required {required}, paid {paid}")]
    InsufficientPayment { required: Decimal, paid: Decimal },

    #[error("Card amount {card} exceeds total {total}")]
    CardOverpayment { card: Decimal, total: Decimal },
}

/// `a - b`, floored at zero
fn shortfall(a: Decimal, b: Decimal) -> Decimal {
    (a - b).max(Decimal::ZERO)
}

/// Work out change and card charge for a tender.
///
/// A cash-first split that left change is recorded as cash; a card-first
/// split the card fully covered is recorded as card.
pub fn settle(summary: PriceSummary, tender: Tender) -> Result<Transaction, SettlementError> {
    let total = round_money(summary.total_amount);
    let cash = round_money(tender.cash_paid);

    let (payment_method, cash_paid, card_paid, change_given) = match tender.method {
        PaymentMethod::Card => (PaymentMethod::Card, Decimal::ZERO, total, Decimal::ZERO),
        PaymentMethod::Cash => {
            if cash < total {
                return Err(SettlementError::InsufficientPayment { required: total, paid: cash });
            }
            (PaymentMethod::Cash, cash, Decimal::ZERO, cash - total)
        }
        PaymentMethod::CashThenCard => {
            // Only recorded as plain cash when there was change to give
            if cash > total {
                (PaymentMethod::Cash, cash, Decimal::ZERO, cash - total)
            } else {
                (PaymentMethod::CashThenCard, cash, total - cash, Decimal::ZERO)
            }
        }
        PaymentMethod::CardThenCash => {
            let card = round_money(tender.card_paid);
            if card > total {
                return Err(SettlementError::CardOverpayment { card, total });
            }
            let remaining = shortfall(total, card);
            if cash < remaining {
                return Err(SettlementError::InsufficientPayment { required: remaining, paid: cash });
            }
            let method = if remaining.is_zero() {
                PaymentMethod::Card
            } else {
                PaymentMethod::CardThenCash
            };
            (method, cash, card, shortfall(cash + card, total))
        }
    };

    Ok(Transaction {
        payment_method,
        summary,
        cash_paid,
        card_paid,
        change_given,
        transaction_date: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tillpoint_catalog::PriceQuote;
    use tillpoint_shared::{Item, OrderItemSelection};
    use uuid::Uuid;

    fn line(price: Decimal, tax: Decimal, quantity: u32) -> OrderItem {
        let item = Item::new("Cone", vec![]);
        let selection = OrderItemSelection::new(item.id, vec![]).with_quantity(quantity);
        let quote = PriceQuote { price, tax, subtotal: price - tax };
        OrderItem::new(Uuid::new_v4(), &item, &selection, quote)
    }

    fn summary_of(total: Decimal) -> PriceSummary {
        PriceSummary { total_amount: total, total_non_taxable: total, ..Default::default() }
    }

    #[test]
    fn test_summary_splits_taxable() {
        let items = vec![
            line(dec!(5.50), dec!(0.50), 2),
            line(dec!(3), Decimal::ZERO, 1),
        ];

        let summary = PriceSummary::from_items(&items);

        assert_eq!(summary.total_taxable, dec!(11));
        assert_eq!(summary.collected_tax, dec!(1));
        assert_eq!(summary.total_non_taxable, dec!(3));
        assert_eq!(summary.total_amount, dec!(14));
    }

    #[test]
    fn test_cash_change() {
        let tx = settle(
            summary_of(dec!(14)),
            Tender { method: PaymentMethod::Cash, cash_paid: dec!(20), card_paid: Decimal::ZERO },
        )
        .unwrap();
        assert_eq!(tx.change_given, dec!(6));

        let err = settle(
            summary_of(dec!(14)),
            Tender { method: PaymentMethod::Cash, cash_paid: dec!(10), card_paid: Decimal::ZERO },
        )
        .unwrap_err();
        assert_eq!(err, SettlementError::InsufficientPayment { required: dec!(14), paid: dec!(10) });
    }

    #[test]
    fn test_card_charges_total() {
        let tx = settle(
            summary_of(dec!(9.99)),
            Tender { method: PaymentMethod::Card, cash_paid: Decimal::ZERO, card_paid: Decimal::ZERO },
        )
        .unwrap();
        assert_eq!(tx.card_paid, dec!(9.99));
        assert_eq!(tx.change_given, Decimal::ZERO);
    }

    #[test]
    fn test_cash_then_card() {
        let tender = |cash| Tender { method: PaymentMethod::CashThenCard, cash_paid: cash, card_paid: Decimal::ZERO };

        let tx = settle(summary_of(dec!(14)), tender(dec!(4))).unwrap();
        assert_eq!(tx.payment_method, PaymentMethod::CashThenCard);
        assert_eq!(tx.card_paid, dec!(10));

        // Cash alone covered it
        let tx = settle(summary_of(dec!(14)), tender(dec!(15))).unwrap();
        assert_eq!(tx.payment_method, PaymentMethod::Cash);
        assert_eq!(tx.change_given, dec!(1));

        // Exact cash keeps the split label with nothing left for the card
        let tx = settle(summary_of(dec!(14)), tender(dec!(14))).unwrap();
        assert_eq!(tx.payment_method, PaymentMethod::CashThenCard);
        assert_eq!(tx.cash_paid, dec!(14));
        assert_eq!(tx.card_paid, Decimal::ZERO);
        assert_eq!(tx.change_given, Decimal::ZERO);
    }

    #[test]
    fn test_card_then_cash() {
        let tender = |card, cash| Tender { method: PaymentMethod::CardThenCash, cash_paid: cash, card_paid: card };

        let tx = settle(summary_of(dec!(14)), tender(dec!(10), dec!(5))).unwrap();
        assert_eq!(tx.payment_method, PaymentMethod::CardThenCash);
        assert_eq!(tx.change_given, dec!(1));

        let tx = settle(summary_of(dec!(14)), tender(dec!(14), Decimal::ZERO)).unwrap();
        assert_eq!(tx.payment_method, PaymentMethod::Card);

        let err = settle(summary_of(dec!(14)), tender(dec!(15), Decimal::ZERO)).unwrap_err();
        assert!(matches!(err, SettlementError::CardOverpayment { .. }));

        let err = settle(summary_of(dec!(14)), tender(dec!(10), dec!(3))).unwrap_err();
        assert_eq!(err, SettlementError::InsufficientPayment { required: dec!(4), paid: dec!(3) });
    }
}
