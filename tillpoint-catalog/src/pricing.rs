use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillpoint_core::numeric::{parse_decimal, round_money};
use tillpoint_core::{EngineError, EngineResult, Operator};
use tillpoint_shared::{FieldConfig, PriceBy, SelectedConfig};
use tracing::{debug, warn};

use crate::dependency;
use crate::pairing::{pair_by_label, FieldPair};

/// Final price of one unit of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Price including tax, never negative
    pub price: Decimal,
    /// Tax on the unclamped pre-tax total, negative for net discounts
    pub tax: Decimal,
    /// Price before tax, never negative
    pub subtotal: Decimal,
}

/// Intermediate accumulators of a price evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    /// Applied in order by sequential multiplication
    pub multipliers: Vec<Decimal>,
    /// Summed after all multipliers
    pub adders: Vec<Decimal>,
}

impl PriceBreakdown {
    /// Unrounded, unclamped price before tax
    pub fn pre_tax(&self) -> EngineResult<Decimal> {
        let scaled = self
            .multipliers
            .iter()
            .try_fold(self.base_price, |acc, m| Operator::Multiply.apply(*m, acc))?;
        self.adders
            .iter()
            .try_fold(scaled, |acc, a| Operator::Add.apply(*a, acc))
    }
}

/// Where a single field's value ends up
enum Contribution {
    Base(Decimal),
    Adder(Decimal),
    Multiplier(Decimal),
}

/// Evaluation pass of a pricing strategy.
///
/// Fixed contributions go first, then scaled and dependency ones, and raw
/// option-value multipliers last.
fn evaluation_tier(price_by: PriceBy) -> u8 {
    match price_by {
        PriceBy::Constant | PriceBy::PerOption | PriceBy::Input | PriceBy::Unpriced => 0,
        PriceBy::ScaledOptionValue | PriceBy::Dependency => 1,
        PriceBy::OptionValue => 2,
    }
}

/// Prices an item from its field schema and a customer's selections
pub struct PriceEvaluator<'a> {
    schema: &'a [FieldConfig],
}

impl<'a> PriceEvaluator<'a> {
    pub fn new(schema: &'a [FieldConfig]) -> Self {
        Self { schema }
    }

    /// Price with tax applied at `tax_rate_percent`.
    pub fn evaluate(
        &self,
        selections: &[SelectedConfig],
        tax_rate_percent: Decimal,
    ) -> EngineResult<PriceQuote> {
        let breakdown = self.breakdown(selections)?;
        let pre_tax = breakdown.pre_tax()?;
        // Tax follows the unclamped total; only the returned price is floored
        let tax = Operator::Multiply.apply(tax_rate_percent, pre_tax)? / Decimal::ONE_HUNDRED;
        let price = Operator::Add.apply(tax, pre_tax)?;

        let quote = PriceQuote {
            price: round_money(price.max(Decimal::ZERO)),
            tax: round_money(tax),
            subtotal: round_money(pre_tax.max(Decimal::ZERO)),
        };
        debug!(price = %quote.price, tax = %quote.tax, "evaluated price");
        Ok(quote)
    }

    /// Accumulate base price, multipliers and adders without applying tax.
    pub fn breakdown(&self, selections: &[SelectedConfig]) -> EngineResult<PriceBreakdown> {
        let pairs = pair_by_label(self.schema, selections);

        let mut ordered = pairs.clone();
        // sort_by_key is stable, declaration order survives within a tier
        ordered.sort_by_key(|pair| evaluation_tier(pair.field.pricing_config.price_by));

        let mut breakdown = PriceBreakdown::default();
        for pair in &ordered {
            let Some(contribution) = contribution(pair, &pairs)? else {
                continue;
            };

            match contribution {
                Contribution::Base(value) => {
                    let op: Operator = pair.field.pricing_config.price_factor.parse()?;
                    if op == Operator::Multiply && breakdown.base_price.is_zero() {
                        warn!(
                            field = pair.label(),
                            "multiplicative base price against an empty base stays zero"
                        );
                    }
                    breakdown.base_price = op.apply(value, breakdown.base_price)?;
                }
                Contribution::Adder(value) => breakdown.adders.push(value),
                Contribution::Multiplier(value) => breakdown.multipliers.push(value),
            }
        }

        Ok(breakdown)
    }
}

/// Price `selections` against `schema` in one call.
pub fn evaluate(
    schema: &[FieldConfig],
    selections: &[SelectedConfig],
    tax_rate_percent: Decimal,
) -> EngineResult<PriceQuote> {
    PriceEvaluator::new(schema).evaluate(selections, tax_rate_percent)
}

fn contribution(pair: &FieldPair<'_>, all: &[FieldPair<'_>]) -> EngineResult<Option<Contribution>> {
    let config = &pair.field.pricing_config;
    if !config.affects_price || config.price_by == PriceBy::Unpriced {
        return Ok(None);
    }

    let selected = if config.price_by.reads_selection() {
        let value = pair
            .selected
            .ok_or_else(|| EngineError::SelectionNotFound(pair.field.label.clone()))?;
        value.as_str()
    } else {
        ""
    };

    let contribution = match config.price_by {
        PriceBy::Constant | PriceBy::Input => {
            let value = parse_decimal(config.constant_value.as_str())?;
            if config.is_base_price {
                Contribution::Base(value)
            } else if config.is_additive() {
                Contribution::Adder(value)
            } else {
                Contribution::Multiplier(value)
            }
        }
        PriceBy::PerOption => {
            let value = match config.per_option_mapping.get(selected) {
                Some(literal) => parse_decimal(literal.as_str())?,
                None => Decimal::ZERO,
            };
            if config.is_base_price {
                Contribution::Base(value)
            } else {
                Contribution::Adder(value)
            }
        }
        PriceBy::OptionValue => Contribution::Multiplier(parse_decimal(selected)?),
        PriceBy::ScaledOptionValue => {
            let scale = parse_decimal(config.constant_value.as_str())?;
            Contribution::Multiplier(Operator::Multiply.apply(parse_decimal(selected)?, scale)?)
        }
        PriceBy::Dependency => {
            let depends_on = config
                .depends_on
                .as_ref()
                .ok_or_else(|| EngineError::MissingDependencyConfig(pair.field.label.clone()))?;
            let value = dependency::resolve(depends_on, selected, all)?;
            if config.is_additive() {
                Contribution::Adder(value)
            } else {
                Contribution::Multiplier(value)
            }
        }
        PriceBy::Unpriced => return Ok(None),
    };

    debug!(field = pair.label(), price_by = ?config.price_by, "field contributes to price");
    Ok(Some(contribution))
}
