use rust_decimal::Decimal;
use tillpoint_core::{numeric::parse_decimal, EngineResult};
use tillpoint_shared::PriceDependency;
use tracing::warn;

use crate::pairing::FieldPair;

/// Value a dependency resolves to when it cannot be looked up.
///
/// Partially authored configurations rely on this being a plain number
/// rather than an error.
pub const UNRESOLVED: Decimal = Decimal::NEGATIVE_ONE;

/// Resolve a cross-field dependency to a number.
///
/// Finds the field named by `depends_on.name` among `pairs`, then reads
/// `depends_on.values[current_value][<that field's selected value>]`. Any
/// missing link yields [`UNRESOLVED`]; a present but malformed literal is
/// an error.
pub fn resolve(
    depends_on: &PriceDependency,
    current_value: &str,
    pairs: &[FieldPair<'_>],
) -> EngineResult<Decimal> {
    let source_value = pairs
        .iter()
        .find(|pair| pair.label() == depends_on.name)
        .and_then(|pair| pair.selected);

    let Some(source_value) = source_value else {
        warn!(source = %depends_on.name, "dependency source field has no selection");
        return Ok(UNRESOLVED);
    };

    let entry = depends_on
        .values
        .get(current_value)
        .and_then(|inner| inner.get(source_value.as_str()));

    match entry {
        Some(literal) => parse_decimal(literal.as_str()),
        None => {
            warn!(
                source = %depends_on.name,
                current = current_value,
                source_value = %source_value,
                "no dependency entry for selected combination"
            );
            Ok(UNRESOLVED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::pair_by_label;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tillpoint_core::EngineError;
    use tillpoint_shared::{FieldConfig, PricingConfig, SelectedConfig};

    fn schema() -> Vec<FieldConfig> {
        vec![
            FieldConfig::new("Size", PricingConfig::default()),
            FieldConfig::new("Topping", PricingConfig::default()),
        ]
    }

    fn topping_dependency() -> PriceDependency {
        serde_json::from_value(json!({
            "name": "Size",
            "values": {
                "Sprinkles": { "S": "0.50", "L": "0.75" },
                "Fudge": { "S": "1", "L": "oops" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolves_through_source_selection() {
        let schema = schema();
        let selections = vec![
            SelectedConfig::new("Topping", "Sprinkles"),
            SelectedConfig::new("Size", "L"),
        ];
        let pairs = pair_by_label(&schema, &selections);

        let value = resolve(&topping_dependency(), "Sprinkles", &pairs).unwrap();
        assert_eq!(value, dec!(0.75));
    }

    #[test]
    fn test_missing_links_resolve_to_sentinel() {
        let schema = schema();
        let dependency = topping_dependency();

        // Source field not selected
        let selections = vec![SelectedConfig::new("Topping", "Sprinkles")];
        let pairs = pair_by_label(&schema, &selections);
        assert_eq!(resolve(&dependency, "Sprinkles", &pairs).unwrap(), UNRESOLVED);

        // Own value not in the table
        let selections = vec![
            SelectedConfig::new("Size", "S"),
            SelectedConfig::new("Topping", "Nuts"),
        ];
        let pairs = pair_by_label(&schema, &selections);
        assert_eq!(resolve(&dependency, "Nuts", &pairs).unwrap(), dec!(-1));

        // Source value not in the inner table
        let selections = vec![
            SelectedConfig::new("Size", "XL"),
            SelectedConfig::new("Topping", "Fudge"),
        ];
        let pairs = pair_by_label(&schema, &selections);
        assert_eq!(resolve(&dependency, "Fudge", &pairs).unwrap(), dec!(-1));
    }

    #[test]
    fn test_malformed_entry_is_an_error() {
        let schema = schema();
        let selections = vec![
            SelectedConfig::new("Size", "L"),
            SelectedConfig::new("Topping", "Fudge"),
        ];
        let pairs = pair_by_label(&schema, &selections);

        let err = resolve(&topping_dependency(), "Fudge", &pairs).unwrap_err();
        assert!(matches!(err, EngineError::InvalidNumericLiteral(_)));
    }
}
