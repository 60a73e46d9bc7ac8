use std::collections::HashMap;
use tillpoint_shared::{FieldConfig, Literal, SelectedConfig};

/// A schema field together with the customer's value for it
#[derive(Debug, Clone, Copy)]
pub struct FieldPair<'a> {
    pub field: &'a FieldConfig,
    pub selected: Option<&'a Literal>,
}

impl<'a> FieldPair<'a> {
    pub fn label(&self) -> &'a str {
        &self.field.label
    }
}

/// Pair each schema field with the selection carrying the same label.
///
/// Pairs come back in schema order. Selections are matched by label, so the
/// two sequences may be ordered differently; a field with no selection gets
/// `None`. If a label is selected twice the first occurrence wins.
pub fn pair_by_label<'a>(
    schema: &'a [FieldConfig],
    selections: &'a [SelectedConfig],
) -> Vec<FieldPair<'a>> {
    let mut by_label: HashMap<&str, &Literal> = HashMap::with_capacity(selections.len());
    for selection in selections {
        by_label.entry(selection.label.as_str()).or_insert(&selection.value);
    }

    schema
        .iter()
        .map(|field| FieldPair {
            field,
            selected: by_label.get(field.label.as_str()).copied(),
        })
        .collect()
}
