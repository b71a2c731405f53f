use serde_json::Value;

use crate::utils::{clamp_amount, coerce_amount};

use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Earning,
    Deduction,
}

/// A single field edit on a line item, the amount arrives exactly as typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LineItemField {
    Name(String),
    Amount(Value),
}

/// Custom earnings or deductions in insertion order. Names are free-form and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems(Vec<LineItem>);

impl LineItems {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self(items).clamped()
    }

    /// Amounts held to `0..=MAX_AMOUNT`, as if each had been typed in
    pub fn clamped(self) -> Self {
        self.0
            .into_iter()
            .map(|item| LineItem {
                amount: clamp_amount(item.amount),
                ..item
            })
            .collect()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_empty(mut self) -> Self {
        self.0.push(LineItem::default());
        self
    }

    /// Out of range indexes leave the list untouched
    pub fn update(mut self, index: usize, field: LineItemField) -> Self {
        if let Some(item) = self.0.get_mut(index) {
            match field {
                LineItemField::Name(name) => item.name = name,
                LineItemField::Amount(raw) => item.amount = coerce_amount(&raw),
            }
        }

        self
    }

    pub fn remove(mut self, index: usize) -> Self {
        if index < self.0.len() {
            self.0.remove(index);
        }

        self
    }

    /// Negative amounts count as zero
    pub fn sum(&self) -> Decimal {
        round2(
            self.0
                .iter()
                .map(|item| clamp_amount(item.amount))
                .sum::<Decimal>(),
        )
    }
}

impl FromIterator<LineItem> for LineItems {
    fn from_iter<T: IntoIterator<Item = LineItem>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
