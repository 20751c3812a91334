//! Record data structure.

use serde::{Deserialize, Serialize};

use crate::models::Field;
use crate::utils::format_amount;

/// One register entry, typed per the field schema.
///
/// Values are stored in display form and in schema order. The amount also
/// keeps its numeric value, and the category keeps a lowercase key for
/// equality filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    values: [String; 5],
    amount: f64,
    category_key: String,
}

impl Record {
    /// Build a record from raw field values. The amount is formatted with
    /// thousands separators and the category key derived here.
    pub fn new(
        narration: impl Into<String>,
        amount: f64,
        cheque_no: impl Into<String>,
        category: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let category_key = category.to_lowercase();
        Self {
            values: [
                narration.into(),
                format_amount(amount),
                cheque_no.into(),
                category,
                status.into(),
            ],
            amount,
            category_key,
        }
    }

    /// Display value of a field.
    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// All display values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category_key(&self) -> &str {
        &self.category_key
    }
}
