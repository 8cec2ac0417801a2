use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// One user-entered expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Nil for blobs written before ids existed; `Ledger::load` assigns one.
    #[serde(default)]
    pub id: Uuid,
    pub category: String,
    #[serde(default = "missing_amount", deserialize_with = "deserialize_stored_amount")]
    pub amount: f64,
    pub date: String,
}

impl ExpenseRecord {
    pub fn new(category: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            amount,
            date: date.into(),
        }
    }

    /// Checks the constraints every record in a ledger must satisfy.
    ///
    /// This is the configuration-independent subset of the checks `append`
    /// performs, used to screen records read back from storage.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if !is_valid_amount(self.amount) {
            return Err(ValidationError::InvalidAmount);
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }
        Ok(())
    }
}

pub(crate) fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn missing_amount() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Number(f64),
    Text(String),
}

/// Stored amounts may come back as JSON numbers or numeric strings; anything
/// unparseable becomes NaN so the load path can reject the record.
fn deserialize_stored_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StoredAmount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(StoredAmount::Number(value)) => value,
        Some(StoredAmount::Text(text)) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        None => f64::NAN,
    })
}
