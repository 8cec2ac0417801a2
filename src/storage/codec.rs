use crate::{errors::Result, ledger::ExpenseRecord};

/// Serializes the full record sequence as a JSON array.
pub fn encode(records: &[ExpenseRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parses a stored JSON array. Amounts stored as strings are coerced to
/// numbers; records are not validated here.
pub fn decode(blob: &str) -> Result<Vec<ExpenseRecord>> {
    Ok(serde_json::from_str(blob)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;

    #[test]
    fn encodes_plain_array_of_objects() {
        let record = ExpenseRecord::new("Food", 49.99, "2024-01-11");
        let json = encode(std::slice::from_ref(&record)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["category"], "Food");
        assert_eq!(first["amount"], 49.99);
        assert_eq!(first["date"], "2024-01-11");
        assert_eq!(first["id"], record.id.to_string());
    }

    #[test]
    fn decodes_legacy_blob_without_ids() {
        let blob = r#"[{"category":"College Fee","amount":"150.5","date":"2024-01-10"}]"#;
        let records = decode(blob).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 150.5);
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let err = decode("{not json").unwrap_err();
        assert!(matches!(err, LedgerError::Serde(_)));
        let err = decode(r#"{"category":"Food"}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Serde(_)));
    }
}
