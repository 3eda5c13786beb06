//! The receipt transaction record and its assembler.
//!
//! A `ReceiptTransaction` is never partially constructed: assembly either
//! produces a record with every field present (defaults filled in) or fails
//! before one exists. Assembly is strict structural mapping only; whether an
//! amount is plausible is not this layer's concern.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::{PipelineError, PipelineResult};
use crate::core::traits::RawFieldMap;
use crate::extraction::schema::RECEIPT_SCHEMA;

/// Normalized transaction data extracted from one payment receipt.
///
/// Serializes to the outbound record shape: every field always present,
/// snake_case keys, `""` / `0.0` defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptTransaction {
    pub transaction_id: String,
    pub amount: f64,
    pub currency: String,
    pub date: String,
    pub time: String,
    pub sender_name: String,
    pub sender_account: String,
    pub receiver_name: String,
    pub receiver_account: String,
    pub bank_name: String,
    pub transaction_type: String,
    pub reference: String,
    pub status: String,
    pub fee: f64,
    pub description: String,
}

/// Maps raw extracted field values onto [`ReceiptTransaction`].
pub struct ReceiptAssembler;

impl ReceiptAssembler {
    /// Assembles a receipt record from a raw field map.
    ///
    /// The schema is walked in declared order: a missing or null field takes
    /// its declared default, a conforming value is carried over, and keys the
    /// schema does not declare are ignored. Integer JSON numbers are accepted
    /// for numeric fields; nothing else coerces.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Assembly` naming the first field whose value
    /// does not conform to its declared kind.
    pub fn assemble(raw: &RawFieldMap) -> PipelineResult<ReceiptTransaction> {
        let mut validated = serde_json::Map::with_capacity(RECEIPT_SCHEMA.len());
        for spec in RECEIPT_SCHEMA.fields() {
            let value = match raw.get(spec.name) {
                None | Some(Value::Null) => spec.kind.default_value(),
                Some(value) if spec.kind.matches(value) => value.clone(),
                Some(other) => {
                    return Err(PipelineError::assembly(
                        spec.name,
                        spec.kind.type_name(),
                        describe_value(other),
                    ));
                }
            };
            validated.insert(spec.name.to_string(), value);
        }

        serde_json::from_value(Value::Object(validated))
            .map_err(|e| PipelineError::assembly("record", "receipt transaction", e.to_string()))
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_map(value: Value) -> RawFieldMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn missing_fields_take_declared_defaults() {
        let raw = field_map(json!({
            "amount": 45.5,
            "currency": "USD",
            "bank_name": "ABC",
            "reference": "12345",
        }));
        let receipt = ReceiptAssembler::assemble(&raw).unwrap();
        assert_eq!(receipt.amount, 45.5);
        assert_eq!(receipt.currency, "USD");
        assert_eq!(receipt.bank_name, "ABC");
        assert_eq!(receipt.reference, "12345");
        assert_eq!(receipt.transaction_id, "");
        assert_eq!(receipt.fee, 0.0);
        assert_eq!(receipt.status, "");
    }

    #[test]
    fn empty_map_assembles_fully_defaulted_record() {
        let receipt = ReceiptAssembler::assemble(&RawFieldMap::new()).unwrap();
        assert_eq!(receipt, ReceiptTransaction::default());
    }

    #[test]
    fn null_field_takes_its_default() {
        let raw = field_map(json!({ "amount": null, "currency": null }));
        let receipt = ReceiptAssembler::assemble(&raw).unwrap();
        assert_eq!(receipt.amount, 0.0);
        assert_eq!(receipt.currency, "");
    }

    #[test]
    fn integer_amount_is_accepted() {
        let raw = field_map(json!({ "amount": 45 }));
        let receipt = ReceiptAssembler::assemble(&raw).unwrap();
        assert_eq!(receipt.amount, 45.0);
    }

    #[test]
    fn string_amount_is_an_assembly_error() {
        let raw = field_map(json!({ "amount": "45.50" }));
        let err = ReceiptAssembler::assemble(&raw).unwrap_err();
        match err {
            PipelineError::Assembly {
                field, expected, ..
            } => {
                assert_eq!(field, "amount");
                assert_eq!(expected, "number");
            }
            other => panic!("expected assembly error, got {other}"),
        }
    }

    #[test]
    fn numeric_text_field_is_an_assembly_error() {
        let raw = field_map(json!({ "bank_name": 42 }));
        assert!(ReceiptAssembler::assemble(&raw).is_err());
    }

    #[test]
    fn undeclared_keys_are_ignored() {
        let raw = field_map(json!({ "amount": 1.0, "not_in_schema": true }));
        let receipt = ReceiptAssembler::assemble(&raw).unwrap();
        assert_eq!(receipt.amount, 1.0);
    }

    #[test]
    fn record_serializes_with_every_field_present() {
        let value = serde_json::to_value(ReceiptTransaction::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 15);
        assert_eq!(object["amount"], json!(0.0));
        assert_eq!(object["description"], json!(""));
    }
}
