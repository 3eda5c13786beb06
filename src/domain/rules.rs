//! Typed field comparison rules for post-assembly checks.
//!
//! A small closed set of rules over an explicit tagged value, instead of
//! runtime type inspection. Callers that want to gate on an assembled record
//! (a non-empty bank name, a bounded fee) evaluate rules against the
//! record's field values; the pipeline itself applies none of them.

use crate::domain::receipt::ReceiptTransaction;

/// A field value lifted into an explicit tagged representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A comparison rule over a [`FieldValue`].
///
/// Rules only apply to the kinds they make sense for; a kind mismatch fails
/// the check rather than coercing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Value must equal the given one, same kind included.
    Equals(FieldValue),
    /// Text value must have at least this many characters.
    MinLen(usize),
    /// Numeric value must be at least this.
    Min(f64),
    /// Numeric value must be at most this.
    Max(f64),
}

impl FieldRule {
    /// Evaluates the rule against a value.
    pub fn check(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (FieldRule::Equals(expected), actual) => expected == actual,
            (FieldRule::MinLen(min), FieldValue::Text(text)) => text.chars().count() >= *min,
            (FieldRule::MinLen(_), _) => false,
            (FieldRule::Min(min), FieldValue::Int(i)) => *i as f64 >= *min,
            (FieldRule::Min(min), FieldValue::Float(f)) => *f >= *min,
            (FieldRule::Min(_), _) => false,
            (FieldRule::Max(max), FieldValue::Int(i)) => *i as f64 <= *max,
            (FieldRule::Max(max), FieldValue::Float(f)) => *f <= *max,
            (FieldRule::Max(_), _) => false,
        }
    }
}

impl ReceiptTransaction {
    /// Looks up a field by wire name as a tagged value.
    ///
    /// Returns `None` for names the record does not declare.
    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "transaction_id" => FieldValue::Text(self.transaction_id.clone()),
            "amount" => FieldValue::Float(self.amount),
            "currency" => FieldValue::Text(self.currency.clone()),
            "date" => FieldValue::Text(self.date.clone()),
            "time" => FieldValue::Text(self.time.clone()),
            "sender_name" => FieldValue::Text(self.sender_name.clone()),
            "sender_account" => FieldValue::Text(self.sender_account.clone()),
            "receiver_name" => FieldValue::Text(self.receiver_name.clone()),
            "receiver_account" => FieldValue::Text(self.receiver_account.clone()),
            "bank_name" => FieldValue::Text(self.bank_name.clone()),
            "transaction_type" => FieldValue::Text(self.transaction_type.clone()),
            "reference" => FieldValue::Text(self.reference.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            "fee" => FieldValue::Float(self.fee),
            "description" => FieldValue::Text(self.description.clone()),
            _ => return None,
        };
        Some(value)
    }
}
