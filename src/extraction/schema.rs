//! The fixed field contract shared with the remote extraction service.
//!
//! The schema is declarative data: field names, kinds, and ordering. It is
//! defined once for the whole process and never mutated. Providers render it
//! into whatever shape their wire format wants (a response schema object, an
//! inline JSON template); the assembler walks it to validate responses.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A free-text field; defaults to the empty string.
    Text,
    /// A numeric field; defaults to 0.0.
    Number,
}

impl FieldKind {
    /// Wire-format type name for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Number => "number",
        }
    }

    /// Declared default value for a field of this kind.
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Number => json!(0.0),
        }
    }

    /// Returns true if a raw JSON value conforms to this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Number => value.is_number(),
        }
    }
}

/// One field of the extraction contract.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// Declared kind.
    pub kind: FieldKind,
}

/// Declarative description of the target record: names, kinds, ordering.
#[derive(Debug, Clone)]
pub struct ExtractionSchema {
    fields: Vec<FieldSpec>,
}

impl ExtractionSchema {
    /// Creates a schema from an ordered field list.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Fields in declared order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the schema as a JSON template with every field at its
    /// declared default, for inlining into a prompt.
    pub fn template_json(&self) -> String {
        let mut template = serde_json::Map::with_capacity(self.fields.len());
        for spec in &self.fields {
            template.insert(spec.name.to_string(), spec.kind.default_value());
        }
        serde_json::to_string_pretty(&Value::Object(template))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Renders the schema as a machine-readable response-schema object:
    /// type, per-field types, and explicit property ordering.
    pub fn response_schema(&self) -> Value {
        let mut properties = serde_json::Map::with_capacity(self.fields.len());
        for spec in &self.fields {
            properties.insert(spec.name.to_string(), json!({ "type": spec.kind.type_name() }));
        }
        let ordering: Vec<&str> = self.fields.iter().map(|spec| spec.name).collect();
        json!({
            "type": "object",
            "properties": properties,
            "propertyOrdering": ordering,
        })
    }
}

/// The receipt transaction contract, in wire order.
pub static RECEIPT_SCHEMA: Lazy<ExtractionSchema> = Lazy::new(|| {
    use FieldKind::{Number, Text};
    ExtractionSchema::new(vec![
        FieldSpec { name: "transaction_id", kind: Text },
        FieldSpec { name: "amount", kind: Number },
        FieldSpec { name: "currency", kind: Text },
        FieldSpec { name: "date", kind: Text },
        FieldSpec { name: "time", kind: Text },
        FieldSpec { name: "sender_name", kind: Text },
        FieldSpec { name: "sender_account", kind: Text },
        FieldSpec { name: "receiver_name", kind: Text },
        FieldSpec { name: "receiver_account", kind: Text },
        FieldSpec { name: "bank_name", kind: Text },
        FieldSpec { name: "transaction_type", kind: Text },
        FieldSpec { name: "reference", kind: Text },
        FieldSpec { name: "status", kind: Text },
        FieldSpec { name: "fee", kind: Number },
        FieldSpec { name: "description", kind: Text },
    ])
});
