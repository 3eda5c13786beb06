//! Domain model: the receipt transaction record, its assembler, and typed
//! field rules.

pub mod receipt;
pub mod rules;

pub use receipt::{ReceiptAssembler, ReceiptTransaction};
pub use rules::{FieldRule, FieldValue};
